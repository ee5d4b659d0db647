#[macro_use]
extern crate rocket;

mod api;
mod binder;
mod config;
mod contact;
mod error;
mod events;
mod guards;
mod i18n;
mod listing;
mod models;
mod prefs;
mod render;
mod routes;
mod theme;
mod views;


use rocket::response::content::RawHtml;
use rocket::{Build, Rocket};

use api::{ApiClient, HttpTransport};
use config::Config;

fn error_page(body: String) -> RawHtml<String> {
    RawHtml(format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>Error</title></head><body style='font-family:sans-serif'>{}</body></html>",
        body
    ))
}

#[catch(404)]
fn not_found() -> RawHtml<String> {
    error_page(render::render_404())
}

#[catch(500)]
fn server_error() -> RawHtml<String> {
    error_page(render::render_500())
}

/// Assemble the application around an API client.
pub fn build(config: Config, api: ApiClient) -> Rocket<Build> {
    rocket::build()
        .manage(config)
        .manage(api)
        .attach(guards::ClientHints)
        .mount("/", routes::public::routes())
        .mount("/", routes::prefs::routes())
        .mount("/api", routes::api::routes())
        .register("/", catchers![not_found, server_error])
}

#[launch]
fn rocket() -> _ {
    env_logger::init();

    let config = Config::load().unwrap_or_else(|e| {
        log::warn!("[config] {}; falling back to defaults", e);
        let mut config = Config::default();
        config.apply_env(|key| std::env::var(key).ok());
        config
    });
    let transport = HttpTransport::new().expect("Failed to initialize HTTP client");
    let api = ApiClient::new(&config.api_base, Box::new(transport));

    eprintln!("Backend API: {}", api.base());

    build(config, api)
}
