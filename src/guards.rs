use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;
use rocket::request::{FromRequest, Outcome, Request};

use crate::config::Config;
use crate::i18n::{LanguageSwitcher, LANG_PARAM};
use crate::prefs::CookieStorage;
use crate::theme::{PlaceholderTint, Theme, ThemeManager};

pub const COLOR_SCHEME_HINT: &str = "Sec-CH-Prefers-Color-Scheme";

/// OS colour scheme as reported by the `Sec-CH-Prefers-Color-Scheme`
/// client hint. Browsers only send it after seeing `Accept-CH`.
pub struct SystemTheme(pub Option<Theme>);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for SystemTheme {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let theme = request
            .headers()
            .get_one(COLOR_SCHEME_HINT)
            .and_then(Theme::parse);
        Outcome::Success(SystemTheme(theme))
    }
}

/// Primary tag of `Accept-Language`, e.g. `uz-UZ`.
pub struct BrowserLocale(pub Option<String>);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for BrowserLocale {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let locale = request
            .headers()
            .get_one("Accept-Language")
            .and_then(|v| v.split(',').next())
            .map(|tag| tag.split(';').next().unwrap_or("").trim().to_lowercase())
            .filter(|tag| !tag.is_empty() && tag != "*");
        Outcome::Success(BrowserLocale(locale))
    }
}

/// Theme and language state for one page request, backed by the cookie jar.
pub struct PagePrefs<'r> {
    pub theme: ThemeManager<CookieStorage<'r>>,
    pub language: LanguageSwitcher<CookieStorage<'r>>,
    pub tint: PlaceholderTint,
    /// Path and query of the request.
    pub location: String,
}

impl PagePrefs<'_> {
    /// Translate tagged nodes and retint placeholders for the final page.
    pub fn finish(&self, html: &str) -> String {
        self.tint.apply(&self.language.apply(html))
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for PagePrefs<'r> {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let defaults = Config::default();
        let config = request.rocket().state::<Config>().unwrap_or(&defaults);
        let (default_theme, default_language) = (config.default_theme, config.default_language);

        let SystemTheme(system) = match request.guard::<SystemTheme>().await {
            Outcome::Success(t) => t,
            _ => SystemTheme(None),
        };
        let BrowserLocale(locale) = match request.guard::<BrowserLocale>().await {
            Outcome::Success(l) => l,
            _ => BrowserLocale(None),
        };

        let jar = request.cookies();
        let mut theme = ThemeManager::new(CookieStorage::new(jar), system, default_theme);
        let tint = PlaceholderTint::attach(&mut theme);
        theme.init();

        let lang_param = request
            .query_value::<&str>(LANG_PARAM)
            .and_then(|v| v.ok());
        let language = LanguageSwitcher::new(
            CookieStorage::new(jar),
            lang_param,
            locale.as_deref(),
            default_language,
        );

        Outcome::Success(PagePrefs {
            theme,
            language,
            tint,
            location: request.uri().to_string(),
        })
    }
}

/// Ask browsers for the colour-scheme hint and mark responses as varying
/// on it.
pub struct ClientHints;

#[rocket::async_trait]
impl Fairing for ClientHints {
    fn info(&self) -> Info {
        Info {
            name: "Color Scheme Client Hint",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _req: &'r Request<'_>, res: &mut rocket::Response<'r>) {
        res.set_header(Header::new("Accept-CH", COLOR_SCHEME_HINT));
        res.set_header(Header::new("Vary", COLOR_SCHEME_HINT));
    }
}
