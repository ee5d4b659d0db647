use rocket::form::Form;
use rocket::response::status::BadRequest;
use rocket::serde::json::Json;
use serde_json::{json, Value};

use crate::contact::{validate_field, Field, FieldState};

#[derive(Debug, FromForm)]
pub struct FieldInput<'r> {
    field: &'r str,
    #[field(default = "")]
    value: &'r str,
}

/// Live validation of a single contact form field.
#[post("/contact/validate", data = "<input>")]
pub fn validate(input: Form<FieldInput<'_>>) -> Result<Json<FieldState>, BadRequest<Json<Value>>> {
    match Field::parse(input.field) {
        Some(field) => Ok(Json(validate_field(field, input.value))),
        None => Err(BadRequest(Json(json!({
            "error": format!("unknown field: {}", input.field)
        })))),
    }
}

pub fn routes() -> Vec<rocket::Route> {
    routes![validate]
}
