use serde::{Deserialize, Serialize};

/// Body of `POST /api/contact`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub message: String,
}

/// Contact form as posted by the browser. Missing fields decode as empty so
/// the validator, not the form guard, reports them.
#[derive(Debug, FromForm)]
pub struct ContactForm {
    #[field(name = "firstName", default = String::new())]
    pub first_name: String,
    #[field(name = "lastName", default = String::new())]
    pub last_name: String,
    #[field(name = "phoneNumber", default = String::new())]
    pub phone_number: String,
    #[field(default = String::new())]
    pub message: String,
}

impl From<ContactForm> for ContactMessage {
    fn from(form: ContactForm) -> Self {
        ContactMessage {
            first_name: form.first_name,
            last_name: form.last_name,
            phone_number: form.phone_number,
            message: form.message,
        }
    }
}
