use std::collections::HashMap;

use rocket::http::{Cookie, CookieJar, SameSite};

/// Durable key/value store for client preferences.
pub trait Storage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str);
    fn remove_item(&mut self, key: &str);
}

/// In-process store. Cloning it snapshots the contents, which is how tests
/// simulate a page reload with the same storage state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }

    fn remove_item(&mut self, key: &str) {
        self.items.remove(key);
    }
}

/// Preference store backed by the request's cookie jar.
#[derive(Clone, Copy)]
pub struct CookieStorage<'r> {
    jar: &'r CookieJar<'r>,
}

impl<'r> CookieStorage<'r> {
    pub fn new(jar: &'r CookieJar<'r>) -> Self {
        CookieStorage { jar }
    }
}

impl Storage for CookieStorage<'_> {
    fn get_item(&self, key: &str) -> Option<String> {
        // Pending lookup so a value set earlier in the same request is visible.
        self.jar
            .get_pending(key)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
    }

    fn set_item(&mut self, key: &str, value: &str) {
        let mut cookie = Cookie::new(key.to_string(), value.to_string());
        cookie.set_path("/");
        cookie.set_same_site(SameSite::Lax);
        cookie.make_permanent();
        self.jar.add(cookie);
    }

    fn remove_item(&mut self, key: &str) {
        self.jar.remove(Cookie::from(key.to_string()));
    }
}
