//! Minimal cookie jar for a single backend origin
//!
//! The backend authenticates with a session cookie and protects deletes
//! with a CSRF cookie that has to be echoed in a header. Only name/value
//! pairs matter here; path and domain attributes are ignored because the
//! jar never talks to more than one origin.

use std::collections::BTreeMap;

use parking_lot::Mutex;
use tracing::trace;

#[derive(Debug, Default)]
pub struct CookieJar {
    cookies: Mutex<BTreeMap<String, String>>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one `Set-Cookie` header value
    pub fn absorb(&self, set_cookie: &str) {
        let mut parts = set_cookie.split(';');
        let Some((name, value)) = parts.next().and_then(|pair| pair.split_once('=')) else {
            return;
        };
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let value = value.trim().trim_matches('"');

        let expired = parts.any(|attr| {
            let attr = attr.trim();
            attr.eq_ignore_ascii_case("max-age=0")
                || attr
                    .split_once('=')
                    .is_some_and(|(k, v)| k.trim().eq_ignore_ascii_case("max-age") && v.trim().starts_with('-'))
        });

        let mut cookies = self.cookies.lock();
        if expired || value.is_empty() {
            trace!("Cookie removed: {}", name);
            cookies.remove(name);
        } else {
            trace!("Cookie stored: {}", name);
            cookies.insert(name.to_string(), value.to_string());
        }
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.cookies.lock().get(name).cloned()
    }

    pub fn set(&self, name: &str, value: &str) {
        self.cookies.lock().insert(name.to_string(), value.to_string());
    }

    pub fn remove(&self, name: &str) {
        self.cookies.lock().remove(name);
    }

    pub fn clear(&self) {
        self.cookies.lock().clear();
    }

    /// Value for the `Cookie` request header, if anything is stored
    pub fn header_value(&self) -> Option<String> {
        let cookies = self.cookies.lock();
        if cookies.is_empty() {
            return None;
        }
        Some(
            cookies
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}
