//! Session Store
//!
//! Private cookie jar holding the session cookie. Each client owns its own
//! jar, so sessions are never shared between clients.

use std::sync::Arc;

use reqwest::Url;
use reqwest::cookie::{CookieStore, Jar};

#[derive(Clone, Default)]
pub struct SessionStore {
    jar: Arc<Jar>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The jar to hand to the HTTP client
    pub(crate) fn jar(&self) -> Arc<Jar> {
        self.jar.clone()
    }

    /// `Cookie` header value the next request to `url` would carry
    pub fn cookies_for(&self, url: &Url) -> Option<String> {
        self.jar
            .cookies(url)
            .and_then(|value| value.to_str().ok().map(str::to_string))
    }

    /// Whether a session cookie is held for `url`
    pub fn has_session(&self, url: &Url, cookie_name: &str) -> bool {
        self.cookies_for(url).is_some_and(|cookies| {
            cookies
                .split(';')
                .filter_map(|pair| pair.trim().split_once('='))
                .any(|(name, _)| name == cookie_name)
        })
    }
}
