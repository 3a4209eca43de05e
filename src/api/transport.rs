//! GET + JSON transport.

use super::types::ApiError;
use serde_json::Value;
use std::time::Duration;

/// Something that can issue a GET with query parameters and hand back the
/// decoded JSON body.
pub trait Backend {
    fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError>;
}

impl<T: Backend + ?Sized> Backend for &T {
    fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        (**self).get_json(path, query)
    }
}

/// `ureq`-backed transport against a fixed base URL.
#[derive(Clone)]
pub struct HttpBackend {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("ShubhMuhurat/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Backend for HttpBackend {
    fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        let url = build_url(&self.base_url, path, query);
        tracing::debug!(%url, "GET");

        let response = self.agent.get(&url).call().map_err(|e| match e {
            ureq::Error::Status(code, _) => ApiError::Status { code },
            other => ApiError::Transport(other.to_string()),
        })?;

        response
            .into_json::<Value>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Join base, path and percent-encoded query pairs.
pub fn build_url(base: &str, path: &str, query: &[(&str, String)]) -> String {
    let mut url = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    for (i, (key, value)) in query.iter().enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        url.push_str(&urlencode(key));
        url.push('=');
        url.push_str(&urlencode(value));
    }
    url
}

fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => out.push(b as char),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}
