//! City-name autosuggest.

use super::transport::Backend;
use super::types::{ApiError, CityCandidate};
use serde::Deserialize;

/// Shorter input is answered locally with no suggestions.
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Deserialize)]
struct GeocodeEnvelope {
    #[serde(default)]
    suggestions: Vec<CityCandidate>,
}

pub struct GeocodeClient<B> {
    backend: B,
}

impl<B: Backend> GeocodeClient<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Ranked candidates for a partial city name, in server order.
    ///
    /// Never fails: short input and any remote failure both yield an empty
    /// list, the latter with a warning in the log.
    pub fn suggest(&self, partial: &str) -> Vec<CityCandidate> {
        match self.try_suggest(partial) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(query = partial, "geocode lookup failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Like [`suggest`](Self::suggest) but reports remote failures.
    pub fn try_suggest(&self, partial: &str) -> Result<Vec<CityCandidate>, ApiError> {
        if partial.chars().count() < MIN_QUERY_CHARS {
            return Ok(Vec::new());
        }

        let body = self
            .backend
            .get_json("/api/geocode", &[("city", partial.to_string())])?;
        let envelope: GeocodeEnvelope =
            serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;

        tracing::debug!(query = partial, count = envelope.suggestions.len(), "geocode suggestions");
        Ok(envelope.suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeBackend;
    use serde_json::json;

    #[test]
    fn test_short_input_never_calls_backend() {
        let backend = FakeBackend::new();
        let client = GeocodeClient::new(&backend);
        for input in ["", "a", "અ", " "] {
            assert!(client.suggest(input).is_empty());
        }
        assert_eq!(backend.call_count(), 0);
    }

    #[test]
    fn test_two_chars_issue_request() {
        let backend = FakeBackend::new().reply(json!({"suggestions": []}));
        let client = GeocodeClient::new(&backend);
        assert!(client.suggest("ah").is_empty());
        assert_eq!(backend.call_count(), 1);
        assert_eq!(backend.param(0, "city").as_deref(), Some("ah"));
        assert_eq!(backend.calls.borrow()[0].0, "/api/geocode");
    }

    #[test]
    fn test_suggestions_keep_server_order() {
        let backend = FakeBackend::new().reply(json!({"suggestions": [
            {"cityName": "Ahmedabad", "lat": 23.02, "lon": 72.57},
            {"cityName": "Ahmednagar", "lat": 19.09, "lon": 74.74}
        ]}));
        let list = GeocodeClient::new(&backend).suggest("ahm");
        let names: Vec<_> = list.iter().map(|c| c.city_name.as_str()).collect();
        assert_eq!(names, ["Ahmedabad", "Ahmednagar"]);
    }

    #[test]
    fn test_transport_failure_degrades_to_empty() {
        let backend = FakeBackend::new().fail(ApiError::Transport("connection refused".into()));
        assert!(GeocodeClient::new(&backend).suggest("Surat").is_empty());
    }

    #[test]
    fn test_malformed_body_degrades_to_empty() {
        let backend = FakeBackend::new().reply(json!({"suggestions": "nope"}));
        let client = GeocodeClient::new(&backend);
        assert!(client.suggest("Surat").is_empty());
    }

    #[test]
    fn test_try_suggest_reports_errors() {
        let backend = FakeBackend::new().fail(ApiError::Status { code: 502 });
        let err = GeocodeClient::new(&backend).try_suggest("Surat").unwrap_err();
        assert!(matches!(err, ApiError::Status { code: 502 }));
    }

    #[test]
    fn test_missing_suggestions_key_is_empty() {
        let backend = FakeBackend::new().reply(json!({}));
        assert!(GeocodeClient::new(&backend).try_suggest("Rajkot").unwrap().is_empty());
    }
}
