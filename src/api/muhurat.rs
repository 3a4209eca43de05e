//! Daily muhurat lookup for a date and coordinates.

use super::transport::Backend;
use super::types::{ApiError, MuhuratData};
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
struct MuhuratEnvelope {
    data: MuhuratData,
}

pub struct MuhuratClient<B> {
    backend: B,
}

impl<B: Backend> MuhuratClient<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// One request, no retry. The body's `data` object is adopted as-is.
    pub fn fetch(&self, date: NaiveDate, lat: f64, lon: f64) -> Result<MuhuratData, ApiError> {
        let body = self.backend.get_json(
            "/api/muhurat",
            &[
                ("date", date.format("%Y-%m-%d").to_string()),
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
            ],
        )?;

        let envelope: MuhuratEnvelope =
            serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeBackend;
    use serde_json::json;

    fn may_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_fetch_sends_date_and_coordinates() {
        let backend = FakeBackend::new().reply(json!({"data": {"sunrise": "2024-05-01T06:03:00Z"}}));
        let data = MuhuratClient::new(&backend).fetch(may_day(), 23.02, 72.57).unwrap();

        assert_eq!(data.sunrise, "2024-05-01T06:03:00Z");
        assert_eq!(backend.calls.borrow()[0].0, "/api/muhurat");
        assert_eq!(backend.param(0, "date").as_deref(), Some("2024-05-01"));
        assert_eq!(backend.param(0, "lat").as_deref(), Some("23.02"));
        assert_eq!(backend.param(0, "lon").as_deref(), Some("72.57"));
    }

    #[test]
    fn test_negative_coordinates() {
        let backend = FakeBackend::new().reply(json!({"data": {}}));
        MuhuratClient::new(&backend).fetch(may_day(), -33.87, -151.2).unwrap();
        assert_eq!(backend.param(0, "lat").as_deref(), Some("-33.87"));
        assert_eq!(backend.param(0, "lon").as_deref(), Some("-151.2"));
    }

    #[test]
    fn test_null_fields_in_reply_still_fetch() {
        let backend = FakeBackend::new()
            .reply(json!({"data": {"tithi": null, "sunrise": null, "vaara": "Wednesday"}}));
        let data = MuhuratClient::new(&backend).fetch(may_day(), 23.02, 72.57).unwrap();
        assert!(data.tithi.is_empty());
        assert_eq!(data.sunrise, "");
        assert_eq!(data.vaara, "Wednesday");
    }

    #[test]
    fn test_missing_data_envelope_is_decode_error() {
        let backend = FakeBackend::new().reply(json!({"error": "bad date"}));
        let err = MuhuratClient::new(&backend).fetch(may_day(), 0.0, 0.0).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_status_error_passes_through() {
        let backend = FakeBackend::new().fail(ApiError::Status { code: 500 });
        let err = MuhuratClient::new(&backend).fetch(may_day(), 0.0, 0.0).unwrap_err();
        assert_eq!(err.to_string(), "Server returned HTTP 500");
        assert_eq!(backend.call_count(), 1);
    }
}
