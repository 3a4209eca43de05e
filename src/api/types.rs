//! Wire types shared by the API clients.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A city suggestion from the geocode endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityCandidate {
    pub city_name: String,
    pub lat: f64,
    pub lon: f64,
}

impl fmt::Display for CityCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.lat >= 0.0 { "N" } else { "S" };
        let ew = if self.lon >= 0.0 { "E" } else { "W" };
        write!(
            f,
            "{} ({:.4}°{}, {:.4}°{})",
            self.city_name,
            self.lat.abs(),
            ns,
            self.lon.abs(),
            ew
        )
    }
}

/// One day's panchang as returned by the muhurat endpoint.
///
/// Absent fields default to empty so a partial body still renders.
/// Fields this client does not know are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MuhuratData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub sunrise: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sunset: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub moonrise: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub moonset: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vaara: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tithi: Vec<Tithi>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nakshatra: Vec<Nakshatra>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub karana: Vec<Period>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub yoga: Vec<Period>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Absent and `null` both read as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Lunar day, tagged with its fortnight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tithi {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paksha: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub end: String,
}

/// Lunar mansion with its ruling graha.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nakshatra {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lord: Option<Lord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub end: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// A named window with no extra fields (karana, yoga).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Period {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub end: String,
}

/// Remote call failures.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Server returned HTTP {code}")]
    Status { code: u16 },

    #[error("Invalid API response: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_candidate_wire_names() {
        let c: CityCandidate =
            serde_json::from_value(json!({"cityName": "Ahmedabad", "lat": 23.02, "lon": 72.57})).unwrap();
        assert_eq!(c.city_name, "Ahmedabad");
        approx::assert_abs_diff_eq!(c.lat, 23.02);
        approx::assert_abs_diff_eq!(c.lon, 72.57);
    }

    #[test]
    fn test_candidate_display() {
        let c = CityCandidate { city_name: "Lima".into(), lat: -12.0464, lon: -77.0428 };
        assert_eq!(c.to_string(), "Lima (12.0464°S, 77.0428°W)");
    }

    #[test]
    fn test_muhurat_data_full_body() {
        let data: MuhuratData = serde_json::from_value(json!({
            "sunrise": "2024-05-01T00:33:00Z",
            "sunset": "2024-05-01T13:40:00Z",
            "moonrise": "2024-05-01T19:10:00Z",
            "moonset": "2024-05-01T07:02:00Z",
            "vaara": "Wednesday",
            "tithi": [{"id": 8, "name": "Ashtami", "paksha": "Krishna Paksha",
                       "start": "2024-04-30T22:00:00Z", "end": "2024-05-01T20:01:00Z"}],
            "nakshatra": [{"id": 22, "name": "Shravana", "lord": {"name": "Moon"},
                           "start": "2024-04-30T18:00:00Z", "end": "2024-05-01T16:00:00Z"}],
            "karana": [{"name": "Kaulava", "start": "a", "end": "b"}],
            "yoga": [{"name": "Shukla", "start": "c", "end": "d"}],
            "ayanamsa": 24.19
        }))
        .unwrap();

        assert_eq!(data.vaara, "Wednesday");
        assert_eq!(data.tithi[0].paksha.as_deref(), Some("Krishna Paksha"));
        assert_eq!(data.nakshatra[0].lord.as_ref().unwrap().name, "Moon");
        assert_eq!(data.karana[0].name, "Kaulava");
        assert_eq!(data.yoga[0].end, "d");
        assert_eq!(data.extra.get("ayanamsa"), Some(&json!(24.19)));
    }

    #[test]
    fn test_muhurat_data_sparse_body() {
        let data: MuhuratData = serde_json::from_value(json!({"sunrise": "x"})).unwrap();
        assert_eq!(data.sunrise, "x");
        assert!(data.tithi.is_empty());
        assert!(data.vaara.is_empty());
    }

    #[test]
    fn test_null_arrays_read_as_empty() {
        let data: MuhuratData = serde_json::from_value(json!({
            "sunrise": "2024-05-01T00:33:00Z",
            "tithi": null,
            "nakshatra": null,
            "karana": null,
            "yoga": [{"name": "Shukla", "start": "c", "end": "d"}]
        }))
        .unwrap();
        assert!(data.tithi.is_empty());
        assert!(data.nakshatra.is_empty());
        assert!(data.karana.is_empty());
        assert_eq!(data.yoga.len(), 1);
        assert_eq!(data.sunrise, "2024-05-01T00:33:00Z");
    }

    #[test]
    fn test_null_strings_read_as_empty() {
        let data: MuhuratData = serde_json::from_value(json!({
            "moonrise": null,
            "vaara": null,
            "tithi": [{"name": null, "paksha": null, "start": "a", "end": null}],
            "nakshatra": [{"name": "Revati", "lord": {"name": null}, "start": null, "end": "b"}]
        }))
        .unwrap();
        assert_eq!(data.moonrise, "");
        assert_eq!(data.vaara, "");
        assert_eq!(data.tithi[0].name, "");
        assert!(data.tithi[0].paksha.is_none());
        assert_eq!(data.tithi[0].end, "");
        assert_eq!(data.nakshatra[0].lord.as_ref().unwrap().name, "");
        assert_eq!(data.nakshatra[0].start, "");
    }

    #[test]
    fn test_nakshatra_without_lord() {
        let n: Nakshatra = serde_json::from_value(json!({"name": "Revati"})).unwrap();
        assert!(n.lord.is_none());
        assert!(n.id.is_none());
    }
}
