//! Remote API clients: city suggestions and daily muhurat data.
//!
//! Both clients sit on a [`Backend`], a minimal GET-and-decode-JSON seam.
//! [`HttpBackend`] is the production implementation over `ureq`.

pub mod geocode;
pub mod muhurat;
pub mod transport;
pub mod types;

pub use geocode::{GeocodeClient, MIN_QUERY_CHARS};
pub use muhurat::MuhuratClient;
pub use transport::{Backend, HttpBackend};
pub use types::{ApiError, CityCandidate, Lord, MuhuratData, Nakshatra, Period, Tithi};
