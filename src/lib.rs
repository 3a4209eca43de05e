//! Shubh Muhurat client.
//!
//! Looks up a city, asks the remote panchang service for one day's
//! windows (sunrise/sunset, tithi, nakshatra, karana, yoga) and renders them
//! with English or Gujarati labels.

pub mod api;
pub mod config;
pub mod i18n;
pub mod render;
pub mod repl;
pub mod session;
pub mod timefmt;
