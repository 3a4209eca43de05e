//! Form session: city text, selection, suggestions, submission and result.
//!
//! State is derived from the fields rather than stored:
//!
//!   Idle → Typing → CitySelected → Submitting → Displaying
//!
//! with `reset()` returning to Idle from anywhere. Network work happens
//! between the two halves of a ticketed operation (`city_input` /
//! `apply_suggestions`, `begin_submit` / `complete_submit`), so a front end
//! can run requests wherever it likes and hand the reply back. Suggestion
//! replies are sequenced: only the reply for the most recently issued
//! ticket is written.

use crate::api::{ApiError, Backend, CityCandidate, GeocodeClient, MuhuratClient, MuhuratData, MIN_QUERY_CHARS};
use crate::i18n::Language;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    Idle,
    Typing,
    CitySelected,
    Submitting,
    Displaying,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Issued for every qualifying city edit; hand it back with the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestTicket {
    pub seq: u64,
    pub query: String,
}

/// Issued when a submission is accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitTicket {
    pub date: NaiveDate,
    pub city: CityCandidate,
    generation: u64,
}

/// The result currently on display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayedResult {
    pub city_name: String,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub data: MuhuratData,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("No city selected; pick one of the suggestions first")]
    NoCitySelected,

    #[error("No date chosen")]
    MissingDate,

    #[error("A muhurat request is already in flight")]
    AlreadySubmitting,

    #[error("No suggestion #{0}")]
    NoSuchSuggestion(usize),

    #[error("Muhurat lookup failed: {0}")]
    FetchFailed(#[source] ApiError),

    #[error("Session was reset before the reply arrived")]
    Superseded,
}

impl SessionError {
    /// Locale key of the message shown to the user. Fetch failures all map
    /// to the same generic message.
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::NoCitySelected => "selectCityAlert",
            Self::MissingDate => "missingDate",
            Self::AlreadySubmitting => "busy",
            Self::NoSuchSuggestion(_) => "noSuchSuggestion",
            Self::FetchFailed(_) => "fetchError",
            Self::Superseded => "superseded",
        }
    }
}

#[derive(Debug, Default)]
pub struct Session {
    language: Language,
    date: Option<NaiveDate>,
    city_text: String,
    selected: Option<CityCandidate>,
    suggestions: Vec<CityCandidate>,
    result: Option<DisplayedResult>,
    loading: bool,
    latest_seq: u64,
    generation: u64,
}

impl Session {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    // ── Accessors ────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        if self.loading {
            SessionState::Submitting
        } else if self.result.is_some() {
            SessionState::Displaying
        } else if self.selected.is_some() {
            SessionState::CitySelected
        } else if !self.city_text.is_empty() || self.date.is_some() {
            SessionState::Typing
        } else {
            SessionState::Idle
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn city_text(&self) -> &str {
        &self.city_text
    }

    pub fn selected(&self) -> Option<&CityCandidate> {
        self.selected.as_ref()
    }

    pub fn suggestions(&self) -> &[CityCandidate] {
        &self.suggestions
    }

    pub fn result(&self) -> Option<&DisplayedResult> {
        self.result.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // ── Edits ────────────────────────────────────────────────────

    /// Labels are resolved at render time, so switching needs no other work.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = Some(date);
    }

    pub fn clear_date(&mut self) {
        self.date = None;
    }

    /// Record an edit to the city text. Any edit drops the current
    /// selection. Returns a ticket when the text is long enough to query.
    pub fn city_input(&mut self, text: &str) -> Option<SuggestTicket> {
        self.city_text = text.to_string();
        self.selected = None;
        self.latest_seq += 1;

        if text.chars().count() < MIN_QUERY_CHARS {
            self.suggestions.clear();
            return None;
        }

        Some(SuggestTicket {
            seq: self.latest_seq,
            query: text.to_string(),
        })
    }

    /// Write a suggestion reply. Returns `false` (and writes nothing) when
    /// the ticket has been superseded by a later edit or a reset.
    pub fn apply_suggestions(&mut self, ticket: &SuggestTicket, suggestions: Vec<CityCandidate>) -> bool {
        if ticket.seq != self.latest_seq {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                query = %ticket.query,
                "dropping stale suggestions"
            );
            return false;
        }
        self.suggestions = suggestions;
        true
    }

    /// Promote suggestion `index` (0-based) to the selection.
    pub fn select_suggestion(&mut self, index: usize) -> Result<&CityCandidate, SessionError> {
        if index >= self.suggestions.len() {
            return Err(SessionError::NoSuchSuggestion(index + 1));
        }
        let city = self.suggestions.swap_remove(index);
        self.suggestions.clear();
        self.city_text = city.city_name.clone();
        // Replies still in flight belong to the text that was just replaced.
        self.latest_seq += 1;
        Ok(&*self.selected.insert(city))
    }

    // ── Submission ───────────────────────────────────────────────

    /// Validate and enter Submitting. Nothing is sent on error.
    pub fn begin_submit(&mut self) -> Result<SubmitTicket, SessionError> {
        if self.loading {
            return Err(SessionError::AlreadySubmitting);
        }
        let city = self.selected.clone().ok_or(SessionError::NoCitySelected)?;
        let date = self.date.ok_or(SessionError::MissingDate)?;

        self.loading = true;
        Ok(SubmitTicket {
            date,
            city,
            generation: self.generation,
        })
    }

    /// Leave Submitting. On success the displayed result is replaced; on
    /// failure the previous one stays. Replies to a submission made before
    /// the last reset are discarded.
    pub fn complete_submit(
        &mut self,
        ticket: SubmitTicket,
        reply: Result<MuhuratData, ApiError>,
    ) -> Result<&DisplayedResult, SessionError> {
        if ticket.generation != self.generation {
            tracing::debug!(city = %ticket.city.city_name, "dropping muhurat reply from before reset");
            return Err(SessionError::Superseded);
        }
        self.loading = false;
        match reply {
            Ok(data) => Ok(&*self.result.insert(DisplayedResult {
                city_name: ticket.city.city_name,
                date: ticket.date,
                data,
            })),
            Err(e) => {
                tracing::warn!(city = %ticket.city.city_name, date = %ticket.date, "muhurat fetch failed: {}", e);
                Err(SessionError::FetchFailed(e))
            }
        }
    }

    /// Clear everything except the language. Outstanding suggestion
    /// tickets become stale.
    pub fn reset(&mut self) {
        self.date = None;
        self.city_text.clear();
        self.selected = None;
        self.suggestions.clear();
        self.result = None;
        self.loading = false;
        self.latest_seq += 1;
        self.generation += 1;
    }

    // ── Blocking drivers ─────────────────────────────────────────

    /// Edit the city text and fetch suggestions in one step.
    pub fn refresh_suggestions<B: Backend>(&mut self, geocoder: &GeocodeClient<B>, text: &str) -> &[CityCandidate] {
        if let Some(ticket) = self.city_input(text) {
            let list = geocoder.suggest(&ticket.query);
            self.apply_suggestions(&ticket, list);
        }
        &self.suggestions
    }

    /// Validate, fetch and store in one step.
    pub fn submit<B: Backend>(&mut self, client: &MuhuratClient<B>) -> Result<&DisplayedResult, SessionError> {
        let ticket = self.begin_submit()?;
        let reply = client.fetch(ticket.date, ticket.city.lat, ticket.city.lon);
        self.complete_submit(ticket, reply)
    }
}
