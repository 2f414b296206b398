//! Validated emote request parameters.

use std::fmt;

use thiserror::Error;

/// Expected UID length range; values outside it trigger a non-blocking
/// advisory, not a rejection.
const UID_LENGTH_RANGE: std::ops::RangeInclusive<usize> = 8..=12;

/// The three parameters of an emote send, validated at construction.
///
/// All fields are digit-only strings; an `EmoteRequest` value is well-formed
/// by construction, so downstream code never re-validates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmoteRequest {
    team_code: String,
    uid: String,
    emote_id: String,
}

/// Validation error for emote request parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("{field} must contain digits only")]
    NotNumeric { field: &'static str },
}

impl EmoteRequest {
    /// Build a request from raw user input.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::NotNumeric`] naming the first offending field
    /// if any parameter is empty or contains a non-digit character.
    pub fn new(
        team_code: impl Into<String>,
        uid: impl Into<String>,
        emote_id: impl Into<String>,
    ) -> Result<Self, RequestError> {
        let team_code = team_code.into();
        let uid = uid.into();
        let emote_id = emote_id.into();

        for (field, value) in [
            ("team code", &team_code),
            ("uid", &uid),
            ("emote id", &emote_id),
        ] {
            if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
                return Err(RequestError::NotNumeric { field });
            }
        }

        Ok(Self {
            team_code,
            uid,
            emote_id,
        })
    }

    #[must_use]
    pub fn team_code(&self) -> &str {
        &self.team_code
    }

    #[must_use]
    pub fn uid(&self) -> &str {
        &self.uid
    }

    #[must_use]
    pub fn emote_id(&self) -> &str {
        &self.emote_id
    }

    /// Whether the UID length falls outside the usual range.
    ///
    /// Unusual lengths are worth a warning to the user but do not block the
    /// send; the upstream API is the authority on what a valid UID is.
    #[must_use]
    pub fn uid_length_unusual(&self) -> bool {
        !UID_LENGTH_RANGE.contains(&self.uid.len())
    }
}

impl fmt::Display for EmoteRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tc={} uid={} emote={}",
            self.team_code, self.uid, self.emote_id
        )
    }
}
