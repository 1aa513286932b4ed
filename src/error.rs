// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type shared by every fallible operation of the crate.

use chrono::NaiveDate;

/// Failure kinds reported by calendar, solar and window computations.
///
/// All computations are deterministic, so none of these is transient:
/// retrying the same query yields the same error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// The Hebrew year lies outside the supported range.
    #[error("Hebrew year {year} is outside the supported range {min}..={max}")]
    Range { year: i64, min: i64, max: i64 },

    /// The sun never reaches the requested depression on that date.
    #[error(
        "the sun does not cross {depression}° below the horizon on {date} at latitude {latitude}°"
    )]
    NoEvent {
        date: NaiveDate,
        latitude: f64,
        depression: f64,
    },

    /// Malformed date, coordinate or setting.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CalendarError>;

impl CalendarError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
