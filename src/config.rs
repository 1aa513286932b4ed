// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Caller-owned settings for window and display computations.
//!
//! With the `serde` feature the settings deserialize from any self-describing
//! format; missing fields take their defaults:
//!
//! ```json
//! { "diaspora": false, "candle_lighting_offset": 40, "havdalah": { "after_sunset": { "minutes": 42 } } }
//! ```

use crate::error::{CalendarError, Result};
use crate::names::Language;
use chrono::TimeDelta;

/// Largest accepted offset, in minutes.
pub const MAX_OFFSET_MINUTES: i64 = 120;

/// How the end of a restricted window is computed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum HavdalahRule {
    /// Three small stars (8.5° depression) plus `offset` minutes.
    ThreeStars { offset: i64 },
    /// A fixed number of minutes after sunset.
    AfterSunset { minutes: i64 },
}

impl Default for HavdalahRule {
    fn default() -> Self {
        HavdalahRule::ThreeStars { offset: 0 }
    }
}

impl HavdalahRule {
    pub(crate) fn minutes(self) -> i64 {
        match self {
            HavdalahRule::ThreeStars { offset } => offset,
            HavdalahRule::AfterSunset { minutes } => minutes,
        }
    }
}

/// Settings for [`restricted_windows`](crate::restricted_windows) and the
/// localized outputs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Settings {
    /// Two-day Yom Tov and separate Simchat Torah.
    pub diaspora: bool,
    /// Minutes before sunset at which candles are lit.
    pub candle_lighting_offset: i64,
    pub havdalah: HavdalahRule,
    /// Language of window titles and of their `Display` output.
    pub language: Language,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            diaspora: true,
            candle_lighting_offset: 18,
            havdalah: HavdalahRule::default(),
            language: Language::English,
        }
    }
}

impl Settings {
    /// Default settings for a location in Israel.
    pub fn israel() -> Self {
        Self {
            diaspora: false,
            ..Self::default()
        }
    }

    /// Replace the candle lighting lead, in minutes before sunset.
    pub fn with_candle_lighting_offset(mut self, minutes: i64) -> Self {
        self.candle_lighting_offset = minutes;
        self
    }

    /// Replace the rule that ends each window.
    pub fn with_havdalah(mut self, rule: HavdalahRule) -> Self {
        self.havdalah = rule;
        self
    }

    /// Replace the language used by [`RestrictedWindow::title`](crate::RestrictedWindow::title).
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Check that the candle lighting offset and the havdalah minutes lie in
    /// `0..=MAX_OFFSET_MINUTES`.
    ///
    /// # Errors
    ///
    /// [`CalendarError::InvalidInput`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        let check = |name: &str, value: i64| {
            if (0..=MAX_OFFSET_MINUTES).contains(&value) {
                Ok(())
            } else {
                Err(CalendarError::invalid(format!(
                    "{name} of {value} minutes is outside 0..={MAX_OFFSET_MINUTES}"
                )))
            }
        };
        check("candle lighting offset", self.candle_lighting_offset)?;
        check("havdalah offset", self.havdalah.minutes())
    }

    pub(crate) fn candle_lead(&self) -> TimeDelta {
        TimeDelta::minutes(self.candle_lighting_offset)
    }
}
