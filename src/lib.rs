// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Hebrew Calendar Module
//!
//! This crate provides the Hebrew calendar, solar times and the halachic
//! facts derived from them for a location and a moment in time.
//!
//! # Core types
//!
//! - [`DayCount<E>`]: whole-day count parameterised by an [`Epoch`] marker.
//! - [`HebrewYear`] / [`HebrewDate`]: validated Hebrew calendar values.
//! - [`HolidayFact`]: holiday and holiness of one civil day.
//! - [`Parasha`]: weekly Torah portion, including joined portions.
//! - [`Location`]: coordinates plus an IANA time zone.
//! - [`SolarEvents`] / [`ZmanSet`]: solar crossings and the zmanim of a day.
//! - [`Interval<T>`]: half-open interval over any [`TimeInstant`].
//! - [`RestrictedWindow`]: a Shabbat or Yom Tov span, candle lighting to
//!   havdalah.
//! - [`Settings`]: diaspora flag, offsets and display language.
//!
//! # Day epochs
//!
//! | Marker | Day zero |
//! |--------|----------|
//! | [`RataDie`] | 0000-12-31 (proleptic Gregorian) |
//! | [`HebrewEpoch`] | 1 Tishrei AM 1 |
//!
//! # Example
//!
//! ```
//! use chrono::TimeZone;
//! use chrono_tz::America::New_York;
//! use luach::{restricted_windows, Location, Settings};
//!
//! let nyc = Location::new(40.7128, -74.0060, New_York).unwrap();
//! let now = New_York.with_ymd_and_hms(2018, 9, 1, 16, 0, 0).unwrap();
//! let report = restricted_windows(now, &nyc, &Settings::default()).unwrap();
//!
//! let shabbat = report.current.unwrap();
//! assert_eq!(shabbat.candle_lighting().format("%H:%M").to_string(), "19:15");
//! assert_eq!(shabbat.havdalah().format("%H:%M").to_string(), "20:14");
//! ```

mod calendar;
mod config;
pub(crate) mod day_count;
mod error;
mod holiday;
mod location;
mod names;
mod parasha;
mod period;
mod solar;
mod window;
mod zmanim;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use calendar::{
    to_gregorian, to_hebrew, HebrewDate, HebrewMonth, HebrewYear, YearKind, MAX_YEAR, MIN_YEAR,
};
pub use config::{HavdalahRule, Settings, MAX_OFFSET_MINUTES};
pub use day_count::{DayCount, Epoch, FixedDay, HebrewDay, HebrewEpoch, RataDie};
pub use error::{CalendarError, Result};
pub use holiday::{holiday_for, HolidayFact, HolidayId, HolidayKind, Holiness};
pub use location::{GeoLocation, Location};
pub use names::{hebrew_numeral, hebrew_year, month_name, Language, Localize, NO_PORTION};
pub use parasha::{resolve_portion, weekly_portion_for, year_schedule, Parasha, ShabbatReading};
pub use period::{merge_touching, Interval, TimeInstant, ZonedPeriod};
pub use solar::{nightfall, sun_crossing, sun_events, sunset, SolarEvents, Twilight, SUNRISE_ZENITH};
pub use window::{
    hebrew_date_at, restricted_windows, shabbat_window, windows_around, RestrictedDay,
    RestrictedWindow, WindowKind, WindowReport,
};
pub use zmanim::{zmanim_for, Twilights, ZmanSet};
