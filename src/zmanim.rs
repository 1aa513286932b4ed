// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Halachic times of day.
//!
//! Two "day" definitions are used for proportional hours:
//!
//! - **Gra**: sunrise to sunset.
//! - **Magen Avraham**: dawn to dusk at 16.1° depression.
//!
//! A halachic hour is a twelfth of the chosen day. Every zman is either a
//! solar crossing or a whole/fractional number of halachic hours from the
//! start of one of these days.

use crate::error::Result;
use crate::location::Location;
use crate::solar::{nightfall, sun_crossing, sun_events, SolarEvents, Twilight};
use chrono::{DateTime, Duration, NaiveDate};
use chrono_tz::Tz;

/// Crossings beyond the two day definitions that feed a [`ZmanSet`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Twilights {
    /// Morning crossing of 11°.
    pub talit: DateTime<Tz>,
    /// Evening crossing of 6°.
    pub first_stars: DateTime<Tz>,
    /// Evening crossing of 8.5°.
    pub three_stars: DateTime<Tz>,
}

/// All zmanim of one civil date.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ZmanSet {
    pub date: NaiveDate,
    pub first_light: DateTime<Tz>,
    pub talit: DateTime<Tz>,
    pub sunrise: DateTime<Tz>,
    pub mga_end_shma: DateTime<Tz>,
    pub gra_end_shma: DateTime<Tz>,
    pub mga_end_tfila: DateTime<Tz>,
    pub gra_end_tfila: DateTime<Tz>,
    pub midday: DateTime<Tz>,
    pub big_mincha: DateTime<Tz>,
    pub small_mincha: DateTime<Tz>,
    pub plag_mincha: DateTime<Tz>,
    pub sunset: DateTime<Tz>,
    pub first_stars: DateTime<Tz>,
    pub three_stars: DateTime<Tz>,
    pub midnight: DateTime<Tz>,
}

/// `hours` twelfths of the span `start..end`, from `start`.
fn halachic_hours(start: DateTime<Tz>, end: DateTime<Tz>, hours: f64) -> DateTime<Tz> {
    let span = (end - start).num_seconds() as f64;
    start + Duration::seconds((span * hours / 12.0).trunc() as i64)
}

impl ZmanSet {
    /// Derive the zmanim from the Magen Avraham day (`day.dawn`/`day.dusk`
    /// at 16.1°) and the extra crossings.
    pub fn resolve(day: &SolarEvents, extra: &Twilights) -> Self {
        let gra = |h: f64| halachic_hours(day.sunrise, day.sunset, h);
        let mga = |h: f64| halachic_hours(day.dawn, day.dusk, h);
        let midday = gra(6.0);

        Self {
            date: day.date,
            first_light: day.dawn,
            talit: extra.talit,
            sunrise: day.sunrise,
            mga_end_shma: mga(3.0),
            gra_end_shma: gra(3.0),
            mga_end_tfila: mga(4.0),
            gra_end_tfila: gra(4.0),
            midday,
            big_mincha: gra(6.5),
            small_mincha: gra(9.5),
            plag_mincha: mga(10.75),
            sunset: day.sunset,
            first_stars: extra.first_stars,
            three_stars: extra.three_stars,
            midnight: midday + Duration::hours(12),
        }
    }
}

/// Zmanim of `date` at `location`.
///
/// Every zman is computed or none is: if any crossing is missing the call
/// fails with [`CalendarError::NoEvent`](crate::CalendarError::NoEvent).
/// The 16.1° dawn is the first to go. Around the June solstice the sun stays
/// above that depression all night from roughly 50.5° of latitude (London,
/// Berlin, Amsterdam), far south of the polar circle. Callers that far north
/// should expect summer failures and fall back to [`sun_events`] with a
/// shallower [`Twilight`].
pub fn zmanim_for(date: NaiveDate, location: &Location) -> Result<ZmanSet> {
    let day = sun_events(date, location, Twilight::MagenAvraham)?;
    let (talit, _) = sun_crossing(date, location, Twilight::Talit.zenith())?;
    let extra = Twilights {
        talit,
        first_stars: nightfall(date, location, Twilight::FirstStars)?,
        three_stars: nightfall(date, location, Twilight::ThreeStars)?,
    };
    Ok(ZmanSet::resolve(&day, &extra))
}
