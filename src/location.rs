// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Observer position and civil time zone.

use crate::error::{CalendarError, Result};
use chrono_tz::Tz;
use qtty::Degrees;

/// Geographic coordinates in signed degrees (north and east positive).
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawGeoLocation")
)]
pub struct GeoLocation {
    latitude: f64,
    longitude: f64,
}

impl GeoLocation {
    /// Validated coordinates in degrees, north and east positive.
    ///
    /// # Errors
    ///
    /// [`CalendarError::InvalidInput`] for a non-finite value, a latitude
    /// outside ±90 or a longitude outside ±180.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CalendarError::invalid(format!(
                "latitude {latitude} is outside -90..=90"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CalendarError::invalid(format!(
                "longitude {longitude} is outside -180..=180"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[inline]
    pub fn latitude(&self) -> Degrees {
        Degrees::new(self.latitude)
    }

    #[inline]
    pub fn longitude(&self) -> Degrees {
        Degrees::new(self.longitude)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGeoLocation {
    latitude: f64,
    longitude: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGeoLocation> for GeoLocation {
    type Error = CalendarError;

    fn try_from(raw: RawGeoLocation) -> Result<Self> {
        Self::new(raw.latitude, raw.longitude)
    }
}

/// Where a computation happens: coordinates plus the civil time zone in
/// which every instant is reported.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub geo: GeoLocation,
    pub time_zone: Tz,
}

impl Location {
    /// Coordinates as in [`GeoLocation::new`], with results reported in
    /// `time_zone`.
    pub fn new(latitude: f64, longitude: f64, time_zone: Tz) -> Result<Self> {
        Ok(Self {
            geo: GeoLocation::new(latitude, longitude)?,
            time_zone,
        })
    }

    /// Like [`Location::new`] with an IANA zone name such as `"Asia/Jerusalem"`.
    pub fn with_zone_name(latitude: f64, longitude: f64, zone: &str) -> Result<Self> {
        let time_zone: Tz = zone
            .parse()
            .map_err(|_| CalendarError::invalid(format!("unknown time zone {zone:?}")))?;
        Self::new(latitude, longitude, time_zone)
    }
}
