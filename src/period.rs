// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time intervals over zoned instants.
//!
//! This module provides:
//! - [`TimeInstant`]: points in time usable as interval endpoints
//! - [`Interval<T>`]: a half-open span `[start, end)` over any [`TimeInstant`]
//! - [`ZonedPeriod`]: the interval type used for restricted windows
//! - [`merge_touching`]: coalescing of overlapping or adjacent periods

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Serialize, Serializer};

/// Trait for points in time that can bound an [`Interval`].
pub trait TimeInstant: Copy + Clone + PartialEq + PartialOrd + Sized {
    /// The duration type used for arithmetic operations.
    type Duration;

    /// The same instant on the UTC axis.
    fn to_utc(&self) -> DateTime<Utc>;

    /// Compute the difference between two time instants.
    fn difference(&self, other: &Self) -> Self::Duration;

    /// Add a duration to this time instant.
    fn add_duration(&self, duration: Self::Duration) -> Self;

    /// Subtract a duration from this time instant.
    fn sub_duration(&self, duration: Self::Duration) -> Self;
}

impl<Z: TimeZone> TimeInstant for DateTime<Z>
where
    DateTime<Z>: Copy,
{
    type Duration = TimeDelta;

    #[inline]
    fn to_utc(&self) -> DateTime<Utc> {
        self.with_timezone(&Utc)
    }

    #[inline]
    fn difference(&self, other: &Self) -> TimeDelta {
        *self - *other
    }

    #[inline]
    fn add_duration(&self, duration: TimeDelta) -> Self {
        *self + duration
    }

    #[inline]
    fn sub_duration(&self, duration: TimeDelta) -> Self {
        *self - duration
    }
}

/// Represents an interval between two instants.
///
/// Intervals are half-open: `start` belongs to the interval, `end` does not.
///
/// # Examples
///
/// ```
/// use chrono::TimeZone;
/// use chrono_tz::Asia::Jerusalem;
/// use luach::Interval;
///
/// let start = Jerusalem.with_ymd_and_hms(2018, 10, 5, 18, 3, 0).unwrap();
/// let end = Jerusalem.with_ymd_and_hms(2018, 10, 6, 18, 56, 0).unwrap();
/// let shabbat = Interval::new(start, end);
///
/// assert!(shabbat.contains(&start));
/// assert!(!shabbat.contains(&end));
/// assert_eq!(shabbat.duration().num_minutes(), 24 * 60 + 53);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval<T: TimeInstant> {
    pub start: T,
    pub end: T,
}

/// Interval between two instants of a named time zone.
pub type ZonedPeriod = Interval<DateTime<Tz>>;

impl<T: TimeInstant> Interval<T> {
    pub fn new(start: T, end: T) -> Self {
        Interval { start, end }
    }

    /// Returns the duration of the period as the difference between end and start.
    pub fn duration(&self) -> T::Duration {
        self.end.difference(&self.start)
    }

    /// `start <= t < end`.
    pub fn contains(&self, t: &T) -> bool {
        self.start <= *t && *t < self.end
    }

    /// Returns the overlapping sub-period between `self` and `other`.
    ///
    /// If one period ends exactly when the other starts, the intersection is
    /// empty and `None` is returned.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = if self.start >= other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end <= other.end {
            self.end
        } else {
            other.end
        };

        if start < end {
            Some(Self::new(start, end))
        } else {
            None
        }
    }

    /// True when the two periods overlap or one starts exactly where the
    /// other ends, i.e. their union is a single period.
    pub fn touches(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Smallest period containing both.
    pub fn hull(&self, other: &Self) -> Self {
        let start = if self.start <= other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end >= other.end {
            self.end
        } else {
            other.end
        };
        Self::new(start, end)
    }

    /// The same period on the UTC axis.
    pub fn to_utc(&self) -> Interval<DateTime<Utc>> {
        Interval::new(self.start.to_utc(), self.end.to_utc())
    }
}

impl<T: TimeInstant + fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[cfg(feature = "serde")]
impl<T: TimeInstant + Serialize> Serialize for Interval<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("Interval", 2)?;
        s.serialize_field("start", &self.start)?;
        s.serialize_field("end", &self.end)?;
        s.end()
    }
}

/// Coalesce periods that overlap or touch into maximal periods.
///
/// The input may be in any order; the output is sorted by start.
pub fn merge_touching<T: TimeInstant>(mut periods: Vec<Interval<T>>) -> Vec<Interval<T>> {
    periods.sort_by(|a, b| a.start.partial_cmp(&b.start).unwrap_or(std::cmp::Ordering::Equal));
    let mut merged: Vec<Interval<T>> = Vec::with_capacity(periods.len());
    for p in periods {
        match merged.last_mut() {
            Some(last) if last.touches(&p) => *last = last.hull(&p),
            _ => merged.push(p),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::New_York;

    fn ny(d: u32, h: u32, m: u32) -> DateTime<Tz> {
        New_York.with_ymd_and_hms(2018, 9, d, h, m, 0).unwrap()
    }

    #[test]
    fn test_period_contains_half_open() {
        let p = Interval::new(ny(7, 19, 4), ny(8, 20, 2));
        assert!(p.contains(&ny(7, 19, 4)));
        assert!(p.contains(&ny(8, 12, 0)));
        assert!(!p.contains(&ny(8, 20, 2)));
        assert!(!p.contains(&ny(7, 19, 3)));
    }

    #[test]
    fn test_period_duration() {
        let p = Interval::new(ny(9, 19, 1), ny(11, 19, 57));
        assert_eq!(p.duration(), TimeDelta::minutes(2 * 24 * 60 + 56));
    }

    #[test]
    fn test_period_intersection_overlap() {
        let a = Interval::new(ny(1, 0, 0), ny(5, 0, 0));
        let b = Interval::new(ny(3, 0, 0), ny(8, 0, 0));
        let overlap = a.intersection(&b).expect("expected overlap");
        assert_eq!(overlap, Interval::new(ny(3, 0, 0), ny(5, 0, 0)));
    }

    #[test]
    fn test_period_touching_edges() {
        let a = Interval::new(ny(1, 0, 0), ny(3, 0, 0));
        let b = Interval::new(ny(3, 0, 0), ny(8, 0, 0));
        assert_eq!(a.intersection(&b), None);
        assert!(a.touches(&b));
        assert!(b.touches(&a));
        assert_eq!(a.hull(&b), Interval::new(ny(1, 0, 0), ny(8, 0, 0)));
    }

    #[test]
    fn test_period_disjoint() {
        let a = Interval::new(ny(1, 0, 0), ny(3, 0, 0));
        let b = Interval::new(ny(5, 0, 0), ny(8, 0, 0));
        assert_eq!(a.intersection(&b), None);
        assert!(!a.touches(&b));
    }

    #[test]
    fn test_merge_touching_chains_days() {
        let periods = vec![
            Interval::new(ny(10, 18, 59), ny(11, 19, 57)),
            Interval::new(ny(7, 19, 4), ny(8, 20, 2)),
            Interval::new(ny(9, 19, 1), ny(10, 19, 58)),
        ];
        let merged = merge_touching(periods);
        assert_eq!(
            merged,
            vec![
                Interval::new(ny(7, 19, 4), ny(8, 20, 2)),
                Interval::new(ny(9, 19, 1), ny(11, 19, 57)),
            ]
        );
        assert!(merge_touching::<DateTime<Tz>>(Vec::new()).is_empty());
    }

    #[test]
    fn test_instant_offsets() {
        let sunset = ny(7, 19, 22);
        assert_eq!(sunset.sub_duration(TimeDelta::minutes(18)), ny(7, 19, 4));
        assert_eq!(sunset.add_duration(TimeDelta::minutes(42)), ny(7, 20, 4));
        assert_eq!(ny(8, 20, 2).difference(&ny(7, 19, 4)), TimeDelta::minutes(24 * 60 + 58));
    }

    #[test]
    fn test_period_to_utc_keeps_instants() {
        let p = Interval::new(ny(7, 19, 4), ny(8, 20, 2));
        let utc = p.to_utc();
        assert_eq!(utc.start, p.start);
        assert_eq!(utc.duration(), p.duration());
        assert_eq!(utc.start.format("%H:%M").to_string(), "23:04");
    }

    #[test]
    fn test_period_display() {
        let p = Interval::new(ny(7, 19, 4), ny(8, 20, 2));
        let display = p.to_string();
        assert!(display.contains("2018-09-07 19:04:00 EDT"));
        assert!(display.contains(" to "));
    }
}
