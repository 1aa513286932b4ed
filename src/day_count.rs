// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Epoch-parameterised whole-day counts.
//!
//! [`DayCount<E>`] stores a signed number of days whose *meaning* is fixed by
//! the compile-time marker `E: Epoch`. Every count converts through the
//! canonical **Rata Die** fixed-day number (day 1 = 0001-01-01 proleptic
//! Gregorian), which is also what `chrono`'s `num_days_from_ce` yields.
//!
//! | Marker | Day zero |
//! |--------|----------|
//! | [`RataDie`] | 0000-12-31 (proleptic Gregorian) |
//! | [`HebrewEpoch`] | 1 Tishrei AM 1 (Julian 7 October 3761 BCE) |

use chrono::{Datelike, NaiveDate, Weekday};
use qtty::Days;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Sub, SubAssign};

// ═══════════════════════════════════════════════════════════════════════════
// Epoch trait
// ═══════════════════════════════════════════════════════════════════════════

/// Marker trait for day-count epochs.
pub trait Epoch:
    Copy + Clone + fmt::Debug + PartialEq + Eq + PartialOrd + Ord + std::hash::Hash + 'static
{
    /// Display label used by [`DayCount`] formatting.
    const LABEL: &'static str;

    /// Rata Die of this count's day zero.
    const RD_OFFSET: i64;
}

/// Rata Die fixed-day numbering.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RataDie;

impl Epoch for RataDie {
    const LABEL: &'static str = "RD";
    const RD_OFFSET: i64 = 0;
}

/// Days elapsed since 1 Tishrei AM 1.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HebrewEpoch;

impl Epoch for HebrewEpoch {
    const LABEL: &'static str = "AM day";
    const RD_OFFSET: i64 = -1_373_427;
}

// ═══════════════════════════════════════════════════════════════════════════
// DayCount<E>
// ═══════════════════════════════════════════════════════════════════════════

/// A civil day counted from epoch `E`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayCount<E: Epoch> {
    days: i64,
    _epoch: PhantomData<E>,
}

/// Rata Die day, the crate's canonical day number.
pub type FixedDay = DayCount<RataDie>;

/// Day count relative to the Hebrew calendar epoch.
pub type HebrewDay = DayCount<HebrewEpoch>;

impl<E: Epoch> DayCount<E> {
    // ── constructors ──────────────────────────────────────────────────

    #[inline]
    pub const fn new(days: i64) -> Self {
        Self {
            days,
            _epoch: PhantomData,
        }
    }

    #[inline]
    pub const fn from_rata_die(rd: i64) -> Self {
        Self::new(rd - E::RD_OFFSET)
    }

    /// Day count of a proleptic Gregorian civil date.
    #[inline]
    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_rata_die(i64::from(date.num_days_from_ce()))
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn value(&self) -> i64 {
        self.days
    }

    /// The count as a `qtty` day quantity.
    #[inline]
    pub fn quantity(&self) -> Days {
        Days::new(self.days as f64)
    }

    #[inline]
    pub const fn rata_die(&self) -> i64 {
        self.days + E::RD_OFFSET
    }

    // ── conversions ───────────────────────────────────────────────────

    /// Re-express the same civil day on another epoch.
    #[inline]
    pub const fn to<T: Epoch>(&self) -> DayCount<T> {
        DayCount::<T>::from_rata_die(self.rata_die())
    }

    /// Proleptic Gregorian civil date, `None` outside chrono's range.
    pub fn to_date(&self) -> Option<NaiveDate> {
        let rd = i32::try_from(self.rata_die()).ok()?;
        NaiveDate::from_num_days_from_ce_opt(rd)
    }

    /// Day of the week, Sunday = 0 … Saturday = 6.
    #[inline]
    pub const fn weekday_index(&self) -> u32 {
        self.rata_die().rem_euclid(7) as u32
    }

    pub fn weekday(&self) -> Weekday {
        match self.weekday_index() {
            0 => Weekday::Sun,
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            _ => Weekday::Sat,
        }
    }

    #[inline]
    pub fn is_saturday(&self) -> bool {
        self.weekday_index() == 6
    }

    /// First day on or after `self` falling on `weekday` (Sunday = 0).
    pub fn on_or_after(&self, weekday: u32) -> Self {
        let delta = (i64::from(weekday) - i64::from(self.weekday_index())).rem_euclid(7);
        *self + delta
    }

    /// Last day on or before `self` falling on `weekday` (Sunday = 0).
    pub fn on_or_before(&self, weekday: u32) -> Self {
        let delta = (i64::from(self.weekday_index()) - i64::from(weekday)).rem_euclid(7);
        *self - delta
    }
}

impl<E: Epoch> fmt::Display for DayCount<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", E::LABEL, self.days)
    }
}

// ── arithmetic ────────────────────────────────────────────────────────────

impl<E: Epoch> Add<i64> for DayCount<E> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: i64) -> Self {
        Self::new(self.days + rhs)
    }
}

impl<E: Epoch> AddAssign<i64> for DayCount<E> {
    #[inline]
    fn add_assign(&mut self, rhs: i64) {
        self.days += rhs;
    }
}

impl<E: Epoch> Sub<i64> for DayCount<E> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: i64) -> Self {
        Self::new(self.days - rhs)
    }
}

impl<E: Epoch> SubAssign<i64> for DayCount<E> {
    #[inline]
    fn sub_assign(&mut self, rhs: i64) {
        self.days -= rhs;
    }
}

impl<E: Epoch> Sub for DayCount<E> {
    type Output = i64;

    #[inline]
    fn sub(self, rhs: Self) -> i64 {
        self.days - rhs.days
    }
}

impl From<NaiveDate> for FixedDay {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rata_die_matches_chrono() {
        let d = NaiveDate::from_ymd_opt(1, 1, 1).unwrap();
        assert_eq!(FixedDay::from_date(d).value(), 1);
        let d = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        assert_eq!(FixedDay::from_date(d).value(), 730_120);
    }

    #[test]
    fn test_epoch_conversion_roundtrip() {
        let rd = FixedDay::new(737_000);
        let heb = rd.to::<HebrewEpoch>();
        assert_eq!(heb.value(), 737_000 + 1_373_427);
        assert_eq!(heb.to::<RataDie>(), rd);
        assert_eq!(rd.quantity(), Days::new(737_000.0));
    }

    #[test]
    fn test_to_date() {
        let d = NaiveDate::from_ymd_opt(2018, 9, 10).unwrap();
        assert_eq!(FixedDay::from_date(d).to_date(), Some(d));
        assert_eq!(FixedDay::new(i64::MAX / 2).to_date(), None);
    }

    #[test]
    fn test_weekday() {
        // 2018-09-08 was a Saturday
        let sat = FixedDay::from_date(NaiveDate::from_ymd_opt(2018, 9, 8).unwrap());
        assert!(sat.is_saturday());
        assert_eq!(sat.weekday(), Weekday::Sat);
        assert_eq!((sat + 1).weekday(), Weekday::Sun);
        assert_eq!((sat + 1).weekday_index(), 0);
    }

    #[test]
    fn test_on_or_after_and_before() {
        let wed = FixedDay::from_date(NaiveDate::from_ymd_opt(2018, 9, 5).unwrap());
        assert_eq!(wed.on_or_after(6) - wed, 3);
        assert_eq!(wed.on_or_before(6) - wed, -4);
        let sat = wed + 3;
        assert_eq!(sat.on_or_after(6), sat);
        assert_eq!(sat.on_or_before(6), sat);
    }

    #[test]
    fn test_display() {
        assert_eq!(FixedDay::new(42).to_string(), "RD 42");
        assert_eq!(HebrewDay::new(7).to_string(), "AM day 7");
    }
}
