// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Hebrew calendar arithmetic.
//!
//! The year is anchored on the day of 1 Tishrei, obtained from the molad of
//! Tishrei and the postponement rules (dechiyot). The length of a year is the
//! difference between two consecutive new years; it fixes the two variable
//! months (Marcheshvan and Kislev). Leap years follow the 19-year cycle
//! (years 3, 6, 8, 11, 14, 17 and 19 of each cycle).
//!
//! Conversions go through [`FixedDay`] (Rata Die), so a Gregorian date and a
//! Hebrew date meet on the same integer day number.

use crate::day_count::{FixedDay, HebrewDay};
use crate::error::{CalendarError, Result};
use chrono::{NaiveDate, Weekday};

/// First supported Hebrew year (Tishrei 3762 falls in September 1 CE).
pub const MIN_YEAR: i64 = 3762;

/// Last supported Hebrew year.
pub const MAX_YEAR: i64 = 9999;

// ── molad arithmetic ──────────────────────────────────────────────────────

const PARTS_PER_DAY: i64 = 25_920;
/// Parts of the molad of Tishrei AM 1 (BaHaRaD) after the start of its day.
const MOLAD_EPOCH_PARTS: i64 = 12_084;
/// Parts in a mean lunation beyond 29 whole days.
const LUNATION_EXTRA_PARTS: i64 = 13_753;

#[inline]
fn is_leap_year(year: i64) -> bool {
    (7 * year + 1).rem_euclid(19) < 7
}

#[inline]
fn months_elapsed(year: i64) -> i64 {
    (235 * year - 234).div_euclid(19)
}

/// Days from the epoch to the molad day of Tishrei, with the
/// Lo ADU Rosh rule applied (never Sunday, Wednesday or Friday).
fn molad_day(year: i64) -> i64 {
    let months = months_elapsed(year);
    let parts = MOLAD_EPOCH_PARTS + LUNATION_EXTRA_PARTS * months;
    let day = 29 * months + parts.div_euclid(PARTS_PER_DAY);
    if (3 * (day + 1)).rem_euclid(7) < 3 {
        day + 1
    } else {
        day
    }
}

/// Remaining postponements that keep every year length legal.
fn new_year_delay(year: i64) -> i64 {
    let (prev, this, next) = (molad_day(year - 1), molad_day(year), molad_day(year + 1));
    if next - this == 356 {
        2
    } else if this - prev == 382 {
        1
    } else {
        0
    }
}

fn new_year(year: i64) -> FixedDay {
    HebrewDay::new(molad_day(year) + new_year_delay(year)).to()
}

fn check_year(year: i64) -> Result<()> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(CalendarError::Range {
            year,
            min: MIN_YEAR,
            max: MAX_YEAR,
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Months
// ═══════════════════════════════════════════════════════════════════════════

/// Hebrew months in civil order, starting at Tishrei.
///
/// In a common year `Adar` is the only Adar. In a leap year `Adar` is Adar I
/// and [`HebrewMonth::AdarII`] follows it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HebrewMonth {
    Tishrei,
    Marcheshvan,
    Kislev,
    Tevet,
    Shvat,
    Adar,
    AdarII,
    Nisan,
    Iyyar,
    Sivan,
    Tammuz,
    Av,
    Elul,
}

impl HebrewMonth {
    pub const ALL: [HebrewMonth; 13] = [
        HebrewMonth::Tishrei,
        HebrewMonth::Marcheshvan,
        HebrewMonth::Kislev,
        HebrewMonth::Tevet,
        HebrewMonth::Shvat,
        HebrewMonth::Adar,
        HebrewMonth::AdarII,
        HebrewMonth::Nisan,
        HebrewMonth::Iyyar,
        HebrewMonth::Sivan,
        HebrewMonth::Tammuz,
        HebrewMonth::Av,
        HebrewMonth::Elul,
    ];

    /// Position in civil order, Tishrei = 0.
    #[inline]
    pub const fn civil_index(self) -> usize {
        self as usize
    }

    /// The Adar that carries Purim and the Adar fasts in `year`.
    pub fn last_adar(year: &HebrewYear) -> HebrewMonth {
        if year.is_leap() {
            HebrewMonth::AdarII
        } else {
            HebrewMonth::Adar
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// HebrewYear
// ═══════════════════════════════════════════════════════════════════════════

/// Length category of a Hebrew year.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum YearKind {
    /// 353 or 383 days: Kislev has 29 days.
    Deficient,
    /// 354 or 384 days.
    Regular,
    /// 355 or 385 days: Marcheshvan has 30 days.
    Complete,
}

/// A Hebrew year with its anchor day and length resolved.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct HebrewYear {
    year: i64,
    new_year: FixedDay,
    length: i64,
}

impl HebrewYear {
    /// Resolve year `year` (Anno Mundi).
    pub fn new(year: i64) -> Result<Self> {
        check_year(year)?;
        Ok(Self::resolve(year))
    }

    /// The year whose span contains `day`.
    pub fn containing(day: FixedDay) -> Result<Self> {
        let elapsed = day.to::<crate::day_count::HebrewEpoch>().value();
        let approx = (elapsed * 98_496).div_euclid(35_975_832) + 1;
        if approx < MIN_YEAR - 1 || approx > MAX_YEAR + 1 {
            return Err(CalendarError::Range {
                year: approx,
                min: MIN_YEAR,
                max: MAX_YEAR,
            });
        }

        let mut year = if new_year(approx) <= day { approx } else { approx - 1 };
        if new_year(year + 1) <= day {
            year += 1;
        }
        check_year(year)?;
        Ok(Self::resolve(year))
    }

    fn resolve(year: i64) -> Self {
        let new_year_day = new_year(year);
        Self {
            year,
            new_year: new_year_day,
            length: new_year(year + 1) - new_year_day,
        }
    }

    #[inline]
    pub const fn year(&self) -> i64 {
        self.year
    }

    /// 1 Tishrei of this year.
    #[inline]
    pub const fn new_year(&self) -> FixedDay {
        self.new_year
    }

    /// Number of days in the year (353–355 or 383–385).
    #[inline]
    pub const fn length(&self) -> i64 {
        self.length
    }

    /// Thirteen months, with Adar I and Adar II.
    #[inline]
    pub fn is_leap(&self) -> bool {
        is_leap_year(self.year)
    }

    pub fn kind(&self) -> YearKind {
        match self.length % 10 {
            3 => YearKind::Deficient,
            5 => YearKind::Complete,
            _ => YearKind::Regular,
        }
    }

    /// Weekday of Rosh Hashana.
    pub fn rosh_hashana_weekday(&self) -> Weekday {
        self.new_year.weekday()
    }

    /// Days in `month`; zero for Adar II in a common year.
    pub fn month_length(&self, month: HebrewMonth) -> u8 {
        use HebrewMonth::*;
        match month {
            Tishrei | Shvat | Nisan | Sivan | Av => 30,
            Tevet | Iyyar | Tammuz | Elul => 29,
            Marcheshvan if self.kind() == YearKind::Complete => 30,
            Marcheshvan => 29,
            Kislev if self.kind() == YearKind::Deficient => 29,
            Kislev => 30,
            Adar if self.is_leap() => 30,
            Adar => 29,
            AdarII if self.is_leap() => 29,
            AdarII => 0,
        }
    }

    /// Months present in this year, in civil order.
    pub fn months(&self) -> impl Iterator<Item = HebrewMonth> + '_ {
        HebrewMonth::ALL
            .into_iter()
            .filter(move |m| self.month_length(*m) > 0)
    }

    /// Fixed day of the first of `month`.
    pub fn month_start(&self, month: HebrewMonth) -> FixedDay {
        let offset: i64 = HebrewMonth::ALL[..month.civil_index()]
            .iter()
            .map(|m| i64::from(self.month_length(*m)))
            .sum();
        self.new_year + offset
    }

    /// Fixed day of `day` `month` in this year, without validation.
    pub(crate) fn fixed_day(&self, month: HebrewMonth, day: u8) -> FixedDay {
        self.month_start(month) + i64::from(day) - 1
    }

    /// The following year; fails with [`CalendarError::Range`] after
    /// [`MAX_YEAR`].
    pub fn next(&self) -> Result<Self> {
        Self::new(self.year + 1)
    }

    /// The preceding year; fails with [`CalendarError::Range`] before
    /// [`MIN_YEAR`].
    pub fn previous(&self) -> Result<Self> {
        Self::new(self.year - 1)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// HebrewDate
// ═══════════════════════════════════════════════════════════════════════════

/// A validated day of the Hebrew calendar.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct HebrewDate {
    year: HebrewYear,
    month: HebrewMonth,
    day: u8,
}

#[cfg(feature = "serde")]
impl serde::Serialize for HebrewDate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("HebrewDate", 3)?;
        s.serialize_field("year", &self.year.year())?;
        s.serialize_field("month", &self.month)?;
        s.serialize_field("day", &self.day)?;
        s.end()
    }
}

impl HebrewDate {
    /// Build a date, checking that `day` exists in `month` of `year`.
    pub fn new(year: i64, month: HebrewMonth, day: u8) -> Result<Self> {
        let info = HebrewYear::new(year)?;
        let length = info.month_length(month);
        if length == 0 {
            return Err(CalendarError::invalid(format!(
                "{year} is a common year without Adar II"
            )));
        }
        if day == 0 || day > length {
            return Err(CalendarError::invalid(format!(
                "day {day} does not exist in {month:?} {year} ({length} days)"
            )));
        }
        Ok(Self {
            year: info,
            month,
            day,
        })
    }

    pub fn from_fixed(fixed: FixedDay) -> Result<Self> {
        let year = HebrewYear::containing(fixed)?;
        let mut remaining = fixed - year.new_year();
        for month in year.months() {
            let length = i64::from(year.month_length(month));
            if remaining < length {
                return Ok(Self {
                    year,
                    month,
                    day: (remaining + 1) as u8,
                });
            }
            remaining -= length;
        }
        // `containing` guarantees `fixed` lies before the next new year.
        Err(CalendarError::invalid(format!(
            "{fixed} is past the end of Hebrew year {}",
            year.year()
        )))
    }

    pub fn from_gregorian(date: NaiveDate) -> Result<Self> {
        Self::from_fixed(FixedDay::from_date(date))
    }

    pub fn to_fixed(&self) -> FixedDay {
        self.year.fixed_day(self.month, self.day)
    }

    pub fn to_gregorian(&self) -> Result<NaiveDate> {
        let fixed = self.to_fixed();
        fixed
            .to_date()
            .ok_or_else(|| CalendarError::invalid(format!("{fixed} has no Gregorian date")))
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn year(&self) -> i64 {
        self.year.year()
    }

    #[inline]
    pub const fn year_info(&self) -> &HebrewYear {
        &self.year
    }

    #[inline]
    pub const fn month(&self) -> HebrewMonth {
        self.month
    }

    #[inline]
    pub const fn day(&self) -> u8 {
        self.day
    }

    pub fn weekday(&self) -> Weekday {
        self.to_fixed().weekday()
    }

    pub fn is_shabbat(&self) -> bool {
        self.to_fixed().is_saturday()
    }

    /// The date `days` later (or earlier when negative).
    pub fn add_days(&self, days: i64) -> Result<Self> {
        Self::from_fixed(self.to_fixed() + days)
    }
}

/// Gregorian → Hebrew.
pub fn to_hebrew(date: NaiveDate) -> Result<HebrewDate> {
    HebrewDate::from_gregorian(date)
}

/// Hebrew → Gregorian.
pub fn to_gregorian(date: &HebrewDate) -> Result<NaiveDate> {
    date.to_gregorian()
}
