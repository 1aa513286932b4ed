// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Holiday table and per-day holiday facts.
//!
//! The table is a static list of placement rules. Each rule yields the first
//! fixed day and the number of days an occasion spans in a given Hebrew year,
//! for Israel, the diaspora, or both. Holiness and kind belong to the
//! [`HolidayId`], not to the placement.

use crate::calendar::{HebrewDate, HebrewMonth, HebrewYear};
use crate::day_count::FixedDay;
use chrono::Weekday;

// ═══════════════════════════════════════════════════════════════════════════
// Identifiers
// ═══════════════════════════════════════════════════════════════════════════

/// Closed set of holidays and observances known to the resolver.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HolidayId {
    ErevRoshHashana,
    RoshHashana1,
    RoshHashana2,
    TzomGedaliah,
    ErevYomKippur,
    YomKippur,
    ErevSukkot,
    Sukkot,
    Sukkot2,
    HolHamoedSukkot,
    HoshanaRaba,
    ShminiAtzeret,
    SimchatTorah,
    /// Israel: Shmini Atzeret and Simchat Torah on the same day.
    ShminiAtzeretSimchatTorah,
    Chanukah,
    TzomTevet,
    TuBishvat,
    TaanitEsther,
    Purim,
    ShushanPurim,
    ErevPesach,
    Pesach,
    Pesach2,
    HolHamoedPesach,
    Pesach7,
    Pesach8,
    YomHaShoah,
    YomHaZikaron,
    YomHaAtzmaut,
    LagBaOmer,
    YomYerushalayim,
    ErevShavuot,
    Shavuot,
    Shavuot2,
    TzomTammuz,
    TishaBav,
    TuBav,
}

/// Work restriction attached to a day.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Holiness {
    /// No restriction (weekday, fast, minor festival).
    #[default]
    Ordinary,
    /// Yom Tov: melacha forbidden except food preparation.
    YomTov,
    /// Shabbat-level restriction.
    Shabbat,
}

impl Holiness {
    /// Numeric level: 0, 1 or 2.
    #[inline]
    pub const fn level(self) -> u8 {
        self as u8
    }

    /// Yom Tov or Shabbat.
    #[inline]
    pub const fn is_restricted(self) -> bool {
        !matches!(self, Holiness::Ordinary)
    }
}

/// Broad category of an observance.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HolidayKind {
    YomTov,
    Erev,
    HolHamoed,
    Fast,
    MinorFestival,
    ModernIsraeli,
}

impl HolidayId {
    /// Restriction the day carries on its own, before any Shabbat overlap.
    /// Only Yom Kippur reaches Shabbat level.
    pub const fn holiness(self) -> Holiness {
        use HolidayId::*;
        match self {
            YomKippur => Holiness::Shabbat,
            RoshHashana1 | RoshHashana2 | Sukkot | Sukkot2 | ShminiAtzeret | SimchatTorah
            | ShminiAtzeretSimchatTorah | Pesach | Pesach2 | Pesach7 | Pesach8 | Shavuot
            | Shavuot2 => Holiness::YomTov,
            _ => Holiness::Ordinary,
        }
    }

    /// Broad category, used to tell Yom Tov from Erev days, fasts and the
    /// modern Israeli days.
    pub const fn kind(self) -> HolidayKind {
        use HolidayId::*;
        match self {
            ErevRoshHashana | ErevYomKippur | ErevSukkot | ErevPesach | ErevShavuot => {
                HolidayKind::Erev
            }
            HolHamoedSukkot | HoshanaRaba | HolHamoedPesach => HolidayKind::HolHamoed,
            TzomGedaliah | TzomTevet | TaanitEsther | TzomTammuz | TishaBav => HolidayKind::Fast,
            Chanukah | TuBishvat | Purim | ShushanPurim | LagBaOmer | TuBav => {
                HolidayKind::MinorFestival
            }
            YomHaShoah | YomHaZikaron | YomHaAtzmaut | YomYerushalayim => {
                HolidayKind::ModernIsraeli
            }
            _ => HolidayKind::YomTov,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Placement table
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Scope {
    Everywhere,
    Israel,
    Diaspora,
}

impl Scope {
    fn applies(self, diaspora: bool) -> bool {
        match self {
            Scope::Everywhere => true,
            Scope::Israel => !diaspora,
            Scope::Diaspora => diaspora,
        }
    }
}

#[derive(Debug, Copy, Clone)]
enum When {
    Day(HebrewMonth, u8),
    /// `len` consecutive days from the given day.
    Span(HebrewMonth, u8, u8),
    /// Day of Adar in a common year, of Adar II in a leap year.
    LastAdar(u8),
    /// Fast pushed to Sunday when the date is a Shabbat.
    Postponed(HebrewMonth, u8),
    /// 13 Adar, brought back to Thursday when it is a Shabbat.
    EstherFast,
    Shoah,
    Zikaron,
    Atzmaut,
}

struct Entry {
    id: HolidayId,
    when: When,
    scope: Scope,
    /// First Hebrew year the observance exists.
    since: i64,
}

const fn entry(id: HolidayId, when: When, scope: Scope) -> Entry {
    Entry {
        id,
        when,
        scope,
        since: 0,
    }
}

const fn modern(id: HolidayId, when: When, since: i64) -> Entry {
    Entry {
        id,
        when,
        scope: Scope::Everywhere,
        since,
    }
}

use HebrewMonth as M;
use HolidayId as H;
use Scope::{Diaspora, Everywhere, Israel};

static HOLIDAYS: &[Entry] = &[
    entry(H::ErevRoshHashana, When::Day(M::Elul, 29), Everywhere),
    entry(H::RoshHashana1, When::Day(M::Tishrei, 1), Everywhere),
    entry(H::RoshHashana2, When::Day(M::Tishrei, 2), Everywhere),
    entry(H::TzomGedaliah, When::Postponed(M::Tishrei, 3), Everywhere),
    entry(H::ErevYomKippur, When::Day(M::Tishrei, 9), Everywhere),
    entry(H::YomKippur, When::Day(M::Tishrei, 10), Everywhere),
    entry(H::ErevSukkot, When::Day(M::Tishrei, 14), Everywhere),
    entry(H::Sukkot, When::Day(M::Tishrei, 15), Everywhere),
    entry(H::Sukkot2, When::Day(M::Tishrei, 16), Diaspora),
    entry(H::HolHamoedSukkot, When::Span(M::Tishrei, 16, 5), Israel),
    entry(H::HolHamoedSukkot, When::Span(M::Tishrei, 17, 4), Diaspora),
    entry(H::HoshanaRaba, When::Day(M::Tishrei, 21), Everywhere),
    entry(H::ShminiAtzeretSimchatTorah, When::Day(M::Tishrei, 22), Israel),
    entry(H::ShminiAtzeret, When::Day(M::Tishrei, 22), Diaspora),
    entry(H::SimchatTorah, When::Day(M::Tishrei, 23), Diaspora),
    entry(H::Chanukah, When::Span(M::Kislev, 25, 8), Everywhere),
    entry(H::TzomTevet, When::Day(M::Tevet, 10), Everywhere),
    entry(H::TuBishvat, When::Day(M::Shvat, 15), Everywhere),
    entry(H::TaanitEsther, When::EstherFast, Everywhere),
    entry(H::Purim, When::LastAdar(14), Everywhere),
    entry(H::ShushanPurim, When::LastAdar(15), Everywhere),
    entry(H::ErevPesach, When::Day(M::Nisan, 14), Everywhere),
    entry(H::Pesach, When::Day(M::Nisan, 15), Everywhere),
    entry(H::Pesach2, When::Day(M::Nisan, 16), Diaspora),
    entry(H::HolHamoedPesach, When::Span(M::Nisan, 16, 5), Israel),
    entry(H::HolHamoedPesach, When::Span(M::Nisan, 17, 4), Diaspora),
    entry(H::Pesach7, When::Day(M::Nisan, 21), Everywhere),
    entry(H::Pesach8, When::Day(M::Nisan, 22), Diaspora),
    modern(H::YomHaShoah, When::Shoah, 5711),
    modern(H::YomHaZikaron, When::Zikaron, 5708),
    modern(H::YomHaAtzmaut, When::Atzmaut, 5708),
    entry(H::LagBaOmer, When::Day(M::Iyyar, 18), Everywhere),
    modern(H::YomYerushalayim, When::Day(M::Iyyar, 28), 5728),
    entry(H::ErevShavuot, When::Day(M::Sivan, 5), Everywhere),
    entry(H::Shavuot, When::Day(M::Sivan, 6), Everywhere),
    entry(H::Shavuot2, When::Day(M::Sivan, 7), Diaspora),
    entry(H::TzomTammuz, When::Postponed(M::Tammuz, 17), Everywhere),
    entry(H::TishaBav, When::Postponed(M::Av, 9), Everywhere),
    entry(H::TuBav, When::Day(M::Av, 15), Everywhere),
];

/// From 5764 a Monday Yom HaAtzmaut moves to Tuesday.
const ATZMAUT_MONDAY_RULE_SINCE: i64 = 5764;

fn atzmaut(year: &HebrewYear) -> FixedDay {
    let nominal = year.fixed_day(M::Iyyar, 5);
    match nominal.weekday() {
        Weekday::Fri => nominal - 1,
        Weekday::Sat => nominal - 2,
        Weekday::Mon if year.year() >= ATZMAUT_MONDAY_RULE_SINCE => nominal + 1,
        _ => nominal,
    }
}

impl When {
    /// First day and length in `year`.
    fn place(self, year: &HebrewYear) -> (FixedDay, i64) {
        match self {
            When::Day(month, day) => (year.fixed_day(month, day), 1),
            When::Span(month, day, len) => (year.fixed_day(month, day), i64::from(len)),
            When::LastAdar(day) => (year.fixed_day(M::last_adar(year), day), 1),
            When::Postponed(month, day) => {
                let nominal = year.fixed_day(month, day);
                let observed = if nominal.is_saturday() {
                    nominal + 1
                } else {
                    nominal
                };
                (observed, 1)
            }
            When::EstherFast => {
                let nominal = year.fixed_day(M::last_adar(year), 13);
                let observed = if nominal.is_saturday() {
                    nominal - 2
                } else {
                    nominal
                };
                (observed, 1)
            }
            When::Shoah => {
                let nominal = year.fixed_day(M::Nisan, 27);
                let observed = match nominal.weekday() {
                    Weekday::Fri => nominal - 1,
                    Weekday::Sun => nominal + 1,
                    _ => nominal,
                };
                (observed, 1)
            }
            When::Zikaron => (atzmaut(year) - 1, 1),
            When::Atzmaut => (atzmaut(year), 1),
        }
    }
}

/// Holidays observed on `date`, in table order.
fn matching(date: &HebrewDate, diaspora: bool) -> impl Iterator<Item = HolidayId> + '_ {
    let year = date.year_info();
    let fixed = date.to_fixed();
    HOLIDAYS
        .iter()
        .filter(move |e| e.scope.applies(diaspora) && year.year() >= e.since)
        .filter(move |e| {
            let (first, len) = e.when.place(year);
            fixed >= first && fixed - first < len
        })
        .map(|e| e.id)
}

fn holiday_id(date: &HebrewDate, diaspora: bool) -> Option<HolidayId> {
    // Ties go to the stronger restriction; among equals the first entry wins.
    matching(date, diaspora).fold(None, |best: Option<HolidayId>, id| match best {
        Some(b) if b.holiness() >= id.holiness() => Some(b),
        _ => Some(id),
    })
}

fn is_restricted_holiday(date: &HebrewDate, diaspora: bool) -> bool {
    holiday_id(date, diaspora).is_some_and(|id| id.holiness().is_restricted())
}

// ═══════════════════════════════════════════════════════════════════════════
// HolidayFact
// ═══════════════════════════════════════════════════════════════════════════

/// What a single civil day is, holiday-wise.
///
/// The multi-day flags describe runs of consecutive restricted holiday days
/// (e.g. the two days of Rosh Hashana). A lone Yom Tov has all three unset.
/// The last day of a run is both a continuation and the end.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HolidayFact {
    pub id: Option<HolidayId>,
    pub holiness: Holiness,
    pub is_multi_day_start: bool,
    pub is_multi_day_continuation: bool,
    pub is_multi_day_end: bool,
}

impl HolidayFact {
    /// Category of the holiday, if any.
    pub fn kind(&self) -> Option<HolidayKind> {
        self.id.map(HolidayId::kind)
    }
}

/// Resolve the holiday fact for `date`.
pub fn holiday_for(date: &HebrewDate, diaspora: bool) -> HolidayFact {
    let Some(id) = holiday_id(date, diaspora) else {
        return HolidayFact::default();
    };
    let holiness = id.holiness();
    let mut fact = HolidayFact {
        id: Some(id),
        holiness,
        ..HolidayFact::default()
    };
    if holiness.is_restricted() {
        let neighbour = |offset: i64| {
            date.add_days(offset)
                .map(|d| is_restricted_holiday(&d, diaspora))
                .unwrap_or(false)
        };
        let (prev, next) = (neighbour(-1), neighbour(1));
        fact.is_multi_day_start = !prev && next;
        fact.is_multi_day_continuation = prev;
        fact.is_multi_day_end = prev && !next;
    }
    fact
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use HebrewMonth::*;

    fn heb(year: i64, month: HebrewMonth, day: u8) -> HebrewDate {
        HebrewDate::new(year, month, day).unwrap()
    }

    fn on(y: i32, m: u32, d: u32, diaspora: bool) -> Option<HolidayId> {
        let date = HebrewDate::from_gregorian(NaiveDate::from_ymd_opt(y, m, d).unwrap()).unwrap();
        holiday_for(&date, diaspora).id
    }

    #[test]
    fn test_rosh_hashana_both_settings() {
        for diaspora in [true, false] {
            let first = holiday_for(&heb(5779, Tishrei, 1), diaspora);
            assert_eq!(first.id, Some(HolidayId::RoshHashana1));
            assert_eq!(first.holiness.level(), 1);
            assert!(first.is_multi_day_start);
            assert!(!first.is_multi_day_end);

            let second = holiday_for(&heb(5779, Tishrei, 2), diaspora);
            assert_eq!(second.id, Some(HolidayId::RoshHashana2));
            assert_eq!(second.holiness.level(), 1);
            assert!(second.is_multi_day_continuation);
            assert!(second.is_multi_day_end);
        }
    }

    #[test]
    fn test_rosh_hashana_from_gregorian() {
        assert_eq!(on(2018, 9, 10, false), Some(HolidayId::RoshHashana1));
        assert_eq!(on(2018, 9, 9, true), Some(HolidayId::ErevRoshHashana));
    }

    #[test]
    fn test_shmini_atzeret_israel_vs_diaspora() {
        let israel = holiday_for(&heb(5779, Tishrei, 22), false);
        assert_eq!(israel.id, Some(HolidayId::ShminiAtzeretSimchatTorah));
        assert_eq!(israel.holiness, Holiness::YomTov);
        assert_eq!(holiday_for(&heb(5779, Tishrei, 23), false).id, None);

        let sa = holiday_for(&heb(5779, Tishrei, 22), true);
        let st = holiday_for(&heb(5779, Tishrei, 23), true);
        assert_eq!(sa.id, Some(HolidayId::ShminiAtzeret));
        assert_eq!(st.id, Some(HolidayId::SimchatTorah));
        assert!(sa.is_multi_day_start);
        assert!(st.is_multi_day_end);
    }

    #[test]
    fn test_yom_kippur_is_shabbat_level() {
        let yk = holiday_for(&heb(5779, Tishrei, 10), true);
        assert_eq!(yk.id, Some(HolidayId::YomKippur));
        assert_eq!(yk.holiness.level(), 2);
        assert!(!yk.is_multi_day_start && !yk.is_multi_day_continuation && !yk.is_multi_day_end);
    }

    #[test]
    fn test_hoshana_raba_named_but_unrestricted() {
        let hr = holiday_for(&heb(5779, Tishrei, 21), true);
        assert_eq!(hr.id, Some(HolidayId::HoshanaRaba));
        assert_eq!(hr.holiness, Holiness::Ordinary);
        assert_eq!(hr.kind(), Some(HolidayKind::HolHamoed));
    }

    #[test]
    fn test_sukkot_hol_hamoed_length() {
        let israel: Vec<_> = (15..=22).map(|d| holiday_for(&heb(5779, Tishrei, d), false).id).collect();
        assert_eq!(israel[0], Some(HolidayId::Sukkot));
        assert!(israel[1..6].iter().all(|id| *id == Some(HolidayId::HolHamoedSukkot)));
        assert_eq!(israel[6], Some(HolidayId::HoshanaRaba));

        assert_eq!(holiday_for(&heb(5779, Tishrei, 16), true).id, Some(HolidayId::Sukkot2));
        assert_eq!(
            holiday_for(&heb(5779, Tishrei, 17), true).id,
            Some(HolidayId::HolHamoedSukkot)
        );
    }

    #[test]
    fn test_pesach_lengths() {
        let restricted = |diaspora: bool| -> Vec<u8> {
            (15..=22)
                .filter(|d| holiday_for(&heb(5784, Nisan, *d), diaspora).holiness.is_restricted())
                .collect()
        };
        assert_eq!(restricted(false), vec![15, 21]);
        assert_eq!(restricted(true), vec![15, 16, 21, 22]);
        assert_eq!(holiday_for(&heb(5784, Nisan, 22), false).id, None);
    }

    #[test]
    fn test_shavuot_lengths() {
        let israel = holiday_for(&heb(5783, Sivan, 6), false);
        assert_eq!(israel.id, Some(HolidayId::Shavuot));
        assert!(!israel.is_multi_day_start);
        assert_eq!(holiday_for(&heb(5783, Sivan, 7), false).id, None);
        assert_eq!(holiday_for(&heb(5783, Sivan, 7), true).id, Some(HolidayId::Shavuot2));
    }

    #[test]
    fn test_postponed_fasts() {
        // 9 Av 5779 was a Shabbat: the fast moved to Sunday 2019-08-11.
        assert_eq!(on(2019, 8, 10, true), None);
        assert_eq!(on(2019, 8, 11, true), Some(HolidayId::TishaBav));
        // 3 Tishrei 5785 was a Shabbat: Tzom Gedaliah on 2024-10-06.
        assert_eq!(on(2024, 10, 5, true), None);
        assert_eq!(on(2024, 10, 6, true), Some(HolidayId::TzomGedaliah));
        // 13 Adar II 5784 was a Shabbat: Taanit Esther on Thursday 2024-03-21.
        assert_eq!(on(2024, 3, 21, true), Some(HolidayId::TaanitEsther));
        assert_eq!(on(2024, 3, 24, true), Some(HolidayId::Purim));
    }

    #[test]
    fn test_purim_in_adar_ii() {
        assert_eq!(holiday_for(&heb(5784, AdarII, 14), true).id, Some(HolidayId::Purim));
        assert_eq!(holiday_for(&heb(5784, Adar, 14), true).id, None);
        assert_eq!(holiday_for(&heb(5783, Adar, 14), true).id, Some(HolidayId::Purim));
    }

    #[test]
    fn test_chanukah_spans_eight_days() {
        let first = heb(5779, Kislev, 25);
        for offset in 0..8 {
            let d = first.add_days(offset).unwrap();
            assert_eq!(holiday_for(&d, true).id, Some(HolidayId::Chanukah), "{offset}");
        }
        assert_eq!(holiday_for(&first.add_days(8).unwrap(), true).id, None);
    }

    #[test]
    fn test_modern_days_shift() {
        // 5 Iyar 5778 was a Friday: observed Thursday 2018-04-19.
        assert_eq!(on(2018, 4, 18, false), Some(HolidayId::YomHaZikaron));
        assert_eq!(on(2018, 4, 19, false), Some(HolidayId::YomHaAtzmaut));
        assert_eq!(on(2018, 4, 20, false), None);
        // No Yom Yerushalayim before 5728.
        assert_eq!(holiday_for(&heb(5720, Iyyar, 28), false).id, None);
        assert_eq!(
            holiday_for(&heb(5780, Iyyar, 28), false).id,
            Some(HolidayId::YomYerushalayim)
        );
    }

    #[test]
    fn test_minor_days_carry_no_restriction() {
        for (month, day) in [(Tevet, 10), (Shvat, 15), (Iyyar, 18), (Av, 15)] {
            let fact = holiday_for(&heb(5780, month, day), true);
            assert!(fact.id.is_some());
            assert_eq!(fact.holiness, Holiness::Ordinary);
        }
    }
}
