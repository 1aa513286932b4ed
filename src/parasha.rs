// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Weekly Torah portion schedule.
//!
//! A Hebrew year is read from its first Shabbat onwards. The cycle resumes at
//! the portion left over from the previous year (Vayeilech or Ha'Azinu,
//! depending on the weekday of Rosh Hashana) and restarts at Bereshit on the
//! first free Shabbat after Simchat Torah. Shabbatot that fall on a festival
//! or on Chol HaMoed have their own reading and report no weekly portion.
//!
//! Portion pairs are joined when the remaining free Shabbatot before one of
//! the fixed anchors cannot hold every portion singly:
//!
//! | Anchor portion | Must be read by |
//! |----------------|-----------------|
//! | Tzav (common) / Metzora (leap) | the Shabbat before 15 Nisan |
//! | Bamidbar | the Shabbat before Shavuot |
//! | Devarim | the Shabbat on or before 9 Av |
//! | Nitzavim | the Shabbat before Rosh Hashana |
//!
//! Chukat–Balak is only joined when the later Matot–Masei pair cannot absorb
//! the shortfall alone. Nitzavim–Vayeilech is joined when the next Rosh
//! Hashana falls on a Thursday or a Shabbat.

use crate::calendar::{HebrewDate, HebrewMonth, HebrewYear};
use crate::day_count::FixedDay;
use crate::error::{CalendarError, Result};
use crate::holiday::{holiday_for, HolidayKind};
use chrono::Weekday;

/// Weekly portion, single or joined.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Parasha {
    // Bereshit
    Bereshit,
    Noach,
    LechLecha,
    Vayera,
    ChayeiSara,
    Toldot,
    Vayetzei,
    Vayishlach,
    Vayeshev,
    Miketz,
    Vayigash,
    Vayechi,
    // Shemot
    Shemot,
    Vaera,
    Bo,
    Beshalach,
    Yitro,
    Mishpatim,
    Terumah,
    Tetzaveh,
    KiTisa,
    Vayakhel,
    Pekudei,
    // Vayikra
    Vayikra,
    Tzav,
    Shmini,
    Tazria,
    Metzora,
    AchreiMot,
    Kedoshim,
    Emor,
    Behar,
    Bechukotai,
    // Bamidbar
    Bamidbar,
    Nasso,
    Behaalotcha,
    Shlach,
    Korach,
    Chukat,
    Balak,
    Pinchas,
    Matot,
    Masei,
    // Devarim
    Devarim,
    Vaetchanan,
    Eikev,
    Reeh,
    Shoftim,
    KiTeitzei,
    KiTavo,
    Nitzavim,
    Vayeilech,
    HaAzinu,
    // Joined readings
    VayakhelPekudei,
    TazriaMetzora,
    AchreiMotKedoshim,
    BeharBechukotai,
    ChukatBalak,
    MatotMasei,
    NitzavimVayeilech,
}

/// Single portions in reading order (Vezot HaBerakhah is read on Simchat
/// Torah and never on a Shabbat).
const SINGLES: [Parasha; 53] = {
    use Parasha::*;
    [
        Bereshit, Noach, LechLecha, Vayera, ChayeiSara, Toldot, Vayetzei, Vayishlach, Vayeshev,
        Miketz, Vayigash, Vayechi, Shemot, Vaera, Bo, Beshalach, Yitro, Mishpatim, Terumah,
        Tetzaveh, KiTisa, Vayakhel, Pekudei, Vayikra, Tzav, Shmini, Tazria, Metzora, AchreiMot,
        Kedoshim, Emor, Behar, Bechukotai, Bamidbar, Nasso, Behaalotcha, Shlach, Korach, Chukat,
        Balak, Pinchas, Matot, Masei, Devarim, Vaetchanan, Eikev, Reeh, Shoftim, KiTeitzei,
        KiTavo, Nitzavim, Vayeilech, HaAzinu,
    ]
};

impl Parasha {
    /// Portions that make up this reading, in order.
    pub fn parts(self) -> (Parasha, Option<Parasha>) {
        use Parasha::*;
        match self {
            VayakhelPekudei => (Vayakhel, Some(Pekudei)),
            TazriaMetzora => (Tazria, Some(Metzora)),
            AchreiMotKedoshim => (AchreiMot, Some(Kedoshim)),
            BeharBechukotai => (Behar, Some(Bechukotai)),
            ChukatBalak => (Chukat, Some(Balak)),
            MatotMasei => (Matot, Some(Masei)),
            NitzavimVayeilech => (Nitzavim, Some(Vayeilech)),
            single => (single, None),
        }
    }

    /// Two portions read on one Shabbat.
    pub fn is_joined(self) -> bool {
        self.parts().1.is_some()
    }

    /// Position of the (first) portion in the annual cycle.
    pub fn cycle_index(self) -> usize {
        self.parts().0 as usize
    }

    fn joined_from(index: usize) -> Option<Parasha> {
        use Parasha::*;
        match index {
            21 => Some(VayakhelPekudei),
            26 => Some(TazriaMetzora),
            28 => Some(AchreiMotKedoshim),
            31 => Some(BeharBechukotai),
            38 => Some(ChukatBalak),
            41 => Some(MatotMasei),
            50 => Some(NitzavimVayeilech),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Schedule
// ═══════════════════════════════════════════════════════════════════════════

const NITZAVIM: usize = Parasha::Nitzavim as usize;
const VAYEILECH: usize = Parasha::Vayeilech as usize;
const HA_AZINU: usize = Parasha::HaAzinu as usize;

/// First portion of each joinable pair, and whether the pair may leave the
/// shortfall to a later pair.
const JOINABLE: [(usize, bool); 6] = [
    (Parasha::Vayakhel as usize, false),
    (Parasha::Tazria as usize, false),
    (Parasha::AchreiMot as usize, false),
    (Parasha::Behar as usize, false),
    (Parasha::Chukat as usize, true),
    (Parasha::Matot as usize, false),
];

/// One Shabbat of the schedule.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ShabbatReading {
    pub shabbat: FixedDay,
    pub portion: Option<Parasha>,
}

fn has_festival_reading(day: FixedDay, diaspora: bool) -> Result<bool> {
    let date = HebrewDate::from_fixed(day)?;
    Ok(matches!(
        holiday_for(&date, diaspora).kind(),
        Some(HolidayKind::YomTov | HolidayKind::HolHamoed)
    ))
}

/// Last Shabbat strictly before `day`.
fn shabbat_before(day: FixedDay) -> FixedDay {
    (day - 1).on_or_before(6)
}

/// Readings for every Shabbat of `year`.
pub fn year_schedule(year: &HebrewYear, diaspora: bool) -> Result<Vec<ShabbatReading>> {
    let next_new_year = year.new_year() + year.length();
    let shabbatot: Vec<FixedDay> = std::iter::successors(Some(year.new_year().on_or_after(6)), |s| {
        Some(*s + 7)
    })
    .take_while(|s| *s < next_new_year)
    .collect();
    let free = shabbatot
        .iter()
        .map(|s| has_festival_reading(*s, diaspora).map(|festival| !festival))
        .collect::<Result<Vec<bool>>>()?;

    let spring_anchor = if year.is_leap() {
        Parasha::Metzora
    } else {
        Parasha::Tzav
    };
    let anchors = [
        (
            spring_anchor as usize,
            shabbat_before(year.fixed_day(HebrewMonth::Nisan, 15)),
        ),
        (
            Parasha::Bamidbar as usize,
            shabbat_before(year.fixed_day(HebrewMonth::Sivan, 6)),
        ),
        (
            Parasha::Devarim as usize,
            year.fixed_day(HebrewMonth::Av, 9).on_or_before(6),
        ),
        (NITZAVIM, shabbat_before(next_new_year)),
    ];

    let mut next = match year.rosh_hashana_weekday() {
        Weekday::Mon | Weekday::Tue => VAYEILECH,
        _ => HA_AZINU,
    };
    let mut schedule = Vec::with_capacity(shabbatot.len());

    for (i, &shabbat) in shabbatot.iter().enumerate() {
        if !free[i] {
            schedule.push(ShabbatReading {
                shabbat,
                portion: None,
            });
            continue;
        }
        if next > HA_AZINU {
            next = 0;
        }

        let join = if next == NITZAVIM {
            matches!(next_new_year.weekday(), Weekday::Thu | Weekday::Sat)
        } else if let Some(&(_, deferrable)) = JOINABLE.iter().find(|(p, _)| *p == next) {
            anchors
                .iter()
                .find(|(anchor, _)| *anchor > next)
                .is_some_and(|&(anchor, deadline)| {
                    let portions = (anchor - next + 1) as i64;
                    let slots = shabbatot[i..]
                        .iter()
                        .zip(&free[i..])
                        .filter(|(s, f)| **f && **s <= deadline)
                        .count() as i64;
                    let shortfall = portions - slots;
                    let later_pairs = JOINABLE
                        .iter()
                        .filter(|(q, _)| *q > next && *q < anchor)
                        .count() as i64;
                    shortfall > 0 && (!deferrable || shortfall > later_pairs)
                })
        } else {
            false
        };

        let portion = match (join, Parasha::joined_from(next)) {
            (true, Some(joined)) => joined,
            _ => SINGLES[next],
        };
        next += if portion.is_joined() { 2 } else { 1 };
        schedule.push(ShabbatReading {
            shabbat,
            portion: Some(portion),
        });
    }

    log::trace!(
        "portion schedule for {} (diaspora={diaspora}): {} Shabbatot",
        year.year(),
        schedule.len()
    );
    Ok(schedule)
}

/// Portion read on the Shabbat `saturday`, or `None` on a festival Shabbat.
pub fn resolve_portion(saturday: &HebrewDate, diaspora: bool) -> Result<Option<Parasha>> {
    if !saturday.is_shabbat() {
        return Err(CalendarError::invalid(format!(
            "{:?} {} {} is not a Shabbat",
            saturday.month(),
            saturday.day(),
            saturday.year()
        )));
    }
    let day = saturday.to_fixed();
    Ok(year_schedule(saturday.year_info(), diaspora)?
        .into_iter()
        .find(|r| r.shabbat == day)
        .and_then(|r| r.portion))
}

/// Portion of the week containing `date`: the one read on the Shabbat on or
/// after it.
pub fn weekly_portion_for(date: &HebrewDate, diaspora: bool) -> Result<Option<Parasha>> {
    let saturday = HebrewDate::from_fixed(date.to_fixed().on_or_after(6))?;
    resolve_portion(&saturday, diaspora)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use Parasha::*;

    fn portion(y: i32, m: u32, d: u32, diaspora: bool) -> Option<Parasha> {
        let date = HebrewDate::from_gregorian(NaiveDate::from_ymd_opt(y, m, d).unwrap()).unwrap();
        weekly_portion_for(&date, diaspora).unwrap()
    }

    #[test]
    fn test_end_and_start_of_cycle_2018() {
        assert_eq!(portion(2018, 9, 1, true), Some(KiTavo));
        assert_eq!(portion(2018, 9, 8, false), Some(Nitzavim));
        assert_eq!(portion(2018, 9, 15, true), Some(Vayeilech));
        assert_eq!(portion(2018, 9, 29, true), None);
        assert_eq!(portion(2018, 10, 6, false), Some(Bereshit));
        // Sunday: the coming Shabbat's portion.
        assert_eq!(portion(2018, 10, 14, false), Some(LechLecha));
    }

    #[test]
    fn test_israel_diaspora_divergence_2019() {
        assert_eq!(portion(2019, 4, 27, true), None);
        assert_eq!(portion(2019, 4, 27, false), Some(AchreiMot));
        assert_eq!(portion(2019, 6, 8, true), Some(Bamidbar));
        assert_eq!(portion(2019, 6, 8, false), Some(Nasso));
        assert_eq!(portion(2019, 8, 3, true), Some(MatotMasei));
        assert_eq!(portion(2019, 8, 3, false), Some(Masei));
    }

    #[test]
    fn test_joined_readings() {
        assert_eq!(portion(2015, 4, 11, false), Some(Shmini));
        assert_eq!(portion(2015, 5, 9, false), Some(Behar));
        assert_eq!(portion(2015, 5, 16, true), Some(BeharBechukotai));
        assert_eq!(portion(2023, 3, 18, true), Some(VayakhelPekudei));
        assert_eq!(portion(2023, 7, 1, true), Some(ChukatBalak));
        assert_eq!(portion(2023, 7, 1, false), Some(Balak));
        assert_eq!(portion(2024, 8, 3, true), Some(MatotMasei));
    }

    #[test]
    fn test_leap_year_2024() {
        assert_eq!(portion(2024, 4, 20, true), Some(Metzora));
        assert_eq!(portion(2024, 6, 8, true), Some(Bamidbar));
        assert_eq!(portion(2024, 10, 5, true), Some(HaAzinu));
    }

    #[test]
    fn test_festival_shabbat_has_no_portion() {
        assert_eq!(portion(2023, 9, 16, true), None);
        assert_eq!(portion(2023, 5, 27, false), Some(Nasso));
    }

    #[test]
    fn test_resolve_requires_shabbat() {
        let friday =
            HebrewDate::from_gregorian(NaiveDate::from_ymd_opt(2018, 9, 7).unwrap()).unwrap();
        assert!(matches!(
            resolve_portion(&friday, true),
            Err(CalendarError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_every_year_reads_the_whole_cycle() {
        for y in 5660..5861 {
            let year = HebrewYear::new(y).unwrap();
            for diaspora in [true, false] {
                let mut read: Vec<usize> = Vec::new();
                for r in year_schedule(&year, diaspora).unwrap() {
                    if let Some(p) = r.portion {
                        let (first, second) = p.parts();
                        read.push(first as usize);
                        read.extend(second.map(|s| s as usize));
                    }
                }
                for index in 0..=NITZAVIM {
                    assert_eq!(
                        read.iter().filter(|i| **i == index).count(),
                        1,
                        "year {y} diaspora={diaspora} portion {:?}",
                        SINGLES[index]
                    );
                }
            }
        }
    }

    #[test]
    fn test_parts() {
        assert_eq!(MatotMasei.parts(), (Matot, Some(Masei)));
        assert_eq!(Noach.parts(), (Noach, None));
        assert_eq!(NitzavimVayeilech.cycle_index(), 50);
        assert!(!HaAzinu.is_joined());
    }
}
