// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! English and Hebrew display names.
//!
//! Calendar types carry identifiers only; this module maps them to strings.

use crate::calendar::{HebrewDate, HebrewMonth};
use crate::error::CalendarError;
use crate::holiday::HolidayId;
use crate::parasha::Parasha;
use std::fmt;
use std::str::FromStr;

/// Output language for display names.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Language {
    #[default]
    English,
    Hebrew,
}

impl FromStr for Language {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "hebrew" | "he" => Ok(Language::Hebrew),
            other => Err(CalendarError::invalid(format!("unsupported language {other:?}"))),
        }
    }
}

/// Types with a display name per [`Language`].
pub trait Localize {
    fn name(&self, language: Language) -> &'static str;
}

/// Shown where no weekly portion is read.
pub const NO_PORTION: &str = "none";

impl Localize for Option<Parasha> {
    fn name(&self, language: Language) -> &'static str {
        match self {
            Some(p) => p.name(language),
            None => NO_PORTION,
        }
    }
}

macro_rules! names {
    ($ty:ident { $($variant:ident => $en:literal, $he:literal;)* }) => {
        impl Localize for $ty {
            fn name(&self, language: Language) -> &'static str {
                match (self, language) {
                    $(
                        ($ty::$variant, Language::English) => $en,
                        ($ty::$variant, Language::Hebrew) => $he,
                    )*
                }
            }
        }
    };
}

names!(HolidayId {
    ErevRoshHashana => "Erev Rosh Hashana", "ערב ראש השנה";
    RoshHashana1 => "Rosh Hashana I", "א' ראש השנה";
    RoshHashana2 => "Rosh Hashana II", "ב' ראש השנה";
    TzomGedaliah => "Tzom Gedaliah", "צום גדליה";
    ErevYomKippur => "Erev Yom Kippur", "ערב יום הכפורים";
    YomKippur => "Yom Kippur", "יום הכפורים";
    ErevSukkot => "Erev Sukkot", "ערב סוכות";
    Sukkot => "Sukkot", "סוכות";
    Sukkot2 => "Sukkot II", "ב' סוכות";
    HolHamoedSukkot => "Hol hamoed Sukkot", "חול המועד סוכות";
    HoshanaRaba => "Hoshana Raba", "הושענא רבה";
    ShminiAtzeret => "Shmini Atzeret", "שמיני עצרת";
    SimchatTorah => "Simchat Torah", "שמחת תורה";
    ShminiAtzeretSimchatTorah => "Shmini Atzeret", "שמיני עצרת";
    Chanukah => "Chanukah", "חנוכה";
    TzomTevet => "Asara B'Tevet", "צום עשרה בטבת";
    TuBishvat => "Tu B'Shvat", "ט\"ו בשבט";
    TaanitEsther => "Taanit Esther", "תענית אסתר";
    Purim => "Purim", "פורים";
    ShushanPurim => "Shushan Purim", "שושן פורים";
    ErevPesach => "Erev Pesach", "ערב פסח";
    Pesach => "Pesach", "פסח";
    Pesach2 => "Pesach II", "ב' פסח";
    HolHamoedPesach => "Hol hamoed Pesach", "חול המועד פסח";
    Pesach7 => "Pesach VII", "שביעי פסח";
    Pesach8 => "Pesach VIII", "אחרון של פסח";
    YomHaShoah => "Yom HaShoah", "יום השואה";
    YomHaZikaron => "Yom HaZikaron", "יום הזכרון";
    YomHaAtzmaut => "Yom HaAtzma'ut", "יום העצמאות";
    LagBaOmer => "Lag B'Omer", "ל\"ג בעומר";
    YomYerushalayim => "Yom Yerushalayim", "יום ירושלים";
    ErevShavuot => "Erev Shavuot", "ערב שבועות";
    Shavuot => "Shavuot", "שבועות";
    Shavuot2 => "Shavuot II", "ב' שבועות";
    TzomTammuz => "Tzom Tammuz", "צום שבעה עשר בתמוז";
    TishaBav => "Tish'a B'Av", "תשעה באב";
    TuBav => "Tu B'Av", "ט\"ו באב";
});

names!(Parasha {
    Bereshit => "Bereshit", "בראשית";
    Noach => "Noach", "נח";
    LechLecha => "Lech-Lecha", "לך לך";
    Vayera => "Vayera", "וירא";
    ChayeiSara => "Chayei Sara", "חיי שרה";
    Toldot => "Toldot", "תולדות";
    Vayetzei => "Vayetzei", "ויצא";
    Vayishlach => "Vayishlach", "וישלח";
    Vayeshev => "Vayeshev", "וישב";
    Miketz => "Miketz", "מקץ";
    Vayigash => "Vayigash", "ויגש";
    Vayechi => "Vayechi", "ויחי";
    Shemot => "Shemot", "שמות";
    Vaera => "Vaera", "וארא";
    Bo => "Bo", "בא";
    Beshalach => "Beshalach", "בשלח";
    Yitro => "Yitro", "יתרו";
    Mishpatim => "Mishpatim", "משפטים";
    Terumah => "Terumah", "תרומה";
    Tetzaveh => "Tetzaveh", "תצוה";
    KiTisa => "Ki Tisa", "כי תשא";
    Vayakhel => "Vayakhel", "ויקהל";
    Pekudei => "Pekudei", "פקודי";
    Vayikra => "Vayikra", "ויקרא";
    Tzav => "Tzav", "צו";
    Shmini => "Shmini", "שמיני";
    Tazria => "Tazria", "תזריע";
    Metzora => "Metzora", "מצורע";
    AchreiMot => "Achrei Mot", "אחרי מות";
    Kedoshim => "Kedoshim", "קדושים";
    Emor => "Emor", "אמור";
    Behar => "Behar", "בהר";
    Bechukotai => "Bechukotai", "בחוקותי";
    Bamidbar => "Bamidbar", "במדבר";
    Nasso => "Nasso", "נשא";
    Behaalotcha => "Beha'alotcha", "בהעלותך";
    Shlach => "Sh'lach", "שלח לך";
    Korach => "Korach", "קרח";
    Chukat => "Chukat", "חוקת";
    Balak => "Balak", "בלק";
    Pinchas => "Pinchas", "פנחס";
    Matot => "Matot", "מטות";
    Masei => "Masei", "מסעי";
    Devarim => "Devarim", "דברים";
    Vaetchanan => "Vaetchanan", "ואתחנן";
    Eikev => "Eikev", "עקב";
    Reeh => "Re'eh", "ראה";
    Shoftim => "Shoftim", "שופטים";
    KiTeitzei => "Ki Teitzei", "כי תצא";
    KiTavo => "Ki Tavo", "כי תבוא";
    Nitzavim => "Nitzavim", "נצבים";
    Vayeilech => "Vayeilech", "וילך";
    HaAzinu => "Ha'Azinu", "האזינו";
    VayakhelPekudei => "Vayakhel-Pekudei", "ויקהל-פקודי";
    TazriaMetzora => "Tazria-Metzora", "תזריע-מצורע";
    AchreiMotKedoshim => "Achrei Mot-Kedoshim", "אחרי מות-קדושים";
    BeharBechukotai => "Behar-Bechukotai", "בהר-בחוקותי";
    ChukatBalak => "Chukat-Balak", "חוקת-בלק";
    MatotMasei => "Matot-Masei", "מטות-מסעי";
    NitzavimVayeilech => "Nitzavim-Vayeilech", "נצבים-וילך";
});

/// Month name; Adar depends on whether the year is a leap year.
pub fn month_name(month: HebrewMonth, leap: bool, language: Language) -> &'static str {
    use HebrewMonth::*;
    match (language, month) {
        (Language::English, Tishrei) => "Tishrei",
        (Language::English, Marcheshvan) => "Marcheshvan",
        (Language::English, Kislev) => "Kislev",
        (Language::English, Tevet) => "Tevet",
        (Language::English, Shvat) => "Shvat",
        (Language::English, Adar) if leap => "Adar I",
        (Language::English, Adar) => "Adar",
        (Language::English, AdarII) => "Adar II",
        (Language::English, Nisan) => "Nisan",
        (Language::English, Iyyar) => "Iyyar",
        (Language::English, Sivan) => "Sivan",
        (Language::English, Tammuz) => "Tammuz",
        (Language::English, Av) => "Av",
        (Language::English, Elul) => "Elul",
        (Language::Hebrew, Tishrei) => "תשרי",
        (Language::Hebrew, Marcheshvan) => "מרחשוון",
        (Language::Hebrew, Kislev) => "כסלו",
        (Language::Hebrew, Tevet) => "טבת",
        (Language::Hebrew, Shvat) => "שבט",
        (Language::Hebrew, Adar) if leap => "אדר א'",
        (Language::Hebrew, Adar) => "אדר",
        (Language::Hebrew, AdarII) => "אדר ב'",
        (Language::Hebrew, Nisan) => "ניסן",
        (Language::Hebrew, Iyyar) => "אייר",
        (Language::Hebrew, Sivan) => "סיוון",
        (Language::Hebrew, Tammuz) => "תמוז",
        (Language::Hebrew, Av) => "אב",
        (Language::Hebrew, Elul) => "אלול",
    }
}

// ── Hebrew numerals ───────────────────────────────────────────────────────

const HUNDREDS: [(u32, char); 4] = [(400, 'ת'), (300, 'ש'), (200, 'ר'), (100, 'ק')];
const TENS: [char; 9] = ['י', 'כ', 'ל', 'מ', 'נ', 'ס', 'ע', 'פ', 'צ'];
const UNITS: [char; 9] = ['א', 'ב', 'ג', 'ד', 'ה', 'ו', 'ז', 'ח', 'ט'];

/// Gematria spelling of `n` below 1000, punctuated with a geresh after a
/// single letter or gershayim before the last letter.
///
/// 15 and 16 are written ט"ו and ט"ז.
pub fn hebrew_numeral(n: u32) -> String {
    let mut rest = n % 1000;
    let mut letters = Vec::new();
    for (value, letter) in HUNDREDS {
        while rest >= value {
            letters.push(letter);
            rest -= value;
        }
    }
    match rest {
        15 => letters.extend(['ט', 'ו']),
        16 => letters.extend(['ט', 'ז']),
        _ => {
            if rest >= 10 {
                letters.push(TENS[(rest / 10 - 1) as usize]);
            }
            if rest % 10 > 0 {
                letters.push(UNITS[(rest % 10 - 1) as usize]);
            }
        }
    }

    let mut out: String = letters.iter().collect();
    match letters.len() {
        0 => {}
        1 => out.push('\''),
        _ => {
            let last = out.pop().unwrap_or_default();
            out.push('"');
            out.push(last);
        }
    }
    out
}

/// Hebrew year with its thousands prefix, e.g. `ה' תשע"ח`.
pub fn hebrew_year(year: i64) -> String {
    let year = year.max(0) as u32;
    let (thousands, rest) = (year / 1000, year % 1000);
    match (thousands, rest) {
        (0, r) => hebrew_numeral(r),
        (t, 0) => hebrew_numeral(t),
        (t, r) => format!("{} {}", hebrew_numeral(t), hebrew_numeral(r)),
    }
}

impl HebrewDate {
    /// `23 Elul 5778` / `כ"ג אלול ה' תשע"ח`.
    pub fn format(&self, language: Language) -> String {
        let month = month_name(self.month(), self.year_info().is_leap(), language);
        match language {
            Language::English => format!("{} {} {}", self.day(), month, self.year()),
            Language::Hebrew => format!(
                "{} {} {}",
                hebrew_numeral(u32::from(self.day())),
                month,
                hebrew_year(self.year())
            ),
        }
    }
}

impl fmt::Display for HebrewDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(Language::English))
    }
}
