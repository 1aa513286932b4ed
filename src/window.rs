// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Shabbat and Yom Tov restricted windows.
//!
//! A civil day is *restricted* when it is a Saturday or its holiday has
//! holiness of at least Yom Tov. Each restricted day contributes a candidate
//! period from candle lighting (sunset of the previous civil day minus the
//! configured lead) to havdalah (nightfall of the day itself, or a fixed
//! delay after sunset). Candidates that overlap or touch are merged, so a
//! two-day Yom Tov followed by Shabbat is reported as a single window.
//!
//! The scan covers a fixed horizon of civil days around `now`; this is always
//! enough to see the longest possible run (three days) and the next Shabbat.

use crate::calendar::HebrewDate;
use crate::config::{HavdalahRule, Settings};
use crate::error::{CalendarError, Result};
use crate::holiday::{holiday_for, HolidayFact, HolidayId};
use crate::location::Location;
use crate::names::{Language, Localize};
use crate::parasha::{resolve_portion, Parasha};
use crate::period::{merge_touching, Interval, TimeInstant, ZonedPeriod};
use crate::solar::{nightfall, sunset, Twilight};
use chrono::{DateTime, Datelike, Days, NaiveDate, TimeDelta, Weekday};
use chrono_tz::Tz;
use std::fmt;

/// Civil days scanned before today.
const LOOKBEHIND_DAYS: u64 = 3;
/// Civil days scanned after today.
const LOOKAHEAD_DAYS: u64 = 20;

/// What a restricted window is made of.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum WindowKind {
    /// Shabbat alone.
    Shabbat,
    /// Yom Tov days only, no Saturday.
    Holiday,
    /// Yom Tov adjacent to or coinciding with Shabbat.
    Merged,
}

/// One restricted civil day inside a window.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RestrictedDay {
    pub date: NaiveDate,
    pub hebrew: HebrewDate,
    pub holiday: HolidayFact,
    pub is_shabbat: bool,
    /// Candle lighting on the eve of this day.
    pub candle_lighting: DateTime<Tz>,
    /// End of this day's restriction if nothing follows it.
    pub havdalah: DateTime<Tz>,
}

impl RestrictedDay {
    fn span(&self) -> ZonedPeriod {
        Interval::new(self.candle_lighting, self.havdalah)
    }
}

/// A contiguous span during which melacha is restricted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RestrictedWindow {
    pub kind: WindowKind,
    pub span: ZonedPeriod,
    pub days: Vec<RestrictedDay>,
    /// First Yom Tov of the window.
    pub holiday: Option<HolidayId>,
    /// Portion read on the window's Saturday, if it has one and it is not a
    /// festival Shabbat.
    pub parasha: Option<Parasha>,
    /// Language of [`RestrictedWindow::title`] and of the `Display` output,
    /// taken from [`Settings::language`].
    pub language: Language,
}

impl RestrictedWindow {
    /// Sunset of the eve of the first day, less the candle lighting offset.
    pub fn candle_lighting(&self) -> DateTime<Tz> {
        self.span.start
    }

    /// End of the last day, per the [`HavdalahRule`](crate::HavdalahRule).
    pub fn havdalah(&self) -> DateTime<Tz> {
        self.span.end
    }

    /// `candle_lighting <= now < havdalah`.
    pub fn contains(&self, now: &DateTime<Tz>) -> bool {
        self.span.contains(now)
    }

    pub fn has_shabbat(&self) -> bool {
        self.days.iter().any(|d| d.is_shabbat)
    }

    /// Candle lighting relevant at `now`: the latest night already begun
    /// inside the window, otherwise the window's first.
    pub fn candle_lighting_for(&self, now: &DateTime<Tz>) -> DateTime<Tz> {
        if !self.contains(now) {
            return self.candle_lighting();
        }
        self.days
            .iter()
            .map(|d| d.candle_lighting)
            .filter(|c| c <= now)
            .last()
            .unwrap_or_else(|| self.candle_lighting())
    }

    /// Holiday name, else the portion, else "Shabbat".
    pub fn label(&self, language: Language) -> &'static str {
        match (self.holiday, self.parasha) {
            (Some(h), _) => h.name(language),
            (None, Some(p)) => p.name(language),
            (None, None) => match language {
                Language::English => "Shabbat",
                Language::Hebrew => "שבת",
            },
        }
    }

    /// Shorthand for `label(Language::Hebrew)`.
    pub fn hebrew_label(&self) -> &'static str {
        self.label(Language::Hebrew)
    }

    /// [`label`](Self::label) in the language the window was resolved with.
    pub fn title(&self) -> &'static str {
        self.label(self.language)
    }
}

impl fmt::Display for RestrictedWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} to {}",
            self.title(),
            self.candle_lighting().format("%Y-%m-%d %H:%M"),
            self.havdalah().format("%Y-%m-%d %H:%M")
        )
    }
}

/// The window `now` is in, if any, and the next one to begin.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WindowReport {
    pub current: Option<RestrictedWindow>,
    pub upcoming: RestrictedWindow,
}

// ═══════════════════════════════════════════════════════════════════════════
// Candidate construction
// ═══════════════════════════════════════════════════════════════════════════

fn havdalah_on(date: NaiveDate, location: &Location, rule: HavdalahRule) -> Result<DateTime<Tz>> {
    Ok(match rule {
        HavdalahRule::ThreeStars { offset } => {
            nightfall(date, location, Twilight::ThreeStars)?.add_duration(TimeDelta::minutes(offset))
        }
        HavdalahRule::AfterSunset { minutes } => {
            sunset(date, location)?.add_duration(TimeDelta::minutes(minutes))
        }
    })
}

fn restricted_day(
    date: NaiveDate,
    location: &Location,
    settings: &Settings,
) -> Result<Option<RestrictedDay>> {
    let hebrew = HebrewDate::from_gregorian(date)?;
    let holiday = holiday_for(&hebrew, settings.diaspora);
    let is_shabbat = date.weekday() == Weekday::Sat;
    if !is_shabbat && !holiday.holiness.is_restricted() {
        return Ok(None);
    }
    let eve = date.pred_opt().ok_or_else(|| {
        CalendarError::invalid(format!("no civil day before {date}"))
    })?;
    let day = RestrictedDay {
        date,
        hebrew,
        holiday,
        is_shabbat,
        candle_lighting: sunset(eve, location)?.sub_duration(settings.candle_lead()),
        havdalah: havdalah_on(date, location, settings.havdalah)?,
    };
    log::trace!(
        "{date}: restricted ({:?}, shabbat={is_shabbat}) {}",
        holiday.id,
        day.span()
    );
    Ok(Some(day))
}

fn scan_range(today: NaiveDate) -> Result<impl Iterator<Item = NaiveDate>> {
    let first = today
        .checked_sub_days(Days::new(LOOKBEHIND_DAYS))
        .ok_or_else(|| CalendarError::invalid(format!("{today} is too early to scan")))?;
    let last = today
        .checked_add_days(Days::new(LOOKAHEAD_DAYS))
        .ok_or_else(|| CalendarError::invalid(format!("{today} is too late to scan")))?;
    Ok(first.iter_days().take_while(move |d| *d <= last))
}

fn build_window(
    span: ZonedPeriod,
    days: Vec<RestrictedDay>,
    settings: &Settings,
) -> Result<RestrictedWindow> {
    let has_shabbat = days.iter().any(|d| d.is_shabbat);
    let has_yom_tov = days.iter().any(|d| d.holiday.holiness.is_restricted());
    let kind = match (has_shabbat, has_yom_tov) {
        (true, false) => WindowKind::Shabbat,
        (false, _) => WindowKind::Holiday,
        (true, true) => WindowKind::Merged,
    };
    let holiday = days
        .iter()
        .find(|d| d.holiday.holiness.is_restricted())
        .and_then(|d| d.holiday.id);
    let parasha = match days.iter().find(|d| d.is_shabbat) {
        Some(saturday) => resolve_portion(&saturday.hebrew, settings.diaspora)?,
        None => None,
    };
    Ok(RestrictedWindow {
        kind,
        span,
        days,
        holiday,
        parasha,
        language: settings.language,
    })
}

/// All windows whose days fall in the scan horizon around `now`, in order.
pub fn windows_around(
    now: &DateTime<Tz>,
    location: &Location,
    settings: &Settings,
) -> Result<Vec<RestrictedWindow>> {
    settings.validate()?;
    let today = now.with_timezone(&location.time_zone).date_naive();

    let mut days = Vec::new();
    for date in scan_range(today)? {
        if let Some(day) = restricted_day(date, location, settings)? {
            days.push(day);
        }
    }

    let spans = merge_touching(days.iter().map(RestrictedDay::span).collect());
    let mut remaining = days.into_iter().peekable();
    let mut windows = Vec::with_capacity(spans.len());
    for span in spans {
        let mut members = Vec::new();
        while let Some(day) = remaining.next_if(|d| span.contains(&d.candle_lighting)) {
            members.push(day);
        }
        let window = build_window(span, members, settings)?;
        log::debug!(
            "window {:?} {} ({} days, holiday {:?}, parasha {:?})",
            window.kind,
            window.span,
            window.days.len(),
            window.holiday,
            window.parasha
        );
        windows.push(window);
    }
    Ok(windows)
}

// ═══════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════

/// The window containing `now`, if any, and the next window to begin after
/// `now`.
pub fn restricted_windows(
    now: DateTime<Tz>,
    location: &Location,
    settings: &Settings,
) -> Result<WindowReport> {
    let windows = windows_around(&now, location, settings)?;
    let current = windows.iter().find(|w| w.contains(&now)).cloned();
    let upcoming = windows
        .into_iter()
        .find(|w| w.candle_lighting() > now)
        .ok_or_else(|| {
            CalendarError::invalid(format!("no restricted window begins within {LOOKAHEAD_DAYS} days of {now}"))
        })?;
    log::debug!(
        "at {now}: current {:?}, upcoming {}",
        current.as_ref().map(|w| w.span),
        upcoming.span
    );
    Ok(WindowReport { current, upcoming })
}

/// The window holding the current or next Shabbat.
pub fn shabbat_window(
    now: DateTime<Tz>,
    location: &Location,
    settings: &Settings,
) -> Result<RestrictedWindow> {
    windows_around(&now, location, settings)?
        .into_iter()
        .find(|w| w.has_shabbat() && w.havdalah() > now)
        .ok_or_else(|| CalendarError::invalid(format!("no Shabbat within {LOOKAHEAD_DAYS} days of {now}")))
}

/// Hebrew date at `now`: the civil day's date, advanced by one from that
/// day's sunset onwards.
pub fn hebrew_date_at(now: DateTime<Tz>, location: &Location) -> Result<HebrewDate> {
    let local = now.with_timezone(&location.time_zone);
    let date = local.date_naive();
    let hebrew = HebrewDate::from_gregorian(date)?;
    if local >= sunset(date, location)? {
        hebrew.add_days(1)
    } else {
        Ok(hebrew)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::HebrewMonth;
    use chrono::TimeZone;
    use chrono_tz::{America::New_York, Asia::Jerusalem};

    fn nyc() -> Location {
        Location::new(40.7128, -74.0060, New_York).unwrap()
    }

    fn jerusalem() -> Location {
        Location::new(31.778, 35.235, Jerusalem).unwrap()
    }

    fn at(tz: Tz, y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Tz> {
        tz.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn span_text(w: &RestrictedWindow) -> String {
        format!(
            "{} {}",
            w.candle_lighting().format("%m-%d %H:%M"),
            w.havdalah().format("%m-%d %H:%M")
        )
    }

    #[test]
    fn test_inside_shabbat() {
        let now = at(New_York, 2018, 9, 1, 16, 0);
        let report = restricted_windows(now, &nyc(), &Settings::default()).unwrap();
        let current = report.current.unwrap();
        assert_eq!(span_text(&current), "08-31 19:15 09-01 20:14");
        assert_eq!(current.kind, WindowKind::Shabbat);
        assert_eq!(current.parasha, Some(Parasha::KiTavo));
        assert_eq!(current.holiday, None);
        assert_eq!(span_text(&report.upcoming), "09-07 19:04 09-08 20:02");
    }

    #[test]
    fn test_after_havdalah_moves_on() {
        let now = at(New_York, 2018, 9, 1, 20, 21);
        let report = restricted_windows(now, &nyc(), &Settings::default()).unwrap();
        assert!(report.current.is_none());
        assert_eq!(span_text(&report.upcoming), "09-07 19:04 09-08 20:02");
        assert_eq!(report.upcoming.parasha, Some(Parasha::Nitzavim));
    }

    #[test]
    fn test_rosh_hashana_window() {
        let now = at(New_York, 2018, 9, 8, 21, 25);
        let report = restricted_windows(now, &nyc(), &Settings::default()).unwrap();
        assert!(report.current.is_none());
        let rh = report.upcoming;
        assert_eq!(span_text(&rh), "09-09 19:01 09-11 19:57");
        assert_eq!(rh.kind, WindowKind::Holiday);
        assert_eq!(rh.holiday, Some(HolidayId::RoshHashana1));
        assert_eq!(rh.parasha, None);
        assert_eq!(rh.days.len(), 2);
        assert_eq!(rh.label(Language::English), "Rosh Hashana I");

        let shabbat = shabbat_window(now, &nyc(), &Settings::default()).unwrap();
        assert_eq!(span_text(&shabbat), "09-14 18:52 09-15 19:50");
        assert_eq!(shabbat.parasha, Some(Parasha::Vayeilech));
    }

    #[test]
    fn test_candle_lighting_for_second_night() {
        let settings = Settings::default();
        let during = at(New_York, 2018, 9, 10, 21, 25);
        let report = restricted_windows(during, &nyc(), &settings).unwrap();
        let rh = report.current.unwrap();
        assert_eq!(rh.candle_lighting_for(&during).format("%H:%M").to_string(), "18:59");
        assert_eq!(rh.candle_lighting().format("%H:%M").to_string(), "19:01");

        let before = at(New_York, 2018, 9, 8, 21, 25);
        assert_eq!(rh.candle_lighting_for(&before), rh.candle_lighting());
    }

    #[test]
    fn test_shabbat_chol_hamoed_has_no_portion() {
        let now = at(New_York, 2018, 9, 28, 21, 25);
        let report = restricted_windows(now, &nyc(), &Settings::default()).unwrap();
        let current = report.current.unwrap();
        assert_eq!(span_text(&current), "09-28 18:28 09-29 19:25");
        assert_eq!(current.parasha, None);
        assert_eq!(current.holiday, None);
        assert_eq!(current.label(Language::English), "Shabbat");
    }

    #[test]
    fn test_shmini_atzeret_diaspora_and_israel() {
        let diaspora = restricted_windows(
            at(New_York, 2018, 9, 29, 21, 25),
            &nyc(),
            &Settings::default(),
        )
        .unwrap();
        assert_eq!(span_text(&diaspora.upcoming), "09-30 18:25 10-02 19:20");
        assert_eq!(diaspora.upcoming.holiday, Some(HolidayId::ShminiAtzeret));

        let israel = restricted_windows(
            at(Jerusalem, 2018, 9, 29, 21, 25),
            &jerusalem(),
            &Settings::israel(),
        )
        .unwrap();
        assert_eq!(span_text(&israel.upcoming), "09-30 18:10 10-01 19:02");
        assert_eq!(
            israel.upcoming.holiday,
            Some(HolidayId::ShminiAtzeretSimchatTorah)
        );

        let next = restricted_windows(
            at(Jerusalem, 2018, 10, 1, 21, 25),
            &jerusalem(),
            &Settings::israel(),
        )
        .unwrap();
        assert_eq!(span_text(&next.upcoming), "10-05 18:03 10-06 18:56");
        assert_eq!(next.upcoming.parasha, Some(Parasha::Bereshit));
    }

    #[test]
    fn test_yom_tov_into_shabbat_merges() {
        let now = at(New_York, 2024, 10, 1, 12, 0);
        let report = restricted_windows(now, &nyc(), &Settings::default()).unwrap();
        let w = report.upcoming;
        assert_eq!(span_text(&w), "10-02 18:20 10-05 19:13");
        assert_eq!(w.kind, WindowKind::Merged);
        assert_eq!(w.days.len(), 3);
        assert_eq!(w.holiday, Some(HolidayId::RoshHashana1));
        assert!(w.days[1].holiday.is_multi_day_end);
    }

    #[test]
    fn test_havdalah_after_sunset_rule() {
        let settings = Settings::default().with_havdalah(HavdalahRule::AfterSunset { minutes: 42 });
        let now = at(New_York, 2018, 9, 5, 12, 0);
        let w = restricted_windows(now, &nyc(), &settings).unwrap().upcoming;
        let sunset = sunset(NaiveDate::from_ymd_opt(2018, 9, 8).unwrap(), &nyc()).unwrap();
        assert_eq!(w.havdalah(), sunset + TimeDelta::minutes(42));
    }

    #[test]
    fn test_title_follows_settings_language() {
        let now = at(New_York, 2018, 9, 8, 21, 25);
        let english = restricted_windows(now, &nyc(), &Settings::default()).unwrap();
        assert_eq!(english.upcoming.title(), "Rosh Hashana I");
        assert_eq!(
            english.upcoming.to_string(),
            "Rosh Hashana I: 2018-09-09 19:01 to 2018-09-11 19:57"
        );

        let settings = Settings::default().with_language(Language::Hebrew);
        let hebrew = restricted_windows(now, &nyc(), &settings).unwrap();
        assert_eq!(hebrew.upcoming.language, Language::Hebrew);
        assert_eq!(hebrew.upcoming.title(), "א' ראש השנה");
        assert!(hebrew.upcoming.to_string().starts_with("א' ראש השנה: "));

        let shabbat = shabbat_window(now, &nyc(), &settings).unwrap();
        assert_eq!(shabbat.title(), "וילך");
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings::default().with_candle_lighting_offset(300);
        let now = at(New_York, 2018, 9, 5, 12, 0);
        assert!(matches!(
            restricted_windows(now, &nyc(), &settings),
            Err(CalendarError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_hebrew_date_advances_at_sunset() {
        let before = hebrew_date_at(at(Jerusalem, 2018, 10, 14, 17, 0), &jerusalem()).unwrap();
        assert_eq!((before.month(), before.day()), (HebrewMonth::Marcheshvan, 5));
        let after = hebrew_date_at(at(Jerusalem, 2018, 10, 14, 19, 0), &jerusalem()).unwrap();
        assert_eq!((after.month(), after.day()), (HebrewMonth::Marcheshvan, 6));
    }
}
