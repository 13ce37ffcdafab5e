//! Calendar helpers for exchange trading days.
//!
//! The NYSE rules cover the full-day closures observed since 2022
//! (Juneteenth included). Early closes are not modelled.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

#[must_use]
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Returns `true` when the NYSE is closed all day on `date` for a holiday.
#[must_use]
pub fn is_nyse_holiday(date: NaiveDate) -> bool {
    let year = date.year();
    let holidays = [
        new_years_day_observed(year),
        if year >= 1998 {
            nth_weekday(year, 1, Weekday::Mon, 3)
        } else {
            None
        },
        nth_weekday(year, 2, Weekday::Mon, 3),
        easter_sunday(year).map(|easter| easter - Duration::days(2)),
        last_weekday(year, 5, Weekday::Mon),
        if year >= 2022 {
            NaiveDate::from_ymd_opt(year, 6, 19).map(observed)
        } else {
            None
        },
        NaiveDate::from_ymd_opt(year, 7, 4).map(observed),
        nth_weekday(year, 9, Weekday::Mon, 1),
        nth_weekday(year, 11, Weekday::Thu, 4),
        NaiveDate::from_ymd_opt(year, 12, 25).map(observed),
    ];
    holidays.into_iter().flatten().any(|holiday| holiday == date)
}

/// Western (Gregorian) Easter Sunday, anonymous Gregorian algorithm.
#[must_use]
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, u32::try_from(month).ok()?, u32::try_from(day).ok()?)
}

// Saturday holidays close the Friday before, Sunday holidays the Monday after.
fn observed(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date - Duration::days(1),
        Weekday::Sun => date + Duration::days(1),
        _ => date,
    }
}

// A Saturday New Year's Day is not observed on the prior Dec 31.
fn new_years_day_observed(year: i32) -> Option<NaiveDate> {
    let day = NaiveDate::from_ymd_opt(year, 1, 1)?;
    match day.weekday() {
        Weekday::Sat => None,
        Weekday::Sun => Some(day + Duration::days(1)),
        _ => Some(day),
    }
}

fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u8) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, weekday, n)
}

fn last_weekday(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    nth_weekday(year, month, weekday, 5).or_else(|| nth_weekday(year, month, weekday, 4))
}
