use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::core::calendar::{is_nyse_holiday, is_weekday};
use crate::core::primitives::{datetime_to_unix_seconds, unix_seconds_to_datetime};
use crate::error::{ChartError, ChartResult};

// Upper bound on the days scanned while looking for the next session.
const MAX_SESSION_SEARCH_DAYS: i64 = 370;

/// Predicate marking full-day exchange closures, keyed by local calendar date.
#[derive(Clone)]
pub struct HolidayPredicate(Arc<dyn Fn(NaiveDate) -> bool + Send + Sync>);

impl HolidayPredicate {
    pub fn new(predicate: impl Fn(NaiveDate) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(predicate))
    }

    /// No holidays: every weekday trades.
    #[must_use]
    pub fn none() -> Self {
        Self::new(|_| false)
    }

    #[must_use]
    pub fn nyse() -> Self {
        Self::new(is_nyse_holiday)
    }

    #[must_use]
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        (self.0)(date)
    }
}

impl fmt::Debug for HolidayPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HolidayPredicate(..)")
    }
}

/// Daily trading window of an exchange in its local timezone.
#[derive(Debug, Clone)]
pub struct MarketSession {
    open: NaiveTime,
    close: NaiveTime,
    timezone: Tz,
    holidays: HolidayPredicate,
}

impl MarketSession {
    /// Builds a session; `open` must be strictly before `close`.
    pub fn new(
        open: NaiveTime,
        close: NaiveTime,
        timezone: Tz,
        holidays: HolidayPredicate,
    ) -> ChartResult<Self> {
        if open >= close {
            return Err(ChartError::config(format!(
                "market open {open} must be before market close {close}"
            )));
        }
        Ok(Self {
            open,
            close,
            timezone,
            holidays,
        })
    }

    /// Regular NYSE session: 09:30-16:00 America/New_York with NYSE holidays.
    #[must_use]
    pub fn nyse() -> Self {
        Self {
            open: NaiveTime::from_hms_opt(9, 30, 0).unwrap_or(NaiveTime::MIN),
            close: NaiveTime::from_hms_opt(16, 0, 0).unwrap_or(NaiveTime::MIN),
            timezone: chrono_tz::America::New_York,
            holidays: HolidayPredicate::nyse(),
        }
    }

    #[must_use]
    pub fn with_holidays(mut self, holidays: HolidayPredicate) -> Self {
        self.holidays = holidays;
        self
    }

    #[must_use]
    pub fn open(&self) -> NaiveTime {
        self.open
    }

    #[must_use]
    pub fn close(&self) -> NaiveTime {
        self.close
    }

    #[must_use]
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    #[must_use]
    pub fn is_trading_day(&self, date: NaiveDate) -> bool {
        is_weekday(date) && !self.holidays.is_holiday(date)
    }

    /// Wall-clock time of `instant` in the exchange timezone.
    #[must_use]
    pub fn local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.timezone).naive_local()
    }

    /// Instant of a local wall-clock time; DST gaps resolve to the earliest
    /// valid mapping and fall back to reading the time as UTC.
    #[must_use]
    pub fn to_utc(&self, local: NaiveDateTime) -> DateTime<Utc> {
        self.timezone
            .from_local_datetime(&local)
            .earliest()
            .map_or_else(|| Utc.from_utc_datetime(&local), |dt| dt.with_timezone(&Utc))
    }

    #[must_use]
    pub fn open_on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.open)
    }

    #[must_use]
    pub fn close_on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.close)
    }

    /// Trading seconds elapsed between two instants.
    ///
    /// Each trading day contributes the overlap of `[start, end]` with its
    /// `[open, close]` window, so instants outside the session clamp to the
    /// nearest boundary. Returns 0 when `end <= start`.
    #[must_use]
    pub fn market_seconds_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
        if end <= start {
            return 0;
        }
        let start_local = self.local(start);
        let end_local = self.local(end);

        let mut total = 0_i64;
        let mut day = start_local.date();
        let last_day = end_local.date();
        while day <= last_day {
            if self.is_trading_day(day) {
                let lower = start_local.max(self.open_on(day));
                let upper = end_local.min(self.close_on(day));
                if upper > lower {
                    total += (upper - lower).num_seconds();
                }
            }
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }
        total
    }

    /// First session open strictly after `after` (local wall-clock).
    #[must_use]
    pub fn next_market_open(&self, after: NaiveDateTime) -> Option<NaiveDateTime> {
        let mut day = after.date();
        for _ in 0..MAX_SESSION_SEARCH_DAYS {
            let open = self.open_on(day);
            if self.is_trading_day(day) && open > after {
                return Some(open);
            }
            day = day.succ_opt()?;
        }
        None
    }
}

impl Default for MarketSession {
    fn default() -> Self {
        Self::nyse()
    }
}

/// Time range compressed to trading hours.
///
/// Domain values are unix seconds. Distances are measured in market seconds,
/// so nights, weekends and holidays occupy no pixels.
#[derive(Debug, Clone)]
pub struct MarketHoursRange {
    min: DateTime<Utc>,
    max: DateTime<Utc>,
    session: MarketSession,
    domain: i32,
}

impl MarketHoursRange {
    pub fn new(min: DateTime<Utc>, max: DateTime<Utc>, session: MarketSession) -> ChartResult<Self> {
        if max < min {
            return Err(ChartError::InvalidData(format!(
                "market hours range max {max} precedes min {min}"
            )));
        }
        Ok(Self {
            min,
            max,
            session,
            domain: 0,
        })
    }

    #[must_use]
    pub fn with_domain(mut self, domain: i32) -> Self {
        self.domain = domain;
        self
    }

    #[must_use]
    pub fn session(&self) -> &MarketSession {
        &self.session
    }

    #[must_use]
    pub fn min_time(&self) -> DateTime<Utc> {
        self.min
    }

    #[must_use]
    pub fn max_time(&self) -> DateTime<Utc> {
        self.max
    }

    /// The later of `max` and the session close on `max`'s local date.
    #[must_use]
    pub fn effective_max(&self) -> DateTime<Utc> {
        let local_close = self.session.close_on(self.session.local(self.max).date());
        let close = self.session.to_utc(local_close);
        close.max(self.max)
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        datetime_to_unix_seconds(self.min)
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        datetime_to_unix_seconds(self.effective_max())
    }

    #[must_use]
    pub fn domain(&self) -> i32 {
        self.domain
    }

    pub fn set_domain(&mut self, domain: i32) {
        self.domain = domain;
    }

    /// Market seconds spanned by the whole range.
    #[must_use]
    pub fn total_market_seconds(&self) -> i64 {
        self.session
            .market_seconds_between(self.min, self.effective_max())
    }

    /// Maps unix seconds onto `[0, domain]`, left to right.
    #[must_use]
    pub fn translate(&self, value: f64) -> i32 {
        let total = self.total_market_seconds();
        if total <= 0 {
            return self.domain / 2;
        }
        let elapsed = self
            .session
            .market_seconds_between(self.min, unix_seconds_to_datetime(value));
        let ratio = elapsed as f64 / total as f64;
        (ratio * f64::from(self.domain)).floor() as i32
    }

    /// Steps the calendar one day at a time from `min` to the effective max.
    pub(crate) fn trading_days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let first = self.session.local(self.min).date();
        let last = self.session.local(self.effective_max()).date();
        first
            .iter_days()
            .take_while(move |day| *day <= last)
            .filter(|day| self.session.is_trading_day(*day))
    }
}

impl fmt::Display for MarketHoursRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MarketHoursRange [{}, {}] => {}",
            self.min.format("%Y-%m-%d %H:%M"),
            self.effective_max().format("%Y-%m-%d %H:%M"),
            self.domain
        )
    }
}
