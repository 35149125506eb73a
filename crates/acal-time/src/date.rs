//! `Date` — the proleptic Gregorian reference calendar.
//!
//! Dates are stored as a count of days since 1970-01-01 (the *epoch day*).
//! The accounting calendar anchors its year ends on this calendar, and the
//! epoch day is the linear day count both calendars convert through.
//!
//! # Range
//! Years `-999_999_999` to `999_999_999`, so every epoch day of a date fits
//! comfortably in an `i64`.

use crate::era::Era;
use crate::field::{ChronoField, FieldAccessor, ValueRange};
use crate::weekday::Weekday;
use acal_core::ensure_date;
use acal_core::errors::{Error, Result};

/// A proleptic Gregorian calendar date.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Date(i64);

// ── Constants ─────────────────────────────────────────────────────────────────

impl Date {
    /// Minimum supported year.
    pub const MIN_YEAR: i32 = -999_999_999;

    /// Maximum supported year.
    pub const MAX_YEAR: i32 = 999_999_999;

    /// 1970-01-01.
    pub const EPOCH: Date = Date(0);

    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from an epoch day.
    ///
    /// Returns an error outside the supported year range.
    pub fn from_epoch_day(epoch_day: i64) -> Result<Self> {
        let range = Self::epoch_day_range();
        ensure_date!(
            range.is_valid_value(epoch_day),
            "epoch day {epoch_day} out of range [{}, {}]",
            range.minimum(),
            range.maximum()
        );
        Ok(Date(epoch_day))
    }

    /// Create a date from year, month (1–12), and day-of-month (1–31).
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Result<Self> {
        ensure_date!(
            (Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year),
            "year {year} out of range [{}, {}]",
            Self::MIN_YEAR,
            Self::MAX_YEAR
        );
        ensure_date!((1..=12).contains(&month), "month {month} out of range [1, 12]");
        let days_in = days_in_month(year as i64, month);
        ensure_date!(
            day != 0 && day <= days_in,
            "day {day} out of range [1, {days_in}] for {year}-{month:02}"
        );
        Ok(Date(days_from_civil(year as i64, month, day)))
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Return the epoch day.
    pub fn epoch_day(&self) -> i64 {
        self.0
    }

    /// Return the year.
    pub fn year(&self) -> i32 {
        civil_from_days(self.0).0 as i32
    }

    /// Return the month (1–12).
    pub fn month(&self) -> u8 {
        civil_from_days(self.0).1
    }

    /// Return the day of the month (1–31).
    pub fn day_of_month(&self) -> u8 {
        civil_from_days(self.0).2
    }

    /// Return the day of the year (1–366).
    pub fn day_of_year(&self) -> u16 {
        let year = civil_from_days(self.0).0;
        (self.0 - days_from_civil(year, 1, 1) + 1) as u16
    }

    /// Return the weekday.
    pub fn weekday(&self) -> Weekday {
        Weekday::from_epoch_day(self.0)
    }

    /// Return `true` if the date falls in a Gregorian leap year.
    pub fn is_leap_year(&self) -> bool {
        is_leap_year(civil_from_days(self.0).0)
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Advance by `n` days.  Returns an error if the result is out of range.
    pub fn add_days(self, n: i64) -> Result<Self> {
        let epoch_day = self
            .0
            .checked_add(n)
            .ok_or_else(|| Error::Overflow(format!("{self} plus {n} days")))?;
        Self::from_epoch_day(epoch_day)
    }

    /// Return the last day of the month containing this date.
    pub fn end_of_month(self) -> Self {
        let (y, m, _) = civil_from_days(self.0);
        Date(days_from_civil(y, m, days_in_month(y, m)))
    }

    /// Return `true` if this is the last calendar day of its month.
    pub fn is_end_of_month(self) -> bool {
        self == self.end_of_month()
    }

    /// Return the latest date on or before this one that falls on `weekday`.
    pub fn previous_or_same(self, weekday: Weekday) -> Result<Self> {
        Self::from_epoch_day(previous_or_same_epoch_day(self.0, weekday))
    }

    /// Return the earliest date on or after this one that falls on `weekday`.
    pub fn next_or_same(self, weekday: Weekday) -> Result<Self> {
        let back = (self.weekday().ordinal() as i64 - weekday.ordinal() as i64).rem_euclid(7);
        let forward = (7 - back) % 7;
        self.add_days(forward)
    }

    fn epoch_day_range() -> ValueRange {
        let min = days_from_civil(Self::MIN_YEAR as i64, 1, 1);
        let max = days_from_civil(Self::MAX_YEAR as i64, 12, 31);
        ValueRange::of(min, max)
    }
}

// ── Field protocol ────────────────────────────────────────────────────────────

impl FieldAccessor for Date {
    fn is_supported(&self, _field: ChronoField) -> bool {
        true
    }

    fn range(&self, field: ChronoField) -> Result<ValueRange> {
        let (y, m, _) = civil_from_days(self.0);
        let range = match field {
            ChronoField::DayOfMonth => ValueRange::of(1, days_in_month(y, m) as i64),
            ChronoField::DayOfYear => ValueRange::of(1, if is_leap_year(y) { 366 } else { 365 }),
            ChronoField::AlignedWeekOfMonth => {
                ValueRange::of(1, if m == 2 && !is_leap_year(y) { 4 } else { 5 })
            }
            ChronoField::YearOfEra => {
                let max = Self::MAX_YEAR as i64;
                ValueRange::of(1, if y <= 0 { max + 1 } else { max })
            }
            ChronoField::DayOfWeek
            | ChronoField::AlignedDayOfWeekInMonth
            | ChronoField::AlignedDayOfWeekInYear => ValueRange::of(1, 7),
            ChronoField::EpochDay => Self::epoch_day_range(),
            ChronoField::AlignedWeekOfYear => ValueRange::of(1, 53),
            ChronoField::MonthOfYear => ValueRange::of(1, 12),
            ChronoField::ProlepticMonth => ValueRange::of(
                Self::MIN_YEAR as i64 * 12,
                Self::MAX_YEAR as i64 * 12 + 11,
            ),
            ChronoField::Year => ValueRange::of(Self::MIN_YEAR as i64, Self::MAX_YEAR as i64),
            ChronoField::Era => ValueRange::of(0, 1),
        };
        Ok(range)
    }

    fn get_long(&self, field: ChronoField) -> Result<i64> {
        let (y, m, d) = civil_from_days(self.0);
        let doy = self.day_of_year() as i64;
        let value = match field {
            ChronoField::DayOfWeek => self.weekday().ordinal() as i64,
            ChronoField::AlignedDayOfWeekInMonth => (d as i64 - 1) % 7 + 1,
            ChronoField::AlignedDayOfWeekInYear => (doy - 1) % 7 + 1,
            ChronoField::DayOfMonth => d as i64,
            ChronoField::DayOfYear => doy,
            ChronoField::EpochDay => self.0,
            ChronoField::AlignedWeekOfMonth => (d as i64 - 1) / 7 + 1,
            ChronoField::AlignedWeekOfYear => (doy - 1) / 7 + 1,
            ChronoField::MonthOfYear => m as i64,
            ChronoField::ProlepticMonth => y * 12 + m as i64 - 1,
            ChronoField::YearOfEra => Era::year_of_era(y),
            ChronoField::Year => y,
            ChronoField::Era => Era::of_year(y).value() as i64,
        };
        Ok(value)
    }
}

// ── Arithmetic operators ──────────────────────────────────────────────────────

impl std::ops::Sub<Date> for Date {
    type Output = i64;
    fn sub(self, rhs: Date) -> i64 {
        self.0 - rhs.0
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = civil_from_days(self.0);
        write_ymd(f, y, m, d)
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Date({self})")
    }
}

/// ISO-8601 style `yyyy-mm-dd`; years outside `0..=9999` carry a sign.
pub(crate) fn write_ymd(
    f: &mut std::fmt::Formatter<'_>,
    year: i64,
    month: u8,
    day: u8,
) -> std::fmt::Result {
    if year < 0 {
        write!(f, "-{:04}-{month:02}-{day:02}", -year)
    } else if year > 9999 {
        write!(f, "+{year}-{month:02}-{day:02}")
    } else {
        write!(f, "{year:04}-{month:02}-{day:02}")
    }
}

// ── chrono interop ────────────────────────────────────────────────────────────

#[cfg(feature = "chrono")]
impl From<chrono::NaiveDate> for Date {
    fn from(d: chrono::NaiveDate) -> Self {
        use chrono::Datelike;
        Date(days_from_civil(d.year() as i64, d.month() as u8, d.day() as u8))
    }
}

#[cfg(feature = "chrono")]
impl TryFrom<Date> for chrono::NaiveDate {
    type Error = Error;

    fn try_from(d: Date) -> Result<Self> {
        let (y, m, day) = civil_from_days(d.0);
        i32::try_from(y)
            .ok()
            .and_then(|y| chrono::NaiveDate::from_ymd_opt(y, m as u32, day as u32))
            .ok_or_else(|| Error::Date(format!("{d} is outside the chrono::NaiveDate range")))
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Whether a given year is a Gregorian leap year.
pub fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a given month/year.
pub fn days_in_month(year: i64, month: u8) -> u8 {
    debug_assert!((1..=12).contains(&month));
    match month {
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}

/// Days from the start of a 400-year cycle (March-based) to 1970-01-01.
const EPOCH_SHIFT: i64 = 719_468;

/// Days in a 400-year Gregorian cycle.
const DAYS_PER_CYCLE: i64 = 146_097;

/// Convert (year, month, day) to an epoch day.
///
/// No range checks; valid for any year whose epoch day fits an `i64`.
pub fn days_from_civil(year: i64, month: u8, day: u8) -> i64 {
    // Shift to a March-based year so the leap day is the last day of the year.
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = (month as i64 + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * DAYS_PER_CYCLE + doe - EPOCH_SHIFT
}

/// Decompose an epoch day into (year, month, day).
pub(crate) fn civil_from_days(epoch_day: i64) -> (i64, u8, u8) {
    let z = epoch_day + EPOCH_SHIFT;
    let era = z.div_euclid(DAYS_PER_CYCLE);
    let doe = z - era * DAYS_PER_CYCLE;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };
    (year, month, day)
}

/// Latest epoch day on or before `epoch_day` falling on `weekday`.
pub(crate) fn previous_or_same_epoch_day(epoch_day: i64, weekday: Weekday) -> i64 {
    let current = Weekday::from_epoch_day(epoch_day).ordinal() as i64;
    epoch_day - (current - weekday.ordinal() as i64).rem_euclid(7)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
