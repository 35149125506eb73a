//! `AccountingDate` — a date in an accounting calendar.
//!
//! The date holds its (year, month, day) and borrows the [`Chronology`] that
//! gives those numbers meaning.  Every range and conversion is delegated to
//! the chronology.

use crate::chronology::Chronology;
use crate::date::{write_ymd, Date};
use crate::era::Era;
use crate::field::{ChronoField, FieldAccessor, ValueRange};
use crate::weekday::Weekday;
use acal_core::errors::{Error, Result};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A date in an accounting calendar.
///
/// Created through [`Chronology::date`] and its siblings.  Two dates compare
/// equal only if their chronologies are configured identically; dates of
/// different chronologies are unordered.
#[derive(Clone, Copy)]
pub struct AccountingDate<'c> {
    chronology: &'c Chronology,
    year: i32,
    month: u8,
    day: u8,
}

impl<'c> AccountingDate<'c> {
    /// Wrap a (year, month, day) the chronology has already validated.
    pub(crate) fn new_unchecked(chronology: &'c Chronology, year: i32, month: u8, day: u8) -> Self {
        Self {
            chronology,
            year,
            month,
            day,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// The calendar this date belongs to.
    pub fn chronology(&self) -> &'c Chronology {
        self.chronology
    }

    /// The proleptic accounting year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The accounting month (1–12, or 1–13).
    pub fn month(&self) -> u8 {
        self.month
    }

    /// The day of the accounting month.
    pub fn day_of_month(&self) -> u8 {
        self.day
    }

    /// The day of the accounting year (1–371).
    pub fn day_of_year(&self) -> u16 {
        let leap = self.chronology.leap_week_for(self.year);
        let start = self
            .chronology
            .division()
            .weeks_at_start_of_month_unchecked(self.month, leap);
        start * 7 + self.day as u16
    }

    /// The day of the week.
    pub fn day_of_week(&self) -> Weekday {
        Weekday::from_epoch_day(self.to_epoch_day())
    }

    /// Aligned week of the month; week 1 holds days 1–7.
    pub fn aligned_week_of_month(&self) -> u8 {
        (self.day - 1) / 7 + 1
    }

    /// Aligned week of the year; week 1 holds days 1–7.
    pub fn aligned_week_of_year(&self) -> u8 {
        ((self.day_of_year() - 1) / 7 + 1) as u8
    }

    /// Months since month 1 of year 0.
    pub fn proleptic_month(&self) -> i64 {
        let months = self.chronology.division().months_in_year() as i64;
        self.year as i64 * months + self.month as i64 - 1
    }

    /// The era of this date.
    pub fn era(&self) -> Era {
        Era::of_year(self.year as i64)
    }

    /// The year within the era.
    pub fn year_of_era(&self) -> i64 {
        Era::year_of_era(self.year as i64)
    }

    /// Return `true` if the year of this date has 53 weeks.
    pub fn is_leap_year(&self) -> bool {
        self.chronology.is_leap_year(self.year)
    }

    /// Number of days in the month of this date.
    pub fn length_of_month(&self) -> u8 {
        let leap = self.chronology.leap_week_for(self.year);
        self.chronology
            .division()
            .weeks_in_month_unchecked(self.month, leap)
            * 7
    }

    /// Number of days in the year of this date: 364 or 371.
    pub fn length_of_year(&self) -> u16 {
        self.chronology.year_length(self.year)
    }

    /// Days since 1970-01-01.
    pub fn to_epoch_day(&self) -> i64 {
        self.chronology.epoch_day_of(self.year, self.month, self.day)
    }

    /// The same day on the reference calendar.
    pub fn to_date(&self) -> Result<Date> {
        Date::from_epoch_day(self.to_epoch_day())
    }

    // ── Adjustment ────────────────────────────────────────────────────────────

    /// A copy of this date with `field` set to `value`.
    ///
    /// Setting the month or year keeps the day of the month, clamped to the
    /// length of the resulting month.
    ///
    /// # Errors
    /// Returns a range error if `value` is outside [`range(field)`](FieldAccessor::range)
    /// for this date, or the result lies outside the calendar.
    pub fn with_field(&self, field: ChronoField, value: i64) -> Result<Self> {
        let value = self.range(field)?.check_valid_value(value, field)?;
        match field {
            ChronoField::DayOfWeek
            | ChronoField::AlignedDayOfWeekInMonth
            | ChronoField::AlignedDayOfWeekInYear => {
                self.plus_days(value - self.get_long(field)?)
            }
            ChronoField::DayOfMonth => self.chronology.date(self.year, self.month, value as u8),
            ChronoField::DayOfYear => self.chronology.date_year_day(self.year, value as u16),
            ChronoField::EpochDay => self.chronology.date_epoch_day(value),
            ChronoField::AlignedWeekOfMonth => {
                self.plus_weeks(value - self.aligned_week_of_month() as i64)
            }
            ChronoField::AlignedWeekOfYear => {
                self.plus_weeks(value - self.aligned_week_of_year() as i64)
            }
            ChronoField::MonthOfYear => self.resolve_previous(self.year as i64, value as u8),
            ChronoField::ProlepticMonth => self.plus_months(value - self.proleptic_month()),
            ChronoField::YearOfEra => {
                self.resolve_previous(self.era().proleptic_year(value), self.month)
            }
            ChronoField::Year => self.resolve_previous(value, self.month),
            ChronoField::Era => {
                if value == self.era().value() as i64 {
                    Ok(*self)
                } else {
                    self.resolve_previous(1 - self.year as i64, self.month)
                }
            }
        }
    }

    /// This date moved by `days` days.
    pub fn plus_days(&self, days: i64) -> Result<Self> {
        let epoch_day = self
            .to_epoch_day()
            .checked_add(days)
            .ok_or_else(|| self.overflow(days, "days"))?;
        self.chronology.date_epoch_day(epoch_day)
    }

    /// This date moved by `weeks` weeks.
    pub fn plus_weeks(&self, weeks: i64) -> Result<Self> {
        let days = weeks
            .checked_mul(7)
            .ok_or_else(|| self.overflow(weeks, "weeks"))?;
        self.plus_days(days)
    }

    /// This date moved by `months` accounting months, with the day clamped
    /// to the length of the resulting month.
    pub fn plus_months(&self, months: i64) -> Result<Self> {
        let per_year = self.chronology.division().months_in_year() as i64;
        let target = self
            .proleptic_month()
            .checked_add(months)
            .ok_or_else(|| self.overflow(months, "months"))?;
        let month = (target.rem_euclid(per_year) + 1) as u8;
        self.resolve_previous(target.div_euclid(per_year), month)
    }

    /// This date moved by `years` accounting years, with the day clamped to
    /// the length of the resulting month.
    pub fn plus_years(&self, years: i64) -> Result<Self> {
        let year = (self.year as i64)
            .checked_add(years)
            .ok_or_else(|| self.overflow(years, "years"))?;
        self.resolve_previous(year, self.month)
    }

    /// The date at (`year`, `month`) keeping the day of month where possible.
    fn resolve_previous(&self, year: i64, month: u8) -> Result<Self> {
        let year = self
            .chronology
            .range(ChronoField::Year)?
            .check_valid_int_value(year, ChronoField::Year)?;
        let day = self.day.min(self.chronology.month_length(year, month)?);
        self.chronology.date(year, month, day)
    }

    fn overflow(&self, amount: i64, unit: &str) -> Error {
        Error::Overflow(format!("{self} plus {amount} {unit}"))
    }
}

// ── Field protocol ────────────────────────────────────────────────────────────

impl FieldAccessor for AccountingDate<'_> {
    fn is_supported(&self, _field: ChronoField) -> bool {
        true
    }

    fn range(&self, field: ChronoField) -> Result<ValueRange> {
        self.chronology.field_range(field, self.year, self.month)
    }

    fn get_long(&self, field: ChronoField) -> Result<i64> {
        let value = match field {
            ChronoField::DayOfWeek => self.day_of_week().ordinal() as i64,
            ChronoField::AlignedDayOfWeekInMonth => (self.day as i64 - 1) % 7 + 1,
            ChronoField::AlignedDayOfWeekInYear => (self.day_of_year() as i64 - 1) % 7 + 1,
            ChronoField::DayOfMonth => self.day as i64,
            ChronoField::DayOfYear => self.day_of_year() as i64,
            ChronoField::EpochDay => self.to_epoch_day(),
            ChronoField::AlignedWeekOfMonth => self.aligned_week_of_month() as i64,
            ChronoField::AlignedWeekOfYear => self.aligned_week_of_year() as i64,
            ChronoField::MonthOfYear => self.month as i64,
            ChronoField::ProlepticMonth => self.proleptic_month(),
            ChronoField::YearOfEra => self.year_of_era(),
            ChronoField::Year => self.year as i64,
            ChronoField::Era => self.era().value() as i64,
        };
        Ok(value)
    }
}

// ── Comparison ────────────────────────────────────────────────────────────────

impl PartialEq for AccountingDate<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.chronology == other.chronology
            && (self.year, self.month, self.day) == (other.year, other.month, other.day)
    }
}

impl Eq for AccountingDate<'_> {}

impl Hash for AccountingDate<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chronology.hash(state);
        (self.year, self.month, self.day).hash(state);
    }
}

impl PartialOrd for AccountingDate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.chronology != other.chronology {
            return None;
        }
        Some((self.year, self.month, self.day).cmp(&(other.year, other.month, other.day)))
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

impl std::fmt::Display for AccountingDate<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Accounting ")?;
        write_ymd(f, self.year as i64, self.month, self.day)
    }
}

impl std::fmt::Debug for AccountingDate<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccountingDate(")?;
        write_ymd(f, self.year as i64, self.month, self.day)?;
        write!(f, ")")
    }
}
