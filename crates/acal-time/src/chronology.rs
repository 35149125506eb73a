//! `Chronology` — the rules of one accounting calendar.
//!
//! An accounting year always ends on the same weekday, either the one nearest
//! the end of a chosen ISO month or the last one within that month.  Years are
//! therefore 52 or 53 weeks long; the extra week of a long ("leap") year goes
//! into a configured month.
//!
//! All derived quantities come from [`Chronology::year_end`]: a year is leap
//! exactly when it is 371 days longer than the previous year end.
//!
//! A `Chronology` is created through
//! [`ChronologyBuilder`](crate::ChronologyBuilder) and is immutable afterwards.

use crate::accounting_date::AccountingDate;
use crate::date::{days_from_civil, days_in_month, previous_or_same_epoch_day, Date};
use crate::era::Era;
use crate::field::{ChronoField, ValueRange};
use crate::month::Month;
use crate::weekday::Weekday;
use crate::year_division::YearDivision;
use acal_core::errors::Result;

/// Minimum supported accounting year.
pub const MIN_YEAR: i32 = -999_999;

/// Maximum supported accounting year.
pub const MAX_YEAR: i32 = 999_999;

/// Days in a 52-week year.
const DAYS_IN_SHORT_YEAR: i64 = 364;

/// Days in a 53-week year.
const DAYS_IN_LONG_YEAR: i64 = 371;

/// Where the year-end weekday is placed relative to the anchor month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum YearEnd {
    /// The weekday nearest the last day of the month (up to three days into
    /// the following month).
    NearestEndOf(Month),
    /// The last such weekday falling within the month.
    InLastWeekOf(Month),
}

impl YearEnd {
    /// The ISO month the year end is anchored to.
    pub fn month(&self) -> Month {
        match self {
            YearEnd::NearestEndOf(m) | YearEnd::InLastWeekOf(m) => *m,
        }
    }
}

impl std::fmt::Display for YearEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            YearEnd::NearestEndOf(m) => write!(f, "nearest the end of {m}"),
            YearEnd::InLastWeekOf(m) => write!(f, "in the last week of {m}"),
        }
    }
}

/// Which ISO year gives an accounting year its number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IsoYearAlignment {
    /// Accounting year *Y* ends in ISO year *Y*.
    #[default]
    EndsInIsoYear,
    /// Accounting year *Y* starts in ISO year *Y* and ends in *Y + 1*.
    StartsInIsoYear,
}

impl IsoYearAlignment {
    /// Offset from accounting year to the ISO year of its year end.
    pub fn offset(&self) -> i64 {
        match self {
            IsoYearAlignment::EndsInIsoYear => 0,
            IsoYearAlignment::StartsInIsoYear => 1,
        }
    }
}

/// An accounting calendar configuration.
///
/// Immutable and `Copy`; [`AccountingDate`]s borrow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        try_from = "crate::builder::ChronologyBuilder",
        into = "crate::builder::ChronologyBuilder"
    )
)]
pub struct Chronology {
    ends_on: Weekday,
    year_end: YearEnd,
    division: YearDivision,
    leap_week_in_month: u8,
    alignment: IsoYearAlignment,
}

impl Chronology {
    /// Assemble a validated configuration; see `ChronologyBuilder::to_chronology`.
    pub(crate) fn new(
        ends_on: Weekday,
        year_end: YearEnd,
        division: YearDivision,
        leap_week_in_month: u8,
        alignment: IsoYearAlignment,
    ) -> Self {
        Self {
            ends_on,
            year_end,
            division,
            leap_week_in_month,
            alignment,
        }
    }

    // ── Configuration ─────────────────────────────────────────────────────────

    /// The weekday every accounting year ends on.
    pub fn ends_on(&self) -> Weekday {
        self.ends_on
    }

    /// The year-end rule, including its anchor month.
    pub fn year_end_rule(&self) -> YearEnd {
        self.year_end
    }

    /// How years are divided into months.
    pub fn division(&self) -> YearDivision {
        self.division
    }

    /// The month that receives the extra week in a 53-week year.
    pub fn leap_week_in_month(&self) -> u8 {
        self.leap_week_in_month
    }

    /// Which ISO year names an accounting year.
    pub fn iso_year_alignment(&self) -> IsoYearAlignment {
        self.alignment
    }

    // ── Year structure ────────────────────────────────────────────────────────

    /// Epoch day of the last day of accounting year `year`.
    ///
    /// Pure arithmetic; defined for every `i32` year.
    pub(crate) fn year_end_epoch_day(&self, year: i64) -> i64 {
        let iso_year = year + self.alignment.offset();
        let month = self.year_end.month().number();
        let last_of_month = days_from_civil(iso_year, month, days_in_month(iso_year, month));
        let anchor = match self.year_end {
            YearEnd::InLastWeekOf(_) => last_of_month,
            // First of the following month plus two days: the nearest weekday
            // lies within three days either side of the month end.
            YearEnd::NearestEndOf(_) => (last_of_month + 1) + 2,
        };
        previous_or_same_epoch_day(anchor, self.ends_on)
    }

    /// The last day of accounting year `year` on the reference calendar.
    pub fn year_end(&self, year: i32) -> Result<Date> {
        let end = Date::from_epoch_day(self.year_end_epoch_day(year as i64))?;
        tracing::trace!(year, %end, "accounting year end");
        Ok(end)
    }

    /// Return `true` if `year` has 53 weeks (371 days).
    pub fn is_leap_year(&self, year: i32) -> bool {
        let year = year as i64;
        self.year_end_epoch_day(year) - self.year_end_epoch_day(year - 1) == DAYS_IN_LONG_YEAR
    }

    /// Signed number of leap years between year 1 and `year`.
    ///
    /// For `year >= 1` this counts the leap years in `[1, year)`; for
    /// `year < 1` it is the negated count of leap years in `[year, 1)`.
    pub fn previous_leap_years(&self, year: i32) -> i64 {
        let year = year as i64;
        // Every year is 364 days plus 7 for each leap year in between.
        let span = self.year_end_epoch_day(year - 1) - self.year_end_epoch_day(0);
        (span - DAYS_IN_SHORT_YEAR * (year - 1)) / 7
    }

    /// The leap-week month if `year` is a leap year.
    pub(crate) fn leap_week_for(&self, year: i32) -> Option<u8> {
        self.is_leap_year(year).then_some(self.leap_week_in_month)
    }

    /// Number of days in accounting year `year`: 364 or 371.
    pub fn year_length(&self, year: i32) -> u16 {
        if self.is_leap_year(year) {
            DAYS_IN_LONG_YEAR as u16
        } else {
            DAYS_IN_SHORT_YEAR as u16
        }
    }

    /// Number of days in `month` of accounting year `year`.
    pub fn month_length(&self, year: i32, month: u8) -> Result<u8> {
        let year = self.check_year(year as i64)?;
        let weeks = self.division.weeks_in_month(month, self.leap_week_for(year))?;
        Ok(weeks * 7)
    }

    fn check_year(&self, year: i64) -> Result<i32> {
        ValueRange::of(MIN_YEAR as i64, MAX_YEAR as i64).check_valid_int_value(year, ChronoField::Year)
    }

    // ── Ranges ────────────────────────────────────────────────────────────────

    /// The range of `field` across every date of this calendar.
    pub fn range(&self, field: ChronoField) -> Result<ValueRange> {
        let months = self.division.months_in_year() as i64;
        let min_weeks = self.division.min_weeks_in_month() as i64;
        let max_weeks = self
            .division
            .max_weeks_in_month(Some(self.leap_week_in_month))? as i64;
        let range = match field {
            ChronoField::DayOfWeek
            | ChronoField::AlignedDayOfWeekInMonth
            | ChronoField::AlignedDayOfWeekInYear => ValueRange::of(1, 7),
            ChronoField::DayOfMonth => ValueRange::of_variable_max(1, min_weeks * 7, max_weeks * 7),
            ChronoField::AlignedWeekOfMonth => ValueRange::of_variable_max(1, min_weeks, max_weeks),
            ChronoField::DayOfYear => {
                ValueRange::of_variable_max(1, DAYS_IN_SHORT_YEAR, DAYS_IN_LONG_YEAR)
            }
            ChronoField::AlignedWeekOfYear => ValueRange::of_variable_max(1, 52, 53),
            ChronoField::MonthOfYear => self.division.month_of_year_range(),
            ChronoField::ProlepticMonth => ValueRange::of(
                MIN_YEAR as i64 * months,
                MAX_YEAR as i64 * months + months - 1,
            ),
            ChronoField::YearOfEra => {
                ValueRange::of_variable_max(1, MAX_YEAR as i64, 1 - MIN_YEAR as i64)
            }
            ChronoField::Year => ValueRange::of(MIN_YEAR as i64, MAX_YEAR as i64),
            ChronoField::Era => ValueRange::of(0, 1),
            ChronoField::EpochDay => ValueRange::of(
                self.year_end_epoch_day(MIN_YEAR as i64 - 1) + 1,
                self.year_end_epoch_day(MAX_YEAR as i64),
            ),
        };
        Ok(range)
    }

    /// The range of `field` for dates in `month` of accounting year `year`.
    ///
    /// Fields whose range depends on the month or year are narrowed; the leap
    /// week counts only when `year` is a leap year.
    pub fn field_range(&self, field: ChronoField, year: i32, month: u8) -> Result<ValueRange> {
        let year = self.check_year(year as i64)?;
        let leap = self.leap_week_for(year);
        let range = match field {
            ChronoField::DayOfMonth => {
                ValueRange::of(1, self.division.weeks_in_month(month, leap)? as i64 * 7)
            }
            ChronoField::AlignedWeekOfMonth => {
                ValueRange::of(1, self.division.weeks_in_month(month, leap)? as i64)
            }
            ChronoField::DayOfYear => ValueRange::of(1, self.year_length(year) as i64),
            ChronoField::AlignedWeekOfYear => ValueRange::of(1, self.year_length(year) as i64 / 7),
            ChronoField::YearOfEra => {
                let max = if year >= 1 { MAX_YEAR as i64 } else { 1 - MIN_YEAR as i64 };
                ValueRange::of(1, max)
            }
            other => self.range(other)?,
        };
        Ok(range)
    }

    // ── Date construction ─────────────────────────────────────────────────────

    /// The date `day` of `month` in accounting year `year`.
    ///
    /// # Errors
    /// Returns a range error naming the offending field if the year, month, or
    /// day is invalid for this calendar.
    pub fn date(&self, year: i32, month: u8, day: u8) -> Result<AccountingDate<'_>> {
        let year = self.check_year(year as i64)?;
        self.division
            .month_of_year_range()
            .check_valid_value(month as i64, ChronoField::MonthOfYear)?;
        self.field_range(ChronoField::DayOfMonth, year, month)?
            .check_valid_value(day as i64, ChronoField::DayOfMonth)?;
        Ok(AccountingDate::new_unchecked(self, year, month, day))
    }

    /// The date at 1-based `day_of_year` in accounting year `year`.
    pub fn date_year_day(&self, year: i32, day_of_year: u16) -> Result<AccountingDate<'_>> {
        let year = self.check_year(year as i64)?;
        ValueRange::of(1, self.year_length(year) as i64)
            .check_valid_value(day_of_year as i64, ChronoField::DayOfYear)?;
        let leap = self.leap_week_for(year);
        let elapsed_weeks = (day_of_year as i64 - 1) / 7;
        let month = self.division.month_from_elapsed_weeks(elapsed_weeks, leap)?;
        let start = self.division.weeks_at_start_of_month_unchecked(month, leap) * 7;
        Ok(AccountingDate::new_unchecked(
            self,
            year,
            month,
            (day_of_year - start) as u8,
        ))
    }

    /// The accounting date of an epoch day.
    pub fn date_epoch_day(&self, epoch_day: i64) -> Result<AccountingDate<'_>> {
        self.range(ChronoField::EpochDay)?
            .check_valid_value(epoch_day, ChronoField::EpochDay)?;
        // The year end of `iso_year - offset - 2` lies in the previous ISO
        // year at the latest, so the search starts one year after it.
        let iso_year = Date::from_epoch_day(epoch_day)?.year() as i64;
        let mut year = iso_year - self.alignment.offset() - 1;
        while self.year_end_epoch_day(year) < epoch_day {
            year += 1;
        }
        let day_of_year = epoch_day - self.year_end_epoch_day(year - 1);
        self.date_year_day(self.check_year(year)?, day_of_year as u16)
    }

    /// The accounting date falling on a reference-calendar date.
    pub fn date_from(&self, date: Date) -> Result<AccountingDate<'_>> {
        self.date_epoch_day(date.epoch_day())
    }

    /// The date `day` of `month` in `year_of_era` of `era`.
    pub fn date_era(
        &self,
        era: Era,
        year_of_era: i64,
        month: u8,
        day: u8,
    ) -> Result<AccountingDate<'_>> {
        self.date(self.proleptic_year(era, year_of_era)?, month, day)
    }

    /// Proleptic year of `year_of_era` in `era`.
    pub fn proleptic_year(&self, era: Era, year_of_era: i64) -> Result<i32> {
        let max = match era {
            Era::Ce => MAX_YEAR as i64,
            Era::Bce => 1 - MIN_YEAR as i64,
        };
        ValueRange::of(1, max).check_valid_value(year_of_era, ChronoField::YearOfEra)?;
        self.check_year(era.proleptic_year(year_of_era))
    }

    /// Epoch day of a validated (year, month, day).
    pub(crate) fn epoch_day_of(&self, year: i32, month: u8, day: u8) -> i64 {
        let leap = self.leap_week_for(year);
        let start_weeks = self.division.weeks_at_start_of_month_unchecked(month, leap) as i64;
        self.year_end_epoch_day(year as i64 - 1) + start_weeks * 7 + day as i64
    }
}

impl std::fmt::Display for Chronology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let alignment = match self.alignment {
            IsoYearAlignment::EndsInIsoYear => "ends in its ISO year",
            IsoYearAlignment::StartsInIsoYear => "starts in its ISO year",
        };
        write!(
            f,
            "Accounting calendar: year ends on the {} {} and {alignment}, {}, leap week in month {}",
            self.ends_on, self.year_end, self.division, self.leap_week_in_month
        )
    }
}
