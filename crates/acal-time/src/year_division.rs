//! `YearDivision` — how an accounting year is split into months.
//!
//! Each division fixes the number of weeks in every month of a 52-week year.
//! The quarterly patterns repeat every three months; the thirteen-month
//! division gives every month four weeks.  In a 53-week year the extra week
//! is appended to the end of one configured month, the *leap-week month*.

use crate::field::{ChronoField, ValueRange};
use acal_core::errors::{Error, Result};

/// Number of weeks in a non-leap accounting year.
pub const WEEKS_IN_YEAR: u16 = 52;

/// The pattern of week counts per month in an accounting year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum YearDivision {
    /// Twelve months in quarters of 4, 4 and 5 weeks.
    QuartersOf445Weeks,
    /// Twelve months in quarters of 4, 5 and 4 weeks.
    QuartersOf454Weeks,
    /// Twelve months in quarters of 5, 4 and 4 weeks.
    QuartersOf544Weeks,
    /// Thirteen months of four weeks each.
    ThirteenEvenMonthsOf4Weeks,
}

impl YearDivision {
    /// Every division.
    pub const ALL: [YearDivision; 4] = [
        YearDivision::QuartersOf445Weeks,
        YearDivision::QuartersOf454Weeks,
        YearDivision::QuartersOf544Weeks,
        YearDivision::ThirteenEvenMonthsOf4Weeks,
    ];

    /// Repeating week-count pattern.
    fn pattern(&self) -> &'static [u8] {
        match self {
            YearDivision::QuartersOf445Weeks => &[4, 4, 5],
            YearDivision::QuartersOf454Weeks => &[4, 5, 4],
            YearDivision::QuartersOf544Weeks => &[5, 4, 4],
            YearDivision::ThirteenEvenMonthsOf4Weeks => &[4],
        }
    }

    /// Weeks covered by one repetition of the pattern.
    fn weeks_per_period(&self) -> u16 {
        self.pattern().iter().map(|&w| w as u16).sum()
    }

    /// Number of months in a year: 12, or 13 for the thirteen-month division.
    pub fn months_in_year(&self) -> u8 {
        if self.pattern().len() == 1 {
            13
        } else {
            12
        }
    }

    /// Valid month numbers, `[1, months_in_year]`.
    pub fn month_of_year_range(&self) -> ValueRange {
        ValueRange::of(1, self.months_in_year() as i64)
    }

    fn check_month(&self, month: u8) -> Result<u8> {
        self.month_of_year_range()
            .check_valid_value(month as i64, ChronoField::MonthOfYear)
            .map(|m| m as u8)
    }

    fn check_leap_week_month(&self, leap_week_in_month: Option<u8>) -> Result<Option<u8>> {
        leap_week_in_month.map(|m| self.check_month(m)).transpose()
    }

    /// Number of weeks in `month`, plus one if `month` holds the leap week.
    ///
    /// Pass `None` for a year without a leap week.
    pub fn weeks_in_month(&self, month: u8, leap_week_in_month: Option<u8>) -> Result<u8> {
        let month = self.check_month(month)?;
        let leap = self.check_leap_week_month(leap_week_in_month)?;
        Ok(self.weeks_in_month_unchecked(month, leap))
    }

    pub(crate) fn weeks_in_month_unchecked(&self, month: u8, leap_week_in_month: Option<u8>) -> u8 {
        let pattern = self.pattern();
        let base = pattern[(month as usize - 1) % pattern.len()];
        base + u8::from(leap_week_in_month == Some(month))
    }

    /// Number of weeks elapsed before the first day of `month`.
    ///
    /// The leap week is credited once the leap-week month has been passed.
    pub fn weeks_at_start_of_month(&self, month: u8, leap_week_in_month: Option<u8>) -> Result<u16> {
        let month = self.check_month(month)?;
        let leap = self.check_leap_week_month(leap_week_in_month)?;
        Ok(self.weeks_at_start_of_month_unchecked(month, leap))
    }

    pub(crate) fn weeks_at_start_of_month_unchecked(
        &self,
        month: u8,
        leap_week_in_month: Option<u8>,
    ) -> u16 {
        let pattern = self.pattern();
        let idx = month as usize - 1;
        let whole_periods = (idx / pattern.len()) as u16 * self.weeks_per_period();
        let partial: u16 = pattern[..idx % pattern.len()].iter().map(|&w| w as u16).sum();
        let leap_adjustment = u16::from(leap_week_in_month.is_some_and(|l| month > l));
        whole_periods + partial + leap_adjustment
    }

    /// Number of weeks in the year: 52, or 53 with a leap week.
    pub fn weeks_in_year(&self, leap_week_in_month: Option<u8>) -> Result<u16> {
        let leap = self.check_leap_week_month(leap_week_in_month)?;
        Ok(WEEKS_IN_YEAR + u16::from(leap.is_some()))
    }

    /// The month containing the week at 0-based index `elapsed_weeks`.
    ///
    /// Week 0 is the first week of month 1.  The leap week belongs to the
    /// leap-week month, as its last week.
    ///
    /// # Errors
    /// Returns a range error if `elapsed_weeks` is negative or not less than
    /// the number of weeks in the year.
    pub fn month_from_elapsed_weeks(
        &self,
        elapsed_weeks: i64,
        leap_week_in_month: Option<u8>,
    ) -> Result<u8> {
        let total = WEEKS_IN_YEAR as i64 + i64::from(leap_week_in_month.is_some());
        let valid = ValueRange::of(0, total - 1);
        if !valid.is_valid_value(elapsed_weeks) {
            return Err(Error::OutOfRange {
                field: "ElapsedWeeks".to_string(),
                value: elapsed_weeks,
                range: valid.to_string(),
            });
        }
        let leap = self.check_leap_week_month(leap_week_in_month)?;
        let mut start = 0i64;
        for month in 1..=self.months_in_year() {
            start += self.weeks_in_month_unchecked(month, leap) as i64;
            if elapsed_weeks < start {
                return Ok(month);
            }
        }
        // Unreachable: the month lengths sum to `total`.
        Err(Error::OutOfRange {
            field: "ElapsedWeeks".to_string(),
            value: elapsed_weeks,
            range: valid.to_string(),
        })
    }

    /// The fewest weeks any month can have.
    pub fn min_weeks_in_month(&self) -> u8 {
        self.pattern().iter().copied().min().unwrap_or(4)
    }

    /// The most weeks any month can have, counting the leap week.
    pub fn max_weeks_in_month(&self, leap_week_in_month: Option<u8>) -> Result<u8> {
        let leap = self.check_leap_week_month(leap_week_in_month)?;
        Ok(self.max_weeks_in_month_unchecked(leap))
    }

    pub(crate) fn max_weeks_in_month_unchecked(&self, leap_week_in_month: Option<u8>) -> u8 {
        (1..=self.months_in_year())
            .map(|m| self.weeks_in_month_unchecked(m, leap_week_in_month))
            .max()
            .unwrap_or(0)
    }
}

impl std::fmt::Display for YearDivision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            YearDivision::QuartersOf445Weeks => write!(f, "quarters of 4-4-5 weeks"),
            YearDivision::QuartersOf454Weeks => write!(f, "quarters of 4-5-4 weeks"),
            YearDivision::QuartersOf544Weeks => write!(f, "quarters of 5-4-4 weeks"),
            YearDivision::ThirteenEvenMonthsOf4Weeks => write!(f, "thirteen months of 4 weeks"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weeks_sum_to_52() {
        for division in YearDivision::ALL {
            let total: u16 = (1..=division.months_in_year())
                .map(|m| division.weeks_in_month(m, None).unwrap() as u16)
                .sum();
            assert_eq!(total, 52, "{division}");
        }
    }

    #[test]
    fn quarterly_pattern_repeats() {
        let d = YearDivision::QuartersOf454Weeks;
        let weeks: Vec<u8> = (1..=12).map(|m| d.weeks_in_month(m, None).unwrap()).collect();
        assert_eq!(weeks, [4, 5, 4, 4, 5, 4, 4, 5, 4, 4, 5, 4]);
        assert_eq!(d.weeks_at_start_of_month(4, None).unwrap(), 13);
        assert_eq!(d.weeks_at_start_of_month(12, None).unwrap(), 48);
    }

    #[test]
    fn leap_week_in_month() {
        let d = YearDivision::QuartersOf445Weeks;
        assert_eq!(d.weeks_in_month(3, Some(3)).unwrap(), 6);
        assert_eq!(d.weeks_in_month(3, Some(12)).unwrap(), 5);
        assert_eq!(d.weeks_at_start_of_month(3, Some(3)).unwrap(), 8);
        assert_eq!(d.weeks_at_start_of_month(4, Some(3)).unwrap(), 14);
        assert_eq!(d.weeks_in_year(Some(3)).unwrap(), 53);
        assert_eq!(d.weeks_in_year(None).unwrap(), 52);
    }

    #[test]
    fn thirteen_months() {
        let d = YearDivision::ThirteenEvenMonthsOf4Weeks;
        assert_eq!(d.months_in_year(), 13);
        assert_eq!(d.weeks_at_start_of_month(13, None).unwrap(), 48);
        assert_eq!(d.weeks_in_month(13, Some(13)).unwrap(), 5);
        assert!(d.weeks_in_month(14, None).is_err());
        assert!(d.weeks_in_month(1, Some(14)).is_err());
        assert!(YearDivision::QuartersOf445Weeks.weeks_in_month(13, None).is_err());
    }

    #[test]
    fn month_from_elapsed_weeks() {
        let d = YearDivision::QuartersOf445Weeks;
        assert_eq!(d.month_from_elapsed_weeks(0, None).unwrap(), 1);
        assert_eq!(d.month_from_elapsed_weeks(3, None).unwrap(), 1);
        assert_eq!(d.month_from_elapsed_weeks(4, None).unwrap(), 2);
        assert_eq!(d.month_from_elapsed_weeks(12, None).unwrap(), 3);
        assert_eq!(d.month_from_elapsed_weeks(13, None).unwrap(), 4);
        assert_eq!(d.month_from_elapsed_weeks(51, None).unwrap(), 12);
        assert!(d.month_from_elapsed_weeks(52, None).is_err());
        assert!(d.month_from_elapsed_weeks(-1, None).is_err());

        // Leap week is the last week of month 1.
        assert_eq!(d.month_from_elapsed_weeks(4, Some(1)).unwrap(), 1);
        assert_eq!(d.month_from_elapsed_weeks(5, Some(1)).unwrap(), 2);
        assert_eq!(d.month_from_elapsed_weeks(52, Some(12)).unwrap(), 12);
        assert!(d.month_from_elapsed_weeks(53, Some(12)).is_err());
    }

    #[test]
    fn week_extremes() {
        let d = YearDivision::QuartersOf544Weeks;
        assert_eq!(d.min_weeks_in_month(), 4);
        assert_eq!(d.max_weeks_in_month(None).unwrap(), 5);
        assert_eq!(d.max_weeks_in_month(Some(1)).unwrap(), 6);
        assert_eq!(d.max_weeks_in_month(Some(2)).unwrap(), 5);
    }
}
