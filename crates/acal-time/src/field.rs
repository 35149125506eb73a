//! Calendar fields and the field-query protocol.
//!
//! [`ChronoField`] is the closed set of fields a date can be queried for,
//! [`ValueRange`] describes the valid values of a field, and
//! [`FieldAccessor`] is the protocol implemented by every date type in this
//! crate — the reference [`Date`](crate::Date) as well as
//! [`AccountingDate`](crate::AccountingDate) — so generic code can read
//! fields without knowing which calendar it is looking at.

use acal_core::errors::{Error, Result};

/// A calendar field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChronoField {
    /// Day of the week, 1 (Monday) to 7 (Sunday).
    DayOfWeek,
    /// Position of the day within its aligned week of the month, 1 to 7.
    AlignedDayOfWeekInMonth,
    /// Position of the day within its aligned week of the year, 1 to 7.
    AlignedDayOfWeekInYear,
    /// Day of the month.
    DayOfMonth,
    /// Day of the year.
    DayOfYear,
    /// Days since 1970-01-01 (ISO).
    EpochDay,
    /// Aligned week of the month; week 1 holds days 1–7.
    AlignedWeekOfMonth,
    /// Aligned week of the year; week 1 holds days 1–7.
    AlignedWeekOfYear,
    /// Month of the year.
    MonthOfYear,
    /// Months counted from month 1 of year 0.
    ProlepticMonth,
    /// Year within the era.
    YearOfEra,
    /// Proleptic year.
    Year,
    /// Era, 0 (BCE) or 1 (CE).
    Era,
}

impl ChronoField {
    /// Every field, smallest unit first.
    pub const ALL: [ChronoField; 13] = [
        ChronoField::DayOfWeek,
        ChronoField::AlignedDayOfWeekInMonth,
        ChronoField::AlignedDayOfWeekInYear,
        ChronoField::DayOfMonth,
        ChronoField::DayOfYear,
        ChronoField::EpochDay,
        ChronoField::AlignedWeekOfMonth,
        ChronoField::AlignedWeekOfYear,
        ChronoField::MonthOfYear,
        ChronoField::ProlepticMonth,
        ChronoField::YearOfEra,
        ChronoField::Year,
        ChronoField::Era,
    ];

    /// Field name, as used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ChronoField::DayOfWeek => "DayOfWeek",
            ChronoField::AlignedDayOfWeekInMonth => "AlignedDayOfWeekInMonth",
            ChronoField::AlignedDayOfWeekInYear => "AlignedDayOfWeekInYear",
            ChronoField::DayOfMonth => "DayOfMonth",
            ChronoField::DayOfYear => "DayOfYear",
            ChronoField::EpochDay => "EpochDay",
            ChronoField::AlignedWeekOfMonth => "AlignedWeekOfMonth",
            ChronoField::AlignedWeekOfYear => "AlignedWeekOfYear",
            ChronoField::MonthOfYear => "MonthOfYear",
            ChronoField::ProlepticMonth => "ProlepticMonth",
            ChronoField::YearOfEra => "YearOfEra",
            ChronoField::Year => "Year",
            ChronoField::Era => "Era",
        }
    }

    /// Error for a value outside `range`.
    pub fn out_of_range(self, value: i64, range: ValueRange) -> Error {
        Error::OutOfRange {
            field: self.name().to_string(),
            value,
            range: range.to_string(),
        }
    }
}

impl std::fmt::Display for ChronoField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The range of valid values of a field.
///
/// A range has a fixed minimum and a maximum that may vary, e.g. the day of
/// the year runs to 364 in a short year and to 371 in a long one.
/// `smallest_maximum` is the lowest maximum any instance can have, `maximum`
/// the highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueRange {
    min: i64,
    smallest_max: i64,
    max: i64,
}

impl ValueRange {
    /// A fixed range `[min, max]`.
    pub const fn of(min: i64, max: i64) -> Self {
        Self {
            min,
            smallest_max: max,
            max,
        }
    }

    /// A range `[min, smallest_max / max]` whose maximum varies.
    pub const fn of_variable_max(min: i64, smallest_max: i64, max: i64) -> Self {
        Self {
            min,
            smallest_max,
            max,
        }
    }

    /// The minimum valid value.
    pub fn minimum(&self) -> i64 {
        self.min
    }

    /// The smallest value the maximum can take.
    pub fn smallest_maximum(&self) -> i64 {
        self.smallest_max
    }

    /// The maximum valid value.
    pub fn maximum(&self) -> i64 {
        self.max
    }

    /// Return `true` if the maximum does not vary.
    pub fn is_fixed(&self) -> bool {
        self.smallest_max == self.max
    }

    /// Return `true` if every value in the range fits an `i32`.
    pub fn is_int_value(&self) -> bool {
        self.min >= i32::MIN as i64 && self.max <= i32::MAX as i64
    }

    /// Return `true` if `value` lies within `[minimum, maximum]`.
    pub fn is_valid_value(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Return `value` if it is valid for `field`, a range error otherwise.
    pub fn check_valid_value(&self, value: i64, field: ChronoField) -> Result<i64> {
        if self.is_valid_value(value) {
            Ok(value)
        } else {
            Err(field.out_of_range(value, *self))
        }
    }

    /// As [`check_valid_value`](Self::check_valid_value), narrowed to `i32`.
    pub fn check_valid_int_value(&self, value: i64, field: ChronoField) -> Result<i32> {
        if !self.is_int_value() {
            return Err(Error::Overflow(format!(
                "{field} range {self} does not fit an i32"
            )));
        }
        self.check_valid_value(value, field).map(|v| v as i32)
    }
}

impl std::fmt::Display for ValueRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_fixed() {
            write!(f, "{} - {}", self.min, self.max)
        } else {
            write!(f, "{} - {}/{}", self.min, self.smallest_max, self.max)
        }
    }
}

/// Read access to calendar fields.
///
/// The protocol shared by all date types: ask whether a field is supported,
/// what its valid range is for this particular date, and what its value is.
pub trait FieldAccessor {
    /// Return `true` if `field` can be queried on this value.
    fn is_supported(&self, field: ChronoField) -> bool;

    /// The valid range of `field` for this particular value.
    fn range(&self, field: ChronoField) -> Result<ValueRange>;

    /// The value of `field` as an `i64`.
    fn get_long(&self, field: ChronoField) -> Result<i64>;

    /// The value of `field` as an `i32`.
    ///
    /// Fails for fields whose range does not fit an `i32`, such as
    /// [`ChronoField::EpochDay`].
    fn get(&self, field: ChronoField) -> Result<i32> {
        let range = self.range(field)?;
        let value = self.get_long(field)?;
        range.check_valid_int_value(value, field)
    }
}
