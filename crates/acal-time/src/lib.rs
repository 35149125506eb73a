//! # acal-time
//!
//! Accounting (fiscal) calendars with 52/53-week years, together with the
//! ISO reference calendar they are anchored to.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `AccountingDate` — a date in an accounting calendar.
pub mod accounting_date;

/// `ChronologyBuilder` — fluent configuration of an accounting calendar.
pub mod builder;

/// `Chronology` — year-end rules and date construction.
pub mod chronology;

/// `Date` — the ISO reference calendar.
pub mod date;

/// `Era` — BCE / CE.
pub mod era;

/// `ChronoField`, `ValueRange` and the `FieldAccessor` trait.
pub mod field;

/// `Month` — ISO months of the year.
pub mod month;

/// `Weekday` — day of the week.
pub mod weekday;

/// `YearDivision` — week patterns of the accounting months.
pub mod year_division;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use accounting_date::AccountingDate;
pub use builder::ChronologyBuilder;
pub use chronology::{Chronology, IsoYearAlignment, YearEnd, MAX_YEAR, MIN_YEAR};
pub use date::Date;
pub use era::Era;
pub use field::{ChronoField, FieldAccessor, ValueRange};
pub use month::Month;
pub use weekday::Weekday;
pub use year_division::YearDivision;
