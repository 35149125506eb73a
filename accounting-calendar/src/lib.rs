//! # accounting-calendar
//!
//! Configurable 52/53-week accounting calendars: years that always end on the
//! same weekday, divided into 4-4-5 style quarters or thirteen four-week
//! months.
//!
//! This crate is a **façade** that re-exports the public items of the
//! underlying workspace crates.  Application code should depend on this crate
//! rather than the individual `acal-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! accounting-calendar = "0.1"
//! ```
//!
//! ```rust
//! use accounting_calendar::{ChronologyBuilder, Date, Month, Weekday, YearDivision};
//!
//! // A retail calendar: years end on the Sunday nearest the end of August.
//! let retail = ChronologyBuilder::new()
//!     .ends_on(Weekday::Sunday)
//!     .nearest_end_of(Month::August)
//!     .with_division(YearDivision::QuartersOf445Weeks)
//!     .leap_week_in_month(12)
//!     .to_chronology()?;
//!
//! let first = retail.date(2012, 1, 1)?;
//! assert_eq!(first.to_date()?, Date::from_ymd(2011, 8, 29)?);
//! assert!(first.is_leap_year());
//! # Ok::<(), accounting_calendar::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error definitions.
pub use acal_core as core;

/// Reference calendar, accounting chronology and date types.
pub use acal_time as time;

pub use acal_core::{Error, Result};
pub use acal_time::{
    AccountingDate, ChronoField, Chronology, ChronologyBuilder, Date, Era, FieldAccessor,
    IsoYearAlignment, Month, ValueRange, Weekday, YearDivision, YearEnd,
};
