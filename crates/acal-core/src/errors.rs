//! Error types for the accounting-calendar crates.
//!
//! Every failure is a caller error: either the chronology was configured
//! inconsistently, or a requested value lies outside the range the chronology
//! allows.  Nothing here is transient, so no variant carries retry semantics.

use thiserror::Error;

/// The top-level error type used throughout the accounting-calendar crates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required configuration setting was never supplied.
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// The configuration is complete but internally inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A field value lies outside its valid range.
    #[error("invalid value for {field} (valid values {range}): {value}")]
    OutOfRange {
        /// Name of the offending field.
        field: String,
        /// The rejected value.
        value: i64,
        /// The valid range, rendered for display.
        range: String,
    },

    /// Reference-calendar error.
    #[error("date error: {0}")]
    Date(String),

    /// Integer overflow during date arithmetic.
    #[error("arithmetic overflow: {0}")]
    Overflow(String),
}

impl Error {
    /// Return `true` for configuration-state errors (missing or inconsistent
    /// chronology settings).
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::NotConfigured(_) | Error::InvalidConfiguration(_))
    }

    /// Return `true` if a value fell outside its valid range.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Error::OutOfRange { .. })
    }
}

/// Shorthand `Result` type used throughout the accounting-calendar crates.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::InvalidConfiguration(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use acal_core::{ensure_config, errors::Error};
/// fn months(n: u8) -> acal_core::errors::Result<u8> {
///     ensure_config!(n == 12 || n == 13, "unsupported month count {n}");
///     Ok(n)
/// }
/// assert!(months(12).is_ok());
/// assert!(matches!(months(14), Err(Error::InvalidConfiguration(_))));
/// ```
#[macro_export]
macro_rules! ensure_config {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidConfiguration(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Date(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use acal_core::{ensure_date, errors::Error};
/// fn day(d: u8) -> acal_core::errors::Result<u8> {
///     ensure_date!(d >= 1, "day must be positive, got {d}");
///     Ok(d)
/// }
/// assert!(day(1).is_ok());
/// assert!(day(0).is_err());
/// ```
#[macro_export]
macro_rules! ensure_date {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Date(
                format!($($msg)*)
            ));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(Error::NotConfigured("weekday".into()).is_configuration());
        assert!(Error::InvalidConfiguration("leap week".into()).is_configuration());
        let range = Error::OutOfRange {
            field: "MonthOfYear".into(),
            value: 14,
            range: "1 - 13".into(),
        };
        assert!(range.is_out_of_range());
        assert!(!range.is_configuration());
    }

    #[test]
    fn display() {
        let e = Error::OutOfRange {
            field: "DayOfMonth".into(),
            value: 36,
            range: "1 - 35".into(),
        };
        assert_eq!(
            e.to_string(),
            "invalid value for DayOfMonth (valid values 1 - 35): 36"
        );
        assert_eq!(
            Error::NotConfigured("anchor weekday".into()).to_string(),
            "not configured: anchor weekday"
        );
    }
}
