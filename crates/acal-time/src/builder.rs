//! `ChronologyBuilder` — fluent configuration of an accounting calendar.

use crate::chronology::{Chronology, IsoYearAlignment, YearEnd};
use crate::field::ChronoField;
use crate::month::Month;
use crate::weekday::Weekday;
use crate::year_division::YearDivision;
use acal_core::ensure_config;
use acal_core::errors::{Error, Result};
use tracing::debug;

/// Builder for [`Chronology`].
///
/// Setters never fail; the configuration is validated as a whole by
/// [`to_chronology`](Self::to_chronology).  The builder is left untouched, so
/// it can be adjusted and used again.
///
/// ```
/// use acal_time::{ChronologyBuilder, Month, Weekday, YearDivision};
///
/// let chrono = ChronologyBuilder::new()
///     .ends_on(Weekday::Saturday)
///     .nearest_end_of(Month::January)
///     .with_division(YearDivision::QuartersOf445Weeks)
///     .leap_week_in_month(12)
///     .to_chronology()
///     .unwrap();
/// assert_eq!(chrono.ends_on(), Weekday::Saturday);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ChronologyBuilder {
    ends_on: Option<Weekday>,
    year_end: Option<YearEnd>,
    division: Option<YearDivision>,
    leap_week_in_month: Option<u8>,
    alignment: IsoYearAlignment,
}

impl ChronologyBuilder {
    /// Begin with an empty configuration; accounting years end in their ISO
    /// year unless told otherwise.
    pub fn new() -> Self {
        Self::default()
    }

    /// The weekday every accounting year ends on.
    pub fn ends_on(mut self, weekday: Weekday) -> Self {
        self.ends_on = Some(weekday);
        self
    }

    /// End the year on the weekday nearest the last day of `month`.
    ///
    /// Replaces any earlier [`in_last_week_of`](Self::in_last_week_of).
    pub fn nearest_end_of(mut self, month: Month) -> Self {
        self.year_end = Some(YearEnd::NearestEndOf(month));
        self
    }

    /// End the year on the last such weekday within `month`.
    ///
    /// Replaces any earlier [`nearest_end_of`](Self::nearest_end_of).
    pub fn in_last_week_of(mut self, month: Month) -> Self {
        self.year_end = Some(YearEnd::InLastWeekOf(month));
        self
    }

    /// How years are divided into months.
    pub fn with_division(mut self, division: YearDivision) -> Self {
        self.division = Some(division);
        self
    }

    /// The month receiving the extra week of a 53-week year.
    pub fn leap_week_in_month(mut self, month: u8) -> Self {
        self.leap_week_in_month = Some(month);
        self
    }

    /// Accounting year *Y* ends in ISO year *Y*.
    pub fn accounting_year_ends_in_iso_year(mut self) -> Self {
        self.alignment = IsoYearAlignment::EndsInIsoYear;
        self
    }

    /// Accounting year *Y* starts in ISO year *Y*.
    pub fn accounting_year_starts_in_iso_year(mut self) -> Self {
        self.alignment = IsoYearAlignment::StartsInIsoYear;
        self
    }

    /// Validate the configuration and build the [`Chronology`].
    ///
    /// # Errors
    /// * [`Error::NotConfigured`] if the year-end weekday, the year-end rule,
    ///   the division, or the leap-week month was never set.
    /// * [`Error::InvalidConfiguration`] if the leap-week month does not exist
    ///   in the division.
    pub fn to_chronology(&self) -> Result<Chronology> {
        match self.validate() {
            Ok(chronology) => {
                debug!(%chronology, "built accounting chronology");
                Ok(chronology)
            }
            Err(error) => {
                debug!(%error, config = ?self, "rejected accounting chronology configuration");
                Err(error)
            }
        }
    }

    fn validate(&self) -> Result<Chronology> {
        let ends_on = self
            .ends_on
            .ok_or_else(|| Error::NotConfigured("year-end weekday".into()))?;
        let year_end = self
            .year_end
            .ok_or_else(|| Error::NotConfigured("year-end month".into()))?;
        let division = self
            .division
            .ok_or_else(|| Error::NotConfigured("year division".into()))?;
        let leap_week_in_month = self
            .leap_week_in_month
            .ok_or_else(|| Error::NotConfigured("leap-week month".into()))?;
        let months = division.month_of_year_range();
        ensure_config!(
            months.is_valid_value(leap_week_in_month as i64),
            "leap week cannot be placed in non-existent month {leap_week_in_month} \
             ({} {months} for {division})",
            ChronoField::MonthOfYear
        );
        Ok(Chronology::new(
            ends_on,
            year_end,
            division,
            leap_week_in_month,
            self.alignment,
        ))
    }
}

impl TryFrom<ChronologyBuilder> for Chronology {
    type Error = Error;

    fn try_from(builder: ChronologyBuilder) -> Result<Self> {
        builder.to_chronology()
    }
}

impl From<Chronology> for ChronologyBuilder {
    fn from(chronology: Chronology) -> Self {
        Self {
            ends_on: Some(chronology.ends_on()),
            year_end: Some(chronology.year_end_rule()),
            division: Some(chronology.division()),
            leap_week_in_month: Some(chronology.leap_week_in_month()),
            alignment: chronology.iso_year_alignment(),
        }
    }
}
