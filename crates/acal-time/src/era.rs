//! `Era` — the two eras shared by the ISO and accounting calendars.

/// Era of a proleptic year.
///
/// Year 1 and later fall in [`Era::Ce`]; year 0 is year 1 of [`Era::Bce`],
/// year -1 is year 2 of [`Era::Bce`], and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Era {
    /// Before the common era (numeric value 0).
    Bce = 0,
    /// Common era (numeric value 1).
    Ce = 1,
}

impl Era {
    /// Era containing the given proleptic year.
    pub fn of_year(proleptic_year: i64) -> Self {
        if proleptic_year >= 1 {
            Era::Ce
        } else {
            Era::Bce
        }
    }

    /// Numeric value (0 = BCE, 1 = CE).
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Year-of-era of a proleptic year.
    pub fn year_of_era(proleptic_year: i64) -> i64 {
        if proleptic_year >= 1 {
            proleptic_year
        } else {
            1 - proleptic_year
        }
    }

    /// Proleptic year of a year-of-era in this era.
    pub fn proleptic_year(&self, year_of_era: i64) -> i64 {
        match self {
            Era::Ce => year_of_era,
            Era::Bce => 1 - year_of_era,
        }
    }
}

impl std::fmt::Display for Era {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Era::Bce => write!(f, "BCE"),
            Era::Ce => write!(f, "CE"),
        }
    }
}
