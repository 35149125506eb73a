//! `Month` — month-of-year enum of the reference (ISO) calendar.

/// Month of the ISO year.
///
/// Variants are numbered 1–12 (January = 1, December = 12).  Accounting
/// months are plain numbers, since a division may have thirteen of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Month {
    /// January (1).
    January = 1,
    /// February (2).
    February = 2,
    /// March (3).
    March = 3,
    /// April (4).
    April = 4,
    /// May (5).
    May = 5,
    /// June (6).
    June = 6,
    /// July (7).
    July = 7,
    /// August (8).
    August = 8,
    /// September (9).
    September = 9,
    /// October (10).
    October = 10,
    /// November (11).
    November = 11,
    /// December (12).
    December = 12,
}

impl Month {
    /// All months, January first.
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Construct from a number (1 = January … 12 = December).
    ///
    /// Returns `None` if the value is out of range.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1..=12 => Some(Self::ALL[n as usize - 1]),
            _ => None,
        }
    }

    /// Return the 1-based month number.
    pub fn number(&self) -> u8 {
        *self as u8
    }

    /// Return the full name (`"January"`, `"February"`, …).
    pub fn long_name(&self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.long_name())
    }
}

impl From<Month> for u8 {
    fn from(m: Month) -> u8 {
        m as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbering_follows_all() {
        for (i, m) in Month::ALL.into_iter().enumerate() {
            assert_eq!(u8::from(m) as usize, i + 1);
            assert_eq!(Month::from_number(m.number()), Some(m));
        }
        assert_eq!(Month::from_number(0), None);
        assert_eq!(Month::from_number(13), None);
    }

    #[test]
    fn display_uses_long_name() {
        assert_eq!(Month::August.to_string(), "August");
        assert_eq!(Month::February.long_name(), "February");
    }
}
