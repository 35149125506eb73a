//! `Weekday` — day-of-week enum.

/// Day of the week.
///
/// Variants are numbered 1–7 (Monday = 1, Sunday = 7), the ISO-8601
/// convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Weekday {
    /// Monday (1).
    Monday = 1,
    /// Tuesday (2).
    Tuesday = 2,
    /// Wednesday (3).
    Wednesday = 3,
    /// Thursday (4).
    Thursday = 4,
    /// Friday (5).
    Friday = 5,
    /// Saturday (6).
    Saturday = 6,
    /// Sunday (7).
    Sunday = 7,
}

impl Weekday {
    /// All weekdays, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Construct from the ISO ordinal (1 = Monday … 7 = Sunday).
    ///
    /// Returns `None` if the value is out of range.
    pub fn from_ordinal(n: u8) -> Option<Self> {
        match n {
            1 => Some(Weekday::Monday),
            2 => Some(Weekday::Tuesday),
            3 => Some(Weekday::Wednesday),
            4 => Some(Weekday::Thursday),
            5 => Some(Weekday::Friday),
            6 => Some(Weekday::Saturday),
            7 => Some(Weekday::Sunday),
            _ => None,
        }
    }

    /// Weekday of a day counted from 1970-01-01 (a Thursday).
    pub fn from_epoch_day(epoch_day: i64) -> Self {
        Self::ALL[(epoch_day + 3).rem_euclid(7) as usize]
    }

    /// Return the ISO ordinal (1 = Monday … 7 = Sunday).
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// The weekday `days` days after this one (negative goes backwards).
    pub fn plus(self, days: i64) -> Self {
        let idx = (self.ordinal() as i64 - 1 + days).rem_euclid(7);
        Self::ALL[idx as usize]
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_is_thursday() {
        assert_eq!(Weekday::from_epoch_day(0), Weekday::Thursday);
        assert_eq!(Weekday::from_epoch_day(-1), Weekday::Wednesday);
        assert_eq!(Weekday::from_epoch_day(3), Weekday::Sunday);
        assert_eq!(Weekday::from_epoch_day(4), Weekday::Monday);
    }

    #[test]
    fn plus_wraps() {
        assert_eq!(Weekday::Sunday.plus(1), Weekday::Monday);
        assert_eq!(Weekday::Monday.plus(-1), Weekday::Sunday);
        assert_eq!(Weekday::Wednesday.plus(14), Weekday::Wednesday);
        assert_eq!(Weekday::Friday.plus(-10), Weekday::Tuesday);
    }

    #[test]
    fn ordinal_roundtrip() {
        for w in Weekday::ALL {
            assert_eq!(Weekday::from_ordinal(w.ordinal()), Some(w));
        }
        assert!(Weekday::from_ordinal(0).is_none());
        assert!(Weekday::from_ordinal(8).is_none());
    }
}
