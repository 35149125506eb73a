//! Year-structure tests for `Chronology`.
//!
//! These integration tests sweep every combination of division, leap-week
//! month, year-end rule, weekday and a spread of anchor months, and check the
//! laws that tie year ends, leap years and date construction together.

use acal_time::date::days_in_month;
use acal_time::{
    ChronoField, Chronology, ChronologyBuilder, Date, Month, Weekday, YearDivision, YearEnd,
    MAX_YEAR, MIN_YEAR,
};
use proptest::prelude::*;

fn date(y: i32, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

const ANCHORS: [Month; 4] = [Month::January, Month::February, Month::August, Month::December];

/// Every chronology of the sweep.
fn all_chronologies() -> Vec<Chronology> {
    let mut out = Vec::new();
    for division in YearDivision::ALL {
        for leap in 1..=division.months_in_year() {
            for weekday in Weekday::ALL {
                for month in ANCHORS {
                    for nearest in [true, false] {
                        let builder = ChronologyBuilder::new()
                            .ends_on(weekday)
                            .with_division(division)
                            .leap_week_in_month(leap);
                        let builder = if nearest {
                            builder.nearest_end_of(month)
                        } else {
                            builder.in_last_week_of(month)
                        };
                        out.push(builder.to_chronology().unwrap());
                    }
                }
            }
        }
    }
    out
}

fn retail_calendar() -> Chronology {
    ChronologyBuilder::new()
        .ends_on(Weekday::Sunday)
        .nearest_end_of(Month::August)
        .with_division(YearDivision::QuartersOf445Weeks)
        .leap_week_in_month(12)
        .to_chronology()
        .unwrap()
}

// ─── Year ends ────────────────────────────────────────────────────────────────

#[test]
fn year_end_lands_on_configured_weekday() {
    for chrono in all_chronologies() {
        for y in 1995..2035 {
            let end = chrono.year_end(y).unwrap();
            assert_eq!(end.weekday(), chrono.ends_on(), "{chrono}: year {y}");
        }
    }
}

#[test]
fn year_end_obeys_its_rule() {
    for chrono in all_chronologies() {
        let month = chrono.year_end_rule().month().number();
        for y in 1995..2035 {
            let end = chrono.year_end(y).unwrap();
            let last = date(y, month, days_in_month(y as i64, month));
            match chrono.year_end_rule() {
                YearEnd::NearestEndOf(_) => {
                    assert!((end - last).abs() <= 3, "{chrono}: year {y} ends {end}");
                }
                YearEnd::InLastWeekOf(_) => {
                    assert!(end <= last && last - end < 7, "{chrono}: year {y} ends {end}");
                }
            }
        }
    }
}

#[test]
fn years_are_52_or_53_weeks() {
    for chrono in all_chronologies() {
        for y in 1995..2035 {
            let length = chrono.year_end(y).unwrap() - chrono.year_end(y - 1).unwrap();
            assert!(length == 364 || length == 371, "{chrono}: year {y} is {length} days");
            assert_eq!(chrono.is_leap_year(y), length == 371, "{chrono}: year {y}");
            assert_eq!(chrono.year_length(y) as i64, length);
        }
    }
}

#[test]
fn leap_years_are_never_consecutive() {
    for chrono in all_chronologies() {
        for y in 1995..2035 {
            assert!(!(chrono.is_leap_year(y) && chrono.is_leap_year(y + 1)), "{chrono}: {y}");
        }
    }
}

#[test]
fn previous_leap_years_steps_with_leap_years() {
    for chrono in all_chronologies() {
        for y in -20..60 {
            let step = chrono.previous_leap_years(y + 1) - chrono.previous_leap_years(y);
            assert_eq!(step, i64::from(chrono.is_leap_year(y)), "{chrono}: year {y}");
        }
        assert_eq!(chrono.previous_leap_years(1), 0);
    }
}

#[test]
fn retail_leap_years() {
    let chrono = retail_calendar();
    let leaps: Vec<i32> = (2000..2030).filter(|&y| chrono.is_leap_year(y)).collect();
    assert_eq!(leaps, [2000, 2006, 2012, 2017, 2023, 2028]);
}

#[test]
fn year_end_at_range_limits() {
    for chrono in all_chronologies().into_iter().step_by(7) {
        let end = chrono.year_end(MAX_YEAR).unwrap();
        let start = chrono.year_end(MIN_YEAR - 1).unwrap();
        let range = chrono.range(ChronoField::EpochDay).unwrap();
        assert_eq!(range.minimum(), start.epoch_day() + 1);
        assert_eq!(range.maximum(), end.epoch_day());
    }
}

// ─── Months ───────────────────────────────────────────────────────────────────

#[test]
fn month_lengths_sum_to_year_length() {
    for chrono in all_chronologies() {
        for y in [1999, 2000, 2001, 2012, 2018, 2023] {
            let months = chrono.division().months_in_year();
            let total: u16 = (1..=months)
                .map(|m| chrono.month_length(y, m).unwrap() as u16)
                .sum();
            assert_eq!(total, chrono.year_length(y), "{chrono}: year {y}");
        }
    }
}

#[test]
fn leap_week_goes_to_configured_month() {
    let chrono = retail_calendar();
    for m in 1..=12 {
        let extra = chrono.month_length(2012, m).unwrap() - chrono.month_length(2013, m).unwrap();
        assert_eq!(extra, if m == 12 { 7 } else { 0 }, "month {m}");
    }
}

#[test]
fn invalid_month_is_rejected() {
    let chrono = retail_calendar();
    assert!(chrono.month_length(2012, 0).unwrap_err().is_out_of_range());
    assert!(chrono.month_length(2012, 13).unwrap_err().is_out_of_range());
    assert!(chrono.month_length(MAX_YEAR + 1, 1).unwrap_err().is_out_of_range());
}

// ─── Date construction ────────────────────────────────────────────────────────

#[test]
fn first_day_is_day_after_previous_year_end() {
    for chrono in all_chronologies() {
        for y in 1995..2035 {
            let first = chrono.date(y, 1, 1).unwrap();
            assert_eq!(first.to_epoch_day(), chrono.year_end(y - 1).unwrap().epoch_day() + 1);
        }
    }
}

#[test]
fn last_day_is_year_end() {
    for chrono in all_chronologies() {
        for y in 1995..2035 {
            let months = chrono.division().months_in_year();
            let last_day = chrono.month_length(y, months).unwrap();
            let last = chrono.date(y, months, last_day).unwrap();
            assert_eq!(last.to_date().unwrap(), chrono.year_end(y).unwrap());
        }
    }
}

#[test]
fn epoch_days_round_trip() {
    for chrono in all_chronologies().into_iter().step_by(5) {
        let from = chrono.year_end(2010).unwrap().epoch_day() - 10;
        let to = chrono.year_end(2013).unwrap().epoch_day() + 10;
        let mut previous = chrono.date_epoch_day(from - 1).unwrap();
        for e in from..=to {
            let d = chrono.date_epoch_day(e).unwrap();
            assert_eq!(d.to_epoch_day(), e, "{chrono}: {e}");
            assert_eq!(chrono.date(d.year(), d.month(), d.day_of_month()).unwrap(), d);
            assert_eq!(chrono.date_year_day(d.year(), d.day_of_year()).unwrap(), d);
            assert!(previous < d);
            previous = d;
        }
    }
}

#[test]
fn epoch_day_limits() {
    let chrono = retail_calendar();
    let first = chrono.date(MIN_YEAR, 1, 1).unwrap();
    let last_day = chrono.month_length(MAX_YEAR, 12).unwrap();
    let last = chrono.date(MAX_YEAR, 12, last_day).unwrap();
    assert_eq!(chrono.date_epoch_day(first.to_epoch_day()).unwrap(), first);
    assert_eq!(chrono.date_epoch_day(last.to_epoch_day()).unwrap(), last);
    assert!(chrono
        .date_epoch_day(first.to_epoch_day() - 1)
        .unwrap_err()
        .is_out_of_range());
    assert!(chrono
        .date_epoch_day(last.to_epoch_day() + 1)
        .unwrap_err()
        .is_out_of_range());
    assert!(chrono.date(MIN_YEAR - 1, 1, 1).is_err());
    assert!(chrono.date(MAX_YEAR + 1, 1, 1).is_err());
}

#[test]
fn starts_in_iso_year_renumbers() {
    let ends = retail_calendar();
    let starts = ChronologyBuilder::from(ends)
        .accounting_year_starts_in_iso_year()
        .to_chronology()
        .unwrap();
    let day = date(2012, 3, 15);
    let a = ends.date_from(day).unwrap();
    let b = starts.date_from(day).unwrap();
    assert_eq!(a.year(), 2012);
    assert_eq!(b.year(), 2011);
    assert_eq!((a.month(), a.day_of_month()), (b.month(), b.day_of_month()));
}

// ─── Properties ───────────────────────────────────────────────────────────────

fn chronology_strategy() -> impl Strategy<Value = Chronology> {
    (
        prop::sample::select(YearDivision::ALL.to_vec()),
        1u8..=13,
        prop::sample::select(Weekday::ALL.to_vec()),
        prop::sample::select(Month::ALL.to_vec()),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(division, leap, weekday, month, nearest, starts)| {
            let leap = leap.min(division.months_in_year());
            let builder = ChronologyBuilder::new()
                .ends_on(weekday)
                .with_division(division)
                .leap_week_in_month(leap);
            let builder = if nearest {
                builder.nearest_end_of(month)
            } else {
                builder.in_last_week_of(month)
            };
            let builder = if starts {
                builder.accounting_year_starts_in_iso_year()
            } else {
                builder
            };
            builder.to_chronology().unwrap()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Any epoch day in the calendar maps to a date that maps back to it.
    #[test]
    fn prop_epoch_day_round_trip(chrono in chronology_strategy(), e in -300_000_000i64..300_000_000) {
        let d = chrono.date_epoch_day(e).unwrap();
        prop_assert_eq!(d.to_epoch_day(), e);
        prop_assert!(d.day_of_year() <= chrono.year_length(d.year()));
    }

    /// Year lengths are 364 or 371 across the whole supported range.
    #[test]
    fn prop_year_length(chrono in chronology_strategy(), y in (MIN_YEAR + 1)..=MAX_YEAR) {
        let length = chrono.year_end(y).unwrap() - chrono.year_end(y - 1).unwrap();
        prop_assert!(length == 364 || length == 371);
        prop_assert_eq!(
            chrono.previous_leap_years(y + 1) - chrono.previous_leap_years(y),
            i64::from(length == 371)
        );
    }
}
