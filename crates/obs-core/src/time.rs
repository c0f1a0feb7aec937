//! Time handling shared by the importer and the filter pipeline.
//!
//! GPS receivers on some OBS hardware revisions emit GPS time rather than
//! UTC (declared via the CSV metadata key `TimeZone=GPS`). GPS time runs
//! ahead of UTC by the number of leap seconds inserted since the GPS epoch
//! (1980-01-06, when GPS time and UTC coincided). This module carries the
//! historical leap-second table needed to convert exactly, rather than
//! hardcoding "18 seconds" for one fixture date.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Rows whose timestamp precedes this instant are dropped as coming from an
/// uninitialized device clock.
pub fn reject_before() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap()
}

/// TAI-UTC offset (seconds) effective from each date, in chronological
/// order. The offset holds until superseded by the next entry.
const TAI_UTC_TABLE: &[(i32, u32, u32, i64)] = &[
    (1972, 1, 1, 10),
    (1972, 7, 1, 11),
    (1973, 1, 1, 12),
    (1974, 1, 1, 13),
    (1975, 1, 1, 14),
    (1976, 1, 1, 15),
    (1977, 1, 1, 16),
    (1978, 1, 1, 17),
    (1979, 1, 1, 18),
    (1980, 1, 1, 19),
    (1981, 7, 1, 20),
    (1982, 7, 1, 21),
    (1983, 7, 1, 22),
    (1985, 7, 1, 23),
    (1988, 1, 1, 24),
    (1990, 1, 1, 25),
    (1991, 1, 1, 26),
    (1992, 7, 1, 27),
    (1993, 7, 1, 28),
    (1994, 7, 1, 29),
    (1996, 1, 1, 30),
    (1997, 7, 1, 31),
    (1999, 1, 1, 32),
    (2006, 1, 1, 33),
    (2009, 1, 1, 34),
    (2012, 7, 1, 35),
    (2015, 7, 1, 36),
    (2017, 1, 1, 37),
];

/// GPS time equals TAI minus 19 s at every instant (fixed by definition at
/// the GPS epoch). So GPS-minus-UTC = TAI-minus-UTC - 19.
fn tai_minus_utc_at(at: DateTime<Utc>) -> i64 {
    let date = at.date_naive();
    TAI_UTC_TABLE
        .iter()
        .rev()
        .find(|&&(y, m, d, _)| date >= NaiveDate::from_ymd_opt(y, m, d).unwrap())
        .map(|&(_, _, _, offset)| offset)
        .unwrap_or(10)
}

/// Seconds that GPS time leads UTC by, at the given (approximate) instant.
pub fn gps_minus_utc_seconds(at: DateTime<Utc>) -> i64 {
    tai_minus_utc_at(at) - 19
}

/// Convert a timestamp that was actually GPS time (but parsed as if it were
/// UTC) into true UTC, by subtracting the leap-second offset current at
/// that instant.
pub fn gps_to_utc(apparent_utc: DateTime<Utc>) -> DateTime<Utc> {
    let offset = gps_minus_utc_seconds(apparent_utc);
    apparent_utc - chrono::Duration::seconds(offset)
}
