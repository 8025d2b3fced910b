//! Wall-clock time to Julian date and sidereal angle conversions.

use crate::utils::wrap_360;
use chrono::NaiveDateTime;

/// Julian date of the Unix epoch, 1970-01-01T00:00:00 UT.
const UNIX_EPOCH_JD: f64 = 2440587.5;

/// Julian date of the J2000.0 epoch, 2000-01-01T12:00:00 UT.
pub const J2000_JD: f64 = 2451545.0;

pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Convert a station wall-clock timestamp to a Julian date.
///
/// `ut_correction` is the difference between the station clock and UT in
/// hours (local = UT + correction); it is subtracted before the epoch
/// conversion. Millisecond precision is preserved.
pub fn julian_date(time: NaiveDateTime, ut_correction: f64) -> f64 {
    let days = time.and_utc().timestamp_micros() as f64 / (SECONDS_PER_DAY * 1e6);
    days + UNIX_EPOCH_JD - ut_correction / 24.0
}

/// Greenwich mean sidereal angle in degrees for a Julian date, on [0, 360).
///
/// IAU 1982 polynomial expressed in whole days and Julian centuries from
/// J2000.0.
pub fn greenwich_sidereal_deg(jd: f64) -> f64 {
    let d = jd - J2000_JD;
    let t = d / 36525.0;
    wrap_360(280.46061837 + 360.98564736629 * d + 0.000387933 * t * t - t * t * t / 38710000.0)
}
