//! Horizontal to equatorial coordinate conversion.
//!
//! The only stage that depends on wall-clock time: the local hour angle is
//! taken out of the horizontal frame, the Greenwich sidereal angle is
//! evaluated at the observation's Julian date, and the two combine into
//! right ascension and declination.

use crate::platepar::Platepar;
use crate::projection::SkyPoint;
use crate::time::{greenwich_sidereal_deg, julian_date};
use crate::utils::wrap_360;
use chrono::NaiveDateTime;

/// A sky point expressed in the equatorial frame at a known instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EquatorialPoint {
    /// Julian date of the observation.
    pub julian_date: f64,
    /// Right ascension in degrees on [0, 360).
    pub ra: f64,
    /// Declination in degrees on [-90, 90].
    pub dec: f64,
}

/// Converts local sky coordinates and timestamps to right ascension and
/// declination.
pub struct EquatorialConverter {
    lat: f64,
    sin_lon: f64,
    cos_lon: f64,
    ut_correction: f64,
}

impl EquatorialConverter {
    pub fn new(platepar: &Platepar) -> Self {
        Self {
            lat: platepar.lat,
            sin_lon: platepar.lon.to_radians().sin(),
            cos_lon: platepar.lon.to_radians().cos(),
            ut_correction: platepar.ut_correction,
        }
    }

    /// Convert one sky point observed at `time` on the station wall clock.
    pub fn convert(&self, point: &SkyPoint, time: NaiveDateTime) -> EquatorialPoint {
        let (sin_az, cos_az) = point.azimuth.to_radians().sin_cos();
        let (sin_alt, cos_alt) = point.altitude.to_radians().sin_cos();

        // Hour angle out of the horizontal frame.
        let x = -sin_az * cos_alt;
        let y = -cos_az * self.sin_lon * cos_alt + sin_alt * self.cos_lon;
        let hour_angle = x.atan2(y).to_degrees();

        let jd = julian_date(time, self.ut_correction);
        let sidereal = greenwich_sidereal_deg(jd);

        let sin_dec = self.sin_lon * sin_alt + self.cos_lon * cos_alt * cos_az;

        EquatorialPoint {
            julian_date: jd,
            ra: wrap_360(sidereal + self.lat - hour_angle),
            dec: sin_dec.clamp(-1.0, 1.0).asin().to_degrees(),
        }
    }

    /// Convert every sky point against its parallel timestamp.
    pub fn convert_all(
        &self,
        points: &[SkyPoint],
        times: &[NaiveDateTime],
    ) -> Vec<EquatorialPoint> {
        debug_assert_eq!(points.len(), times.len());
        points
            .iter()
            .zip(times)
            .map(|(point, time)| self.convert(point, *time))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platepar::make_platepar;
    use crate::time::J2000_JD;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use quickcheck::quickcheck;

    fn at(h: u32, m: u32, s: u32, ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_milli_opt(h, m, s, ms)
            .unwrap()
    }

    #[test]
    fn zenith_at_j2000() {
        // Station clock is one hour ahead of UT in the fixture, so 13:00
        // local is the J2000 epoch.
        let converter = EquatorialConverter::new(&make_platepar());
        let zenith = SkyPoint { azimuth: 0.0, altitude: 90.0 };

        let eq = converter.convert(&zenith, at(13, 0, 0, 0));
        assert_relative_eq!(eq.julian_date, J2000_JD, epsilon = 1e-9);
        // Hour angle vanishes at the zenith, leaving sidereal angle plus
        // the calibration's latitude term. The sidereal polynomial
        // amplifies Julian date rounding by ~361 deg/day.
        assert_relative_eq!(eq.ra, wrap_360(280.46061837 + 45.5), epsilon = 1e-5);
        assert_relative_eq!(eq.dec, 16.0, epsilon = 1e-9);
    }

    #[test]
    fn julian_dates_non_decreasing() {
        let converter = EquatorialConverter::new(&make_platepar());
        let points = vec![SkyPoint { azimuth: 120.0, altitude: 40.0 }; 4];
        let times = [
            at(23, 15, 0, 0),
            at(23, 15, 0, 40),
            at(23, 15, 0, 40),
            at(23, 15, 0, 120),
        ];

        let eq = converter.convert_all(&points, &times);
        for pair in eq.windows(2) {
            assert!(pair[1].julian_date >= pair[0].julian_date);
        }
    }

    quickcheck! {
        fn angles_in_documented_ranges(az_seed: u16, alt_seed: i16, ms_seed: u16) -> bool {
            let azimuth = az_seed as f64 * 360.0 / (u16::MAX as f64 + 1.0);
            let altitude = alt_seed as f64 * 90.0 / i16::MAX as f64;
            let time = at(22, 0, 0, 0) + chrono::Duration::milliseconds(ms_seed as i64);

            let converter = EquatorialConverter::new(&make_platepar());
            let eq = converter.convert(&SkyPoint { azimuth, altitude }, time);

            (0.0..360.0).contains(&eq.ra) && (-90.0..=90.0).contains(&eq.dec)
        }
    }
}
