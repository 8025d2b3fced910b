//! Apparent magnitude estimation from detector levels.
//!
//! A piecewise calibration law maps corrected intensity levels to apparent
//! magnitudes; above a fixed detector saturation point the fitted linear
//! law hands over to a fixed saturation formula. Meteors moving faster than
//! the calibration threshold smear their light across more pixels per
//! frame and are compensated through their angular velocity.

use crate::equatorial::EquatorialPoint;

/// log10 of the level above which the detector saturates.
const SATURATION_LOG_LEVEL: f64 = 3.2;

/// Photometric calibration for one station.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MagnitudeEstimator {
    mag_slope: f64,
    mag_intercept: f64,
    w_pix: f64,
}

impl MagnitudeEstimator {
    pub fn new(mag_slope: f64, mag_intercept: f64, w_pix: f64) -> Self {
        Self {
            mag_slope,
            mag_intercept,
            w_pix,
        }
    }

    /// Magnitudes for a track's corrected levels.
    ///
    /// `begin` and `end` are the track's first and last equatorial points
    /// and `duration_seconds` the wall-clock span between them. Levels must
    /// be positive: zero or negative levels produce non-finite magnitudes,
    /// so callers filter them upstream.
    pub fn estimate_track(
        &self,
        levels: &[f64],
        begin: &EquatorialPoint,
        end: &EquatorialPoint,
        duration_seconds: f64,
    ) -> Vec<f64> {
        let angular_velocity = track_arc_deg(begin, end) / duration_seconds;
        self.estimate(levels, angular_velocity)
    }

    /// Magnitudes for a sequence of corrected levels at a known angular
    /// velocity.
    pub fn estimate(&self, levels: &[f64], angular_velocity: f64) -> Vec<f64> {
        levels
            .iter()
            .map(|&level| self.magnitude(level, angular_velocity))
            .collect()
    }

    fn magnitude(&self, level: f64, angular_velocity: f64) -> f64 {
        let log_level = level.log10();
        let mut magnitude = if log_level <= SATURATION_LOG_LEVEL {
            self.mag_slope * log_level + self.mag_intercept
        } else {
            -20.0 * log_level + 64.5
        };

        // Faster meteors spend less time on each pixel and read fainter.
        if angular_velocity > self.w_pix {
            magnitude -= 2.5 * (angular_velocity / self.w_pix).log10();
        }

        magnitude
    }
}

/// Angular length in degrees of the great-circle arc between two
/// equatorial points, by the spherical law of cosines.
pub fn track_arc_deg(begin: &EquatorialPoint, end: &EquatorialPoint) -> f64 {
    let (sin_dec_b, cos_dec_b) = begin.dec.to_radians().sin_cos();
    let (sin_dec_e, cos_dec_e) = end.dec.to_radians().sin_cos();
    let cos_dra = (begin.ra.to_radians() - end.ra.to_radians()).cos();

    let cos_arc = sin_dec_b * sin_dec_e + cos_dec_b * cos_dec_e * cos_dra;
    // Rounding can push identical endpoints just past 1.
    cos_arc.clamp(-1.0, 1.0).acos().to_degrees()
}
