//! Lens distortion and vignetting inversion.
//!
//! Detections arrive in raw camera pixels. Before any sky projection the
//! coordinates are rescaled to the fixed 384x288 CIF reference grid the
//! calibration was fitted on, the vignetting falloff of the detector levels
//! is compensated, and the fitted 12-term distortion polynomial is removed.
//! Coordinates leave this stage in CIF units divided by the plate scale.

use crate::platepar::Platepar;
use crate::track::{DetectionPoint, Track};

/// CIF reference grid width in pixels.
const CIF_WIDTH: f64 = 384.0;
/// CIF reference grid height in pixels.
const CIF_HEIGHT: f64 = 288.0;
/// CIF radius beyond which the vignetting compensation applies.
const VIGNETTING_RADIUS: f64 = 120.0;
/// Vignetting gain per CIF unit beyond the flat radius.
const VIGNETTING_GAIN: f64 = 0.00245;

/// A detection point with distortion and vignetting removed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CorrectedPoint {
    /// Distortion-corrected X coordinate, CIF units over plate scale.
    pub x: f64,
    /// Distortion-corrected Y coordinate, CIF units over plate scale.
    pub y: f64,
    /// Vignetting-corrected intensity level.
    pub level: f64,
}

/// Inverts the fitted distortion polynomial and the vignetting falloff.
pub struct FieldCorrector {
    x_poly: [f64; 12],
    y_poly: [f64; 12],
    x_scale: f64,
    y_scale: f64,
    x_half: f64,
    y_half: f64,
    f_scale: f64,
}

impl FieldCorrector {
    pub fn new(platepar: &Platepar) -> Self {
        Self {
            x_poly: platepar.x_poly,
            y_poly: platepar.y_poly,
            x_scale: f64::from(platepar.x_res) / CIF_WIDTH,
            y_scale: f64::from(platepar.y_res) / CIF_HEIGHT,
            x_half: f64::from(platepar.x_res) / 2.0,
            y_half: f64::from(platepar.y_res) / 2.0,
            f_scale: platepar.f_scale,
        }
    }

    /// Correct a single detection point.
    pub fn correct(&self, point: &DetectionPoint) -> CorrectedPoint {
        // Centre-relative coordinates on the CIF grid.
        let x = (point.x - self.x_half) / self.x_scale;
        let y = (point.y - self.y_half) / self.y_scale;

        // The vignetting radius is measured from the (192, 192) offset of
        // the centre-relative coordinates, exactly as the gain was fitted.
        let r = ((x - 192.0).powi(2) + (y - 192.0).powi(2)).sqrt();
        let level = if r > VIGNETTING_RADIUS {
            point.level * (1.0 + VIGNETTING_GAIN * (r - VIGNETTING_RADIUS))
        } else {
            point.level
        };

        // The radial terms pair coefficient 10 with the polynomial's own
        // axis and 11 with the opposite one; terms 0 through 9 share the
        // same (x, y) ordering on both axes.
        let radial = x.hypot(y);
        let x_pix = x
            + eval_terms(&self.x_poly, x, y)
            + self.x_poly[10] * x * radial
            + self.x_poly[11] * y * radial;
        let y_pix = y
            + eval_terms(&self.y_poly, x, y)
            + self.y_poly[10] * y * radial
            + self.y_poly[11] * x * radial;

        CorrectedPoint {
            x: x_pix / self.f_scale,
            y: y_pix / self.f_scale,
            level,
        }
    }

    /// Correct every point of a track, preserving order.
    pub fn correct_track(&self, track: &Track) -> Vec<CorrectedPoint> {
        track.points().iter().map(|point| self.correct(point)).collect()
    }
}

/// The constant, linear, quadratic, and cubic terms of one axis polynomial.
fn eval_terms(c: &[f64; 12], x: f64, y: f64) -> f64 {
    c[0] + c[1] * x
        + c[2] * y
        + c[3] * x * x
        + c[4] * x * y
        + c[5] * y * y
        + c[6] * x * x * x
        + c[7] * x * x * y
        + c[8] * x * y * y
        + c[9] * y * y * y
}
