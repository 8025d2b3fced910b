//! Image plane to local sky projection.
//!
//! Corrected pixel offsets are rotated onto the celestial sphere around the
//! calibrated field centre, then into the local horizontal frame of the
//! station. Every quadrant-sensitive step uses a two-argument arctangent;
//! single-argument asin/acos forms lose the quadrant near the zenith and
//! the celestial poles.

use crate::correction::CorrectedPoint;
use crate::platepar::Platepar;
use crate::utils::wrap_360;
use nalgebra::Vector3;

/// A point on the local sky.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkyPoint {
    /// Azimuth in degrees on [0, 360).
    pub azimuth: f64,
    /// Altitude in degrees on [-90, 90].
    pub altitude: f64,
}

/// Projects corrected image coordinates onto the local sky.
pub struct SkyProjector {
    ra_center: f64,
    dec_center_rad: f64,
    rot_param: f64,
    reference_hour_angle: f64,
    lat: f64,
    sin_lon: f64,
    cos_lon: f64,
}

impl SkyProjector {
    pub fn new(platepar: &Platepar) -> Self {
        Self {
            ra_center: platepar.ra_center,
            dec_center_rad: platepar.dec_center.to_radians(),
            rot_param: platepar.rot_param,
            reference_hour_angle: platepar.reference_hour_angle,
            lat: platepar.lat,
            sin_lon: platepar.lon.to_radians().sin(),
            cos_lon: platepar.lon.to_radians().cos(),
        }
    }

    /// Project a single corrected point to azimuth and altitude.
    pub fn project(&self, point: &CorrectedPoint) -> SkyPoint {
        // Angular offset from the field centre and position angle of the
        // point around it, folding in the camera roll.
        let radius = point.x.hypot(point.y).to_radians();
        let theta = wrap_360(90.0 - self.rot_param + point.y.atan2(point.x).to_degrees())
            .to_radians();

        // Rotate away from the field centre on the celestial sphere.
        let sin_dec = self.dec_center_rad.sin() * radius.cos()
            + self.dec_center_rad.cos() * radius.sin() * theta.cos();
        let dec0 = sin_dec.atan2((1.0 - sin_dec * sin_dec).max(0.0).sqrt());

        let sin_t = theta.sin() * radius.sin() / dec0.cos();
        let cos_t = (radius.cos() - dec0.sin() * self.dec_center_rad.sin())
            / (dec0.cos() * self.dec_center_rad.cos());
        let ra0 = self.ra_center - wrap_360(sin_t.atan2(cos_t).to_degrees());

        // Hour angle of the point relative to the calibration epoch.
        let hour_angle = (self.reference_hour_angle + self.lat - ra0).to_radians();
        let (sin_h, cos_h) = hour_angle.sin_cos();
        let (sin_d, cos_d) = dec0.sin_cos();

        // Direction cosines in the local horizontal frame.
        let dir = Vector3::new(
            -cos_h * cos_d * self.sin_lon + sin_d * self.cos_lon,
            -sin_h * cos_d,
            cos_h * cos_d * self.cos_lon + sin_d * self.sin_lon,
        );

        SkyPoint {
            azimuth: wrap_360(dir.y.atan2(dir.x).to_degrees()),
            altitude: dir.z.atan2(dir.x.hypot(dir.y)).to_degrees(),
        }
    }

    /// Project every corrected point, preserving order.
    pub fn project_all(&self, points: &[CorrectedPoint]) -> Vec<SkyPoint> {
        points.iter().map(|point| self.project(point)).collect()
    }
}
