//! Station calibration parameters, as fitted against a reference star field.

use crate::error::Error;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Astrometric and photometric plate parameters for one station.
///
/// Produced by an external calibration-file loader and shared read-only by
/// every pipeline stage. The distortion polynomials act on coordinates
/// rescaled to the fixed 384x288 CIF reference grid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Platepar {
    /// X axis distortion polynomial coefficients.
    pub x_poly: [f64; 12],
    /// Y axis distortion polynomial coefficients.
    pub y_poly: [f64; 12],
    /// Camera X axis resolution in pixels (longer side).
    pub x_res: u32,
    /// Camera Y axis resolution in pixels (shorter side).
    pub y_res: u32,
    /// Sum of image scales per axis (arcsec per pixel).
    pub f_scale: f64,
    /// Right ascension of the image centre (degrees).
    pub ra_center: f64,
    /// Declination of the image centre (degrees).
    pub dec_center: f64,
    /// Field rotation parameter (degrees).
    pub rot_param: f64,
    /// Station latitude (degrees).
    pub lat: f64,
    /// Station longitude (degrees).
    pub lon: f64,
    /// Difference between the station wall clock and UT (hours).
    pub ut_correction: f64,
    /// Referent hour angle of the calibration epoch (degrees).
    pub reference_hour_angle: f64,
    /// Magnitude calibration slope.
    pub mag_slope: f64,
    /// Magnitude calibration intercept.
    pub mag_intercept: f64,
    /// Angular velocity threshold for the magnitude correction (arcsec/s).
    pub w_pix: f64,
}

impl Platepar {
    /// Copy loader-produced coefficients into a fixed array.
    ///
    /// Returns an error unless the slice holds exactly 12 values.
    pub fn poly_coefficients(coeffs: &[f64]) -> Result<[f64; 12], Error> {
        coeffs
            .try_into()
            .map_err(|_| Error::PolyCoefficients { count: coeffs.len() })
    }

    /// Check the parameters the type system cannot encode.
    ///
    /// The pipeline calls this before running any stage.
    pub fn validate(&self) -> Result<(), Error> {
        if self.x_res == 0 || self.y_res == 0 {
            return Err(Error::Resolution {
                x_res: self.x_res,
                y_res: self.y_res,
            });
        }

        if !(self.f_scale > 0.0) {
            return Err(Error::PlateScale {
                f_scale: self.f_scale,
            });
        }

        Ok(())
    }
}

/// An undistorted 720x576 calibration used as a fixture across the crate's
/// unit tests.
#[cfg(test)]
pub(crate) fn make_platepar() -> Platepar {
    Platepar {
        x_poly: [0.0; 12],
        y_poly: [0.0; 12],
        x_res: 720,
        y_res: 576,
        f_scale: 1.0,
        ra_center: 90.0,
        dec_center: 45.0,
        rot_param: 0.0,
        lat: 45.5,
        lon: 16.0,
        ut_correction: 1.0,
        reference_hour_angle: 0.0,
        mag_slope: -2.5,
        mag_intercept: 8.5,
        w_pix: 5.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn accepts_twelve_coefficients() {
        let coeffs: Vec<f64> = (0..12).map(f64::from).collect();
        let poly = Platepar::poly_coefficients(&coeffs).unwrap();
        assert_eq!(poly[11], 11.0);
    }

    #[rstest]
    #[case(11)]
    #[case(13)]
    #[case(0)]
    fn rejects_wrong_coefficient_count(#[case] count: usize) {
        let coeffs = vec![0.0; count];
        assert!(matches!(
            Platepar::poly_coefficients(&coeffs),
            Err(Error::PolyCoefficients { count: c }) if c == count
        ));
    }

    #[test]
    fn validates_fitted_parameters() {
        assert!(make_platepar().validate().is_ok());
    }

    #[test]
    fn rejects_zero_resolution() {
        let mut platepar = make_platepar();
        platepar.y_res = 0;
        assert!(matches!(
            platepar.validate(),
            Err(Error::Resolution { x_res: 720, y_res: 0 })
        ));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.2)]
    #[case(f64::NAN)]
    fn rejects_bad_plate_scale(#[case] f_scale: f64) {
        let mut platepar = make_platepar();
        platepar.f_scale = f_scale;
        assert!(matches!(platepar.validate(), Err(Error::PlateScale { .. })));
    }
}
