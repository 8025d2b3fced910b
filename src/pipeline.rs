//! The per-track calibration pipeline.
//!
//! Stages run strictly in sequence: field correction, sky projection,
//! equatorial conversion, magnitude estimation. Every derived sequence
//! keeps the index correspondence of the input track, so the n-th
//! magnitude belongs to the n-th detection point.

use crate::correction::FieldCorrector;
use crate::equatorial::{EquatorialConverter, EquatorialPoint};
use crate::error::Error;
use crate::magnitude::MagnitudeEstimator;
use crate::platepar::Platepar;
use crate::projection::SkyProjector;
use crate::time::SECONDS_PER_DAY;
use crate::track::Track;
use rayon::prelude::*;
use tracing::debug;

/// A fully calibrated track: equatorial points and the matching
/// lightcurve.
#[derive(Clone, Debug, PartialEq)]
pub struct CalibratedTrack {
    /// Julian date, right ascension, and declination per detection point.
    pub points: Vec<EquatorialPoint>,
    /// Apparent magnitude per detection point.
    pub magnitudes: Vec<f64>,
}

/// Run the full calibration pipeline for one track.
///
/// Fails fast on malformed calibration parameters and on tracks whose
/// first and last timestamps coincide, where the angular velocity needed
/// by the magnitude correction is undefined.
pub fn run(platepar: &Platepar, track: &Track) -> Result<CalibratedTrack, Error> {
    platepar.validate()?;

    let corrected = FieldCorrector::new(platepar).correct_track(track);
    let sky = SkyProjector::new(platepar).project_all(&corrected);

    let times: Vec<_> = track.points().iter().map(|point| point.time).collect();
    let points = EquatorialConverter::new(platepar).convert_all(&sky, &times);

    let begin = points[0];
    let end = points[points.len() - 1];
    let duration = (end.julian_date - begin.julian_date) * SECONDS_PER_DAY;
    if duration <= 0.0 {
        return Err(Error::ZeroDuration);
    }
    debug!(points = points.len(), duration, "calibrated track");

    let levels: Vec<f64> = corrected.iter().map(|point| point.level).collect();
    let magnitudes = MagnitudeEstimator::new(
        platepar.mag_slope,
        platepar.mag_intercept,
        platepar.w_pix,
    )
    .estimate_track(&levels, &begin, &end, duration);

    Ok(CalibratedTrack { points, magnitudes })
}

/// Calibrate independent tracks of one station in parallel.
pub fn par_run(platepar: &Platepar, tracks: &[Track]) -> Result<Vec<CalibratedTrack>, Error> {
    tracks
        .par_iter()
        .map(|track| run(platepar, track))
        .collect()
}
