//! Meteor Camera Network Astrometry
//!
//! Converts raw per-frame meteor detections (pixel position, intensity,
//! timestamp) from calibrated ground cameras into equatorial coordinates
//! and apparent magnitudes, and pairs time-synchronized observations from
//! two stations as input to trajectory triangulation.
//!
//! The per-station pipeline runs in four stages, each a pure function of
//! the station's [`Platepar`] calibration:
//!
//! 1. [`correction`] — invert the fitted lens distortion polynomial and
//!    vignetting falloff
//! 2. [`projection`] — project corrected pixels onto the local sky
//! 3. [`equatorial`] — convert altitude/azimuth and time to RA/Dec
//! 4. [`magnitude`] — map detector levels to an apparent lightcurve
//!
//! [`pipeline::run`] composes the stages for one detection track;
//! [`pairing::pair_points`] aligns two stations' results in time.

pub mod correction;
pub mod equatorial;
pub mod error;
pub mod magnitude;
pub mod pairing;
pub mod pipeline;
pub mod platepar;
pub mod projection;
pub mod time;
pub mod track;
pub mod utils;

pub use error::Error;
pub use pairing::{PointPair, pair_points};
pub use pipeline::{CalibratedTrack, par_run, run};
pub use platepar::Platepar;
pub use track::{DetectionPoint, Track};
