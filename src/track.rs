use crate::error::Error;
use chrono::NaiveDateTime;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One raw detection sample from a station camera.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetectionPoint {
    /// Station wall-clock time of the frame, millisecond precision.
    pub time: NaiveDateTime,
    /// X pixel coordinate of the meteor centroid.
    pub x: f64,
    /// Y pixel coordinate of the meteor centroid.
    pub y: f64,
    /// Detector intensity level (arbitrary units, non-negative).
    pub level: f64,
}

/// A temporally ordered sequence of detection points for one meteor.
///
/// The first and last points define the meteor's begin and end; duration
/// and angular velocity are derived from them downstream. Construction
/// rejects empty and temporally decreasing sequences, so every `Track` is
/// non-empty with non-decreasing timestamps.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Track {
    points: Vec<DetectionPoint>,
}

impl Track {
    /// Create a track from loader-produced detection points.
    pub fn new(points: Vec<DetectionPoint>) -> Result<Self, Error> {
        if points.is_empty() {
            return Err(Error::EmptyTrack);
        }

        for (index, pair) in points.windows(2).enumerate() {
            if pair[1].time < pair[0].time {
                return Err(Error::UnorderedTrack { index: index + 1 });
            }
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[DetectionPoint] {
        &self.points
    }

    /// First detection point of the meteor.
    pub fn begin(&self) -> &DetectionPoint {
        &self.points[0]
    }

    /// Last detection point of the meteor.
    pub fn end(&self) -> &DetectionPoint {
        &self.points[self.points.len() - 1]
    }
}
