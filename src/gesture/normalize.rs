//! Landmark normalization
//!
//! Converts a raw 21-point hand pose into a translation- and
//! scale-invariant feature vector so that the same sign performed closer
//! to the camera, or in a different corner of the frame, produces nearly
//! identical vectors.

use crate::errors::SignCallError;
use crate::types::{FeatureVector, LandmarkFrame, FEATURE_DIM, LANDMARK_COUNT};

/// Floor for the scale divisor when all landmarks are nearly coincident.
pub const SCALE_EPSILON: f32 = 1e-6;

/// Normalize one landmark frame into a 63-dimension feature vector.
///
/// The wrist (point 0) is shifted to the origin and excluded from the scale
/// computation; every shifted coordinate is then divided by the mean
/// distance of the remaining 20 points from the origin. Output layout is
/// point-major: x, y, z of point 0, then point 1, and so on.
pub fn normalize(frame: &LandmarkFrame) -> Result<FeatureVector, SignCallError> {
    if frame.points.len() < LANDMARK_COUNT {
        return Err(SignCallError::InsufficientLandmarks {
            got: frame.points.len(),
        });
    }

    let base = frame.points[0];
    let mut shifted = [[0.0f32; 3]; LANDMARK_COUNT];
    for (i, point) in frame.points.iter().take(LANDMARK_COUNT).enumerate() {
        shifted[i] = [point[0] - base[0], point[1] - base[1], point[2] - base[2]];
    }

    let mut mean_distance = 0.0f32;
    for point in shifted.iter().skip(1) {
        mean_distance += (point[0] * point[0] + point[1] * point[1] + point[2] * point[2]).sqrt();
    }
    mean_distance /= (LANDMARK_COUNT - 1) as f32;

    let scale = mean_distance.max(SCALE_EPSILON);

    let mut values = Vec::with_capacity(FEATURE_DIM);
    for point in shifted.iter() {
        values.push(point[0] / scale);
        values.push(point[1] / scale);
        values.push(point[2] / scale);
    }

    Ok(FeatureVector(values))
}
