//! Synthetic hand poses for offline testing
//!
//! Canonical 21-point frames modeled on real hand-tracker output in
//! normalized image coordinates (x right, y down, values roughly in
//! [0, 1]). Poses are constructed so each rule predicate holds with a
//! comfortable margin rather than sitting on a comparison boundary.

use crate::types::{landmark, Landmark, LandmarkFrame, LANDMARK_COUNT};

/// Relaxed open hand, fingers spread and extended. Matches none of the
/// built-in rules, so it flows into window accumulation.
pub fn open_palm_frame() -> LandmarkFrame {
    LandmarkFrame::new(base_points().to_vec())
}

/// Thumb extended, all other fingers folded: the "Yes" pose.
pub fn thumb_up_frame() -> LandmarkFrame {
    let mut points = base_points();
    fold_finger(&mut points, landmark::INDEX_TIP, landmark::INDEX_PIP);
    fold_finger(&mut points, landmark::MIDDLE_TIP, landmark::MIDDLE_PIP);
    fold_finger(&mut points, landmark::RING_TIP, landmark::RING_PIP);
    fold_finger(&mut points, landmark::PINKY_TIP, landmark::PINKY_PIP);
    LandmarkFrame::new(points.to_vec())
}

/// Thumb folded below its base joint, all other fingers folded: "No".
pub fn thumb_down_frame() -> LandmarkFrame {
    let mut points = thumb_up_frame().points;
    points[landmark::THUMB_TIP][1] = points[landmark::THUMB_MCP][1] + 0.08;
    LandmarkFrame::new(points)
}

/// Index and middle extended with the given horizontal fingertip
/// separation, ring and pinky folded: "Hello" when the separation
/// clears the configured threshold.
pub fn v_sign_frame(separation: f32) -> LandmarkFrame {
    let mut points = base_points();
    fold_finger(&mut points, landmark::RING_TIP, landmark::RING_PIP);
    fold_finger(&mut points, landmark::PINKY_TIP, landmark::PINKY_PIP);
    points[landmark::INDEX_TIP][0] = 0.45;
    points[landmark::MIDDLE_TIP][0] = 0.45 + separation;
    LandmarkFrame::new(points.to_vec())
}

/// Every landmark at the same point: degenerate tracker output that
/// exercises the epsilon floor in normalization.
pub fn coincident_frame() -> LandmarkFrame {
    LandmarkFrame::new(vec![[0.5, 0.5, 0.0]; LANDMARK_COUNT])
}

/// Open palm with a small deterministic vertical offset per step,
/// simulating the jitter of a hand held still across a window of
/// frames. The uniform shift preserves every rule comparison.
pub fn jittered_palm_frame(step: u64) -> LandmarkFrame {
    let offset = (step % 5) as f32 * 0.002;
    let mut points = base_points();
    for point in points.iter_mut() {
        point[1] += offset;
    }
    LandmarkFrame::new(points.to_vec())
}

fn fold_finger(points: &mut [Landmark; LANDMARK_COUNT], tip: usize, pip: usize) {
    points[tip][1] = points[pip][1] + 0.14;
}

/// Neutral spread hand. Fingertips sit well above their proximal joints
/// (smaller y), thumb included.
fn base_points() -> [Landmark; LANDMARK_COUNT] {
    [
        [0.50, 0.90, 0.00], // 0  wrist
        [0.42, 0.85, 0.00], // 1  thumb cmc
        [0.38, 0.78, 0.00], // 2  thumb mcp
        [0.36, 0.72, 0.00], // 3  thumb ip
        [0.34, 0.66, 0.00], // 4  thumb tip
        [0.45, 0.72, 0.00], // 5  index mcp
        [0.45, 0.64, 0.00], // 6  index pip
        [0.45, 0.58, 0.00], // 7  index dip
        [0.45, 0.52, 0.00], // 8  index tip
        [0.50, 0.71, 0.00], // 9  middle mcp
        [0.50, 0.62, 0.00], // 10 middle pip
        [0.50, 0.56, 0.00], // 11 middle dip
        [0.50, 0.50, 0.00], // 12 middle tip
        [0.55, 0.72, 0.00], // 13 ring mcp
        [0.55, 0.64, 0.00], // 14 ring pip
        [0.55, 0.58, 0.00], // 15 ring dip
        [0.55, 0.52, 0.00], // 16 ring tip
        [0.60, 0.74, 0.00], // 17 pinky mcp
        [0.60, 0.67, 0.00], // 18 pinky pip
        [0.60, 0.62, 0.00], // 19 pinky dip
        [0.60, 0.57, 0.00], // 20 pinky tip
    ]
}
