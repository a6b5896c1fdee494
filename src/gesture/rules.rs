//! Rule-based classifier for the built-in sign vocabulary
//!
//! Stateless geometric predicates over a single raw landmark frame. The
//! comparisons rely on the image-space convention that smaller y means
//! higher on screen: a fingertip above its proximal joint is extended,
//! below it is folded.

use crate::types::{landmark, LandmarkFrame};

/// The fixed built-in vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BuiltinSign {
    Yes,
    No,
    Hello,
}

impl BuiltinSign {
    pub fn text(&self) -> &'static str {
        match self {
            BuiltinSign::Yes => "Yes",
            BuiltinSign::No => "No",
            BuiltinSign::Hello => "Hello",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            BuiltinSign::Yes => "👍",
            BuiltinSign::No => "👎",
            BuiltinSign::Hello => "✌",
        }
    }
}

/// Single-frame classifier for the built-in vocabulary.
#[derive(Debug, Clone)]
pub struct RuleClassifier {
    v_sign_separation: f32,
}

impl RuleClassifier {
    pub fn new(v_sign_separation: f32) -> Self {
        Self { v_sign_separation }
    }

    /// Evaluate the fixed rules in priority order; first match wins.
    ///
    /// The three rules are mutually exclusive by construction: thumb-up and
    /// thumb-down differ in the thumb comparison direction, and the V-sign
    /// requires an extended index finger that both thumb rules reject.
    /// Returns `None` for partial frames and for poses outside the
    /// vocabulary; those proceed to window accumulation.
    pub fn classify(&self, frame: &LandmarkFrame) -> Option<BuiltinSign> {
        if !frame.is_complete() {
            return None;
        }

        let extended = |tip: usize, pip: usize| frame.y(tip) < frame.y(pip);
        let folded = |tip: usize, pip: usize| frame.y(tip) > frame.y(pip);

        let index_extended = extended(landmark::INDEX_TIP, landmark::INDEX_PIP);
        let middle_extended = extended(landmark::MIDDLE_TIP, landmark::MIDDLE_PIP);
        let ring_folded = folded(landmark::RING_TIP, landmark::RING_PIP);
        let pinky_folded = folded(landmark::PINKY_TIP, landmark::PINKY_PIP);

        let thumb_up = extended(landmark::THUMB_TIP, landmark::THUMB_MCP)
            && ring_folded
            && pinky_folded
            && !index_extended
            && !middle_extended;
        if thumb_up {
            return Some(BuiltinSign::Yes);
        }

        let thumb_down = folded(landmark::THUMB_TIP, landmark::THUMB_MCP)
            && ring_folded
            && pinky_folded
            && !index_extended
            && !middle_extended;
        if thumb_down {
            return Some(BuiltinSign::No);
        }

        let separation = (frame.x(landmark::INDEX_TIP) - frame.x(landmark::MIDDLE_TIP)).abs();
        let v_sign = index_extended
            && middle_extended
            && ring_folded
            && pinky_folded
            && separation > self.v_sign_separation;
        if v_sign {
            return Some(BuiltinSign::Hello);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::synthetic_data::{
        coincident_frame, open_palm_frame, thumb_down_frame, thumb_up_frame, v_sign_frame,
    };

    fn classifier() -> RuleClassifier {
        RuleClassifier::new(0.05)
    }

    #[test]
    fn test_thumb_up_is_yes() {
        assert_eq!(classifier().classify(&thumb_up_frame()), Some(BuiltinSign::Yes));
    }

    #[test]
    fn test_thumb_down_is_no() {
        assert_eq!(classifier().classify(&thumb_down_frame()), Some(BuiltinSign::No));
    }

    #[test]
    fn test_v_sign_is_hello() {
        assert_eq!(
            classifier().classify(&v_sign_frame(0.10)),
            Some(BuiltinSign::Hello)
        );
    }

    #[test]
    fn test_v_sign_needs_separation() {
        // Fingertips too close together: not a deliberate V
        assert_eq!(classifier().classify(&v_sign_frame(0.02)), None);
    }

    #[test]
    fn test_open_palm_matches_nothing() {
        assert_eq!(classifier().classify(&open_palm_frame()), None);
    }

    #[test]
    fn test_partial_frame_matches_nothing() {
        let frame = LandmarkFrame::new(vec![[0.5, 0.5, 0.0]; 10]);
        assert_eq!(classifier().classify(&frame), None);
    }

    #[test]
    fn test_coincident_frame_matches_nothing() {
        // Equal y everywhere: no finger is extended or folded
        assert_eq!(classifier().classify(&coincident_frame()), None);
    }

    #[test]
    fn test_rules_are_mutually_exclusive() {
        // Each canonical pose trips exactly its own rule; since evaluation
        // is first-match-wins, matching the expected sign for every pose
        // shows no earlier rule fired spuriously.
        let cases = [
            (thumb_up_frame(), BuiltinSign::Yes),
            (thumb_down_frame(), BuiltinSign::No),
            (v_sign_frame(0.10), BuiltinSign::Hello),
        ];
        for (frame, expected) in cases {
            assert_eq!(classifier().classify(&frame), Some(expected));
        }
    }

    #[test]
    fn test_emoji_mapping() {
        assert_eq!(BuiltinSign::Yes.emoji(), "👍");
        assert_eq!(BuiltinSign::No.emoji(), "👎");
        assert_eq!(BuiltinSign::Hello.emoji(), "✌");
    }
}
