//! Per-frame joint angle computation from pose landmarks.

use crate::geometry::{angle_between, angle_between_frontal, angle_with_vertical, Landmark};
use crate::joint::{JointId, JointKind, Side};
use crate::pose_extraction::PoseLandmarks;
use crate::Result;
use std::collections::BTreeMap;

/// Angles for every tracked joint at one video frame, in degrees
pub type FrameAngles = BTreeMap<JointId, f64>;

/// Compute the tracked joint angles from one frame's landmarks.
///
/// Knee and hip flexion come from the 3D three-point angle, knee valgus
/// from the frontal-plane projection, and hip adduction from the thigh
/// vector's deviation from vertical.
///
/// # Errors
///
/// Returns [`crate::Error::DegenerateGeometry`] if any limb segment
/// collapses to zero length, which the caller treats as "no data this
/// frame".
pub fn compute_pose_angles(landmarks: &PoseLandmarks) -> Result<FrameAngles> {
    let mut angles = FrameAngles::new();
    for side in [Side::Left, Side::Right] {
        let shoulder = landmarks.shoulder(side);
        let hip = landmarks.hip(side);
        let knee = landmarks.knee(side);
        let ankle = landmarks.ankle(side);

        angles.insert(
            JointId::new(side, JointKind::KneeFlexion),
            180.0 - angle_between(hip, knee, ankle)?,
        );
        angles.insert(
            JointId::new(side, JointKind::HipFlexion),
            180.0 - angle_between(shoulder, hip, knee)?,
        );
        angles.insert(
            JointId::new(side, JointKind::KneeValgus),
            180.0 - angle_between_frontal(hip, knee, ankle)?,
        );
        angles.insert(
            JointId::new(side, JointKind::HipAdduction),
            angle_with_vertical(hip, knee)? - 90.0,
        );
    }
    Ok(angles)
}
