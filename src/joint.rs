//! Structured joint identity.
//!
//! The original analysis keyed everything on decorated strings like
//! "Left Knee Flexion" and recovered the joint type by stripping the side
//! prefix. Here the (side, kind) pair is carried explicitly and only
//! rendered as text at the overlay boundary.

use std::fmt;

/// Body side of a measured joint
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "Left"),
            Side::Right => write!(f, "Right"),
        }
    }
}

/// Joint angle measurement type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JointKind {
    KneeFlexion,
    HipFlexion,
    KneeValgus,
    HipAdduction,
    TibialRotation,
    HipRotation,
}

impl JointKind {
    /// Joint kinds produced by the per-frame angle computation
    pub const MEASURED: [JointKind; 4] = [
        JointKind::KneeFlexion,
        JointKind::HipFlexion,
        JointKind::KneeValgus,
        JointKind::HipAdduction,
    ];
}

impl fmt::Display for JointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JointKind::KneeFlexion => "Knee Flexion",
            JointKind::HipFlexion => "Hip Flexion",
            JointKind::KneeValgus => "Knee Valgus",
            JointKind::HipAdduction => "Hip Adduction",
            JointKind::TibialRotation => "Tibial Rotation",
            JointKind::HipRotation => "Hip Rotation",
        };
        write!(f, "{name}")
    }
}

/// A sided joint measurement, e.g. left knee flexion
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JointId {
    pub side: Side,
    pub kind: JointKind,
}

impl JointId {
    #[must_use]
    pub const fn new(side: Side, kind: JointKind) -> Self {
        Self { side, kind }
    }

    /// All sided joints tracked by the frame loop
    #[must_use]
    pub fn tracked() -> Vec<JointId> {
        let mut joints = Vec::with_capacity(8);
        for kind in JointKind::MEASURED {
            joints.push(JointId::new(Side::Left, kind));
            joints.push(JointId::new(Side::Right, kind));
        }
        joints
    }
}

impl fmt::Display for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.side, self.kind)
    }
}

/// Jump-landing phase the reference tables are indexed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    InitialContact,
    PeakAngle,
    Displacement,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::InitialContact, Phase::PeakAngle, Phase::Displacement];
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::InitialContact => "Initial Contact",
            Phase::PeakAngle => "Peak Angle",
            Phase::Displacement => "Displacement",
        };
        write!(f, "{name}")
    }
}
