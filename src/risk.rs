//! Piecewise-linear risk scoring.
//!
//! A scalar measurement maps to a continuous 0-100 risk score across
//! three threshold bands. Boundary comparisons use an inclusive lower
//! bound on every band for both the angle and acceleration paths.

use crate::constants::{RISK_BAND_HIGH, RISK_BAND_MODERATE, RISK_BAND_SPAN};
use crate::joint::{JointId, JointKind};
use crate::kinematics::DerivativeSeries;
use crate::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;

/// Ordinal risk category derived from the continuous score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskCategory {
    Normal,
    ModerateRisk,
    HighRisk,
    ExtremeRisk,
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RiskCategory::Normal => "Normal",
            RiskCategory::ModerateRisk => "Moderate Risk",
            RiskCategory::HighRisk => "High Risk",
            RiskCategory::ExtremeRisk => "Extreme Risk",
        };
        write!(f, "{name}")
    }
}

/// Which direction along the measurement axis carries more risk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskDirection {
    /// Smaller values are riskier (e.g. shallow knee flexion at contact)
    LowerIsRiskier,
    /// Larger values are riskier (e.g. knee valgus, all accelerations)
    HigherIsRiskier,
}

/// Three band boundaries for one joint type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskThresholds {
    moderate: f64,
    high: f64,
    extreme: f64,
    direction: RiskDirection,
}

impl RiskThresholds {
    /// Build a threshold band, validating the ordering against the
    /// direction flag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidThresholds`] unless the boundaries are
    /// strictly ordered in the risk direction.
    pub fn new(moderate: f64, high: f64, extreme: f64, direction: RiskDirection) -> Result<Self> {
        let ordered = match direction {
            RiskDirection::HigherIsRiskier => moderate < high && high < extreme,
            RiskDirection::LowerIsRiskier => moderate > high && high > extreme,
        };
        if !ordered {
            return Err(Error::InvalidThresholds(format!(
                "{moderate}/{high}/{extreme} not strictly ordered for {direction:?}"
            )));
        }
        Ok(Self {
            moderate,
            high,
            extreme,
            direction,
        })
    }

    #[must_use]
    pub fn direction(&self) -> RiskDirection {
        self.direction
    }
}

/// Continuous score plus its category for one scored measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskAssessment {
    pub value: f64,
    pub score: f64,
    pub category: RiskCategory,
}

/// Map a measurement onto the 0-100 risk scale
#[must_use]
pub fn score_value(value: f64, thresholds: &RiskThresholds) -> RiskAssessment {
    let RiskThresholds {
        moderate,
        high,
        extreme,
        direction,
    } = *thresholds;

    let score = match direction {
        RiskDirection::HigherIsRiskier => {
            if value <= moderate {
                0.0
            } else if value >= extreme {
                100.0
            } else if value <= high {
                (value - moderate) / (high - moderate) * RISK_BAND_MODERATE
            } else {
                RISK_BAND_HIGH + (value - high) / (extreme - high) * RISK_BAND_SPAN
            }
        }
        RiskDirection::LowerIsRiskier => {
            if value >= moderate {
                0.0
            } else if value <= extreme {
                100.0
            } else if value >= high {
                (moderate - value) / (moderate - high) * RISK_BAND_MODERATE
            } else {
                RISK_BAND_HIGH + (high - value) / (high - extreme) * RISK_BAND_SPAN
            }
        }
    };

    RiskAssessment {
        value,
        score,
        category: category_from_score(score),
    }
}

/// Band a continuous score into its risk category
#[must_use]
pub fn category_from_score(score: f64) -> RiskCategory {
    if score == 0.0 {
        RiskCategory::Normal
    } else if score <= RISK_BAND_MODERATE {
        RiskCategory::ModerateRisk
    } else if score <= RISK_BAND_HIGH {
        RiskCategory::HighRisk
    } else {
        RiskCategory::ExtremeRisk
    }
}

/// Static angle and acceleration threshold tables, built once at startup
#[derive(Debug, Clone)]
pub struct RiskTables {
    angle: BTreeMap<JointKind, RiskThresholds>,
    acceleration: BTreeMap<JointKind, RiskThresholds>,
}

impl RiskTables {
    /// Build the standard per-joint threshold tables.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::InvalidThresholds`] from a malformed entry;
    /// the built-in constants never trigger it.
    pub fn standard() -> Result<Self> {
        let mut angle = BTreeMap::new();
        angle.insert(
            JointKind::KneeFlexion,
            RiskThresholds::new(60.0, 45.0, 30.0, RiskDirection::LowerIsRiskier)?,
        );
        angle.insert(
            JointKind::HipFlexion,
            RiskThresholds::new(45.0, 30.0, 15.0, RiskDirection::LowerIsRiskier)?,
        );
        angle.insert(
            JointKind::KneeValgus,
            RiskThresholds::new(5.0, 10.0, 15.0, RiskDirection::HigherIsRiskier)?,
        );
        angle.insert(
            JointKind::HipAdduction,
            RiskThresholds::new(10.0, 15.0, 20.0, RiskDirection::HigherIsRiskier)?,
        );

        // Angular acceleration magnitudes, deg/s²
        let mut acceleration = BTreeMap::new();
        acceleration.insert(
            JointKind::KneeFlexion,
            RiskThresholds::new(3000.0, 5000.0, 7000.0, RiskDirection::HigherIsRiskier)?,
        );
        acceleration.insert(
            JointKind::HipFlexion,
            RiskThresholds::new(2000.0, 4000.0, 6000.0, RiskDirection::HigherIsRiskier)?,
        );
        acceleration.insert(
            JointKind::KneeValgus,
            RiskThresholds::new(1000.0, 2000.0, 3000.0, RiskDirection::HigherIsRiskier)?,
        );
        acceleration.insert(
            JointKind::HipAdduction,
            RiskThresholds::new(1000.0, 2000.0, 3000.0, RiskDirection::HigherIsRiskier)?,
        );

        Ok(Self { angle, acceleration })
    }

    /// Angle thresholds for a joint kind
    ///
    /// # Errors
    ///
    /// [`Error::UnknownJoint`] when the kind has no angle entry.
    pub fn angle_thresholds(&self, kind: JointKind) -> Result<&RiskThresholds> {
        self.angle
            .get(&kind)
            .ok_or_else(|| Error::UnknownJoint(format!("{kind} has no angle thresholds")))
    }

    /// Acceleration thresholds for a joint kind
    ///
    /// # Errors
    ///
    /// [`Error::UnknownJoint`] when the kind has no acceleration entry.
    pub fn acceleration_thresholds(&self, kind: JointKind) -> Result<&RiskThresholds> {
        self.acceleration
            .get(&kind)
            .ok_or_else(|| Error::UnknownJoint(format!("{kind} has no acceleration thresholds")))
    }

    /// Score one joint angle
    ///
    /// # Errors
    ///
    /// [`Error::UnknownJoint`] when the joint kind is not in the table.
    pub fn score_angle(&self, joint: JointId, angle: f64) -> Result<RiskAssessment> {
        Ok(score_value(angle, self.angle_thresholds(joint.kind)?))
    }

    /// Score one angular-acceleration sample; always uses the magnitude
    ///
    /// # Errors
    ///
    /// [`Error::UnknownJoint`] when the joint kind is not in the table.
    pub fn score_acceleration(&self, joint: JointId, acceleration: f64) -> Result<RiskAssessment> {
        Ok(score_value(
            acceleration.abs(),
            self.acceleration_thresholds(joint.kind)?,
        ))
    }

    /// Score a batch of current angles
    ///
    /// # Errors
    ///
    /// Fails on the first joint kind without an angle entry.
    pub fn score_angles(
        &self,
        angles: &BTreeMap<JointId, f64>,
    ) -> Result<BTreeMap<JointId, RiskAssessment>> {
        let mut scored = BTreeMap::new();
        for (joint, angle) in angles {
            scored.insert(*joint, self.score_angle(*joint, *angle)?);
        }
        Ok(scored)
    }

    /// Score the latest sample of each joint's acceleration series
    ///
    /// # Errors
    ///
    /// Fails on the first joint kind without an acceleration entry.
    pub fn score_accelerations(
        &self,
        accelerations: &DerivativeSeries,
    ) -> Result<BTreeMap<JointId, RiskAssessment>> {
        let mut scored = BTreeMap::new();
        for (joint, series) in accelerations {
            let latest = series.last().copied().unwrap_or(0.0);
            scored.insert(*joint, self.score_acceleration(*joint, latest)?);
        }
        Ok(scored)
    }
}
