//! Reference-distribution classification.
//!
//! Each joint/phase pair carries four reference angle values, one per
//! skill level, taken from the LESS kinematics tables (Padua et al.,
//! 2009). A measurement is classified by its z-score against the
//! population mean/std of those four values.

use crate::constants::{ZSCORE_EXCELLENT, ZSCORE_GOOD_LOWER, ZSCORE_MODERATE_LOWER};
use crate::joint::{JointKind, Phase};
use crate::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;

/// Ordinal skill category from z-score banding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillCategory {
    Excellent,
    Good,
    Moderate,
    Poor,
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SkillCategory::Excellent => "Excellent",
            SkillCategory::Good => "Good",
            SkillCategory::Moderate => "Moderate",
            SkillCategory::Poor => "Poor",
        };
        write!(f, "{name}")
    }
}

/// Z-score and category for one classified measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub zscore: f64,
    pub category: SkillCategory,
}

/// Four reference values with their precomputed population statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceDistribution {
    values: [f64; 4],
    mean: f64,
    std_dev: f64,
}

impl ReferenceDistribution {
    /// Build a distribution from the four skill-level reference values.
    ///
    /// Mean and standard deviation use the population form (divide by N).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroVariance`] when all four values are equal;
    /// such a table entry could never classify anything.
    pub fn new(excellent: f64, good: f64, moderate: f64, poor: f64) -> Result<Self> {
        let values = [excellent, good, moderate, poor];
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();
        if std_dev < crate::constants::EPSILON {
            return Err(Error::ZeroVariance(format!(
                "all reference values equal {excellent}"
            )));
        }
        Ok(Self { values, mean, std_dev })
    }

    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    #[must_use]
    pub fn values(&self) -> [f64; 4] {
        self.values
    }

    /// Classify an angle against this distribution
    #[must_use]
    pub fn classify(&self, angle: f64) -> Classification {
        let zscore = (angle - self.mean) / self.std_dev;
        Classification {
            zscore,
            category: category_from_zscore(zscore),
        }
    }
}

/// Band a z-score into its skill category
#[must_use]
pub fn category_from_zscore(zscore: f64) -> SkillCategory {
    if zscore > ZSCORE_EXCELLENT {
        SkillCategory::Excellent
    } else if zscore > ZSCORE_GOOD_LOWER {
        SkillCategory::Good
    } else if zscore > ZSCORE_MODERATE_LOWER {
        SkillCategory::Moderate
    } else {
        SkillCategory::Poor
    }
}

/// The full phase-by-joint reference tables
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    tables: BTreeMap<Phase, BTreeMap<JointKind, ReferenceDistribution>>,
}

impl ReferenceTables {
    /// Build the standard LESS kinematics tables.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::ZeroVariance`] from any malformed entry; the
    /// published constants never trigger it.
    pub fn standard() -> Result<Self> {
        let mut tables = BTreeMap::new();

        let mut initial_contact = BTreeMap::new();
        initial_contact.insert(JointKind::KneeFlexion, ReferenceDistribution::new(18.28, 16.61, 16.32, 15.87)?);
        initial_contact.insert(JointKind::KneeValgus, ReferenceDistribution::new(1.67, 0.62, 0.28, -0.15)?);
        initial_contact.insert(JointKind::TibialRotation, ReferenceDistribution::new(-1.61, -0.99, -0.64, 0.35)?);
        initial_contact.insert(JointKind::HipFlexion, ReferenceDistribution::new(-31.17, -28.92, -28.15, -26.64)?);
        initial_contact.insert(JointKind::HipAdduction, ReferenceDistribution::new(-11.10, -10.39, -9.88, -10.12)?);
        initial_contact.insert(JointKind::HipRotation, ReferenceDistribution::new(-4.20, -4.69, -4.00, -4.12)?);
        tables.insert(Phase::InitialContact, initial_contact);

        let mut peak = BTreeMap::new();
        peak.insert(JointKind::KneeFlexion, ReferenceDistribution::new(89.68, 81.31, 77.77, 71.38)?);
        peak.insert(JointKind::KneeValgus, ReferenceDistribution::new(-11.02, -12.29, -12.81, -14.27)?);
        peak.insert(JointKind::TibialRotation, ReferenceDistribution::new(15.89, 15.28, 14.86, 14.69)?);
        peak.insert(JointKind::HipFlexion, ReferenceDistribution::new(-80.57, -68.7, -62.63, -53.03)?);
        peak.insert(JointKind::HipAdduction, ReferenceDistribution::new(0.69, 1.16, 1.70, 1.65)?);
        peak.insert(JointKind::HipRotation, ReferenceDistribution::new(6.45, 4.16, 4.36, 3.71)?);
        tables.insert(Phase::PeakAngle, peak);

        let mut displacement = BTreeMap::new();
        displacement.insert(JointKind::KneeFlexion, ReferenceDistribution::new(71.39, 64.70, 61.44, 55.52)?);
        displacement.insert(JointKind::KneeValgus, ReferenceDistribution::new(-12.69, -12.87, -13.07, -14.16)?);
        displacement.insert(JointKind::TibialRotation, ReferenceDistribution::new(17.45, 16.29, 15.50, 14.38)?);
        displacement.insert(JointKind::HipFlexion, ReferenceDistribution::new(-49.35, -39.86, -34.48, -26.50)?);
        displacement.insert(JointKind::HipAdduction, ReferenceDistribution::new(11.81, 11.56, 11.58, 11.82)?);
        displacement.insert(JointKind::HipRotation, ReferenceDistribution::new(10.64, 9.04, 8.37, 7.93)?);
        tables.insert(Phase::Displacement, displacement);

        Ok(Self { tables })
    }

    /// Distribution for a phase/joint pair
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownJoint`] when the table has no entry.
    pub fn distribution(&self, phase: Phase, kind: JointKind) -> Result<&ReferenceDistribution> {
        self.tables
            .get(&phase)
            .and_then(|t| t.get(&kind))
            .ok_or_else(|| Error::UnknownJoint(format!("{kind} at {phase}")))
    }

    /// Classify one measurement
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownJoint`] when the table has no entry.
    pub fn classify(&self, phase: Phase, kind: JointKind, angle: f64) -> Result<Classification> {
        Ok(self.distribution(phase, kind)?.classify(angle))
    }

    /// Classify a batch of measurements, phase by phase
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownJoint`] on the first measurement without a
    /// table entry.
    pub fn classify_all(
        &self,
        measurements: &BTreeMap<Phase, BTreeMap<JointKind, f64>>,
    ) -> Result<BTreeMap<Phase, BTreeMap<JointKind, Classification>>> {
        let mut results = BTreeMap::new();
        for (phase, angles) in measurements {
            let mut phase_results = BTreeMap::new();
            for (kind, angle) in angles {
                phase_results.insert(*kind, self.classify(*phase, *kind, *angle)?);
            }
            results.insert(*phase, phase_results);
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knee_flexion_ic_statistics() {
        let dist = ReferenceDistribution::new(18.28, 16.61, 16.32, 15.87).unwrap();
        assert!((dist.mean() - 16.77).abs() < 1e-9);
        assert!((dist.std_dev() - 0.910_79).abs() < 1e-4);
    }

    #[test]
    fn test_excellent_reference_value_classifies_excellent() {
        let dist = ReferenceDistribution::new(18.28, 16.61, 16.32, 15.87).unwrap();
        let result = dist.classify(18.28);
        assert!((result.zscore - 1.657_9).abs() < 1e-3);
        assert_eq!(result.category, SkillCategory::Excellent);
    }

    #[test]
    fn test_mean_classifies_good() {
        let dist = ReferenceDistribution::new(18.28, 16.61, 16.32, 15.87).unwrap();
        let result = dist.classify(dist.mean());
        assert!(result.zscore.abs() < 1e-12);
        assert_eq!(result.category, SkillCategory::Good);
    }

    #[test]
    fn test_every_standard_mean_is_good() {
        let tables = ReferenceTables::standard().unwrap();
        for phase in Phase::ALL {
            for kind in [
                JointKind::KneeFlexion,
                JointKind::KneeValgus,
                JointKind::TibialRotation,
                JointKind::HipFlexion,
                JointKind::HipAdduction,
                JointKind::HipRotation,
            ] {
                let dist = tables.distribution(phase, kind).unwrap();
                let result = dist.classify(dist.mean());
                assert_eq!(result.category, SkillCategory::Good, "{kind} at {phase}");
            }
        }
    }

    #[test]
    fn test_zscore_bands() {
        assert_eq!(category_from_zscore(0.51), SkillCategory::Excellent);
        assert_eq!(category_from_zscore(0.5), SkillCategory::Good);
        assert_eq!(category_from_zscore(-0.5), SkillCategory::Moderate);
        assert_eq!(category_from_zscore(-1.5), SkillCategory::Poor);
        assert_eq!(category_from_zscore(-3.0), SkillCategory::Poor);
    }

    #[test]
    fn test_zero_variance_rejected() {
        let result = ReferenceDistribution::new(5.0, 5.0, 5.0, 5.0);
        assert!(matches!(result, Err(Error::ZeroVariance(_))));
    }

    #[test]
    fn test_classify_all() {
        let tables = ReferenceTables::standard().unwrap();
        let mut measurements = BTreeMap::new();
        let mut ic = BTreeMap::new();
        ic.insert(JointKind::KneeFlexion, 17.0);
        ic.insert(JointKind::HipFlexion, -29.0);
        measurements.insert(Phase::InitialContact, ic);

        let results = tables.classify_all(&measurements).unwrap();
        let knee = results[&Phase::InitialContact][&JointKind::KneeFlexion];
        assert_eq!(knee.category, SkillCategory::Good);
    }
}
