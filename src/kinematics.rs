//! Angular velocity, acceleration, and jerk over the accumulated series.
//!
//! Mirrors the analysis flow of the frame loop: once a joint's series has
//! warmed up past the smoothing window, each call re-derives the full
//! smoothed derivative series so the latest sample reflects the newest
//! frame.

use crate::joint::JointId;
use crate::savgol::SavgolFilter;
use crate::series::AngleBank;
use crate::{Error, Result};
use std::collections::BTreeMap;

/// Derivative series per joint
pub type DerivativeSeries = BTreeMap<JointId, Vec<f64>>;

/// Differentiation engine bound to a smoothing configuration and frame rate
#[derive(Debug, Clone)]
pub struct Differentiator {
    filter: SavgolFilter,
    dt: f64,
}

impl Differentiator {
    /// Create a differentiator for a video at `fps` frames per second.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for a non-positive frame rate or an
    /// invalid window/order combination.
    pub fn new(window_length: usize, poly_order: usize, fps: f64) -> Result<Self> {
        if fps <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "frame rate must be positive to derive dt, got {fps}"
            )));
        }
        Ok(Self {
            filter: SavgolFilter::new(window_length, poly_order)?,
            dt: 1.0 / fps,
        })
    }

    /// Samples a joint must accumulate before derivatives are computed
    #[must_use]
    pub fn warmup_len(&self) -> usize {
        self.filter.window_length()
    }

    /// True once a joint's series is long enough to differentiate
    #[must_use]
    pub fn is_warmed_up(&self, bank: &AngleBank, joint: JointId) -> bool {
        bank.len(joint) >= self.warmup_len()
    }

    fn derive(&self, samples: &[f64], deriv: usize) -> Result<Vec<f64>> {
        if samples.len() < self.warmup_len() {
            return Err(Error::InsufficientSamples {
                needed: self.warmup_len(),
                available: samples.len(),
            });
        }
        self.filter.derivative(samples, deriv, self.dt)
    }

    /// Smoothed angular velocity for one joint (deg/s)
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientSamples`] until the series reaches the window
    /// length; [`Error::UnknownJoint`] for a joint the bank does not track.
    pub fn velocity(&self, bank: &AngleBank, joint: JointId) -> Result<Vec<f64>> {
        self.derive(self.joint_series(bank, joint)?, 1)
    }

    /// Smoothed angular acceleration for one joint (deg/s²)
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientSamples`] until the series reaches the window
    /// length; [`Error::UnknownJoint`] for a joint the bank does not track.
    pub fn acceleration(&self, bank: &AngleBank, joint: JointId) -> Result<Vec<f64>> {
        self.derive(self.joint_series(bank, joint)?, 2)
    }

    /// Jerk: first derivative of an already-computed acceleration series (deg/s³)
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientSamples`] if the acceleration series is shorter
    /// than the window length.
    pub fn jerk(&self, acceleration: &[f64]) -> Result<Vec<f64>> {
        self.derive(acceleration, 1)
    }

    /// Velocities for every warmed-up joint; cold joints are skipped
    #[must_use]
    pub fn velocities(&self, bank: &AngleBank) -> DerivativeSeries {
        self.map_warm(bank, 1)
    }

    /// Accelerations for every warmed-up joint; cold joints are skipped
    #[must_use]
    pub fn accelerations(&self, bank: &AngleBank) -> DerivativeSeries {
        self.map_warm(bank, 2)
    }

    /// Jerks from per-joint acceleration series; short series are skipped
    #[must_use]
    pub fn jerks(&self, accelerations: &DerivativeSeries) -> DerivativeSeries {
        let mut jerks = DerivativeSeries::new();
        for (joint, series) in accelerations {
            if let Ok(jerk) = self.derive(series, 1) {
                jerks.insert(*joint, jerk);
            }
        }
        jerks
    }

    fn joint_series<'a>(&self, bank: &'a AngleBank, joint: JointId) -> Result<&'a [f64]> {
        bank.series(joint)
            .ok_or_else(|| Error::UnknownJoint(joint.to_string()))
    }

    fn map_warm(&self, bank: &AngleBank, deriv: usize) -> DerivativeSeries {
        let mut out = DerivativeSeries::new();
        for (joint, series) in bank.iter() {
            if series.len() >= self.warmup_len() {
                if let Ok(derived) = self.filter.derivative(series, deriv, self.dt) {
                    out.insert(joint, derived);
                }
            }
        }
        out
    }
}
