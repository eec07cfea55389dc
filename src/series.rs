//! Per-joint angle series accumulation.
//!
//! The bank is owned by the frame loop: one writer (the loop pushes a
//! sample per joint per frame) and one reader (the differentiation step),
//! strictly in sequence.

use crate::angles::FrameAngles;
use crate::joint::JointId;
use std::collections::BTreeMap;

/// Append-only angle history for every tracked joint
#[derive(Debug, Default)]
pub struct AngleBank {
    series: BTreeMap<JointId, Vec<f64>>,
}

impl AngleBank {
    /// Create an empty bank with a slot for every tracked joint
    #[must_use]
    pub fn new() -> Self {
        let mut series = BTreeMap::new();
        for joint in JointId::tracked() {
            series.insert(joint, Vec::new());
        }
        Self { series }
    }

    /// Append one frame's angles
    pub fn push_frame(&mut self, angles: &FrameAngles) {
        for (joint, angle) in angles {
            self.series.entry(*joint).or_default().push(*angle);
        }
    }

    /// Append a single sample for one joint
    pub fn push(&mut self, joint: JointId, angle: f64) {
        self.series.entry(joint).or_default().push(angle);
    }

    /// Samples accumulated for a joint (0 if untracked)
    #[must_use]
    pub fn len(&self, joint: JointId) -> usize {
        self.series.get(&joint).map_or(0, Vec::len)
    }

    /// True if no joint has any samples yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.values().all(Vec::is_empty)
    }

    /// Full history for one joint
    #[must_use]
    pub fn series(&self, joint: JointId) -> Option<&[f64]> {
        self.series.get(&joint).map(Vec::as_slice)
    }

    /// Iterate over all (joint, series) pairs
    pub fn iter(&self) -> impl Iterator<Item = (JointId, &[f64])> {
        self.series.iter().map(|(j, s)| (*j, s.as_slice()))
    }

    /// Joints in the bank, in deterministic order
    pub fn joints(&self) -> impl Iterator<Item = JointId> + '_ {
        self.series.keys().copied()
    }

    /// Drop all accumulated history
    pub fn reset(&mut self) {
        for series in self.series.values_mut() {
            series.clear();
        }
    }
}
