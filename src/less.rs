//! Landing Error Scoring System item rules.
//!
//! Seventeen independent scoring rules from Padua et al. (2009). Each is
//! a pure function of one or two measurements and returns 0, 1, or 2
//! points; the 17 points sum to the total LESS score. Categorical inputs
//! (foot landing pattern, joint stiffness, overall impression) are enums
//! rather than strings.

use std::fmt;

/// How the foot meets the ground at initial contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FootLanding {
    ToeToHeel,
    HeelToToe,
    Flat,
}

/// Qualitative sagittal-plane joint displacement through the landing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointStiffness {
    Soft,
    Average,
    Stiff,
}

/// Rater's overall impression of the landing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingQuality {
    Excellent,
    Average,
    Poor,
}

/// Qualitative interpretation of a total LESS score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessInterpretation {
    Excellent,
    Good,
    Moderate,
    Poor,
}

impl fmt::Display for LessInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LessInterpretation::Excellent => "Excellent",
            LessInterpretation::Good => "Good",
            LessInterpretation::Moderate => "Moderate",
            LessInterpretation::Poor => "Poor",
        };
        write!(f, "{name}")
    }
}

/// Item 1: knee flexion angle at initial contact.
/// Scores 0 when the knee is flexed beyond 30 degrees.
#[must_use]
pub fn knee_flexion_at_initial_contact(knee_flexion_deg: f64) -> u8 {
    u8::from(knee_flexion_deg <= 30.0)
}

/// Item 2: hip flexion angle at initial contact.
/// Scores 0 when the hip is flexed (angle above zero).
#[must_use]
pub fn hip_flexion_at_initial_contact(hip_flexion_deg: f64) -> u8 {
    u8::from(hip_flexion_deg <= 0.0)
}

/// Item 3: trunk flexion angle at initial contact.
/// Scores 0 when the trunk is flexed (angle above zero).
#[must_use]
pub fn trunk_flexion_at_initial_contact(trunk_flexion_deg: f64) -> u8 {
    u8::from(trunk_flexion_deg <= 0.0)
}

/// Item 4: ankle plantar flexion at initial contact.
/// Scores 0 for a toe-to-heel landing.
#[must_use]
pub fn ankle_plantar_flexion_at_initial_contact(landing: FootLanding) -> u8 {
    u8::from(landing != FootLanding::ToeToHeel)
}

/// Item 5: knee valgus angle at initial contact.
/// Scores 1 when the knee is in valgus.
#[must_use]
pub fn knee_valgus_at_initial_contact(knee_valgus_deg: f64) -> u8 {
    u8::from(knee_valgus_deg > 0.0)
}

/// Item 6: lateral trunk flexion at initial contact.
#[must_use]
pub fn lateral_trunk_flexion_at_initial_contact(laterally_flexed: bool) -> u8 {
    u8::from(laterally_flexed)
}

/// Item 7: wide stance (feet wider than shoulders).
#[must_use]
pub fn stance_width_wide(stance_width: f64, shoulder_width: f64) -> u8 {
    u8::from(stance_width > shoulder_width)
}

/// Item 8: narrow stance (feet narrower than shoulders).
#[must_use]
pub fn stance_width_narrow(stance_width: f64, shoulder_width: f64) -> u8 {
    u8::from(stance_width < shoulder_width)
}

/// Item 9: foot internally rotated more than 30 degrees.
#[must_use]
pub fn foot_position_toe_in(foot_rotation_deg: f64) -> u8 {
    u8::from(foot_rotation_deg > 30.0)
}

/// Item 10: foot externally rotated more than 30 degrees.
#[must_use]
pub fn foot_position_toe_out(foot_rotation_deg: f64) -> u8 {
    u8::from(foot_rotation_deg < -30.0)
}

/// Item 11: symmetric initial foot contact. Scores 0 when symmetric.
#[must_use]
pub fn symmetric_initial_foot_contact(is_symmetric: bool) -> u8 {
    u8::from(!is_symmetric)
}

/// Item 12: knee flexion displacement.
/// Scores 0 when the knee flexes more than 45 degrees from contact to
/// maximum flexion.
#[must_use]
pub fn knee_flexion_displacement(initial_flexion_deg: f64, max_flexion_deg: f64) -> u8 {
    u8::from(max_flexion_deg - initial_flexion_deg <= 45.0)
}

/// Item 13: hip flexion at maximum knee flexion.
/// Scores 0 when the hip flexes further after contact.
#[must_use]
pub fn hip_flexion_at_max_knee_flexion(initial_deg: f64, at_max_knee_flexion_deg: f64) -> u8 {
    u8::from(at_max_knee_flexion_deg <= initial_deg)
}

/// Item 14: trunk flexion at maximum knee flexion.
/// Scores 0 when the trunk flexes further after contact.
#[must_use]
pub fn trunk_flexion_at_max_knee_flexion(initial_deg: f64, at_max_knee_flexion_deg: f64) -> u8 {
    u8::from(at_max_knee_flexion_deg <= initial_deg)
}

/// Item 15: knee valgus displacement beyond 10 degrees.
#[must_use]
pub fn knee_valgus_displacement(max_knee_valgus_deg: f64) -> u8 {
    const VALGUS_THRESHOLD_DEG: f64 = 10.0;
    u8::from(max_knee_valgus_deg > VALGUS_THRESHOLD_DEG)
}

/// Item 16: overall sagittal joint displacement (three-way).
#[must_use]
pub fn joint_displacement(stiffness: JointStiffness) -> u8 {
    match stiffness {
        JointStiffness::Soft => 0,
        JointStiffness::Average => 1,
        JointStiffness::Stiff => 2,
    }
}

/// Item 17: overall impression of the landing (three-way).
#[must_use]
pub fn overall_impression(quality: LandingQuality) -> u8 {
    match quality {
        LandingQuality::Excellent => 0,
        LandingQuality::Average => 1,
        LandingQuality::Poor => 2,
    }
}

/// Sum the 17 item scores into the total LESS score
#[must_use]
pub fn total_score(item_scores: &[u8]) -> u32 {
    item_scores.iter().map(|&s| u32::from(s)).sum()
}

/// Qualitative interpretation of a total score
#[must_use]
pub fn interpret_score(total: u32) -> LessInterpretation {
    if total <= 4 {
        LessInterpretation::Excellent
    } else if total <= 5 {
        LessInterpretation::Good
    } else if total <= 6 {
        LessInterpretation::Moderate
    } else {
        LessInterpretation::Poor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knee_flexion_item() {
        assert_eq!(knee_flexion_at_initial_contact(31.0), 0);
        assert_eq!(knee_flexion_at_initial_contact(30.0), 1);
        assert_eq!(knee_flexion_at_initial_contact(25.0), 1);
    }

    #[test]
    fn test_hip_and_trunk_flexion_items() {
        assert_eq!(hip_flexion_at_initial_contact(12.0), 0);
        assert_eq!(hip_flexion_at_initial_contact(0.0), 1);
        assert_eq!(trunk_flexion_at_initial_contact(5.0), 0);
        assert_eq!(trunk_flexion_at_initial_contact(-2.0), 1);
    }

    #[test]
    fn test_foot_landing_item() {
        assert_eq!(ankle_plantar_flexion_at_initial_contact(FootLanding::ToeToHeel), 0);
        assert_eq!(ankle_plantar_flexion_at_initial_contact(FootLanding::HeelToToe), 1);
        assert_eq!(ankle_plantar_flexion_at_initial_contact(FootLanding::Flat), 1);
    }

    #[test]
    fn test_valgus_items() {
        assert_eq!(knee_valgus_at_initial_contact(0.5), 1);
        assert_eq!(knee_valgus_at_initial_contact(0.0), 0);
        assert_eq!(knee_valgus_displacement(10.5), 1);
        assert_eq!(knee_valgus_displacement(10.0), 0);
    }

    #[test]
    fn test_stance_and_rotation_items() {
        assert_eq!(stance_width_wide(0.8, 0.5), 1);
        assert_eq!(stance_width_narrow(0.8, 0.5), 0);
        assert_eq!(stance_width_narrow(0.3, 0.5), 1);
        assert_eq!(foot_position_toe_in(35.0), 1);
        assert_eq!(foot_position_toe_in(15.0), 0);
        assert_eq!(foot_position_toe_out(-35.0), 1);
        assert_eq!(foot_position_toe_out(-15.0), 0);
    }

    #[test]
    fn test_displacement_items() {
        assert_eq!(knee_flexion_displacement(20.0, 70.0), 0);
        assert_eq!(knee_flexion_displacement(20.0, 60.0), 1);
        assert_eq!(hip_flexion_at_max_knee_flexion(30.0, 25.0), 0);
        assert_eq!(hip_flexion_at_max_knee_flexion(30.0, 35.0), 1);
    }

    #[test]
    fn test_three_way_items() {
        assert_eq!(joint_displacement(JointStiffness::Soft), 0);
        assert_eq!(joint_displacement(JointStiffness::Average), 1);
        assert_eq!(joint_displacement(JointStiffness::Stiff), 2);
        assert_eq!(overall_impression(LandingQuality::Excellent), 0);
        assert_eq!(overall_impression(LandingQuality::Poor), 2);
    }

    #[test]
    fn test_total_and_interpretation() {
        assert_eq!(interpret_score(4), LessInterpretation::Excellent);
        assert_eq!(interpret_score(5), LessInterpretation::Good);
        assert_eq!(interpret_score(6), LessInterpretation::Moderate);
        assert_eq!(interpret_score(7), LessInterpretation::Poor);
        assert_eq!(interpret_score(0), LessInterpretation::Excellent);

        let items = [1, 0, 1, 0, 1, 0, 0, 1, 0, 0, 1, 0, 1, 0, 0, 1, 0];
        assert_eq!(items.len(), 17);
        assert_eq!(total_score(&items), 7);
    }

    #[test]
    fn test_total_is_order_independent() {
        let mut items = vec![1u8, 0, 1, 0, 1, 0, 0, 1, 0, 0, 1, 0, 1, 0, 2, 1, 2];
        let total = total_score(&items);
        items.reverse();
        assert_eq!(total_score(&items), total);
        items.rotate_left(5);
        assert_eq!(total_score(&items), total);
    }
}
