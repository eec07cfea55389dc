//! Tests scoring complete landings through the 17 LESS items

use less_scoring::less::{
    ankle_plantar_flexion_at_initial_contact, foot_position_toe_in, foot_position_toe_out,
    hip_flexion_at_initial_contact, hip_flexion_at_max_knee_flexion, interpret_score,
    joint_displacement, knee_flexion_at_initial_contact, knee_flexion_displacement,
    knee_valgus_at_initial_contact, knee_valgus_displacement,
    lateral_trunk_flexion_at_initial_contact, overall_impression, stance_width_narrow,
    stance_width_wide, symmetric_initial_foot_contact, total_score,
    trunk_flexion_at_initial_contact, trunk_flexion_at_max_knee_flexion, FootLanding,
    JointStiffness, LandingQuality, LessInterpretation,
};

/// Measurements describing one complete jump landing
struct Landing {
    knee_flexion_ic: f64,
    hip_flexion_ic: f64,
    trunk_flexion_ic: f64,
    foot_landing: FootLanding,
    knee_valgus_ic: f64,
    lateral_trunk_flexed: bool,
    stance_width: f64,
    shoulder_width: f64,
    foot_rotation: f64,
    symmetric_contact: bool,
    max_knee_flexion: f64,
    hip_flexion_at_max: f64,
    trunk_flexion_at_max: f64,
    max_knee_valgus: f64,
    stiffness: JointStiffness,
    quality: LandingQuality,
}

fn score_landing(landing: &Landing) -> Vec<u8> {
    vec![
        knee_flexion_at_initial_contact(landing.knee_flexion_ic),
        hip_flexion_at_initial_contact(landing.hip_flexion_ic),
        trunk_flexion_at_initial_contact(landing.trunk_flexion_ic),
        ankle_plantar_flexion_at_initial_contact(landing.foot_landing),
        knee_valgus_at_initial_contact(landing.knee_valgus_ic),
        lateral_trunk_flexion_at_initial_contact(landing.lateral_trunk_flexed),
        stance_width_wide(landing.stance_width, landing.shoulder_width),
        stance_width_narrow(landing.stance_width, landing.shoulder_width),
        foot_position_toe_in(landing.foot_rotation),
        foot_position_toe_out(landing.foot_rotation),
        symmetric_initial_foot_contact(landing.symmetric_contact),
        knee_flexion_displacement(landing.knee_flexion_ic, landing.max_knee_flexion),
        hip_flexion_at_max_knee_flexion(landing.hip_flexion_ic, landing.hip_flexion_at_max),
        trunk_flexion_at_max_knee_flexion(landing.trunk_flexion_ic, landing.trunk_flexion_at_max),
        knee_valgus_displacement(landing.max_knee_valgus),
        joint_displacement(landing.stiffness),
        overall_impression(landing.quality),
    ]
}

fn textbook_landing() -> Landing {
    Landing {
        knee_flexion_ic: 35.0,
        hip_flexion_ic: 20.0,
        trunk_flexion_ic: 10.0,
        foot_landing: FootLanding::ToeToHeel,
        knee_valgus_ic: 0.0,
        lateral_trunk_flexed: false,
        stance_width: 0.4,
        shoulder_width: 0.4,
        foot_rotation: 5.0,
        symmetric_contact: true,
        max_knee_flexion: 90.0,
        hip_flexion_at_max: 45.0,
        trunk_flexion_at_max: 30.0,
        max_knee_valgus: 2.0,
        stiffness: JointStiffness::Soft,
        quality: LandingQuality::Excellent,
    }
}

/// A textbook soft landing scores zero errors
#[test]
fn test_textbook_landing_scores_zero() {
    let items = score_landing(&textbook_landing());
    assert_eq!(items.len(), 17);
    assert_eq!(total_score(&items), 0);
    assert_eq!(interpret_score(0), LessInterpretation::Excellent);
}

/// A stiff, upright, valgus-collapsed landing collects errors everywhere
#[test]
fn test_poor_landing_scores_high() {
    let landing = Landing {
        knee_flexion_ic: 12.0,
        hip_flexion_ic: -2.0,
        trunk_flexion_ic: -1.0,
        foot_landing: FootLanding::HeelToToe,
        knee_valgus_ic: 8.0,
        lateral_trunk_flexed: true,
        stance_width: 0.2,
        shoulder_width: 0.4,
        foot_rotation: 35.0,
        symmetric_contact: false,
        max_knee_flexion: 40.0,
        hip_flexion_at_max: 5.0,
        trunk_flexion_at_max: 2.0,
        max_knee_valgus: 14.0,
        stiffness: JointStiffness::Stiff,
        quality: LandingQuality::Poor,
    };
    let items = score_landing(&landing);
    let total = total_score(&items);
    assert!(total > 10);
    assert_eq!(interpret_score(total), LessInterpretation::Poor);
}

/// The wide/narrow and toe-in/toe-out item pairs are mutually exclusive
#[test]
fn test_paired_items_exclusive() {
    let mut landing = textbook_landing();

    landing.stance_width = 0.6;
    let items = score_landing(&landing);
    assert_eq!(items[6] + items[7], 1);

    landing.stance_width = 0.2;
    let items = score_landing(&landing);
    assert_eq!(items[6] + items[7], 1);

    landing.foot_rotation = 40.0;
    let items = score_landing(&landing);
    assert_eq!(items[8], 1);
    assert_eq!(items[9], 0);

    landing.foot_rotation = -40.0;
    let items = score_landing(&landing);
    assert_eq!(items[8], 0);
    assert_eq!(items[9], 1);
}

/// Interpretation boundaries sit at 4, 5, and 6 total errors
#[test]
fn test_interpretation_boundaries() {
    assert_eq!(interpret_score(4), LessInterpretation::Excellent);
    assert_eq!(interpret_score(5), LessInterpretation::Good);
    assert_eq!(interpret_score(6), LessInterpretation::Moderate);
    assert_eq!(interpret_score(7), LessInterpretation::Poor);
}

/// One error flipped at a time walks the interpretation down
#[test]
fn test_single_item_degrades_score() {
    let mut landing = textbook_landing();
    landing.knee_flexion_ic = 25.0;
    let with_shallow_knee = total_score(&score_landing(&landing));

    let baseline = total_score(&score_landing(&textbook_landing()));
    assert_eq!(with_shallow_knee, baseline + 1);
}
