/// Exercise catalogue and per-exercise angle profiles
///
/// Every supported exercise belongs to one movement pattern. The pattern fixes
/// which three joints form the tracked angle, the thresholds, and whether the
/// exercise is counted in repetitions or timed as a hold. Thresholds are
/// static and tuned per pattern; nothing here is learned at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;
use crate::models::landmark::{BodyPart, JointRole, Side};

/// Direction of a repetition relative to the tracked angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Bent = down, extended = up (push-up, squat)
    Normal,
    /// Extended = down, contracted = up (curl, crunch)
    Inverted,
}

/// How an exercise is measured
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TrackingMode {
    /// Counted repetitions between two angle thresholds.
    ///
    /// Normal: down when angle < `down_threshold`, up when angle > `up_threshold`.
    /// Inverted: down when angle > `down_threshold`, up when angle < `up_threshold`.
    Reps {
        down_threshold: f32,
        up_threshold: f32,
        direction: Direction,
    },
    /// Timed hold while the angle stays inside `[min_valid, max_valid]`
    Hold { min_valid: f32, max_valid: f32 },
}

/// Three joint roles forming one tracked angle, vertex in the middle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AngleTriple {
    pub first: JointRole,
    pub vertex: JointRole,
    pub last: JointRole,
}

impl AngleTriple {
    pub fn new(first: JointRole, vertex: JointRole, last: JointRole) -> Self {
        Self {
            first,
            vertex,
            last,
        }
    }

    pub fn roles(&self) -> [JointRole; 3] {
        [self.first, self.vertex, self.last]
    }
}

/// Families of exercises sharing a joint triple and threshold table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementPattern {
    ElbowBend,
    KneeBend,
    BodyLineHold,
    Curl,
    TorsoFlexion,
}

impl MovementPattern {
    /// Body parts forming the angle (first, vertex, last)
    pub fn parts(&self) -> (BodyPart, BodyPart, BodyPart) {
        match self {
            Self::ElbowBend | Self::Curl => (BodyPart::Shoulder, BodyPart::Elbow, BodyPart::Wrist),
            Self::KneeBend => (BodyPart::Hip, BodyPart::Knee, BodyPart::Ankle),
            Self::BodyLineHold => (BodyPart::Shoulder, BodyPart::Hip, BodyPart::Ankle),
            Self::TorsoFlexion => (BodyPart::Shoulder, BodyPart::Hip, BodyPart::Knee),
        }
    }

    pub fn tracking(&self) -> TrackingMode {
        match self {
            Self::ElbowBend | Self::KneeBend => TrackingMode::Reps {
                down_threshold: 90.0,
                up_threshold: 160.0,
                direction: Direction::Normal,
            },
            Self::BodyLineHold => TrackingMode::Hold {
                min_valid: 160.0,
                max_valid: 180.0,
            },
            Self::Curl => TrackingMode::Reps {
                down_threshold: 160.0,
                up_threshold: 60.0,
                direction: Direction::Inverted,
            },
            Self::TorsoFlexion => TrackingMode::Reps {
                down_threshold: 160.0,
                up_threshold: 110.0,
                direction: Direction::Inverted,
            },
        }
    }

    pub fn angle_label(&self) -> &'static str {
        match self {
            Self::ElbowBend | Self::Curl => "Elbow angle",
            Self::KneeBend => "Knee angle",
            Self::BodyLineHold => "Body line",
            Self::TorsoFlexion => "Hip angle",
        }
    }
}

/// Supported exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    PushUp,
    TricepDip,
    Squat,
    Lunge,
    Plank,
    BicepCurl,
    HammerCurl,
    Crunch,
    SitUp,
}

impl ExerciseKind {
    pub fn pattern(&self) -> MovementPattern {
        match self {
            Self::PushUp | Self::TricepDip => MovementPattern::ElbowBend,
            Self::Squat | Self::Lunge => MovementPattern::KneeBend,
            Self::Plank => MovementPattern::BodyLineHold,
            Self::BicepCurl | Self::HammerCurl => MovementPattern::Curl,
            Self::Crunch | Self::SitUp => MovementPattern::TorsoFlexion,
        }
    }

    /// Machine name (e.g., "push_up")
    pub fn name(&self) -> &'static str {
        match self {
            Self::PushUp => "push_up",
            Self::TricepDip => "tricep_dip",
            Self::Squat => "squat",
            Self::Lunge => "lunge",
            Self::Plank => "plank",
            Self::BicepCurl => "bicep_curl",
            Self::HammerCurl => "hammer_curl",
            Self::Crunch => "crunch",
            Self::SitUp => "sit_up",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::PushUp => "Push-up",
            Self::TricepDip => "Tricep dip",
            Self::Squat => "Squat",
            Self::Lunge => "Lunge",
            Self::Plank => "Plank",
            Self::BicepCurl => "Bicep curl",
            Self::HammerCurl => "Hammer curl",
            Self::Crunch => "Crunch",
            Self::SitUp => "Sit-up",
        }
    }

    pub fn all() -> [Self; 9] {
        [
            Self::PushUp,
            Self::TricepDip,
            Self::Squat,
            Self::Lunge,
            Self::Plank,
            Self::BicepCurl,
            Self::HammerCurl,
            Self::Crunch,
            Self::SitUp,
        ]
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ExerciseKind {
    type Err = EngineError;

    /// Accepts "push_up", "push-up", "pushup" and any casing
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect();

        Self::all()
            .into_iter()
            .find(|kind| kind.name().replace('_', "") == wanted)
            .ok_or_else(|| EngineError::UnknownExercise(s.to_string()))
    }
}

/// Immutable description of one exercise variant.
///
/// Replaced wholesale when the user switches exercise or side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExerciseProfile {
    pub kind: ExerciseKind,
    pub side: Side,
    pub triple: AngleTriple,
    pub tracking: TrackingMode,
}

impl ExerciseProfile {
    /// Look up the fixed profile for an exercise on one side of the body
    pub fn for_exercise(kind: ExerciseKind, side: Side) -> Self {
        let pattern = kind.pattern();
        let (first, vertex, last) = pattern.parts();

        Self {
            kind,
            side,
            triple: AngleTriple::new(
                JointRole::of(first, side),
                JointRole::of(vertex, side),
                JointRole::of(last, side),
            ),
            tracking: pattern.tracking(),
        }
    }

    pub fn triple(&self) -> AngleTriple {
        self.triple
    }

    pub fn angle_label(&self) -> &'static str {
        self.kind.pattern().angle_label()
    }

    /// "Down" threshold for rep profiles, lower bound of the valid range for holds
    pub fn down_threshold(&self) -> f32 {
        match self.tracking {
            TrackingMode::Reps { down_threshold, .. } => down_threshold,
            TrackingMode::Hold { min_valid, .. } => min_valid,
        }
    }

    /// "Up" threshold for rep profiles, upper bound of the valid range for holds
    pub fn up_threshold(&self) -> f32 {
        match self.tracking {
            TrackingMode::Reps { up_threshold, .. } => up_threshold,
            TrackingMode::Hold { max_valid, .. } => max_valid,
        }
    }

    pub fn is_inverted(&self) -> bool {
        matches!(
            self.tracking,
            TrackingMode::Reps {
                direction: Direction::Inverted,
                ..
            }
        )
    }

    pub fn is_time_based(&self) -> bool {
        matches!(self.tracking, TrackingMode::Hold { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_up_profile() {
        let profile = ExerciseProfile::for_exercise(ExerciseKind::PushUp, Side::Left);
        assert_eq!(
            profile.triple(),
            AngleTriple::new(JointRole::LeftShoulder, JointRole::LeftElbow, JointRole::LeftWrist)
        );
        assert_eq!(profile.down_threshold(), 90.0);
        assert_eq!(profile.up_threshold(), 160.0);
        assert!(!profile.is_inverted());
        assert!(!profile.is_time_based());
    }

    #[test]
    fn test_squat_profile_right_side() {
        let profile = ExerciseProfile::for_exercise(ExerciseKind::Squat, Side::Right);
        assert_eq!(
            profile.triple().roles(),
            [JointRole::RightHip, JointRole::RightKnee, JointRole::RightAnkle]
        );
        assert_eq!(profile.angle_label(), "Knee angle");
    }

    #[test]
    fn test_plank_is_time_based() {
        let profile = ExerciseProfile::for_exercise(ExerciseKind::Plank, Side::Left);
        assert!(profile.is_time_based());
        assert_eq!(
            profile.tracking,
            TrackingMode::Hold {
                min_valid: 160.0,
                max_valid: 180.0
            }
        );
        assert_eq!(
            profile.triple().roles(),
            [JointRole::LeftShoulder, JointRole::LeftHip, JointRole::LeftAnkle]
        );
    }

    #[test]
    fn test_curl_thresholds_are_inverted() {
        let profile = ExerciseProfile::for_exercise(ExerciseKind::BicepCurl, Side::Right);
        assert!(profile.is_inverted());
        assert_eq!(profile.down_threshold(), 160.0);
        assert_eq!(profile.up_threshold(), 60.0);
        assert_eq!(profile.triple().vertex, JointRole::RightElbow);
    }

    #[test]
    fn test_crunch_profile() {
        let profile = ExerciseProfile::for_exercise(ExerciseKind::Crunch, Side::Left);
        assert!(profile.is_inverted());
        assert_eq!(profile.down_threshold(), 160.0);
        assert_eq!(profile.up_threshold(), 110.0);
        assert_eq!(
            profile.triple().roles(),
            [JointRole::LeftShoulder, JointRole::LeftHip, JointRole::LeftKnee]
        );
    }

    #[test]
    fn test_sides_only_change_joint_roles() {
        for kind in ExerciseKind::all() {
            let left = ExerciseProfile::for_exercise(kind, Side::Left);
            let right = ExerciseProfile::for_exercise(kind, Side::Right);
            assert_eq!(left.tracking, right.tracking);
            assert_ne!(left.triple, right.triple);
        }
    }

    #[test]
    fn test_exercise_kind_parsing() {
        assert_eq!("push_up".parse::<ExerciseKind>().unwrap(), ExerciseKind::PushUp);
        assert_eq!("Push-Up".parse::<ExerciseKind>().unwrap(), ExerciseKind::PushUp);
        assert_eq!("bicepcurl".parse::<ExerciseKind>().unwrap(), ExerciseKind::BicepCurl);
        assert!(matches!(
            "burpee".parse::<ExerciseKind>(),
            Err(EngineError::UnknownExercise(_))
        ));
    }
}
