/// Skeletal landmark models
///
/// This module provides the joint vocabulary shared with the pose-detection
/// collaborator, single landmarks with confidence, and the per-frame pose map.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// Default minimum confidence for a landmark to be used in angle calculations
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.5;

/// COCO keypoint roles for joint calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointRole {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl JointRole {
    /// Get keypoint name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEye => "left_eye",
            Self::RightEye => "right_eye",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
        }
    }

    /// Get all joint roles in COCO index order
    pub fn all() -> [Self; 17] {
        [
            Self::Nose,
            Self::LeftEye,
            Self::RightEye,
            Self::LeftEar,
            Self::RightEar,
            Self::LeftShoulder,
            Self::RightShoulder,
            Self::LeftElbow,
            Self::RightElbow,
            Self::LeftWrist,
            Self::RightWrist,
            Self::LeftHip,
            Self::RightHip,
            Self::LeftKnee,
            Self::RightKnee,
            Self::LeftAnkle,
            Self::RightAnkle,
        ]
    }

    /// Resolve a limb joint on the given side of the body
    pub fn of(part: BodyPart, side: Side) -> Self {
        match (part, side) {
            (BodyPart::Shoulder, Side::Left) => Self::LeftShoulder,
            (BodyPart::Shoulder, Side::Right) => Self::RightShoulder,
            (BodyPart::Elbow, Side::Left) => Self::LeftElbow,
            (BodyPart::Elbow, Side::Right) => Self::RightElbow,
            (BodyPart::Wrist, Side::Left) => Self::LeftWrist,
            (BodyPart::Wrist, Side::Right) => Self::RightWrist,
            (BodyPart::Hip, Side::Left) => Self::LeftHip,
            (BodyPart::Hip, Side::Right) => Self::RightHip,
            (BodyPart::Knee, Side::Left) => Self::LeftKnee,
            (BodyPart::Knee, Side::Right) => Self::RightKnee,
            (BodyPart::Ankle, Side::Left) => Self::LeftAnkle,
            (BodyPart::Ankle, Side::Right) => Self::RightAnkle,
        }
    }
}

impl fmt::Display for JointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for JointRole {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::all()
            .into_iter()
            .find(|role| role.name() == wanted)
            .ok_or_else(|| EngineError::UnknownJoint(s.to_string()))
    }
}

/// Limb joints that exist on both sides of the body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyPart {
    Shoulder,
    Elbow,
    Wrist,
    Hip,
    Knee,
    Ankle,
}

/// Which side of the body an exercise profile reads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    Left,
    Right,
}

impl Side {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Side {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" | "l" => Ok(Self::Left),
            "right" | "r" => Ok(Self::Right),
            _ => Err(EngineError::UnknownSide(s.to_string())),
        }
    }
}

/// A bare 2D position in image space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A detected landmark with position and confidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// X coordinate (normalized 0-1 or pixel coordinates)
    pub x: f32,
    /// Y coordinate (normalized 0-1 or pixel coordinates)
    pub y: f32,
    /// Detection confidence (0-1)
    pub confidence: f32,
}

impl Landmark {
    /// Create a new landmark
    pub fn new(x: f32, y: f32, confidence: f32) -> Self {
        Self { x, y, confidence }
    }

    /// Position without the confidence
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// All landmarks detected in one frame, keyed by joint role.
///
/// A role may be absent, or present with a confidence too low to be used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pose {
    landmarks: HashMap<JointRole, Landmark>,
}

impl Pose {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, role: JointRole, landmark: Landmark) -> Self {
        self.insert(role, landmark);
        self
    }

    pub fn insert(&mut self, role: JointRole, landmark: Landmark) -> Option<Landmark> {
        self.landmarks.insert(role, landmark)
    }

    /// Get landmark by role
    pub fn get(&self, role: JointRole) -> Option<&Landmark> {
        self.landmarks.get(&role)
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
}

/// Pose frame with temporal information, as delivered by the detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseFrame {
    /// Frame timestamp in milliseconds
    pub timestamp_ms: u64,
    /// Landmarks detected in this frame
    #[serde(default)]
    pub landmarks: Pose,
}

impl PoseFrame {
    pub fn new(timestamp_ms: u64, landmarks: Pose) -> Self {
        Self {
            timestamp_ms,
            landmarks,
        }
    }

    /// Decode a single JSON-encoded frame (one NDJSON line)
    pub fn from_json(line: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(line)?)
    }
}
