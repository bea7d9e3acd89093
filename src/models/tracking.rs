/// Per-frame outputs and published tracker state

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::exercise::ExerciseKind;
use crate::models::landmark::Side;

/// Sentinel written in place of a missing angle for consumers that need a number
pub const INVALID_ANGLE: f32 = -1.0;

/// Repetition phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepState {
    #[default]
    Unknown,
    Up,
    Down,
}

impl fmt::Display for RepState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unknown => "unknown",
            Self::Up => "up",
            Self::Down => "down",
        };
        f.write_str(s)
    }
}

/// Result of processing one frame, handed to the overlay and completion consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameResult {
    /// Tracked angle in degrees, `None` when the landmarks were missing or unreliable
    pub angle: Option<f32>,
    pub rep_count: u32,
    /// True only on the frame that completed a repetition
    pub rep_counted: bool,
    pub rep_state: RepState,
    pub is_holding: bool,
    pub hold_ms: u64,
    pub best_hold_ms: u64,
    /// Form score (0-10)
    pub form_score: f32,
    pub feedback: String,
}

impl FrameResult {
    /// Angle with the legacy `-1` sentinel for a missing value
    pub fn angle_or_sentinel(&self) -> f32 {
        self.angle.unwrap_or(INVALID_ANGLE)
    }
}

/// Immutable copy of everything a reader may display between frames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerSnapshot {
    pub exercise: ExerciseKind,
    pub side: Side,
    pub rep_state: RepState,
    pub rep_count: u32,
    pub is_holding: bool,
    pub hold_ms: u64,
    pub best_hold_ms: u64,
    pub form_score: f32,
    pub last_angle: Option<f32>,
    pub frames_processed: u64,
    pub frames_unreliable: u64,
}

impl TrackerSnapshot {
    /// State of a freshly selected exercise
    pub fn initial(exercise: ExerciseKind, side: Side) -> Self {
        Self {
            exercise,
            side,
            rep_state: RepState::Unknown,
            rep_count: 0,
            is_holding: false,
            hold_ms: 0,
            best_hold_ms: 0,
            form_score: 0.0,
            last_angle: None,
            frames_processed: 0,
            frames_unreliable: 0,
        }
    }
}
