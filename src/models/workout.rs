use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::exercise::ExerciseKind;
use crate::models::landmark::Side;

/// Completed workout handed to the downstream completion consumer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSummary {
    pub id: Uuid,
    pub exercise: ExerciseKind,
    pub side: Side,
    pub reps: u32,
    pub best_hold_ms: u64,
    pub frames_processed: u64,
    pub frames_unreliable: u64,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

impl WorkoutSummary {
    /// Wall-clock duration of the session in whole seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.ended_at - self.started_at).num_seconds().max(0)
    }

    /// Share of frames whose landmarks could be used (0-1)
    pub fn tracking_quality(&self) -> f64 {
        if self.frames_processed == 0 {
            return 0.0;
        }
        let usable = self.frames_processed.saturating_sub(self.frames_unreliable);
        usable as f64 / self.frames_processed as f64
    }
}
