use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::models::exercise::{ExerciseKind, ExerciseProfile};
use crate::models::landmark::{PoseFrame, Side};
use crate::models::tracking::FrameResult;
use crate::models::workout::WorkoutSummary;
use crate::services::analysis_pipeline::{AnalysisPipeline, SnapshotReader};

/// One analysis session, from exercise selection until the user stops.
///
/// Owns the pipeline and counts frames across exercise switches; `finish`
/// hands the result to whoever records completed workouts.
pub struct WorkoutSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    pipeline: AnalysisPipeline,
    frames_processed: u64,
    frames_unreliable: u64,
}

impl WorkoutSession {
    pub fn start(kind: ExerciseKind, side: Side, config: EngineConfig) -> Self {
        Self::start_at(kind, side, config, Utc::now())
    }

    pub fn start_at(
        kind: ExerciseKind,
        side: Side,
        config: EngineConfig,
        started_at: DateTime<Utc>,
    ) -> Self {
        let id = Uuid::new_v4();
        tracing::info!(%id, exercise = kind.name(), %side, "Workout session started");

        Self {
            id,
            started_at,
            pipeline: AnalysisPipeline::with_config(ExerciseProfile::for_exercise(kind, side), config),
            frames_processed: 0,
            frames_unreliable: 0,
        }
    }

    pub fn process_frame(&mut self, frame: &PoseFrame) -> FrameResult {
        let result = self.pipeline.process(&frame.landmarks, frame.timestamp_ms);

        self.frames_processed += 1;
        if result.angle.is_none() {
            self.frames_unreliable += 1;
        }
        result
    }

    pub fn select_exercise(&mut self, kind: ExerciseKind, side: Side) {
        self.pipeline.select_exercise(kind, side);
    }

    pub fn subscribe(&self) -> SnapshotReader {
        self.pipeline.subscribe()
    }

    pub fn pipeline(&self) -> &AnalysisPipeline {
        &self.pipeline
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn finish(self) -> WorkoutSummary {
        self.finish_at(Utc::now())
    }

    /// Close the session. A hold still running at the end counts towards the best hold.
    pub fn finish_at(self, ended_at: DateTime<Utc>) -> WorkoutSummary {
        let profile = self.pipeline.profile();
        let summary = WorkoutSummary {
            id: self.id,
            exercise: profile.kind,
            side: profile.side,
            reps: self.pipeline.rep_count(),
            best_hold_ms: self.pipeline.best_hold_ms().max(self.pipeline.hold_ms()),
            frames_processed: self.frames_processed,
            frames_unreliable: self.frames_unreliable,
            started_at: self.started_at,
            ended_at,
        };

        tracing::info!(
            id = %summary.id,
            exercise = summary.exercise.name(),
            reps = summary.reps,
            best_hold_ms = summary.best_hold_ms,
            "Workout session finished"
        );
        summary
    }
}
