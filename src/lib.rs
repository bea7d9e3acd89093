// Form Coach - real-time exercise tracking from skeletal poses
// Consumes one pose per camera frame and reports repetitions, hold times and
// a form score for the selected exercise.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::EngineConfig;
pub use error::EngineError;
pub use models::{
    AngleTriple, Direction, ExerciseKind, ExerciseProfile, FrameResult, JointRole, Landmark,
    MovementPattern, Point, Pose, PoseFrame, RepState, Side, TrackerSnapshot, TrackingMode,
    WorkoutSummary,
};
pub use services::{AnalysisPipeline, HoldTracker, RepCounter, SnapshotReader, WorkoutSession};
