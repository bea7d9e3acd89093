// Motion analysis services

pub mod analysis_pipeline;
pub mod angle_math;
pub mod hold_tracker;
pub mod rep_counter;
pub mod workout_session;

pub use analysis_pipeline::{AnalysisPipeline, SnapshotReader};
pub use hold_tracker::HoldTracker;
pub use rep_counter::RepCounter;
pub use workout_session::WorkoutSession;
