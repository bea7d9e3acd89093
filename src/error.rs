use thiserror::Error;

/// Errors raised at the text boundaries of the engine (names, config, pose JSON).
///
/// Per-frame processing never fails; unreliable data is absorbed as an
/// invalid angle instead.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),
    #[error("Unknown side: {0} (expected left or right)")]
    UnknownSide(String),
    #[error("Unknown joint: {0}")]
    UnknownJoint(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Failed to decode pose frame: {0}")]
    Decode(#[from] serde_json::Error),
}
