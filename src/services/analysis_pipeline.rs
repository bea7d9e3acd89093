/// Per-frame analysis pipeline
///
/// This service ties one exercise profile to its tracker:
/// - Extracts the profile's three landmarks from each pose
/// - Gates them on confidence and computes the joint angle
/// - Routes the angle to the rep counter or the hold tracker
/// - Publishes an immutable snapshot for readers on other threads
///
/// The pipeline is the single writer of all tracker state. It is driven by
/// one caller, one frame at a time; readers only ever see published copies.

use tokio::sync::watch;

use crate::config::EngineConfig;
use crate::models::exercise::{Direction, ExerciseKind, ExerciseProfile, TrackingMode};
use crate::models::landmark::{Pose, Side};
use crate::models::tracking::{FrameResult, RepState, TrackerSnapshot};
use crate::services::angle_math;
use crate::services::hold_tracker::HoldTracker;
use crate::services::rep_counter::RepCounter;

/// Tracker matching the active profile's mode
#[derive(Debug, Clone, PartialEq)]
enum ActiveTracker {
    Reps(RepCounter),
    Hold(HoldTracker),
}

impl ActiveTracker {
    fn for_profile(profile: &ExerciseProfile) -> Self {
        match profile.tracking {
            TrackingMode::Reps {
                down_threshold,
                up_threshold,
                direction,
            } => Self::Reps(RepCounter::new(down_threshold, up_threshold, direction)),
            TrackingMode::Hold {
                min_valid,
                max_valid,
            } => Self::Hold(HoldTracker::new(min_valid, max_valid)),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Reps(counter) => counter.reset(),
            Self::Hold(tracker) => tracker.reset(),
        }
    }
}

/// Coaching text for a rep-based exercise
pub fn rep_feedback(
    angle: Option<f32>,
    rep_counted: bool,
    state: RepState,
    direction: Direction,
) -> &'static str {
    if angle.is_none() {
        return "Get in position";
    }
    if rep_counted {
        return "Good rep!";
    }
    match (state, direction) {
        (RepState::Unknown, _) => "Get in position",
        (RepState::Up, Direction::Normal) => "Go down",
        (RepState::Down, Direction::Normal) => "Now come back up",
        (RepState::Down, Direction::Inverted) => "Curl up",
        (RepState::Up, Direction::Inverted) => "Lower slowly",
    }
}

/// Read side of the snapshot channel
#[derive(Debug, Clone)]
pub struct SnapshotReader {
    rx: watch::Receiver<TrackerSnapshot>,
}

impl SnapshotReader {
    /// Copy of the most recently published snapshot
    pub fn latest(&self) -> TrackerSnapshot {
        self.rx.borrow().clone()
    }

    /// True when a snapshot was published since the last [`SnapshotReader::next`]
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Wait for the next publication. `None` once the pipeline is dropped.
    pub async fn next(&mut self) -> Option<TrackerSnapshot> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

pub struct AnalysisPipeline {
    profile: ExerciseProfile,
    config: EngineConfig,
    tracker: ActiveTracker,
    last_angle: Option<f32>,
    last_result: Option<FrameResult>,
    frames_processed: u64,
    frames_unreliable: u64,
    snapshots: watch::Sender<TrackerSnapshot>,
}

impl AnalysisPipeline {
    /// Create a pipeline with the default engine configuration
    pub fn new(profile: ExerciseProfile) -> Self {
        Self::with_config(profile, EngineConfig::default())
    }

    pub fn with_config(profile: ExerciseProfile, config: EngineConfig) -> Self {
        let (snapshots, _) = watch::channel(TrackerSnapshot::initial(profile.kind, profile.side));

        Self {
            tracker: ActiveTracker::for_profile(&profile),
            profile,
            config,
            last_angle: None,
            last_result: None,
            frames_processed: 0,
            frames_unreliable: 0,
            snapshots,
        }
    }

    /// Shortcut for `new(ExerciseProfile::for_exercise(kind, side))`
    pub fn for_exercise(kind: ExerciseKind, side: Side) -> Self {
        Self::new(ExerciseProfile::for_exercise(kind, side))
    }

    /// Analyse one pose observed at `now_ms`
    pub fn process(&mut self, pose: &Pose, now_ms: u64) -> FrameResult {
        let triple = self.profile.triple();
        let angle = angle_math::landmark_angle(
            pose.get(triple.first),
            pose.get(triple.vertex),
            pose.get(triple.last),
            self.config.min_confidence,
        );

        self.frames_processed += 1;
        if angle.is_none() {
            self.frames_unreliable += 1;
            tracing::debug!(
                exercise = self.profile.kind.name(),
                now_ms,
                "Landmarks missing or below confidence, skipping frame"
            );
        }
        self.last_angle = angle;

        let result = match &mut self.tracker {
            ActiveTracker::Reps(counter) => {
                let rep_counted = counter.update(angle);
                FrameResult {
                    angle,
                    rep_count: counter.rep_count(),
                    rep_counted,
                    rep_state: counter.current_state(),
                    is_holding: false,
                    hold_ms: 0,
                    best_hold_ms: 0,
                    form_score: counter.form_score(),
                    feedback: rep_feedback(
                        angle,
                        rep_counted,
                        counter.current_state(),
                        counter.direction(),
                    )
                    .to_string(),
                }
            }
            ActiveTracker::Hold(tracker) => {
                tracker.update(angle, now_ms);
                FrameResult {
                    angle,
                    rep_count: 0,
                    rep_counted: false,
                    rep_state: RepState::Unknown,
                    is_holding: tracker.is_holding(),
                    hold_ms: tracker.current_hold_ms(),
                    best_hold_ms: tracker.best_hold_ms(),
                    form_score: tracker.form_score(),
                    feedback: tracker.feedback().to_string(),
                }
            }
        };

        self.last_result = Some(result.clone());
        self.publish();
        result
    }

    /// Replace the active profile and start from a clean slate
    pub fn select_exercise(&mut self, kind: ExerciseKind, side: Side) {
        self.set_profile(ExerciseProfile::for_exercise(kind, side));
    }

    pub fn set_profile(&mut self, profile: ExerciseProfile) {
        tracing::info!(
            from = self.profile.kind.name(),
            to = profile.kind.name(),
            side = %profile.side,
            "Switching exercise"
        );
        self.profile = profile;
        self.tracker = ActiveTracker::for_profile(&profile);
        self.clear_frame_state();
        self.publish();
    }

    /// Zero all counters for the current exercise
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.clear_frame_state();
        self.publish();
    }

    fn clear_frame_state(&mut self) {
        self.last_angle = None;
        self.last_result = None;
        self.frames_processed = 0;
        self.frames_unreliable = 0;
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.snapshot());
    }

    /// Subscribe to snapshots published after every frame, switch and reset
    pub fn subscribe(&self) -> SnapshotReader {
        SnapshotReader {
            rx: self.snapshots.subscribe(),
        }
    }

    /// Copy of the current tracker state
    pub fn snapshot(&self) -> TrackerSnapshot {
        TrackerSnapshot {
            exercise: self.profile.kind,
            side: self.profile.side,
            rep_state: self.rep_state(),
            rep_count: self.rep_count(),
            is_holding: self.is_holding(),
            hold_ms: self.hold_ms(),
            best_hold_ms: self.best_hold_ms(),
            form_score: self.form_score(),
            last_angle: self.last_angle,
            frames_processed: self.frames_processed,
            frames_unreliable: self.frames_unreliable,
        }
    }

    pub fn profile(&self) -> &ExerciseProfile {
        &self.profile
    }

    /// Result of the last processed frame, cleared by a switch or reset
    pub fn last_result(&self) -> Option<&FrameResult> {
        self.last_result.as_ref()
    }

    pub fn rep_count(&self) -> u32 {
        match &self.tracker {
            ActiveTracker::Reps(counter) => counter.rep_count(),
            ActiveTracker::Hold(_) => 0,
        }
    }

    pub fn rep_state(&self) -> RepState {
        match &self.tracker {
            ActiveTracker::Reps(counter) => counter.current_state(),
            ActiveTracker::Hold(_) => RepState::Unknown,
        }
    }

    pub fn hold_ms(&self) -> u64 {
        match &self.tracker {
            ActiveTracker::Reps(_) => 0,
            ActiveTracker::Hold(tracker) => tracker.current_hold_ms(),
        }
    }

    pub fn best_hold_ms(&self) -> u64 {
        match &self.tracker {
            ActiveTracker::Reps(_) => 0,
            ActiveTracker::Hold(tracker) => tracker.best_hold_ms(),
        }
    }

    pub fn is_holding(&self) -> bool {
        match &self.tracker {
            ActiveTracker::Reps(_) => false,
            ActiveTracker::Hold(tracker) => tracker.is_holding(),
        }
    }

    pub fn form_score(&self) -> f32 {
        match &self.tracker {
            ActiveTracker::Reps(counter) => counter.form_score(),
            ActiveTracker::Hold(tracker) => tracker.form_score(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::landmark::{JointRole, Landmark};

    /// Left arm with the elbow bent to `degrees`
    fn arm_pose(degrees: f32, confidence: f32) -> Pose {
        let radians = degrees.to_radians();
        Pose::new()
            .with(JointRole::LeftShoulder, Landmark::new(100.0, 0.0, confidence))
            .with(JointRole::LeftElbow, Landmark::new(0.0, 0.0, confidence))
            .with(
                JointRole::LeftWrist,
                Landmark::new(100.0 * radians.cos(), 100.0 * radians.sin(), confidence),
            )
    }

    #[test]
    fn test_rep_feedback() {
        assert_eq!(rep_feedback(None, false, RepState::Up, Direction::Normal), "Get in position");
        assert_eq!(rep_feedback(Some(170.0), true, RepState::Up, Direction::Normal), "Good rep!");
        assert_eq!(rep_feedback(Some(170.0), false, RepState::Up, Direction::Normal), "Go down");
        assert_eq!(rep_feedback(Some(80.0), false, RepState::Down, Direction::Normal), "Now come back up");
        assert_eq!(rep_feedback(Some(170.0), false, RepState::Down, Direction::Inverted), "Curl up");
        assert_eq!(rep_feedback(Some(50.0), false, RepState::Up, Direction::Inverted), "Lower slowly");
    }

    #[test]
    fn test_push_up_counts_through_pipeline() {
        let mut pipeline = AnalysisPipeline::for_exercise(ExerciseKind::PushUp, Side::Left);

        let results: Vec<FrameResult> = [170.0, 85.0, 175.0]
            .iter()
            .enumerate()
            .map(|(i, &deg)| pipeline.process(&arm_pose(deg, 0.9), i as u64 * 33))
            .collect();

        assert!((results[0].angle.unwrap() - 170.0).abs() < 0.01);
        assert!(!results[1].rep_counted);
        assert!(results[2].rep_counted);
        assert_eq!(results[2].rep_count, 1);
        assert_eq!(pipeline.rep_count(), 1);
    }

    #[test]
    fn test_low_confidence_frame_is_skipped() {
        let mut pipeline = AnalysisPipeline::for_exercise(ExerciseKind::PushUp, Side::Left);
        pipeline.process(&arm_pose(170.0, 0.9), 0);
        let result = pipeline.process(&arm_pose(80.0, 0.2), 33);

        assert_eq!(result.angle, None);
        assert_eq!(result.rep_state, RepState::Up);
        assert_eq!(pipeline.snapshot().frames_unreliable, 1);
    }

    #[test]
    fn test_confidence_gate_follows_config() {
        let profile = ExerciseProfile::for_exercise(ExerciseKind::PushUp, Side::Left);
        let mut pipeline =
            AnalysisPipeline::with_config(profile, EngineConfig::default().with_min_confidence(0.1));

        assert!(pipeline.process(&arm_pose(170.0, 0.2), 0).angle.is_some());
    }

    #[test]
    fn test_wrong_side_landmarks_are_missing() {
        let mut pipeline = AnalysisPipeline::for_exercise(ExerciseKind::PushUp, Side::Right);
        let result = pipeline.process(&arm_pose(170.0, 0.9), 0);

        assert_eq!(result.angle, None);
        assert_eq!(result.feedback, "Get in position");
    }

    #[test]
    fn test_subscribers_see_published_snapshots() {
        let mut pipeline = AnalysisPipeline::for_exercise(ExerciseKind::PushUp, Side::Left);
        let reader = pipeline.subscribe();
        assert!(!reader.has_changed());

        pipeline.process(&arm_pose(170.0, 0.9), 0);
        assert!(reader.has_changed());
        assert_eq!(reader.latest().rep_state, RepState::Up);
        assert_eq!(reader.latest().frames_processed, 1);
    }

    #[test]
    fn test_switch_clears_last_result() {
        let mut pipeline = AnalysisPipeline::for_exercise(ExerciseKind::PushUp, Side::Left);
        pipeline.process(&arm_pose(170.0, 0.9), 0);
        assert!(pipeline.last_result().is_some());

        pipeline.select_exercise(ExerciseKind::Plank, Side::Left);
        assert!(pipeline.last_result().is_none());
        assert!(pipeline.profile().is_time_based());
    }
}
