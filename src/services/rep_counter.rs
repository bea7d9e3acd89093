/// Repetition counting with hysteresis
///
/// A three-state machine (`Unknown`, `Up`, `Down`) fed one angle per frame.
/// Two separate thresholds form a dead band, so an angle hovering around a
/// single boundary never flips the state back and forth. A repetition is
/// counted only when the cycle returns from the working extreme:
/// `Down -> Up` in normal mode, `Up -> Down` in inverted mode.

use crate::models::exercise::Direction;
use crate::models::tracking::RepState;

/// Range-of-motion score reported for a full repetition
const MAX_FORM_SCORE: f32 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RepCounter {
    down_threshold: f32,
    up_threshold: f32,
    direction: Direction,
    state: RepState,
    rep_count: u32,
    /// Smallest and largest valid angle since the last counted rep
    extremes: Option<(f32, f32)>,
    /// Angle that completed the last rep; extremes restart from it on the next frame
    restart_from: Option<f32>,
}

impl RepCounter {
    pub fn new(down_threshold: f32, up_threshold: f32, direction: Direction) -> Self {
        Self {
            down_threshold,
            up_threshold,
            direction,
            state: RepState::Unknown,
            rep_count: 0,
            extremes: None,
            restart_from: None,
        }
    }

    /// Feed one frame's angle. Returns true iff a repetition was completed.
    ///
    /// `None` (missing or unreliable landmarks) or a non-finite angle leaves the
    /// counter untouched.
    pub fn update(&mut self, angle: Option<f32>) -> bool {
        let Some(angle) = angle.filter(|a| a.is_finite()) else {
            return false;
        };

        self.track_extremes(angle);

        let (next, counted) = match self.direction {
            Direction::Normal => self.next_normal(angle),
            Direction::Inverted => self.next_inverted(angle),
        };

        if next != self.state {
            tracing::debug!(from = %self.state, to = %next, angle, "Rep state transition");
            self.state = next;
        }

        if counted {
            self.rep_count += 1;
            self.restart_from = Some(angle);
            tracing::info!(rep_count = self.rep_count, angle, "Repetition counted");
        }

        counted
    }

    /// Down below `down_threshold`, up above `up_threshold`
    fn next_normal(&self, angle: f32) -> (RepState, bool) {
        match self.state {
            RepState::Unknown if angle > self.up_threshold => (RepState::Up, false),
            RepState::Unknown if angle < self.down_threshold => (RepState::Down, false),
            RepState::Up if angle < self.down_threshold => (RepState::Down, false),
            RepState::Down if angle > self.up_threshold => (RepState::Up, true),
            state => (state, false),
        }
    }

    /// Down (extended) above `down_threshold`, up (contracted) below `up_threshold`
    fn next_inverted(&self, angle: f32) -> (RepState, bool) {
        match self.state {
            RepState::Unknown if angle > self.down_threshold => (RepState::Down, false),
            RepState::Unknown if angle < self.up_threshold => (RepState::Up, false),
            RepState::Down if angle < self.up_threshold => (RepState::Up, false),
            RepState::Up if angle > self.down_threshold => (RepState::Down, true),
            state => (state, false),
        }
    }

    fn track_extremes(&mut self, angle: f32) {
        if let Some(start) = self.restart_from.take() {
            self.extremes = Some((start, start));
        }
        self.extremes = Some(match self.extremes {
            Some((min, max)) => (min.min(angle), max.max(angle)),
            None => (angle, angle),
        });
    }

    /// Share of the threshold span covered since the last counted rep, scaled to 0-10
    pub fn form_score(&self) -> f32 {
        let span = (self.up_threshold - self.down_threshold).abs();
        match self.extremes {
            Some(_) if span == 0.0 => 0.0,
            Some((min, max)) => (MAX_FORM_SCORE * (max - min) / span).clamp(0.0, MAX_FORM_SCORE),
            None => 0.0,
        }
    }

    pub fn rep_count(&self) -> u32 {
        self.rep_count
    }

    pub fn current_state(&self) -> RepState {
        self.state
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Back to `Unknown` with a zero count; thresholds are kept
    pub fn reset(&mut self) {
        self.state = RepState::Unknown;
        self.rep_count = 0;
        self.extremes = None;
        self.restart_from = None;
    }
}
