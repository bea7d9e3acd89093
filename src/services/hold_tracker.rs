/// Hold duration and form tracking for static exercises
///
/// A hold runs while the tracked angle stays inside the profile's valid range.
/// Any frame outside the range, or without a usable angle, is a form break:
/// the running hold is committed to the best time and cleared.

const MAX_FORM_SCORE: f32 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct HoldTracker {
    min_valid: f32,
    max_valid: f32,
    is_holding: bool,
    current_hold_ms: u64,
    best_hold_ms: u64,
    form_score: f32,
    last_update_ms: Option<u64>,
}

impl HoldTracker {
    pub fn new(min_valid: f32, max_valid: f32) -> Self {
        Self {
            min_valid,
            max_valid,
            is_holding: false,
            current_hold_ms: 0,
            best_hold_ms: 0,
            form_score: 0.0,
            last_update_ms: None,
        }
    }

    /// Feed one frame's angle observed at `now_ms`
    pub fn update(&mut self, angle: Option<f32>, now_ms: u64) {
        match angle.filter(|&a| self.in_range(a)) {
            Some(angle) => {
                if self.is_holding {
                    let elapsed = self
                        .last_update_ms
                        .map_or(0, |last| now_ms.saturating_sub(last));
                    self.current_hold_ms += elapsed;
                } else {
                    self.is_holding = true;
                    self.current_hold_ms = 0;
                    tracing::info!(angle, "Hold started");
                }
                self.form_score = self.score(angle);
            }
            None => self.break_form(),
        }

        self.last_update_ms = Some(now_ms);
    }

    fn in_range(&self, angle: f32) -> bool {
        angle >= self.min_valid && angle <= self.max_valid
    }

    /// Linear score: `max_valid` scores 10, `min_valid` scores 0
    fn score(&self, angle: f32) -> f32 {
        let span = self.max_valid - self.min_valid;
        if span <= 0.0 {
            return MAX_FORM_SCORE;
        }
        let clamped = angle.clamp(self.min_valid, self.max_valid);
        (MAX_FORM_SCORE * (clamped - self.min_valid) / span).clamp(0.0, MAX_FORM_SCORE)
    }

    fn break_form(&mut self) {
        if self.is_holding {
            self.best_hold_ms = self.best_hold_ms.max(self.current_hold_ms);
            tracing::info!(
                hold_ms = self.current_hold_ms,
                best_hold_ms = self.best_hold_ms,
                "Hold broken"
            );
        }
        self.is_holding = false;
        self.current_hold_ms = 0;
        self.form_score = 0.0;
    }

    /// Longest completed hold this session; the running hold is not included
    pub fn best_hold_ms(&self) -> u64 {
        self.best_hold_ms
    }

    pub fn current_hold_ms(&self) -> u64 {
        self.current_hold_ms
    }

    pub fn form_score(&self) -> f32 {
        self.form_score
    }

    pub fn is_holding(&self) -> bool {
        self.is_holding
    }

    pub fn feedback(&self) -> &'static str {
        hold_feedback(self.is_holding, self.form_score)
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.min_valid, self.max_valid);
    }
}

/// Coaching text for a hold at the given form score
pub fn hold_feedback(is_holding: bool, form_score: f32) -> &'static str {
    if !is_holding {
        return "Get in position";
    }
    match form_score {
        s if s >= 9.0 => "Perfect form!",
        s if s >= 7.0 => "Good form",
        s if s >= 5.0 => "Hold it steady",
        s if s >= 3.0 => "Straighten up",
        _ => "Adjust your form",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hold_accumulates_time() {
        let mut tracker = HoldTracker::new(160.0, 180.0);
        tracker.update(Some(180.0), 1_000);
        assert!(tracker.is_holding());
        assert_eq!(tracker.current_hold_ms(), 0);

        tracker.update(Some(180.0), 1_500);
        assert_eq!(tracker.current_hold_ms(), 500);
        assert_eq!(tracker.form_score(), 10.0);
    }

    #[test]
    fn test_form_break_commits_best() {
        let mut tracker = HoldTracker::new(160.0, 180.0);
        tracker.update(Some(180.0), 0);
        tracker.update(Some(180.0), 500);
        tracker.update(Some(150.0), 600);

        assert!(!tracker.is_holding());
        assert_eq!(tracker.current_hold_ms(), 0);
        assert_eq!(tracker.best_hold_ms(), 500);
        assert_eq!(tracker.form_score(), 0.0);
    }

    #[test]
    fn test_invalid_angle_is_form_break() {
        let mut tracker = HoldTracker::new(160.0, 180.0);
        tracker.update(Some(175.0), 0);
        tracker.update(Some(175.0), 300);
        tracker.update(None, 400);

        assert!(!tracker.is_holding());
        assert_eq!(tracker.current_hold_ms(), 0);
        assert_eq!(tracker.best_hold_ms(), 300);
    }

    #[test]
    fn test_gap_during_break_is_not_counted() {
        let mut tracker = HoldTracker::new(160.0, 180.0);
        tracker.update(Some(170.0), 0);
        tracker.update(Some(100.0), 1_000);
        tracker.update(Some(170.0), 5_000);
        tracker.update(Some(170.0), 5_200);

        assert_eq!(tracker.current_hold_ms(), 200);
    }

    #[test]
    fn test_best_hold_is_monotonic() {
        let mut tracker = HoldTracker::new(160.0, 180.0);
        tracker.update(Some(170.0), 0);
        tracker.update(Some(170.0), 2_000);
        tracker.update(None, 2_100);
        tracker.update(Some(170.0), 3_000);
        tracker.update(Some(170.0), 3_500);
        tracker.update(None, 3_600);

        assert_eq!(tracker.best_hold_ms(), 2_000);
    }

    #[test]
    fn test_form_score_interpolation() {
        let mut tracker = HoldTracker::new(160.0, 180.0);
        tracker.update(Some(160.0), 0);
        assert_eq!(tracker.form_score(), 0.0);
        tracker.update(Some(170.0), 10);
        assert!((tracker.form_score() - 5.0).abs() < 1e-4);
        tracker.update(Some(178.0), 20);
        assert!((tracker.form_score() - 9.0).abs() < 1e-4);
    }

    #[test]
    fn test_feedback_tiers() {
        assert_eq!(hold_feedback(false, 10.0), "Get in position");
        assert_eq!(hold_feedback(true, 9.5), "Perfect form!");
        assert_eq!(hold_feedback(true, 7.0), "Good form");
        assert_eq!(hold_feedback(true, 5.5), "Hold it steady");
        assert_eq!(hold_feedback(true, 3.0), "Straighten up");
        assert_eq!(hold_feedback(true, 1.0), "Adjust your form");
    }

    #[test]
    fn test_reset() {
        let mut tracker = HoldTracker::new(160.0, 180.0);
        tracker.update(Some(170.0), 0);
        tracker.update(Some(170.0), 900);
        tracker.update(None, 1_000);
        tracker.reset();

        assert_eq!(tracker, HoldTracker::new(160.0, 180.0));
    }
}
