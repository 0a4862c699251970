/// Thresholds deciding when a card enters and leaves the struggling queue.
#[derive(Debug, Clone, PartialEq)]
pub struct StrugglingPolicy {
    /// Consecutive misses that mark a card as struggling.
    pub consecutive_failures: u32,
    /// Miss ratio over the last `min_attempts_for_ratio` answers that also
    /// marks a card.
    pub failure_ratio: f64,
    pub min_attempts_for_ratio: u32,
    /// Consecutive correct answers that take a card out of the queue.
    pub graduation_streak: u32,
}

impl Default for StrugglingPolicy {
    fn default() -> Self {
        Self {
            consecutive_failures: 2,
            failure_ratio: 0.6,
            min_attempts_for_ratio: 5,
            graduation_streak: 1,
        }
    }
}

impl StrugglingPolicy {
    /// Whether `failure_count` misses among the `total_attempts` most recent
    /// answers mark a card. Windows shorter than `min_attempts_for_ratio`
    /// are never judged.
    pub fn should_mark_as_struggling(&self, failure_count: u32, total_attempts: u32) -> bool {
        if failure_count == 0 || total_attempts < self.min_attempts_for_ratio {
            return false;
        }
        f64::from(failure_count) / f64::from(total_attempts) >= self.failure_ratio
    }

    /// Judges a card from its outcomes, newest first. Only a miss can mark:
    /// either a run of `consecutive_failures`, or the miss ratio over the
    /// last `min_attempts_for_ratio` answers.
    pub fn is_struggling(&self, outcomes: &[bool]) -> bool {
        if outcomes.first() != Some(&false) {
            return false;
        }
        if leading_run(outcomes, false) >= self.consecutive_failures {
            return true;
        }

        let window = &outcomes[..outcomes.len().min(self.min_attempts_for_ratio as usize)];
        let misses = window.iter().filter(|&&correct| !correct).count() as u32;
        self.should_mark_as_struggling(misses, window.len() as u32)
    }

    pub fn has_recovered(&self, correct_streak: u32) -> bool {
        correct_streak >= self.graduation_streak
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.consecutive_failures == 0 {
            return Err("STRUGGLING_CONSECUTIVE_FAILURES must be at least 1".into());
        }
        if !(self.failure_ratio > 0.0 && self.failure_ratio <= 1.0) {
            return Err("STRUGGLING_FAILURE_RATIO must be in (0, 1]".into());
        }
        if self.min_attempts_for_ratio == 0 {
            return Err("STRUGGLING_MIN_ATTEMPTS must be at least 1".into());
        }
        if self.graduation_streak == 0 {
            return Err("STRUGGLING_GRADUATION_STREAK must be at least 1".into());
        }
        Ok(())
    }
}

/// Length of the run of `value` at the front of `outcomes` (newest first).
pub fn leading_run(outcomes: &[bool], value: bool) -> u32 {
    outcomes.iter().take_while(|&&o| o == value).count() as u32
}
