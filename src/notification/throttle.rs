//! Progress redraw throttling.
//!
//! Only `Downloading` events are ever suppressed. Every other state, and any
//! progress at or above 100, always flushes.

use super::types::TaskState;

/// Watermark value after a reset; far enough below zero that the first
/// downloading event always clears the delta.
pub const WATERMARK_RESET: i32 = -100;

/// Smallest progress delta worth a redraw.
pub const DEFAULT_MIN_DELTA: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottlePolicy {
    min_delta: i32,
}

impl ThrottlePolicy {
    /// A `min_delta` below 1 is raised to 1.
    pub fn new(min_delta: i32) -> Self {
        Self {
            min_delta: min_delta.max(1),
        }
    }

    pub fn min_delta(&self) -> i32 {
        self.min_delta
    }

    pub fn should_flush(&self, watermark: i32, progress: i32, state: TaskState) -> bool {
        state != TaskState::Downloading
            || progress >= 100
            || progress.saturating_sub(watermark) >= self.min_delta
    }

    /// Watermark after a directive for `state` at `progress` has been flushed.
    pub fn next_watermark(&self, watermark: i32, progress: i32, state: TaskState) -> i32 {
        if state.resets_watermark() {
            WATERMARK_RESET
        } else if state == TaskState::Downloading {
            watermark.max(progress)
        } else {
            watermark
        }
    }
}

impl Default for ThrottlePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_DELTA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_point_delta_suppressed() {
        let policy = ThrottlePolicy::default();
        assert!(!policy.should_flush(40, 41, TaskState::Downloading));
        assert!(!policy.should_flush(40, 40, TaskState::Downloading));
        assert!(!policy.should_flush(40, 12, TaskState::Downloading));
    }

    #[test]
    fn test_two_point_delta_flushes() {
        let policy = ThrottlePolicy::default();
        assert!(policy.should_flush(40, 42, TaskState::Downloading));
    }

    #[test]
    fn test_hundred_always_flushes() {
        let policy = ThrottlePolicy::default();
        assert!(policy.should_flush(99, 100, TaskState::Downloading));
        assert!(policy.should_flush(100, 100, TaskState::Downloading));
    }

    #[test]
    fn test_non_downloading_always_flushes() {
        let policy = ThrottlePolicy::default();
        for state in TaskState::ALL {
            if state != TaskState::Downloading {
                assert!(policy.should_flush(40, 40, state), "{} must flush", state);
            }
        }
    }

    #[test]
    fn test_reset_watermark_lets_first_progress_through() {
        let policy = ThrottlePolicy::default();
        assert!(policy.should_flush(WATERMARK_RESET, 0, TaskState::Downloading));
        assert_eq!(
            policy.next_watermark(77, 0, TaskState::Pending),
            WATERMARK_RESET
        );
        assert_eq!(
            policy.next_watermark(77, 0, TaskState::Prepare),
            WATERMARK_RESET
        );
    }

    #[test]
    fn test_watermark_monotonic_while_downloading() {
        let policy = ThrottlePolicy::default();
        assert_eq!(policy.next_watermark(40, 42, TaskState::Downloading), 42);
        assert_eq!(policy.next_watermark(100, 100, TaskState::Downloading), 100);
        assert_eq!(policy.next_watermark(60, 30, TaskState::Downloading), 60);
        assert_eq!(policy.next_watermark(60, 0, TaskState::Success), 60);
    }

    #[test]
    fn test_min_delta_floor() {
        assert_eq!(ThrottlePolicy::new(0).min_delta(), 1);
        assert_eq!(ThrottlePolicy::new(5).min_delta(), 5);
    }
}
