//! Score-driven difficulty scaling
//!
//! Each step makes targets fall faster but spawn less often.

use serde::{Deserialize, Serialize};

use crate::settings::{DifficultyTrigger, Tuning};

/// Current fall speed and spawn cadence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pace {
    /// Pixels per reference frame
    pub fall_speed: f32,
    /// Seconds between spawns
    pub spawn_interval: f32,
}

/// Stateless difficulty policy derived from tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyController {
    pub trigger: DifficultyTrigger,
    pub score_step: u32,
    pub fall_speed_step: f32,
    pub spawn_interval_step: f32,
    pub spawn_interval_ceiling: f32,
}

impl DifficultyController {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            trigger: tuning.difficulty_trigger,
            score_step: tuning.difficulty_score_step,
            fall_speed_step: tuning.fall_speed_step,
            spawn_interval_step: tuning.spawn_interval_step,
            spawn_interval_ceiling: tuning.spawn_interval_ceiling,
        }
    }

    /// Whether `score` is a positive multiple of the step
    pub fn on_threshold(&self, score: u32) -> bool {
        score > 0 && score.is_multiple_of(self.score_step)
    }

    /// Whether a step fires given this frame's score and the last one observed
    pub fn should_step(&self, score: u32, previous_score: u32) -> bool {
        if !self.on_threshold(score) {
            return false;
        }
        match self.trigger {
            DifficultyTrigger::Edge => score != previous_score,
            DifficultyTrigger::Level => true,
        }
    }

    /// Evaluate one frame; returns true if the pace changed
    pub fn adjust(&self, score: u32, previous_score: u32, pace: &mut Pace) -> bool {
        if !self.should_step(score, previous_score) {
            return false;
        }
        pace.fall_speed += self.fall_speed_step;
        pace.spawn_interval =
            (pace.spawn_interval + self.spawn_interval_step).min(self.spawn_interval_ceiling);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> Pace {
        Pace {
            fall_speed: 1.5,
            spawn_interval: 2.5,
        }
    }

    #[test]
    fn test_step_at_ten() {
        let controller = DifficultyController::from_tuning(&Tuning::default());
        let mut pace = start();
        assert!(controller.adjust(10, 9, &mut pace));
        assert!((pace.fall_speed - 1.6).abs() < 1e-5);
        assert!((pace.spawn_interval - 2.7).abs() < 1e-5);
    }

    #[test]
    fn test_no_step_off_threshold() {
        let controller = DifficultyController::from_tuning(&Tuning::default());
        let mut pace = start();
        for score in [0, 1, 9, 11, 25] {
            assert!(!controller.adjust(score, 0, &mut pace));
        }
        assert_eq!(pace, start());
    }

    #[test]
    fn test_edge_trigger_is_idempotent() {
        let controller = DifficultyController::from_tuning(&Tuning::default());
        let mut pace = start();
        assert!(controller.adjust(20, 15, &mut pace));
        let after_first = pace;
        assert!(!controller.adjust(20, 20, &mut pace));
        assert_eq!(pace, after_first);
    }

    #[test]
    fn test_level_trigger_repeats() {
        let tuning = Tuning {
            difficulty_trigger: DifficultyTrigger::Level,
            ..Default::default()
        };
        let controller = DifficultyController::from_tuning(&tuning);
        let mut pace = start();
        assert!(controller.adjust(10, 10, &mut pace));
        assert!(controller.adjust(10, 10, &mut pace));
        assert!((pace.fall_speed - 1.7).abs() < 1e-5);
    }

    #[test]
    fn test_spawn_interval_ceiling() {
        let controller = DifficultyController::from_tuning(&Tuning::default());
        let mut pace = start();
        for i in 1..=10 {
            controller.adjust(i * 10, i * 10 - 1, &mut pace);
        }
        assert_eq!(pace.spawn_interval, 3.5);
        assert!((pace.fall_speed - 2.5).abs() < 1e-4);
    }
}
