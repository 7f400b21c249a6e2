//! Per-frame session update
//!
//! Order within a frame: move + touch, escapes, miss limit, spawn, difficulty.

use glam::IVec2;

use super::collision::first_touching;
use super::difficulty::DifficultyController;
use super::state::{GameEvent, GamePhase, GameSession, TerminalReason};

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput<'a> {
    /// Fingertip positions in screen pixels, scan order matters for first-match
    pub fingertips: &'a [IVec2],
}

impl<'a> TickInput<'a> {
    pub fn with_fingertips(fingertips: &'a [IVec2]) -> Self {
        Self { fingertips }
    }
}

/// Advance the session by one frame of `dt` seconds
pub fn tick(session: &mut GameSession, input: &TickInput<'_>, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if session.phase.is_terminal() {
        return events;
    }

    session.frame += 1;

    let fall_speed = session.pace.fall_speed;
    let threshold = session.tuning.touch_threshold;
    let height = session.tuning.height;
    let mut score = session.score;
    let mut missed = session.missed;

    // Touched targets are dropped before the escape check so nothing is removed twice
    session.targets.retain_mut(|target| {
        target.advance(fall_speed, dt);

        if let Some(finger) = first_touching(input.fingertips, target.center(), threshold) {
            score = score.saturating_add_signed(target.value);
            log::debug!(
                "Finger {} touched {:?} target {} ({:+}), score {}",
                finger,
                target.color,
                target.id,
                target.value,
                score
            );
            events.push(GameEvent::Touched {
                id: target.id,
                color: target.color,
                value: target.value,
                finger,
            });
            return false;
        }

        if target.is_off_screen(height) {
            if target.is_missable {
                missed += 1;
            }
            log::debug!(
                "{:?} target {} escaped{}",
                target.color,
                target.id,
                if target.is_missable { ", missed" } else { "" }
            );
            events.push(GameEvent::Escaped {
                id: target.id,
                color: target.color,
                counted_as_miss: target.is_missable,
            });
            return false;
        }

        true
    });

    session.score = score;
    session.missed = missed;

    if session.missed >= session.tuning.miss_limit {
        session.phase = GamePhase::Terminal(TerminalReason::MissLimitReached);
        log::info!(
            "Miss limit reached: score {}, missed {}",
            session.score,
            session.missed
        );
        events.push(GameEvent::MissLimitReached);
    } else {
        session.time_since_last_spawn += dt;
        if session.time_since_last_spawn > session.pace.spawn_interval {
            let target = session.spawn_target();
            events.push(GameEvent::Spawned {
                id: target.id,
                color: target.color,
            });
            session.time_since_last_spawn = 0.0;
        }
    }

    let controller = DifficultyController::from_tuning(&session.tuning);
    if controller.adjust(session.score, session.last_observed_score, &mut session.pace) {
        log::info!(
            "Difficulty up at score {}: fall speed {:.1}, spawn interval {:.1}s",
            session.score,
            session.pace.fall_speed,
            session.pace.spawn_interval
        );
        events.push(GameEvent::DifficultyStep {
            fall_speed: session.pace.fall_speed,
            spawn_interval: session.pace.spawn_interval,
        });
    }
    session.last_observed_score = session.score;

    events
}

impl GameSession {
    /// Run one frame with the given fingertips
    pub fn update(&mut self, dt: f32, fingertips: &[IVec2]) -> Vec<GameEvent> {
        tick(self, &TickInput::with_fingertips(fingertips), dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FRAME_DT, SCREEN_HEIGHT, SCREEN_WIDTH};
    use crate::settings::{DifficultyTrigger, Tuning};
    use crate::sim::state::TargetColor;
    use glam::Vec2;

    fn session() -> GameSession {
        GameSession::new(Tuning::default(), Some(12345))
    }

    fn center_tip(session: &GameSession, index: usize) -> IVec2 {
        session.targets()[index].center().round().as_ivec2()
    }

    #[test]
    fn test_green_touch_scores_one() {
        let mut session = session();
        let pos = Vec2::new(SCREEN_WIDTH / 2.0 - 15.0, SCREEN_HEIGHT / 2.0 - 15.0);
        let id = session.place_target(TargetColor::Green, pos);
        let tip = center_tip(&session, 0);

        let events = session.update(FRAME_DT, &[tip]);

        assert_eq!(session.score(), 1);
        assert_eq!(session.missed(), 0);
        assert!(session.targets().is_empty());
        assert!(events.iter().any(|e| matches!(e, GameEvent::Touched { id: t, .. } if *t == id)));
    }

    #[test]
    fn test_missable_escape_counts() {
        let mut session = session();
        session.place_target(TargetColor::Green, Vec2::new(100.0, SCREEN_HEIGHT + 1.0));

        session.update(FRAME_DT, &[]);

        assert_eq!(session.missed(), 1);
        assert!(session.targets().is_empty());
    }

    #[test]
    fn test_red_escape_is_not_a_miss() {
        let mut session = session();
        session.place_target(TargetColor::Red, Vec2::new(100.0, SCREEN_HEIGHT));

        let events = session.update(FRAME_DT, &[IVec2::new(900, 100)]);

        assert_eq!(session.missed(), 0);
        assert!(session.targets().is_empty());
        assert!(events.contains(&GameEvent::Escaped {
            id: 1,
            color: TargetColor::Red,
            counted_as_miss: false,
        }));
    }

    #[test]
    fn test_red_touch_penalizes_and_clamps() {
        let mut session = session();
        session.score = 3;
        session.last_observed_score = 3;
        session.place_target(TargetColor::Red, Vec2::new(200.0, 200.0));
        let tip = center_tip(&session, 0);
        session.update(FRAME_DT, &[tip]);
        assert_eq!(session.score(), 2);

        session.score = 0;
        session.last_observed_score = 0;
        session.place_target(TargetColor::Red, Vec2::new(200.0, 200.0));
        let tip = center_tip(&session, 0);
        session.update(FRAME_DT, &[tip]);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_miss_limit_ends_session() {
        let mut session = session();
        session.missed = 4;
        session.time_since_last_spawn = 100.0;
        session.place_target(TargetColor::Blue, Vec2::new(10.0, SCREEN_HEIGHT));

        let events = session.update(FRAME_DT, &[]);

        assert_eq!(session.missed(), 5);
        assert_eq!(
            session.phase(),
            GamePhase::Terminal(TerminalReason::MissLimitReached)
        );
        assert!(events.contains(&GameEvent::MissLimitReached));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Spawned { .. })));
        assert!(session.targets().is_empty());

        // Terminal sessions ignore further updates
        let frame = session.frame();
        let events = session.update(10.0, &[]);
        assert!(events.is_empty());
        assert!(session.targets().is_empty());
        assert_eq!(session.frame(), frame);
    }

    #[test]
    fn test_score_ten_steps_difficulty() {
        let mut session = session();
        session.score = 9;
        session.last_observed_score = 9;
        session.place_target(TargetColor::Green, Vec2::new(600.0, 300.0));
        let tip = center_tip(&session, 0);

        let events = session.update(FRAME_DT, &[tip]);

        assert_eq!(session.score(), 10);
        assert!((session.fall_speed() - 1.6).abs() < 1e-5);
        assert!((session.spawn_interval() - 2.7).abs() < 1e-5);
        assert!(events.iter().any(|e| matches!(e, GameEvent::DifficultyStep { .. })));

        // Score lingers at 10: edge trigger does not fire again
        session.update(FRAME_DT, &[]);
        assert!((session.fall_speed() - 1.6).abs() < 1e-5);
    }

    #[test]
    fn test_level_trigger_refires_while_score_lingers() {
        let tuning = Tuning {
            difficulty_trigger: DifficultyTrigger::Level,
            ..Default::default()
        };
        let mut session = GameSession::new(tuning, Some(1));
        session.score = 10;
        session.update(FRAME_DT, &[]);
        session.update(FRAME_DT, &[]);
        assert!((session.fall_speed() - 1.7).abs() < 1e-5);
    }

    #[test]
    fn test_two_fingers_one_target() {
        let mut session = session();
        session.place_target(TargetColor::Green, Vec2::new(400.0, 400.0));
        let tip = center_tip(&session, 0);
        let near = tip + IVec2::new(5, 0);

        let events = session.update(FRAME_DT, &[near, tip]);

        assert_eq!(session.score(), 1);
        assert!(session.targets().is_empty());
        let touches: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::Touched { finger, .. } => Some(*finger),
                _ => None,
            })
            .collect();
        assert_eq!(touches, vec![0]);
    }

    #[test]
    fn test_one_finger_claims_overlapping_targets() {
        let mut session = session();
        session.place_target(TargetColor::Green, Vec2::new(400.0, 400.0));
        session.place_target(TargetColor::Blue, Vec2::new(405.0, 400.0));
        let tip = center_tip(&session, 0);

        session.update(FRAME_DT, &[tip]);

        assert_eq!(session.score(), 6);
        assert!(session.targets().is_empty());
    }

    #[test]
    fn test_touch_beats_escape_in_same_frame() {
        let mut session = session();
        session.place_target(TargetColor::Green, Vec2::new(50.0, SCREEN_HEIGHT));
        let tip = center_tip(&session, 0);

        session.update(FRAME_DT, &[tip]);

        assert_eq!(session.score(), 1);
        assert_eq!(session.missed(), 0);
    }

    #[test]
    fn test_spawn_cadence() {
        let mut session = session();
        // 2.5s at 60 Hz is 150 frames; the spawn fires once the timer exceeds it
        let mut spawned_at = None;
        for frame in 1..=200 {
            let events = session.update(FRAME_DT, &[]);
            if events.iter().any(|e| matches!(e, GameEvent::Spawned { .. })) {
                spawned_at = Some(frame);
                break;
            }
        }
        let frame = spawned_at.unwrap();
        assert!((150..=152).contains(&frame), "spawned at frame {}", frame);
        assert_eq!(session.targets().len(), 1);
        assert_eq!(session.time_since_last_spawn(), 0.0);
    }

    #[test]
    fn test_survivors_keep_spawn_order() {
        let mut session = session();
        let a = session.place_target(TargetColor::Green, Vec2::new(10.0, 10.0));
        let b = session.place_target(TargetColor::Red, Vec2::new(300.0, 10.0));
        let c = session.place_target(TargetColor::Blue, Vec2::new(600.0, 10.0));
        let tip = center_tip(&session, 1);

        session.update(FRAME_DT, &[tip]);

        let ids: Vec<u32> = session.targets().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![a, c]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_tick_borrows_fingertips() {
        let mut session = session();
        let id = session.place_target(TargetColor::Blue, Vec2::new(100.0, 100.0));
        let tips = vec![IVec2::new(900, 50), IVec2::new(115, 117)];

        let events = tick(&mut session, &TickInput::with_fingertips(&tips), FRAME_DT);

        assert_eq!(session.score(), 5);
        assert_eq!(
            events,
            vec![GameEvent::Touched {
                id,
                color: TargetColor::Blue,
                value: 5,
                finger: 1,
            }]
        );
        // Caller still owns the fingertips
        assert_eq!(tips.len(), 2);

        let events = tick(&mut session, &TickInput::default(), FRAME_DT);
        assert!(events.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut session1 = GameSession::new(Tuning::default(), Some(99999));
        let mut session2 = GameSession::new(Tuning::default(), Some(99999));

        for _ in 0..1000 {
            session1.update(FRAME_DT, &[IVec2::new(640, 600)]);
            session2.update(FRAME_DT, &[IVec2::new(640, 600)]);
        }

        assert_eq!(session1.targets(), session2.targets());
        assert_eq!(session1.score(), session2.score());
        assert_eq!(session1.missed(), session2.missed());
    }
}
