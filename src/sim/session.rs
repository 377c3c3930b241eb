//! Game session state machine
//!
//! `GameSession` owns the avatar, the candlesticks and the score. It changes
//! only through `start`, `jump` and `tick`; everything else reads it.
//!
//! Phases: Idle -> Playing -> GameOver -> Playing ... A run in `Playing`
//! stays frozen until the first jump: ticks count frames but nothing falls,
//! spawns, scrolls or scores.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::first_hit;
use super::physics::{StepOutcome, advance_obstacles, step_avatar};
use super::snapshot::FrameSnapshot;
use super::spawn::{spawn_due, spawn_obstacle};
use super::state::{Avatar, CrashCause, GameEvent, GamePhase, Obstacle};
use crate::config::GameConfig;
use crate::error::ConfigError;

/// One player's game, across restarts
#[derive(Debug, Clone)]
pub struct GameSession<R = Pcg32> {
    config: GameConfig,
    phase: GamePhase,
    score: u64,
    /// Best score since the session was created (never persisted)
    high_score: u64,
    /// Ticks since the last start, including the frozen ones before the first jump
    frame: u64,
    avatar: Avatar,
    /// Spawn order, which is also left-to-right order
    obstacles: Vec<Obstacle>,
    awaiting_first_input: bool,
    rng: R,
    events: Vec<GameEvent>,
}

impl GameSession<Pcg32> {
    /// Create an idle session with a seeded candlestick generator
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: RngCore> GameSession<R> {
    /// Create an idle session drawing candlesticks from `rng`
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            avatar: Avatar::spawn(&config),
            config,
            phase: GamePhase::Idle,
            score: 0,
            high_score: 0,
            frame: 0,
            obstacles: Vec::new(),
            awaiting_first_input: true,
            rng,
            events: Vec::new(),
        })
    }

    /// Begin a fresh run. Ignored while a run is in progress.
    pub fn start(&mut self) {
        if self.phase == GamePhase::Playing {
            log::debug!("start ignored, run already in progress");
            return;
        }

        self.avatar = Avatar::spawn(&self.config);
        self.obstacles.clear();
        self.score = 0;
        self.frame = 0;
        self.awaiting_first_input = true;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Started);

        log::info!(
            "Run started ({}), high score {}",
            self.config.difficulty.as_str(),
            self.high_score
        );
    }

    /// Flap upward. Returns false (and does nothing) unless playing.
    ///
    /// Takes effect on the next tick's displacement.
    pub fn jump(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }

        if self.awaiting_first_input {
            self.awaiting_first_input = false;
            self.events.push(GameEvent::FirstInput);
        }
        self.avatar.vel_y = self.config.jump_impulse;
        self.events.push(GameEvent::Jumped);
        true
    }

    /// Single-button input: start when not playing, otherwise jump
    pub fn press(&mut self) {
        match self.phase {
            GamePhase::Playing => {
                self.jump();
            }
            GamePhase::Idle | GamePhase::GameOver => self.start(),
        }
    }

    /// Advance the simulation by one frame
    pub fn tick(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }

        self.frame += 1;
        if self.awaiting_first_input {
            return;
        }

        if step_avatar(&mut self.avatar, &self.config) == StepOutcome::HitFloor {
            self.end_run(CrashCause::Floor);
            return;
        }

        if spawn_due(self.frame, &self.config) {
            let obstacle = spawn_obstacle(&self.config, &mut self.rng);
            log::debug!(
                "Spawned {:?} candlestick, height {:.1}",
                obstacle.trend,
                obstacle.height
            );
            self.events.push(GameEvent::Spawned {
                x: obstacle.x,
                height: obstacle.height,
                trend: obstacle.trend,
            });
            self.obstacles.push(obstacle);
        }

        advance_obstacles(&mut self.obstacles, &self.config);

        if first_hit(&self.avatar, &self.obstacles, &self.config).is_some() {
            self.end_run(CrashCause::Obstacle);
            return;
        }

        if self.frame.is_multiple_of(self.config.score_interval) {
            self.score += 1;
            log::debug!("Score {}", self.score);
            self.events.push(GameEvent::Scored { score: self.score });
        }
    }

    fn end_run(&mut self, cause: CrashCause) {
        self.phase = GamePhase::GameOver;
        self.high_score = self.high_score.max(self.score);
        self.events.push(GameEvent::GameOver {
            score: self.score,
            high_score: self.high_score,
            cause,
        });
        log::info!(
            "Game over ({:?}) at frame {}: score {}, high score {}",
            cause,
            self.frame,
            self.score,
            self.high_score
        );
    }

    /// Take all events since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(self)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_idle(&self) -> bool {
        self.phase == GamePhase::Idle
    }

    pub fn awaiting_first_input(&self) -> bool {
        self.awaiting_first_input
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Trend;
    use proptest::prelude::*;

    fn session(seed: u64) -> GameSession {
        GameSession::new(GameConfig::default(), seed).expect("default config is valid")
    }

    /// Keep the avatar hovering around mid-screen
    fn hover(game: &mut GameSession) {
        if game.avatar().pos.y > 300.0 && game.avatar().vel_y > 0.0 {
            game.jump();
        }
    }

    #[test]
    fn test_starts_idle() {
        let game = session(1);
        assert!(game.is_idle());
        assert_eq!(game.score(), 0);
        assert!(game.obstacles().is_empty());
    }

    #[test]
    fn test_rejects_bad_config() {
        let mut config = GameConfig::default();
        config.score_interval = 0;
        assert!(GameSession::new(config, 1).is_err());
    }

    #[test]
    fn test_idle_ignores_jump_and_tick() {
        let mut game = session(1);
        assert!(!game.jump());
        game.tick();
        assert!(game.is_idle());
        assert_eq!(game.frame(), 0);
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_frozen_until_first_jump() {
        let mut game = session(1);
        game.start();
        for _ in 0..150 {
            game.tick();
        }
        assert!(game.is_playing());
        assert!(game.awaiting_first_input());
        assert_eq!(game.frame(), 150);
        assert_eq!(game.avatar().pos.y, 300.0);
        assert_eq!(game.avatar().vel_y, 0.0);
        assert!(game.obstacles().is_empty());
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_first_jump_engages_physics() {
        let mut game = session(1);
        game.start();
        assert!(game.jump());
        assert!(!game.awaiting_first_input());

        game.tick();
        assert_eq!(game.avatar().pos.y, 290.0);
        assert_eq!(game.avatar().vel_y, -9.5);

        let events = game.drain_events();
        assert_eq!(
            events,
            vec![GameEvent::Started, GameEvent::FirstInput, GameEvent::Jumped]
        );
    }

    #[test]
    fn test_falling_to_floor_ends_run() {
        let mut game = session(1);
        game.start();
        game.jump();
        let mut ticks = 0;
        while game.is_playing() {
            game.tick();
            ticks += 1;
            assert!(ticks < 1000, "avatar never landed");
        }
        assert!(game.is_game_over());
        assert_eq!(game.avatar().pos.y, game.config().floor_y());
        let last = game.drain_events().pop();
        assert!(matches!(
            last,
            Some(GameEvent::GameOver {
                cause: CrashCause::Floor,
                ..
            })
        ));
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut game = session(1);
        game.start();
        game.jump();
        while game.is_playing() {
            game.tick();
        }
        let frozen = game.snapshot();
        assert!(!game.jump());
        game.tick();
        assert_eq!(game.snapshot(), frozen);
    }

    #[test]
    fn test_start_while_playing_is_noop() {
        let mut game = session(1);
        game.start();
        game.jump();
        for _ in 0..10 {
            game.tick();
        }
        let before = game.snapshot();
        game.start();
        assert_eq!(game.snapshot(), before);
        assert!(!game.awaiting_first_input());
    }

    #[test]
    fn test_score_cadence_normal() {
        let mut game = session(5);
        game.start();
        game.jump();
        let mut scored_at = Vec::new();
        for _ in 0..99 {
            hover(&mut game);
            game.tick();
            for event in game.drain_events() {
                if let GameEvent::Scored { score } = event {
                    scored_at.push((game.frame(), score));
                }
            }
        }
        assert!(game.is_playing(), "hovering should survive the opening");
        assert_eq!(scored_at, vec![(50, 1)]);
    }

    #[test]
    fn test_score_cadence_easy() {
        let mut game = GameSession::new(GameConfig::easy(), 5).expect("valid");
        game.start();
        game.jump();
        for _ in 0..100 {
            if game.avatar().pos.y > 300.0 && game.avatar().vel_y > 0.0 {
                game.jump();
            }
            game.tick();
            if game.frame() == 50 {
                assert_eq!(game.score(), 0);
            }
        }
        assert!(game.is_playing());
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn test_spawn_joins_tail_and_scrolls() {
        let mut game = session(9);
        game.start();
        game.jump();
        for _ in 0..100 {
            hover(&mut game);
            game.tick();
        }
        assert_eq!(game.obstacles().len(), 1);
        // Spawned at the right edge and scrolled once on the same tick
        assert_eq!(game.obstacles()[0].x, 797.0);
        assert!(
            game.drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::Spawned { x, .. } if *x == 800.0))
        );
    }

    #[test]
    fn test_obstacle_hit_ends_run() {
        let mut game = session(2);
        game.start();
        game.jump();
        // Bearish wick hanging down into the avatar's path
        game.obstacles.push(Obstacle {
            x: 83.0,
            y: 0.0,
            height: 300.0,
            trend: Trend::Bearish,
        });
        game.tick();
        assert!(game.is_game_over());
        let last = game.drain_events().pop();
        assert!(matches!(
            last,
            Some(GameEvent::GameOver {
                cause: CrashCause::Obstacle,
                ..
            })
        ));
    }

    #[test]
    fn test_restart_keeps_high_score() {
        let mut game = session(3);
        game.start();
        game.jump();
        game.score = 7;
        game.end_run(CrashCause::Obstacle);
        assert_eq!(game.high_score(), 7);

        game.start();
        assert!(game.is_playing());
        assert_eq!(game.score(), 0);
        assert_eq!(game.frame(), 0);
        assert!(game.obstacles().is_empty());
        assert!(game.awaiting_first_input());
        assert_eq!(game.avatar(), &Avatar::spawn(game.config()));
        assert_eq!(game.high_score(), 7);

        // A worse run doesn't lower it
        game.jump();
        game.score = 2;
        game.end_run(CrashCause::Floor);
        assert_eq!(game.high_score(), 7);
    }

    #[test]
    fn test_restart_after_floor_crash_keeps_high_score() {
        let mut game = session(5);
        game.start();
        game.jump();
        while game.score() == 0 {
            hover(&mut game);
            game.tick();
            assert!(game.is_playing());
        }
        let scored = game.score();

        // Stop flapping and drop to the floor
        for _ in 0..200 {
            game.tick();
            if game.is_game_over() {
                break;
            }
        }
        assert!(game.is_game_over());
        assert!(game.drain_events().iter().any(|e| matches!(
            e,
            GameEvent::GameOver {
                cause: CrashCause::Floor,
                ..
            }
        )));
        assert_eq!(game.score(), scored);
        assert_eq!(game.high_score(), scored);

        game.start();
        assert!(game.is_playing());
        assert_eq!(game.score(), 0);
        assert_eq!(game.high_score(), scored);
    }

    #[test]
    fn test_press_starts_then_jumps() {
        let mut game = session(4);
        game.press();
        assert!(game.is_playing());
        assert!(game.awaiting_first_input());
        game.press();
        assert!(!game.awaiting_first_input());
        assert_eq!(game.avatar().vel_y, game.config().jump_impulse);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = session(1234);
        let mut b = session(1234);
        for game in [&mut a, &mut b] {
            game.start();
            game.jump();
            for _ in 0..600 {
                hover(game);
                game.tick();
            }
        }
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.drain_events(), b.drain_events());
    }

    proptest! {
        #[test]
        fn prop_obstacles_never_overtake(seed in any::<u64>(), ticks in 100u32..1200) {
            let mut game = session(seed);
            game.start();
            game.jump();
            for _ in 0..ticks {
                hover(&mut game);
                game.tick();
                let xs: Vec<f32> = game.obstacles().iter().map(|o| o.x).collect();
                prop_assert!(xs.windows(2).all(|w| w[0] < w[1]));
                let y = game.avatar().pos.y;
                prop_assert!(y >= 0.0 && y <= game.config().floor_y());
                if !game.is_playing() {
                    break;
                }
            }
        }
    }
}
