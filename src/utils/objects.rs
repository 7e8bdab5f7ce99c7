// This file defines the various objects, resources, and components used in the game.
use bevy::prelude::*;
use rand_chacha::rand_core::SeedableRng;
use std::time::Duration;

use crate::utils::constants::game_constants::SEED;
use crate::utils::moves::Move;
use rand_chacha::ChaCha8Rng;

/// A component that marks an entity as part of the cube scene, cleared and
/// respawned on cube reset.
#[derive(Component)]
pub struct GameEntity;

/// A component that marks an entity as a UI entity.
#[derive(Component)]
pub struct UIEntity;

/// A component that marks an entity as persistent (not despawned on reset).
#[derive(Component)]
pub struct PersistentCamera;

/// Marks a cubelet body entity and ties it to its index in the cube model.
#[derive(Component)]
pub struct CubeletBody {
    pub index: usize,
}

/// Marks a sticker quad, spawned as a child of a cubelet body.
#[derive(Component)]
pub struct Sticker;

/// Whether move keys are honored. Advisory: only the input layer consults
/// it; the camera and the move queue ignore it.
#[derive(Resource)]
pub struct ControlsEnabled(pub bool);

impl Default for ControlsEnabled {
    fn default() -> Self {
        ControlsEnabled(true)
    }
}

/// Pending cube reset request. Stays set while a turn is rotating and is
/// retried once the animator is idle again.
#[derive(Resource, Default)]
pub struct PendingReset(pub bool);

/// Moves that began executing since the last frame. Written by the input and
/// engine-drive systems, consumed once per frame, cleared in `PreUpdate`.
#[derive(Resource, Default)]
pub struct CommittedMoves(pub Vec<Move>);

/// Timer and solve-flow state, mirroring the game's control panel actions:
/// scramble, start/stop/continue, reset time, reset cube.
#[derive(Resource, Clone, Default, Debug)]
pub struct GameState {
    /// The timer is counting.
    pub timer_running: bool,
    /// A solve attempt exists; the start key now means stop/continue.
    pub started: bool,
    /// A scramble finished and the cube waits for the first solve move.
    pub shuffle_finished: bool,
    /// Scramble moves are still draining through the queue.
    pub scrambling: bool,
    /// Solved checks run and the timer stops on success.
    pub solve_mode: bool,
    /// Result of the last solved check, `None` before the first one.
    pub solved: Option<bool>,

    // Metrics
    /// Moves committed since the last scramble or reset.
    pub move_count: u32,

    // Timing
    accumulated: Duration,
    run_started_at: Option<Duration>,
}

impl GameState {
    /// Elapsed solve time given the app clock's current reading.
    pub fn elapsed(&self, now: Duration) -> Duration {
        match self.run_started_at {
            Some(started_at) => self.accumulated + now.saturating_sub(started_at),
            None => self.accumulated,
        }
    }

    pub fn start_timer(&mut self, now: Duration) {
        if !self.timer_running {
            self.run_started_at = Some(now);
            self.timer_running = true;
        }
    }

    pub fn stop_timer(&mut self, now: Duration) {
        if self.timer_running {
            self.accumulated = self.elapsed(now);
            self.run_started_at = None;
            self.timer_running = false;
        }
    }

    /// Zeroes the clock without touching the solve-flow flags.
    pub fn clear_timer(&mut self) {
        self.timer_running = false;
        self.run_started_at = None;
        self.accumulated = Duration::ZERO;
    }

    /// Back to the pre-scramble state, timer at zero.
    pub fn reset(&mut self) {
        *self = GameState::default();
    }
}

/// A resource for random number generation.
#[derive(Resource)]
pub struct RandomGen {
    pub random_gen: ChaCha8Rng,
}

impl RandomGen {
    // Creates a new `RandomGen` from a given seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            random_gen: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomGen {
    // Creates a new `RandomGen` with the default seed.
    fn default() -> Self {
        Self {
            random_gen: ChaCha8Rng::seed_from_u64(SEED),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_accumulates_across_stop_and_continue() {
        let mut state = GameState::default();
        state.start_timer(Duration::from_millis(1_000));
        assert_eq!(
            state.elapsed(Duration::from_millis(1_500)),
            Duration::from_millis(500)
        );

        state.stop_timer(Duration::from_millis(2_000));
        // Frozen while stopped.
        assert_eq!(
            state.elapsed(Duration::from_millis(9_000)),
            Duration::from_millis(1_000)
        );

        state.start_timer(Duration::from_millis(10_000));
        assert_eq!(
            state.elapsed(Duration::from_millis(10_250)),
            Duration::from_millis(1_250)
        );
    }

    #[test]
    fn reset_zeroes_everything() {
        let mut state = GameState::default();
        state.start_timer(Duration::from_millis(100));
        state.move_count = 7;
        state.solved = Some(false);
        state.reset();
        assert!(!state.timer_running);
        assert_eq!(state.move_count, 0);
        assert_eq!(state.solved, None);
        assert_eq!(state.elapsed(Duration::from_millis(500)), Duration::ZERO);
    }
}
