//! Keyboard handling: bound move keys plus the fixed control keys.

use bevy::prelude::*;

use bevy::window::{MonitorSelection, PrimaryWindow, VideoModeSelection, WindowMode};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::utils::cube::CubeSim;
use crate::utils::game_functions::start_scramble;
use crate::utils::keybinds::Keybinds;
use crate::utils::objects::{
    CommittedMoves, ControlsEnabled, GameState, PendingReset, RandomGen,
};

/// Atomic index to cycle different display modes
static DISPLAY_RING_IDX: AtomicUsize = AtomicUsize::new(0);

/// Cycle between windowed and fullscreen modes (ESC)
pub fn toggle_display_mode_ring(window: &mut Window) {
    // Compute the next index in a cycle of 2 (0, 1, 0, 1, ...)
    let next = (DISPLAY_RING_IDX.fetch_add(1, Ordering::SeqCst) + 1) % 2;
    DISPLAY_RING_IDX.store(next, Ordering::SeqCst);

    let mode = match next {
        1 => WindowMode::Windowed,
        0 => WindowMode::Fullscreen(MonitorSelection::Current, VideoModeSelection::Current),
        _ => unreachable!(),
    };

    #[cfg(not(target_arch = "wasm32"))]
    {
        window.mode = mode;
    }
    #[cfg(target_arch = "wasm32")]
    let _ = (window, mode);
}

/// Handles all key presses: control keys first, then bound move keys.
///
/// Control keys are fixed; move keys come from the user's key table and are
/// only honored while move input is enabled.
pub fn handle_keyboard_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    keybinds: Res<Keybinds>,
    mut sim: ResMut<CubeSim>,
    mut game_state: ResMut<GameState>,
    mut controls: ResMut<ControlsEnabled>,
    mut pending_reset: ResMut<PendingReset>,
    mut committed: ResMut<CommittedMoves>,
    mut random_gen: ResMut<RandomGen>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        if let Ok(mut window) = windows.single_mut() {
            toggle_display_mode_ring(&mut window);
        }
    }

    if keyboard.just_pressed(KeyCode::Space) && !game_state.scrambling {
        start_scramble(
            &mut sim,
            &mut random_gen,
            &mut game_state,
            &mut controls,
            &mut committed,
        );
    }

    if keyboard.just_pressed(KeyCode::Enter) {
        handle_start_key(&mut game_state, time.elapsed());
    }

    if keyboard.just_pressed(KeyCode::Backspace) {
        // Reset Time: stop the clock and forget the attempt, cube untouched.
        game_state.reset();
    }

    if keyboard.just_pressed(KeyCode::Delete) {
        pending_reset.0 = true;
    }

    if keyboard.just_pressed(KeyCode::KeyT) {
        controls.0 = !controls.0;
    }

    if !controls.0 {
        return;
    }

    for key in keyboard.get_just_pressed() {
        let Some(mv) = keybinds.move_for(*key) else {
            continue;
        };
        // Starts now or is queued behind the turn in flight; either way the
        // submission order is the execution order.
        if let Some(started) = sim.rotate_face(mv) {
            committed.0.push(started);
        }
    }
}

/// Start / Stop / Continue, matching the control panel button: stops a
/// running timer, continues a stopped attempt, or arms a fresh one.
fn handle_start_key(game_state: &mut GameState, now: Duration) {
    if game_state.timer_running {
        game_state.stop_timer(now);
        return;
    }
    if !game_state.solve_mode {
        game_state.clear_timer();
        game_state.solved = None;
    }
    game_state.start_timer(now);
    game_state.started = true;
    game_state.solve_mode = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_key_cycles_run_stop_continue() {
        let mut state = GameState::default();

        handle_start_key(&mut state, Duration::from_millis(0));
        assert!(state.timer_running && state.started && state.solve_mode);

        handle_start_key(&mut state, Duration::from_millis(800));
        assert!(!state.timer_running);
        assert_eq!(state.elapsed(Duration::from_millis(9_999)), Duration::from_millis(800));

        // Continue keeps the accumulated time.
        handle_start_key(&mut state, Duration::from_millis(2_000));
        assert!(state.timer_running);
        assert_eq!(state.elapsed(Duration::from_millis(2_100)), Duration::from_millis(900));
    }

    #[test]
    fn starting_outside_solve_mode_zeroes_the_clock() {
        let mut state = GameState::default();
        state.start_timer(Duration::from_millis(0));
        state.stop_timer(Duration::from_millis(5_000));
        state.solve_mode = false;
        state.solved = Some(false);

        handle_start_key(&mut state, Duration::from_millis(6_000));
        assert_eq!(state.elapsed(Duration::from_millis(6_000)), Duration::ZERO);
        assert_eq!(state.solved, None);
        assert!(state.timer_running);
    }
}
