//! Core game logic and UI functions: driving the cube engine each frame,
//! the scramble and solve flow, and the HUD.
use bevy::prelude::*;

use rand::Rng;

use crate::log;
use crate::utils::constants::game_constants::{
    DEFAULT_PLAYER_NAME, LEADERBOARD_FILE, SCRAMBLE_LENGTH,
};
use crate::utils::constants::ui_constants::{
    HINT_FONT_SIZE, HUD_MARGIN_PX, LEADERBOARD_FONT_SIZE, STATUS_FONT_SIZE, TIMER_FONT_SIZE,
};
use crate::utils::cube::CubeSim;
use crate::utils::leaderboard::Leaderboard;
use crate::utils::moves::Move;
use crate::utils::objects::{
    CommittedMoves, ControlsEnabled, CubeletBody, GameEntity, GameState, PendingReset, RandomGen,
    UIEntity,
};
use crate::utils::setup::spawn_cube;

/// Runs in `PreUpdate` so every frame starts with a clean commit list.
pub fn clear_committed_moves(mut committed: ResMut<CommittedMoves>) {
    committed.0.clear();
}

/// Advances the active turn by one step and records any queued move that
/// began this frame. Also notices the moment a scramble finishes draining.
pub fn drive_cube(
    mut sim: ResMut<CubeSim>,
    mut committed: ResMut<CommittedMoves>,
    mut game_state: ResMut<GameState>,
    mut controls: ResMut<ControlsEnabled>,
) {
    if let Some(mv) = sim.tick() {
        committed.0.push(mv);
    }

    if game_state.scrambling && sim.is_settled() {
        game_state.scrambling = false;
        game_state.shuffle_finished = true;
        controls.0 = true;
        log!("🔀 Scramble complete, solve away!");
    }
}

/// Consumes the moves that began this frame: counts them and starts the
/// solve clock on the first one after a finished scramble.
pub fn handle_committed_moves(
    time: Res<Time>,
    committed: Res<CommittedMoves>,
    mut game_state: ResMut<GameState>,
) {
    for _ in &committed.0 {
        if game_state.scrambling {
            continue;
        }
        game_state.move_count += 1;
        if game_state.shuffle_finished && !game_state.started {
            game_state.started = true;
            game_state.solve_mode = true;
            game_state.start_timer(time.elapsed());
        }
    }
}

/// Kicks off a scramble: fresh state, move input off, and a burst of random
/// moves that the queue serializes in submission order.
pub fn start_scramble(
    sim: &mut CubeSim,
    random_gen: &mut RandomGen,
    game_state: &mut GameState,
    controls: &mut ControlsEnabled,
    committed: &mut CommittedMoves,
) {
    game_state.reset();
    game_state.scrambling = true;
    controls.0 = false;

    for _ in 0..SCRAMBLE_LENGTH {
        let mv = Move::ALL[random_gen.random_gen.random_range(0..Move::ALL.len())];
        if let Some(started) = sim.rotate_face(mv) {
            committed.0.push(started);
        }
    }
    log!("🔀 Scrambling with {SCRAMBLE_LENGTH} random moves");
}

/// Watches for the solved cube. Only meaningful once the engine is idle, so
/// mid-animation frames are skipped; a success stops the clock, freezes move
/// input, and records the time.
pub fn check_solved(
    time: Res<Time>,
    sim: Res<CubeSim>,
    mut game_state: ResMut<GameState>,
    mut controls: ResMut<ControlsEnabled>,
    mut leaderboard: ResMut<Leaderboard>,
) {
    if !game_state.solve_mode || game_state.scrambling {
        return;
    }
    if !sim.is_settled() || game_state.move_count == 0 {
        return;
    }

    let solved = sim.is_solved();
    game_state.solved = Some(solved);
    if !solved {
        return;
    }

    let now = time.elapsed();
    game_state.stop_timer(now);
    game_state.solve_mode = false;
    controls.0 = false;

    let elapsed_ms = game_state.elapsed(now).as_millis() as u64;
    if leaderboard.add_score(DEFAULT_PLAYER_NAME, elapsed_ms) {
        leaderboard.save(LEADERBOARD_FILE);
    }

    log!("🎉 SOLVED in {}!", format_time(elapsed_ms));
    log!("🎯 Moves used: {}", game_state.move_count);
}

/// Unified reset handler. Rejected by the engine while a turn is rotating,
/// in which case the request stays pending and is retried next frame.
pub fn handle_reset_command(
    mut pending_reset: ResMut<PendingReset>,
    mut commands: Commands,
    meshes: ResMut<Assets<Mesh>>,
    materials: ResMut<Assets<StandardMaterial>>,
    mut sim: ResMut<CubeSim>,
    mut game_state: ResMut<GameState>,
    mut controls: ResMut<ControlsEnabled>,
    game_entities: Query<Entity, With<GameEntity>>,
) {
    if !pending_reset.0 {
        return;
    }
    // Tearing down mid-rotation would desync the visuals from the model.
    if !sim.reset() {
        return;
    }
    pending_reset.0 = false;

    game_state.reset();
    controls.0 = true;

    for entity in &game_entities {
        commands.entity(entity).try_despawn();
    }
    spawn_cube(commands, meshes, materials, &sim);

    log!("🧊 Cube reset to solved");
}

/// Mirrors the model into the entity transforms, every frame.
pub fn sync_cube_transforms(
    sim: Res<CubeSim>,
    mut query: Query<(&CubeletBody, &mut Transform)>,
) {
    for (body, mut transform) in query.iter_mut() {
        let Some(cubelet) = sim.cubelets().get(body.index) else {
            continue;
        };
        transform.translation = cubelet.position;
        transform.rotation = cubelet.rotation;
    }
}

/// HUD: timer, status, move counter, leaderboard, and key hints.
pub fn game_ui(
    mut commands: Commands,
    time: Res<Time>,
    game_state: Res<GameState>,
    leaderboard: Res<Leaderboard>,
    controls: Res<ControlsEnabled>,
    query: Query<Entity, With<UIEntity>>,
) {
    // Clear old UI
    for entity in &query {
        commands.entity(entity).despawn();
    }

    let elapsed_ms = game_state.elapsed(time.elapsed()).as_millis() as u64;
    commands.spawn((
        Text::new(format_time(elapsed_ms)),
        TextFont {
            font_size: TIMER_FONT_SIZE,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(HUD_MARGIN_PX),
            left: Val::Px(HUD_MARGIN_PX),
            ..default()
        },
        UIEntity,
    ));

    let status = if game_state.scrambling {
        "🔀 Scrambling...".to_string()
    } else {
        match game_state.solved {
            Some(true) => format!("✅ Solved! | Moves: {}", game_state.move_count),
            Some(false) => format!("❌ Not solved yet | Moves: {}", game_state.move_count),
            None if game_state.shuffle_finished => "🎯 Make a move to start the timer".to_string(),
            None => "Press SPACE to scramble".to_string(),
        }
    };
    commands.spawn((
        Text::new(status),
        TextFont {
            font_size: STATUS_FONT_SIZE,
            ..default()
        },
        TextColor(Color::srgb(0.9, 0.9, 0.9)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(HUD_MARGIN_PX + TIMER_FONT_SIZE + 12.0),
            left: Val::Px(HUD_MARGIN_PX),
            ..default()
        },
        UIEntity,
    ));

    let mut board_text = String::from("Leaderboard:\n");
    if leaderboard.entries().is_empty() {
        board_text.push_str("No scores yet.");
    } else {
        for (rank, entry) in leaderboard.entries().iter().enumerate() {
            board_text.push_str(&format!(
                "#{} {} {}\n",
                rank + 1,
                entry.name,
                format_time(entry.time_ms)
            ));
        }
    }
    commands.spawn((
        Text::new(board_text),
        TextFont {
            font_size: LEADERBOARD_FONT_SIZE,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.8, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(HUD_MARGIN_PX),
            right: Val::Px(HUD_MARGIN_PX),
            ..default()
        },
        UIEntity,
    ));

    let hint = if controls.0 {
        "SPACE: Scramble | ENTER: Start/Stop | BACKSPACE: Reset Time | DEL: Reset Cube | T: Lock Moves | Drag: Orbit"
    } else {
        "Move keys locked | T: Unlock | SPACE: Scramble"
    };
    commands.spawn((
        Text::new(hint),
        TextFont {
            font_size: HINT_FONT_SIZE,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.8, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(HUD_MARGIN_PX),
            left: Val::Px(HUD_MARGIN_PX),
            ..default()
        },
        UIEntity,
    ));
}

/// Renders milliseconds as `m:ss.cc`.
pub fn format_time(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let centis = (ms % 1_000) / 10;
    format!("{minutes}:{seconds:02}.{centis:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_matches_the_timer_display() {
        assert_eq!(format_time(0), "0:00.00");
        assert_eq!(format_time(90), "0:00.09");
        assert_eq!(format_time(1_010), "0:01.01");
        assert_eq!(format_time(61_230), "1:01.23");
        assert_eq!(format_time(600_000), "10:00.00");
    }

    #[test]
    fn scramble_enqueues_the_full_sequence() {
        let mut sim = CubeSim::new();
        let mut random_gen = RandomGen::from_seed(7);
        let mut game_state = GameState::default();
        let mut controls = ControlsEnabled::default();
        let mut committed = CommittedMoves::default();

        start_scramble(
            &mut sim,
            &mut random_gen,
            &mut game_state,
            &mut controls,
            &mut committed,
        );

        assert!(game_state.scrambling);
        assert!(!controls.0);
        // One move starts immediately, the rest wait in the queue.
        assert_eq!(committed.0.len(), 1);
        assert!(sim.is_rotating());
        assert_eq!(sim.queue_len(), SCRAMBLE_LENGTH - 1);
    }

    #[test]
    fn scramble_drains_to_an_unsolved_idle_cube() {
        let mut sim = CubeSim::new();
        let mut random_gen = RandomGen::from_seed(42);
        let mut game_state = GameState::default();
        let mut controls = ControlsEnabled::default();
        let mut committed = CommittedMoves::default();

        start_scramble(
            &mut sim,
            &mut random_gen,
            &mut game_state,
            &mut controls,
            &mut committed,
        );

        let mut total_committed = committed.0.len();
        for _ in 0..100_000 {
            if sim.tick().is_some() {
                total_committed += 1;
            }
            if sim.is_settled() {
                break;
            }
        }
        assert!(sim.is_settled());
        assert_eq!(total_committed, SCRAMBLE_LENGTH);
        // A 20-move scramble never lands back on solved in practice; the
        // fixed seed makes this deterministic.
        assert!(!sim.is_solved());
    }
}
