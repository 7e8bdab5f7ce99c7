use bevy::prelude::*;

use crate::utils::constants::game_constants::{KEYBINDS_FILE, LEADERBOARD_FILE};
use crate::utils::cube::CubeSim;
use crate::utils::keybinds::Keybinds;
use crate::utils::leaderboard::Leaderboard;
use crate::utils::objects::{
    CommittedMoves, ControlsEnabled, GameState, PendingReset, RandomGen,
};

/// Wires the whole game together: the cube engine resource, the config
/// files, and every system in its frame order.
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CubeSim>()
            .init_resource::<GameState>()
            .init_resource::<ControlsEnabled>()
            .init_resource::<PendingReset>()
            .init_resource::<CommittedMoves>()
            .init_resource::<RandomGen>()
            .insert_resource(Keybinds::load_or_default(KEYBINDS_FILE))
            .insert_resource(Leaderboard::load_or_default(LEADERBOARD_FILE))
            .add_systems(
                Startup,
                (
                    crate::utils::setup::setup_environment,
                    crate::utils::setup::spawn_cube_system,
                ),
            )
            .add_systems(PreUpdate, crate::utils::game_functions::clear_committed_moves)
            .add_systems(
                Update,
                (
                    // Input first, then the engine tick, then everything
                    // that reacts to what the engine did this frame.
                    crate::utils::inputs::handle_keyboard_input,
                    crate::utils::game_functions::drive_cube,
                    crate::utils::game_functions::handle_committed_moves,
                    crate::utils::game_functions::check_solved,
                    crate::utils::game_functions::handle_reset_command,
                    crate::utils::game_functions::sync_cube_transforms,
                    crate::utils::game_functions::game_ui,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    crate::utils::camera::orbit_camera_mouse,
                    crate::utils::camera::orbit_camera_keyboard,
                ),
            );
    }
}
