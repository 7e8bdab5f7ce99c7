//! Declaration of the modules for rubiks_3d_game.

pub mod utils {
    pub mod camera;
    pub mod constants;
    pub mod cube;
    pub mod game_functions;
    pub mod inputs;
    pub mod keybinds;
    pub mod leaderboard;
    pub mod macros;
    pub mod moves;
    pub mod objects;
    pub mod setup;
}

pub mod plugins {
    pub mod game_plugin;
}
