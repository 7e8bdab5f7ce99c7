// Constants used in the game, structured into modules.

/// 3D camera
pub mod camera_3d_constants {
    pub const CAMERA_3D_INITIAL_X: f32 = -20.0;
    pub const CAMERA_3D_INITIAL_Y: f32 = 20.0;
    pub const CAMERA_3D_INITIAL_Z: f32 = 30.0;

    pub const CAMERA_3D_ORBIT_SENSITIVITY: f32 = 0.005;
    pub const CAMERA_3D_SPEED_ROTATE: f32 = 1.5;
    pub const CAMERA_3D_SPEED_ZOOM: f32 = 12.0;

    // Radius range for the camera's orbit.
    pub const CAMERA_3D_MIN_RADIUS: f32 = 15.0;
    pub const CAMERA_3D_MAX_RADIUS: f32 = 60.0;

    // Pitch limits so the orbit never flips over the poles.
    pub const CAMERA_3D_MAX_PITCH_RAD: f32 = 1.45;
}

/// Cube geometry and turn animation
pub mod cube_constants {
    use bevy::prelude::Color;

    // Cubelets per edge. The engine is written for the classic 3x3x3.
    pub const CUBE_DIMENSIONS: usize = 3;
    pub const CUBELET_COUNT: usize = CUBE_DIMENSIONS * CUBE_DIMENSIONS * CUBE_DIMENSIONS;

    pub const CUBELET_SIZE: f32 = 3.0;
    pub const CUBELET_GAP: f32 = 0.25;
    // Center-to-center distance between neighbouring cubelets.
    pub const CUBELET_STEP: f32 = CUBELET_SIZE + CUBELET_GAP;

    // Angle advanced per tick while a face turn is animating, in radians.
    pub const TURN_STEP_RAD: f32 = 0.1;
    // A turn is considered complete once within this tolerance of the target.
    pub const TURN_ANGLE_EPSILON: f32 = 1e-3;

    // Sticker quads sit slightly proud of the cubelet body to avoid z-fighting.
    pub const STICKER_SIZE: f32 = 2.55;
    pub const STICKER_OFFSET: f32 = CUBELET_SIZE / 2.0 + 0.015;

    // Face colors in fixed slot order: Right, Left, Up, Down, Front, Back.
    pub const FACE_COLORS: [Color; 6] = [
        Color::srgb(0.961, 0.255, 0.094), // Right: orange
        Color::srgb(0.820, 0.067, 0.180), // Left: red
        Color::srgb(1.0, 1.0, 1.0),       // Up: white
        Color::srgb(1.0, 0.784, 0.141),   // Down: yellow
        Color::srgb(0.188, 0.227, 0.941), // Front: blue
        Color::srgb(0.031, 0.820, 0.031), // Back: green
    ];

    // Uncolored cubelet body (interior facelets show this).
    pub const CUBELET_BODY_COLOR: Color = Color::srgb(0.05, 0.05, 0.05);

    pub const BACKGROUND_COLOR: Color = Color::srgb(0.102, 0.114, 0.169);
}

/// Generic game constants
pub mod game_constants {
    pub const REFRESH_RATE_HZ: f64 = 60.0; // Hz

    // Seed for the random number generator.
    pub const SEED: u64 = 69;

    // Number of random moves applied by a scramble.
    pub const SCRAMBLE_LENGTH: usize = 20;

    // Leaderboard keeps this many fastest solves.
    pub const LEADERBOARD_CAPACITY: usize = 15;
    pub const DEFAULT_PLAYER_NAME: &str = "Player";

    // Config files, written next to the executable's working directory.
    pub const KEYBINDS_FILE: &str = "keybinds.toml";
    pub const LEADERBOARD_FILE: &str = "leaderboard.toml";
}

/// HUD layout
pub mod ui_constants {
    pub const HUD_MARGIN_PX: f32 = 10.0;
    pub const TIMER_FONT_SIZE: f32 = 34.0;
    pub const STATUS_FONT_SIZE: f32 = 24.0;
    pub const HINT_FONT_SIZE: f32 = 16.0;
    pub const LEADERBOARD_FONT_SIZE: f32 = 18.0;
}
