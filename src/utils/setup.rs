//! Scene setup: persistent camera and lights, and spawning the 27 cubelet
//! entities that mirror the cube model.

use bevy::prelude::*;

use crate::log;
use crate::utils::constants::camera_3d_constants::{
    CAMERA_3D_INITIAL_X, CAMERA_3D_INITIAL_Y, CAMERA_3D_INITIAL_Z,
};
use crate::utils::constants::cube_constants::{
    BACKGROUND_COLOR, CUBELET_BODY_COLOR, CUBELET_SIZE, STICKER_OFFSET, STICKER_SIZE,
};
use crate::utils::cube::CubeSim;
use crate::utils::moves::Face;
use crate::utils::objects::{CubeletBody, GameEntity, PersistentCamera, Sticker};

/// Initial scene: camera, lights, and background.
/// These entities persist across cube resets.
pub fn setup_environment(mut commands: Commands) {
    // This camera persists across resets to avoid artifacts.
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(CAMERA_3D_INITIAL_X, CAMERA_3D_INITIAL_Y, CAMERA_3D_INITIAL_Z)
            .looking_at(Vec3::ZERO, Vec3::Y),
        PersistentCamera,
    ));

    // Key light
    commands.spawn((
        DirectionalLight {
            illuminance: 12_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(20.0, 20.0, 20.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Ambient fill so the faces turned away from the key light stay readable
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
        affects_lightmapped_meshes: true,
    });

    commands.insert_resource(ClearColor(BACKGROUND_COLOR));

    log!("🎮 Cube Timer Started!");
    log!("⌨️  Scramble with SPACE, turn faces with your bound keys");
}

/// Startup wrapper around [`spawn_cube`].
pub fn spawn_cube_system(
    commands: Commands,
    meshes: ResMut<Assets<Mesh>>,
    materials: ResMut<Assets<StandardMaterial>>,
    sim: Res<CubeSim>,
) {
    spawn_cube(commands, meshes, materials, &sim);
}

/// Spawns one entity per cubelet in the model: a dark body cuboid with a
/// colored sticker quad child for every outward facelet. All of them carry
/// `GameEntity` so a reset can clear and respawn the scene.
pub fn spawn_cube(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    sim: &CubeSim,
) {
    let body_mesh = meshes.add(Cuboid::new(CUBELET_SIZE, CUBELET_SIZE, CUBELET_SIZE));
    let body_material = materials.add(StandardMaterial {
        base_color: CUBELET_BODY_COLOR,
        perceptual_roughness: 0.6,
        ..default()
    });
    let sticker_mesh = meshes.add(Rectangle::new(STICKER_SIZE, STICKER_SIZE));

    for (index, cubelet) in sim.cubelets().iter().enumerate() {
        let body = commands
            .spawn((
                Mesh3d(body_mesh.clone()),
                MeshMaterial3d(body_material.clone()),
                Transform {
                    translation: cubelet.position,
                    rotation: cubelet.rotation,
                    scale: Vec3::ONE,
                },
                CubeletBody { index },
                GameEntity,
            ))
            .id();

        for face in Face::ALL {
            let Some(color) = cubelet.facelets[face.slot()] else {
                continue;
            };
            let normal = face.normal();
            // Rectangle meshes face +Z; swing them onto the facelet normal
            // and nudge them off the body to avoid z-fighting.
            let rotation = Quat::from_rotation_arc(Vec3::Z, normal);
            commands.spawn((
                Mesh3d(sticker_mesh.clone()),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: color.color(),
                    perceptual_roughness: 0.3,
                    ..default()
                })),
                Transform {
                    translation: normal * STICKER_OFFSET,
                    rotation,
                    scale: Vec3::ONE,
                },
                Sticker,
                GameEntity,
                ChildOf(body),
            ));
        }
    }
}
