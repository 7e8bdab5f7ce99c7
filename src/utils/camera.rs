//! Orbit camera around the cube: mouse drag to look, arrow keys to orbit
//! and zoom. The camera always faces the origin; the cube itself never
//! world-rotates, so slice selection stays axis-aligned.

use bevy::{input::mouse::MouseMotion, prelude::*};

use crate::utils::constants::camera_3d_constants::{
    CAMERA_3D_MAX_PITCH_RAD, CAMERA_3D_MAX_RADIUS, CAMERA_3D_MIN_RADIUS,
    CAMERA_3D_ORBIT_SENSITIVITY, CAMERA_3D_SPEED_ROTATE, CAMERA_3D_SPEED_ZOOM,
};
use crate::utils::objects::PersistentCamera;

/// Mouse-drag orbit (left button held).
pub fn orbit_camera_mouse(
    buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion_events: MessageReader<MouseMotion>,
    mut camera_query: Query<&mut Transform, With<PersistentCamera>>,
) {
    // Always drain the events, even on frames where the drag is inactive.
    let mut delta = Vec2::ZERO;
    for event in mouse_motion_events.read() {
        delta += event.delta;
    }
    if delta == Vec2::ZERO || !buttons.pressed(MouseButton::Left) {
        return;
    }

    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };
    apply_orbit(
        &mut transform,
        -delta.x * CAMERA_3D_ORBIT_SENSITIVITY,
        -delta.y * CAMERA_3D_ORBIT_SENSITIVITY,
        0.0,
    );
}

/// Arrow-key orbit and zoom.
pub fn orbit_camera_keyboard(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut camera_query: Query<&mut Transform, With<PersistentCamera>>,
) {
    let mut yaw = 0.0;
    let mut zoom = 0.0;
    if keyboard.pressed(KeyCode::ArrowLeft) {
        yaw += CAMERA_3D_SPEED_ROTATE * time.delta_secs();
    }
    if keyboard.pressed(KeyCode::ArrowRight) {
        yaw -= CAMERA_3D_SPEED_ROTATE * time.delta_secs();
    }
    if keyboard.pressed(KeyCode::ArrowUp) {
        zoom -= CAMERA_3D_SPEED_ZOOM * time.delta_secs();
    }
    if keyboard.pressed(KeyCode::ArrowDown) {
        zoom += CAMERA_3D_SPEED_ZOOM * time.delta_secs();
    }
    if yaw == 0.0 && zoom == 0.0 {
        return;
    }

    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };
    apply_orbit(&mut transform, yaw, 0.0, zoom);
}

/// Moves the camera on its orbit sphere: yaw free, pitch clamped away from
/// the poles, radius clamped to the zoom range. Looks at the origin after.
fn apply_orbit(transform: &mut Transform, delta_yaw: f32, delta_pitch: f32, delta_radius: f32) {
    let translation = transform.translation;
    let radius = (translation.length() + delta_radius)
        .clamp(CAMERA_3D_MIN_RADIUS, CAMERA_3D_MAX_RADIUS);

    let mut yaw = translation.x.atan2(translation.z);
    let mut pitch = (translation.y / translation.length()).asin();
    yaw += delta_yaw;
    pitch = (pitch + delta_pitch).clamp(-CAMERA_3D_MAX_PITCH_RAD, CAMERA_3D_MAX_PITCH_RAD);

    let horizontal = radius * pitch.cos();
    transform.translation = Vec3::new(
        horizontal * yaw.sin(),
        radius * pitch.sin(),
        horizontal * yaw.cos(),
    );
    transform.look_at(Vec3::ZERO, Vec3::Y);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_is_clamped_to_the_radius_range() {
        let mut transform = Transform::from_xyz(0.0, 0.0, 30.0);
        apply_orbit(&mut transform, 0.0, 0.0, 1_000.0);
        assert!((transform.translation.length() - CAMERA_3D_MAX_RADIUS).abs() < 1e-3);

        apply_orbit(&mut transform, 0.0, 0.0, -1_000.0);
        assert!((transform.translation.length() - CAMERA_3D_MIN_RADIUS).abs() < 1e-3);
    }

    #[test]
    fn pitch_never_crosses_the_pole() {
        let mut transform = Transform::from_xyz(0.0, 10.0, 30.0);
        for _ in 0..100 {
            apply_orbit(&mut transform, 0.0, 0.5, 0.0);
        }
        let pitch = (transform.translation.y / transform.translation.length()).asin();
        assert!(pitch <= CAMERA_3D_MAX_PITCH_RAD + 1e-3);
        // Still upright and looking at the cube.
        let to_origin = -transform.translation.normalize();
        assert!(transform.forward().dot(to_origin) > 0.99);
    }

    #[test]
    fn yaw_orbit_keeps_the_radius() {
        let mut transform = Transform::from_xyz(0.0, 12.0, 25.0);
        let radius = transform.translation.length();
        apply_orbit(&mut transform, 1.0, 0.0, 0.0);
        assert!((transform.translation.length() - radius).abs() < 1e-3);
    }
}
