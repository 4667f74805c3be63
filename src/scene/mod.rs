//! 3D content of the landing and experience views.

pub mod experience;
pub mod fade;
pub mod landing;
pub mod stars;

use bevy::core_pipeline::bloom::BloomSettings;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::MainCamera;

pub use experience::ExperiencePlugin;
pub use landing::LandingPlugin;

/// Spins around Y at `speed` radians per second.
#[derive(Component)]
pub struct Spin {
    pub speed: f32,
}

/// Every material spawned below this entity (e.g. by a glTF scene) is
/// swapped for the given one.
#[derive(Component, Clone)]
pub struct MaterialOverride(pub Handle<StandardMaterial>);

pub struct ScenePlugin;
impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((LandingPlugin, ExperiencePlugin))
            .add_systems(Update, (spin, apply_material_overrides));
    }
}

fn spin(time: Res<Time>, mut q: Query<(&mut Transform, &Spin)>) {
    for (mut t, spin) in &mut q {
        t.rotate_y(spin.speed * time.delta_seconds());
    }
}

fn apply_material_overrides(
    mut commands: Commands,
    added: Query<(Entity, &Handle<StandardMaterial>), Added<Handle<StandardMaterial>>>,
    parents: Query<&Parent>,
    overrides: Query<&MaterialOverride>,
) {
    for (entity, handle) in &added {
        let mut ancestor = Some(entity);
        while let Some(current) = ancestor {
            if let Ok(MaterialOverride(material)) = overrides.get(current) {
                if handle != material {
                    commands.entity(entity).insert(material.clone());
                }
                break;
            }
            ancestor = parents.get(current).ok().map(Parent::get);
        }
    }
}

/// Moves the main camera and sets its vertical field of view and bloom.
pub fn place_camera(
    camera: &mut Query<(&mut Transform, &mut Projection, &mut BloomSettings), With<MainCamera>>,
    position: Vec3,
    fov_degrees: f32,
    bloom_intensity: f32,
) {
    let Ok((mut transform, mut projection, mut bloom)) = camera.get_single_mut() else {
        return;
    };
    *transform = Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y);
    if let Projection::Perspective(perspective) = projection.as_mut() {
        perspective.fov = fov_degrees.to_radians();
    }
    bloom.intensity = bloom_intensity;
}

/// Size of the visible area on a plane `distance` away from a perspective camera.
pub fn viewport_size(fov_y: f32, aspect_ratio: f32, distance: f32) -> Vec2 {
    let height = 2.0 * distance * (fov_y * 0.5).tan();
    Vec2::new(height * aspect_ratio, height)
}

/// Per-frame lerp factor tuned at 60 fps, rescaled for an arbitrary `dt`.
pub fn frame_smoothing(per_frame: f32, dt: f32) -> f32 {
    1.0 - (1.0 - per_frame.clamp(0.0, 1.0)).powf(dt * 60.0)
}

pub fn ray_hits_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> bool {
    let dir = direction.normalize_or_zero();
    let to_center = center - origin;
    let along = to_center.dot(dir);
    if along < 0.0 {
        return to_center.length_squared() <= radius * radius;
    }
    let closest = origin + dir * along;
    closest.distance_squared(center) <= radius * radius
}

/// Aspect ratio and perspective fov of the main camera in the primary window.
pub fn view_frustum(
    windows: &Query<&Window, With<PrimaryWindow>>,
    projection: &Projection,
) -> Option<(f32, f32)> {
    let window = windows.get_single().ok()?;
    let Projection::Perspective(perspective) = projection else {
        return None;
    };
    let aspect = window.width() / window.height().max(1.0);
    Some((perspective.fov, aspect))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn viewport_at_ninety_degrees() {
        let size = viewport_size(FRAC_PI_2, 2.0, 4.0);
        assert!((size.y - 8.0).abs() < 1e-4);
        assert!((size.x - 16.0).abs() < 1e-4);
    }

    #[test]
    fn smoothing_matches_per_frame_factor_at_60fps() {
        assert!((frame_smoothing(0.05, 1.0 / 60.0) - 0.05).abs() < 1e-5);
        assert_eq!(frame_smoothing(0.05, 0.0), 0.0);
        assert!(frame_smoothing(0.05, 1.0 / 30.0) > 0.05);
    }

    #[test]
    fn ray_through_center_hits() {
        assert!(ray_hits_sphere(
            Vec3::new(0.0, 0.0, 8.0),
            Vec3::NEG_Z,
            Vec3::ZERO,
            1.0
        ));
    }

    #[test]
    fn ray_off_to_the_side_misses() {
        assert!(!ray_hits_sphere(
            Vec3::new(3.0, 0.0, 8.0),
            Vec3::NEG_Z,
            Vec3::ZERO,
            1.0
        ));
    }

    #[test]
    fn sphere_behind_ray_misses() {
        assert!(!ray_hits_sphere(
            Vec3::new(0.0, 0.0, 8.0),
            Vec3::Z,
            Vec3::ZERO,
            1.0
        ));
    }
}
