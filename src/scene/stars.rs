use bevy::prelude::*;
use rand::Rng;

use crate::config::PageConfig;

const STAR_RADIUS: f32 = 0.12;

#[derive(Component)]
pub struct StarField;

/// A single point of the field; `size` is its own random scale.
#[derive(Component)]
pub struct Star {
    pub size: f32,
}

/// Points spread uniformly over directions, at distances in `[radius, radius + depth]`.
pub fn star_positions(rng: &mut impl Rng, count: usize, radius: f32, depth: f32) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            let z: f32 = rng.gen_range(-1.0..=1.0);
            let theta: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
            let ring = (1.0 - z * z).max(0.0).sqrt();
            let dir = Vec3::new(ring * theta.cos(), ring * theta.sin(), z);
            dir * (radius + rng.gen_range(0.0..=depth))
        })
        .collect()
}

/// Spawns the star field as one parent with a child per star. `density`
/// scales every star.
pub fn spawn_star_field(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: &PageConfig,
    density: f32,
) -> Entity {
    let mut rng = rand::thread_rng();
    let mesh = meshes.add(Sphere::new(STAR_RADIUS));
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        emissive: LinearRgba::rgb(2.0, 2.0, 2.0),
        unlit: true,
        ..default()
    });

    let positions = star_positions(&mut rng, config.star_count, config.star_radius, config.star_depth);
    commands
        .spawn((SpatialBundle::default(), StarField, Name::new("stars")))
        .with_children(|parent| {
            for pos in positions {
                let size = rng.gen_range(0.5..1.5);
                parent.spawn((
                    PbrBundle {
                        mesh: mesh.clone(),
                        material: material.clone(),
                        transform: Transform::from_translation(pos)
                            .with_scale(Vec3::splat(size * density)),
                        ..default()
                    },
                    Star { size },
                ));
            }
        })
        .id()
}

pub fn scale_stars(density: f32, stars: &mut Query<(&mut Transform, &Star)>) {
    for (mut t, star) in stars.iter_mut() {
        t.scale = Vec3::splat(star.size * density.max(0.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn stars_sit_inside_the_shell() {
        let mut rng = StdRng::seed_from_u64(11);
        let positions = star_positions(&mut rng, 5000, 100.0, 50.0);
        assert_eq!(positions.len(), 5000);
        for p in positions {
            let d = p.length();
            assert!((99.99..=150.01).contains(&d), "{d}");
        }
    }

    #[test]
    fn stars_cover_both_hemispheres() {
        let mut rng = StdRng::seed_from_u64(5);
        let positions = star_positions(&mut rng, 1000, 10.0, 1.0);
        assert!(positions.iter().any(|p| p.z > 0.0));
        assert!(positions.iter().any(|p| p.z < 0.0));
    }
}
