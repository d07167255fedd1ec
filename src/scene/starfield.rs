//! Distant starfield shell. Always visible; it is what the burst dissolves
//! into once the tree particles fade.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use crate::core::config::StarfieldConfig;
use crate::particles::ParticleField;
use crate::scene::material::PointCloudMaterial;
use crate::scene::point_mesh;

const DRIFT_SPIN: f32 = 0.01;

#[derive(Component)]
pub struct Starfield;

/// Uniformly distributed directions, radii pulled toward the outer shell.
pub fn sample_shell(cfg: &StarfieldConfig, rng: &mut impl Rng) -> ParticleField {
    let mut positions = Vec::with_capacity(cfg.count);
    let mut colors = Vec::with_capacity(cfg.count);
    for _ in 0..cfg.count {
        let theta = rng.gen::<f32>() * TAU;
        // uniform over the sphere, not the poles
        let cos_phi = rng.gen::<f32>() * 2.0 - 1.0;
        let sin_phi = (1.0 - cos_phi * cos_phi).sqrt();
        let radius = cfg.radius - rng.gen::<f32>() * cfg.depth;
        positions.push(
            Vec3::new(sin_phi * theta.cos(), cos_phi, sin_phi * theta.sin()) * radius,
        );
        // mostly white with a cold or warm cast
        let warm = rng.gen::<f32>() * 0.3;
        colors.push([1.0, 1.0 - warm * 0.3, 1.0 - warm, 1.0]);
    }
    let count = positions.len();
    ParticleField::new(
        positions,
        Some(colors),
        vec![Vec3::ZERO; count],
        vec![0.0; count],
        vec![0.0; count],
    )
}

pub fn spawn(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<PointCloudMaterial>,
    cfg: &StarfieldConfig,
    rng: &mut impl Rng,
) {
    let field = sample_shell(cfg, rng);
    let mesh = meshes.add(point_mesh(&field));
    let material = materials.add(PointCloudMaterial::new(Color::WHITE, 0.8, 1.0));
    commands.spawn((
        Starfield,
        field,
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::default(),
    ));
}

pub fn animate(
    time: Res<Time>,
    mut materials: ResMut<Assets<PointCloudMaterial>>,
    mut q: Query<(&mut Transform, &MeshMaterial3d<PointCloudMaterial>), With<Starfield>>,
) {
    let t = time.elapsed_secs();
    for (mut transform, handle) in &mut q {
        transform.rotate_y(DRIFT_SPIN * time.delta_secs());
        if let Some(material) = materials.get_mut(&handle.0) {
            // gentle global twinkle
            material.set_style(0.8, 0.9 + (t * 0.5).sin() * 0.1);
        }
    }
}
