//! Spiral ribbon point cloud wrapping the tree cone.

use bevy::prelude::*;
use rand::Rng;

use crate::animation::explosion::{self, Profile};
use crate::animation::idle;
use crate::animation::ExplosionState;
use crate::core::config::CardConfig;
use crate::particles::{sampling, ParticleField};
use crate::scene::material::PointCloudMaterial;
use crate::scene::point_mesh;

const RIBBON_TINT: Color = Color::srgb(1.0, 0.84, 0.35);

#[derive(Component)]
pub struct RibbonCloud;

pub fn spawn(
    parent: &mut ChildSpawnerCommands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<PointCloudMaterial>,
    cfg: &CardConfig,
    rng: &mut impl Rng,
) {
    let field = sampling::spiral_ribbon(&cfg.ribbon, cfg.tree.height, rng);
    let mesh = meshes.add(point_mesh(&field));
    let material = materials.add(PointCloudMaterial::new(RIBBON_TINT, 0.6, 1.0));
    parent.spawn((
        RibbonCloud,
        field,
        ExplosionState::default(),
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::default(),
    ));
}

pub fn animate(
    time: Res<Time>,
    cfg: Res<CardConfig>,
    mut q: Query<(&mut ParticleField, &mut ExplosionState, &mut Transform), With<RibbonCloud>>,
) {
    let dt = time.delta_secs();
    for (mut field, mut state, mut transform) in &mut q {
        if let Some(t) = state.tick(dt) {
            let profile = Profile::ribbon(&cfg.explosion);
            explosion::advance_ribbon(&mut field, &profile, t);
        } else {
            transform.rotate_y(idle::RIBBON_SPIN * dt);
        }
    }
}

pub fn style(
    time: Res<Time>,
    mut materials: ResMut<Assets<PointCloudMaterial>>,
    q: Query<(&ExplosionState, &MeshMaterial3d<PointCloudMaterial>), With<RibbonCloud>>,
) {
    for (state, handle) in &q {
        let Some(material) = materials.get_mut(&handle.0) else {
            continue;
        };
        let opacity = match *state {
            ExplosionState::Settled => idle::ribbon_opacity(time.elapsed_secs()),
            ExplosionState::Exploding { elapsed } => explosion::ribbon_opacity(elapsed),
        };
        material.set_style(opacity, 1.0);
    }
}
