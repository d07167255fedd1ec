//! Tree body point cloud: 25k cone-sampled particles with the festive
//! palette baked into vertex colors.

use bevy::prelude::*;
use rand::Rng;

use crate::animation::explosion::{self, Profile};
use crate::animation::idle;
use crate::animation::ExplosionState;
use crate::core::config::CardConfig;
use crate::particles::{sampling, ParticleField};
use crate::scene::material::PointCloudMaterial;
use crate::scene::point_mesh;

#[derive(Component)]
pub struct TreeCloud;

pub fn spawn(
    parent: &mut ChildSpawnerCommands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<PointCloudMaterial>,
    cfg: &CardConfig,
    rng: &mut impl Rng,
) {
    let field = sampling::tree_body(&cfg.tree, rng);
    let mesh = meshes.add(point_mesh(&field));
    let material = materials.add(PointCloudMaterial::new(
        Color::WHITE,
        idle::TREE_OPACITY,
        1.0,
    ));
    parent.spawn((
        TreeCloud,
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
    mut q: Query<(&mut ParticleField, &mut ExplosionState, &mut Transform), With<TreeCloud>>,
) {
    let dt = time.delta_secs();
    for (mut field, mut state, mut transform) in &mut q {
        if let Some(t) = state.tick(dt) {
            let profile = Profile::tree(&cfg.explosion);
            explosion::advance_tree(&mut field, &profile, t);
        } else {
            transform.rotate_y(idle::TREE_SPIN * dt);
        }
    }
}

pub fn style(
    mut materials: ResMut<Assets<PointCloudMaterial>>,
    q: Query<(&ExplosionState, &MeshMaterial3d<PointCloudMaterial>), With<TreeCloud>>,
) {
    for (state, handle) in &q {
        let Some(material) = materials.get_mut(&handle.0) else {
            continue;
        };
        match *state {
            ExplosionState::Settled => material.set_style(idle::TREE_OPACITY, 1.0),
            ExplosionState::Exploding { elapsed } => {
                // size oscillation rendered as brightness, scaled off the
                // settled point size
                let brightness = explosion::tree_size(elapsed) / idle::TREE_SIZE;
                material.set_style(explosion::tree_opacity(elapsed), brightness);
            }
        }
    }
}
