//! Static ornament baubles scattered near the cone surface. They do not take
//! part in the burst; the whole group is hidden outside the idle phase.

use bevy::prelude::*;
use rand::Rng;

use crate::animation::idle;
use crate::app::state::CardPhase;
use crate::core::config::CardConfig;
use crate::particles::sampling;

const ORNAMENT_COLORS: [Color; 3] = [
    Color::srgb(0.98, 0.75, 0.14),
    Color::srgb(0.91, 0.28, 0.23),
    Color::srgb(0.92, 0.92, 0.95),
];

/// Base bauble radius; breathing rescales around it.
const BASE_SIZE: f32 = 0.16;

#[derive(Component)]
pub struct OrnamentRoot;

#[derive(Component)]
pub struct Ornament;

pub fn spawn(
    parent: &mut ChildSpawnerCommands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    cfg: &CardConfig,
    rng: &mut impl Rng,
) {
    let positions = sampling::ornaments(&cfg.ornaments, cfg.tree.height, rng);
    let sphere = meshes.add(Sphere::new(BASE_SIZE));
    parent
        .spawn((OrnamentRoot, Transform::default(), Visibility::default()))
        .with_children(|group| {
            for pos in positions {
                let color = ORNAMENT_COLORS[rng.gen_range(0..ORNAMENT_COLORS.len())];
                let material = materials.add(StandardMaterial {
                    base_color: color,
                    emissive: color.to_linear() * 0.6,
                    alpha_mode: AlphaMode::Blend,
                    ..default()
                });
                group.spawn((
                    Ornament,
                    Mesh3d(sphere.clone()),
                    MeshMaterial3d(material),
                    Transform::from_translation(pos),
                ));
            }
        });
}

/// Breathing: opacity and scale pulse in phase across the whole group.
pub fn animate(
    time: Res<Time>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut q: Query<(&mut Transform, &MeshMaterial3d<StandardMaterial>), With<Ornament>>,
) {
    let t = time.elapsed_secs();
    let scale = idle::ornament_size(t) / BASE_SIZE;
    let opacity = idle::ornament_opacity(t);
    for (mut transform, handle) in &mut q {
        transform.scale = Vec3::splat(scale);
        if let Some(material) = materials.get_mut(&handle.0) {
            material.base_color.set_alpha(opacity);
        }
    }
}

pub fn show(mut q: Query<&mut Visibility, With<OrnamentRoot>>) {
    for mut vis in &mut q {
        *vis = Visibility::Inherited;
    }
}

pub fn hide(mut q: Query<&mut Visibility, With<OrnamentRoot>>) {
    for mut vis in &mut q {
        *vis = Visibility::Hidden;
    }
}
