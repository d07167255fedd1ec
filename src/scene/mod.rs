//! Scene graph assembly: the anchored tree group (body, ribbon, ornaments,
//! star, ground) plus the world-space starfield, camera and lights. Animation
//! systems run in [`AnimateSet`]; mesh/material uploads in [`UploadSet`].

pub mod camera;
pub mod material;
pub mod ornaments;
pub mod ribbon;
pub mod star;
pub mod starfield;
pub mod tree;

use bevy::asset::RenderAssetUsages;
use bevy::pbr::MaterialPlugin;
use bevy::prelude::*;
use bevy::render::mesh::{PrimitiveTopology, VertexAttributeValues};
use rand::thread_rng;

use crate::animation::ExplosionState;
use crate::app::state::CardPhase;
use crate::core::config::CardConfig;
use crate::core::system::system_order::{AnimateSet, UploadSet};
use crate::particles::ParticleField;
use material::PointCloudMaterial;

/// The whole tree group hangs off this entity so the cone straddles the
/// origin vertically and one transform centers everything.
#[derive(Component)]
pub struct SceneAnchor;

const GROUND_RADIUS: f32 = 6.0;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<PointCloudMaterial>::default())
            .insert_resource(ClearColor(Color::BLACK))
            .insert_resource(AmbientLight {
                color: Color::srgb(0.7, 0.8, 1.0),
                brightness: 60.0,
                ..default()
            })
            .add_systems(Startup, setup_scene)
            .add_systems(OnEnter(CardPhase::Exploding), begin_burst)
            .add_systems(
                OnEnter(CardPhase::Idle),
                (settle_fields, ornaments::show),
            )
            .add_systems(OnExit(CardPhase::Idle), ornaments::hide)
            .add_systems(
                Update,
                (
                    tree::animate,
                    ribbon::animate,
                    starfield::animate,
                    ornaments::animate.run_if(in_state(CardPhase::Idle)),
                    // the topper keeps spinning and pulsing through the
                    // burst and behind the card
                    star::animate,
                )
                    .in_set(AnimateSet),
            )
            .add_systems(
                Update,
                (upload_dirty_fields, tree::style, ribbon::style).in_set(UploadSet),
            );
    }
}

/// Point-list mesh from a field's live buffer, vertex colors included when
/// the field carries them.
pub fn point_mesh(field: &ParticleField) -> Mesh {
    let positions: Vec<[f32; 3]> = field.live.iter().map(|p| p.to_array()).collect();
    let mut mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    if let Some(colors) = &field.colors {
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors.clone());
    }
    mesh
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut point_materials: ResMut<Assets<PointCloudMaterial>>,
    mut std_materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<CardConfig>,
) {
    let mut rng = thread_rng();

    commands
        .spawn((
            SceneAnchor,
            Transform::from_xyz(0.0, -cfg.tree.height / 2.0 - 0.05, 0.0),
            Visibility::default(),
        ))
        .with_children(|anchor| {
            tree::spawn(anchor, &mut meshes, &mut point_materials, &cfg, &mut rng);
            ribbon::spawn(anchor, &mut meshes, &mut point_materials, &cfg, &mut rng);
            ornaments::spawn(anchor, &mut meshes, &mut std_materials, &cfg, &mut rng);
            star::spawn(anchor, &mut meshes, &mut std_materials, &cfg);

            anchor.spawn((
                Mesh3d(meshes.add(Circle::new(GROUND_RADIUS))),
                MeshMaterial3d(std_materials.add(StandardMaterial {
                    base_color: Color::srgba(0.02, 0.18, 0.09, 0.35),
                    alpha_mode: AlphaMode::Blend,
                    perceptual_roughness: 0.9,
                    ..default()
                })),
                Transform::from_xyz(0.0, -0.1, 0.0)
                    .with_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
            ));
        });

    starfield::spawn(
        &mut commands,
        &mut meshes,
        &mut point_materials,
        &cfg.starfield,
        &mut rng,
    );

    commands.spawn((
        PointLight {
            color: Color::srgb(1.0, 0.85, 0.5),
            intensity: 400_000.0,
            range: 60.0,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 10.0),
    ));

    info!(
        target: "scene",
        "scene ready: tree={} ribbon={} ornaments={} starfield={}",
        cfg.tree.count, cfg.ribbon.count, cfg.ornaments.count, cfg.starfield.count
    );
}

fn begin_burst(mut q: Query<&mut ExplosionState>) {
    for mut state in &mut q {
        state.begin();
    }
}

/// Instant reset: every field snaps back to its generated layout.
fn settle_fields(mut q: Query<(&mut ExplosionState, &mut ParticleField)>) {
    for (mut state, mut field) in &mut q {
        if state.is_exploding() {
            state.settle();
            field.restore_initial();
        }
    }
}

/// Re-upload live positions into the mesh for any field the animator marked
/// dirty this frame.
fn upload_dirty_fields(
    mut meshes: ResMut<Assets<Mesh>>,
    mut q: Query<(&mut ParticleField, &Mesh3d)>,
) {
    for (mut field, mesh3d) in &mut q {
        if !field.dirty {
            continue;
        }
        let Some(mesh) = meshes.get_mut(&mesh3d.0) else {
            continue;
        };
        if let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute_mut(Mesh::ATTRIBUTE_POSITION)
        {
            for (dst, src) in positions.iter_mut().zip(field.live.iter()) {
                *dst = src.to_array();
            }
        }
        field.dirty = false;
    }
}
