//! Orbit camera: drag to orbit, wheel to zoom, slow auto-rotation that
//! pauses while the card overlay is up. Bloom intensity steps with the
//! phase so the burst reads hotter than the idle tree.

use std::f32::consts::{PI, TAU};

use bevy::core_pipeline::bloom::Bloom;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;

use crate::app::state::CardPhase;
use crate::core::config::CardConfig;

/// Pitch limits from the horizon, matching polar angle clamps of
/// `[PI/2.5, PI/1.6]` measured from straight up.
pub const MIN_PITCH: f32 = PI / 2.0 - PI / 1.6;
pub const MAX_PITCH: f32 = PI / 2.0 - PI / 2.5;

/// Spherical orbit state around the scene origin.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

#[derive(Component)]
pub struct SceneCamera;

pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera).add_systems(
            Update,
            (orbit_input, auto_rotate, sync_camera, update_bloom).chain(),
        );
    }
}

fn setup_camera(mut commands: Commands, cfg: Res<CardConfig>) {
    commands.insert_resource(OrbitCamera {
        yaw: 0.0,
        pitch: 0.0,
        distance: cfg.camera.distance,
    });
    commands.spawn((
        SceneCamera,
        Camera3d::default(),
        Camera {
            hdr: true,
            ..default()
        },
        Tonemapping::TonyMcMapface,
        Bloom {
            intensity: cfg.glow.idle,
            ..Bloom::NATURAL
        },
        Projection::Perspective(PerspectiveProjection {
            fov: cfg.camera.fov_degrees.to_radians(),
            ..default()
        }),
        Transform::from_xyz(0.0, 0.0, cfg.camera.distance),
    ));
}

fn orbit_input(
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    cfg: Res<CardConfig>,
    mut orbit: ResMut<OrbitCamera>,
) {
    if buttons.pressed(MouseButton::Left) {
        for ev in motion.read() {
            orbit.yaw -= ev.delta.x * cfg.camera.drag_sensitivity;
            orbit.pitch += ev.delta.y * cfg.camera.drag_sensitivity;
        }
    } else {
        motion.clear();
    }
    for ev in wheel.read() {
        orbit.distance -= ev.y * cfg.camera.zoom_sensitivity;
    }
    orbit.pitch = orbit.pitch.clamp(MIN_PITCH, MAX_PITCH);
    orbit.distance = orbit
        .distance
        .clamp(cfg.camera.min_distance, cfg.camera.max_distance);
}

fn auto_rotate(
    time: Res<Time>,
    phase: Res<State<CardPhase>>,
    cfg: Res<CardConfig>,
    mut orbit: ResMut<OrbitCamera>,
) {
    if *phase.get() == CardPhase::CardShown {
        return;
    }
    // speed is in turns per minute
    orbit.yaw += cfg.camera.auto_rotate_speed * TAU / 60.0 * time.delta_secs();
}

fn sync_camera(orbit: Res<OrbitCamera>, mut q: Query<&mut Transform, With<SceneCamera>>) {
    let Ok(mut transform) = q.single_mut() else {
        return;
    };
    let (sin_yaw, cos_yaw) = orbit.yaw.sin_cos();
    let (sin_pitch, cos_pitch) = orbit.pitch.sin_cos();
    let eye = Vec3::new(
        orbit.distance * cos_pitch * sin_yaw,
        orbit.distance * sin_pitch,
        orbit.distance * cos_pitch * cos_yaw,
    );
    *transform = Transform::from_translation(eye).looking_at(Vec3::ZERO, Vec3::Y);
}

fn update_bloom(
    phase: Res<State<CardPhase>>,
    cfg: Res<CardConfig>,
    mut q: Query<&mut Bloom, With<SceneCamera>>,
) {
    if !phase.is_changed() {
        return;
    }
    // the burst keeps glowing behind the card; only a full reset cools it
    let intensity = match phase.get() {
        CardPhase::Exploding | CardPhase::CardShown => cfg.glow.burst,
        CardPhase::Idle => cfg.glow.idle,
    };
    for mut bloom in &mut q {
        bloom.intensity = intensity;
    }
}
