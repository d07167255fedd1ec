//! Extruded star topper. The outline is a five-point star whose corners are
//! rounded by quadratic curves, swept into a solid with rounded (bevelled)
//! front and back edges, the same construction the usual 2D-shape extruders
//! produce.

use std::f32::consts::{FRAC_PI_2, TAU};

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};

use crate::animation::idle;
use crate::core::config::CardConfig;

pub const STAR_POINTS: usize = 5;
pub const OUTER_RADIUS: f32 = 0.45;
pub const INNER_RADIUS: f32 = 0.22;
pub const DEPTH: f32 = 0.06;
pub const BEVEL_THICKNESS: f32 = 0.15;
pub const BEVEL_SIZE: f32 = 0.12;
const CURVE_SAMPLES: usize = 16;
const BEVEL_SEGMENTS: usize = 16;

const STAR_COLOR: Color = Color::srgb(0.98, 0.75, 0.14);

#[derive(Component)]
pub struct StarTopper;

/// Rounded star outline, counter-clockwise, centered on the origin.
///
/// Each sharp corner is replaced by a quadratic curve from the midpoint of
/// the incoming edge to the midpoint of the outgoing edge, with the corner
/// itself as control point.
pub fn star_outline(points: usize, outer: f32, inner: f32) -> Vec<Vec2> {
    let corner_count = points * 2;
    let mut corners = Vec::with_capacity(corner_count);
    for i in 0..corner_count {
        let radius = if i % 2 == 0 { outer } else { inner };
        let angle = FRAC_PI_2 + i as f32 / corner_count as f32 * TAU;
        corners.push(Vec2::new(angle.cos(), angle.sin()) * radius);
    }

    let mut outline = Vec::with_capacity(corner_count * CURVE_SAMPLES);
    for i in 0..corner_count {
        let prev = corners[(i + corner_count - 1) % corner_count];
        let ctrl = corners[i];
        let next = corners[(i + 1) % corner_count];
        let start = prev.midpoint(ctrl);
        let end = ctrl.midpoint(next);
        for s in 0..CURVE_SAMPLES {
            let t = s as f32 / CURVE_SAMPLES as f32;
            let a = start.lerp(ctrl, t);
            let b = ctrl.lerp(end, t);
            outline.push(a.lerp(b, t));
        }
    }
    outline
}

/// Sweep a closed outline into a solid with quarter-round bevelled rims.
///
/// The outline must be counter-clockwise and star-shaped about the origin
/// (every vertex visible from the center); caps are centroid fans and the
/// bevel inset moves vertices along their radial direction.
pub fn extrude(outline: &[Vec2], depth: f32, bevel_size: f32, bevel_thickness: f32) -> Mesh {
    let n = outline.len();
    let half = depth / 2.0;

    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut uvs: Vec<[f32; 2]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    let radial = |v: Vec2| v.normalize_or_zero();
    let inset_at = |v: Vec2, angle: f32| {
        // quarter-circle profile: fully inset at the cap rim, flush with the
        // outline where the rim meets the side wall
        v + radial(v) * (bevel_size * (angle.sin() - 1.0))
    };

    // caps, front then back, as centroid fans
    for z_dir in [1.0f32, -1.0] {
        let z = (half + bevel_thickness) * z_dir;
        let center = positions.len() as u32;
        positions.push([0.0, 0.0, z]);
        normals.push([0.0, 0.0, z_dir]);
        uvs.push([0.5, 0.5]);
        for v in outline {
            let p = inset_at(*v, 0.0);
            positions.push([p.x, p.y, z]);
            normals.push([0.0, 0.0, z_dir]);
            uvs.push([p.x * 0.5 + 0.5, p.y * 0.5 + 0.5]);
        }
        for i in 0..n as u32 {
            let a = center + 1 + i;
            let b = center + 1 + (i + 1) % n as u32;
            if z_dir > 0.0 {
                indices.extend_from_slice(&[center, a, b]);
            } else {
                indices.extend_from_slice(&[center, b, a]);
            }
        }
    }

    // rim rings, ordered front cap edge -> front wall edge -> back wall edge
    // -> back cap edge (strictly decreasing z)
    let mut ring_params: Vec<(f32, f32)> = Vec::new();
    for a in 0..=BEVEL_SEGMENTS {
        ring_params.push((a as f32 / BEVEL_SEGMENTS as f32 * FRAC_PI_2, 1.0));
    }
    for a in (0..=BEVEL_SEGMENTS).rev() {
        ring_params.push((a as f32 / BEVEL_SEGMENTS as f32 * FRAC_PI_2, -1.0));
    }

    let ring_base = positions.len() as u32;
    for (ring, &(angle, z_dir)) in ring_params.iter().enumerate() {
        let z = (half + bevel_thickness * angle.cos()) * z_dir;
        for (i, v) in outline.iter().enumerate() {
            let p = inset_at(*v, angle);
            let r = radial(*v);
            let normal = (r.extend(0.0) * angle.sin() + Vec3::Z * z_dir * angle.cos()).normalize();
            positions.push([p.x, p.y, z]);
            normals.push(normal.to_array());
            uvs.push([
                i as f32 / n as f32,
                ring as f32 / (ring_params.len() - 1) as f32,
            ]);
        }
    }
    for ring in 0..ring_params.len() - 1 {
        let top = ring_base + (ring * n) as u32;
        let bottom = ring_base + ((ring + 1) * n) as u32;
        for i in 0..n as u32 {
            let j = (i + 1) % n as u32;
            indices.extend_from_slice(&[top + i, bottom + i, bottom + j]);
            indices.extend_from_slice(&[top + i, bottom + j, top + j]);
        }
    }

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U32(indices))
}

pub fn spawn(
    parent: &mut ChildSpawnerCommands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    cfg: &CardConfig,
) {
    let outline = star_outline(STAR_POINTS, OUTER_RADIUS, INNER_RADIUS);
    let mesh = meshes.add(extrude(&outline, DEPTH, BEVEL_SIZE, BEVEL_THICKNESS));
    let material = materials.add(StandardMaterial {
        base_color: STAR_COLOR,
        emissive: STAR_COLOR.to_linear() * idle::star_emissive(0.0),
        ..default()
    });
    parent
        .spawn((
            StarTopper,
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_xyz(0.0, cfg.tree.height + 0.1, 0.0),
        ))
        .with_children(|star| {
            // bright core plus a local light so the topper reads through bloom
            star.spawn((
                Mesh3d(meshes.add(Sphere::new(0.08))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::WHITE,
                    emissive: LinearRgba::WHITE * 4.0,
                    ..default()
                })),
            ));
            star.spawn((
                PointLight {
                    color: STAR_COLOR,
                    intensity: 60_000.0,
                    range: 6.0,
                    ..default()
                },
                Transform::default(),
            ));
        });
}

/// Continuous spin plus the emissive pulse; runs in every phase.
pub fn animate(
    time: Res<Time>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut q: Query<(&mut Transform, &MeshMaterial3d<StandardMaterial>), With<StarTopper>>,
) {
    let t = time.elapsed_secs();
    for (mut transform, handle) in &mut q {
        transform.rotate_y(idle::STAR_SPIN * time.delta_secs());
        if let Some(material) = materials.get_mut(&handle.0) {
            material.emissive = STAR_COLOR.to_linear() * idle::star_emissive(t);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::mesh::VertexAttributeValues;

    #[test]
    fn outline_is_closed_and_bounded() {
        let outline = star_outline(STAR_POINTS, OUTER_RADIUS, INNER_RADIUS);
        assert_eq!(outline.len(), STAR_POINTS * 2 * CURVE_SAMPLES);
        for v in &outline {
            let r = v.length();
            // smoothing pulls corners inward but never past the curve chords
            assert!(r <= OUTER_RADIUS + 1e-4, "r={r}");
            assert!(r >= INNER_RADIUS * 0.8, "r={r}");
        }
    }

    #[test]
    fn outline_has_five_fold_symmetry() {
        let outline = star_outline(STAR_POINTS, OUTER_RADIUS, INNER_RADIUS);
        let step = outline.len() / STAR_POINTS;
        let rot = Vec2::from_angle(TAU / STAR_POINTS as f32);
        for i in 0..step {
            let rotated = rot.rotate(outline[i]);
            assert!((rotated - outline[i + step]).length() < 1e-4);
        }
    }

    #[test]
    fn extrusion_is_watertight_by_counts() {
        let outline = star_outline(STAR_POINTS, OUTER_RADIUS, INNER_RADIUS);
        let mesh = extrude(&outline, DEPTH, BEVEL_SIZE, BEVEL_THICKNESS);
        let n = outline.len();
        let rings = 2 * (BEVEL_SEGMENTS + 1);
        let expected_vertices = 2 * (n + 1) + rings * n;
        let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            panic!("positions missing");
        };
        assert_eq!(positions.len(), expected_vertices);

        let Some(Indices::U32(indices)) = mesh.indices() else {
            panic!("expected u32 indices");
        };
        assert_eq!(indices.len() % 3, 0);
        let expected_tris = 2 * n + (rings - 1) * n * 2;
        assert_eq!(indices.len(), expected_tris * 3);
        assert!(indices.iter().all(|&i| (i as usize) < positions.len()));
        // 16 quarter-round steps per rim
        assert_eq!(rings, 34);
    }

    #[test]
    fn extrusion_spans_full_thickness() {
        let outline = star_outline(STAR_POINTS, OUTER_RADIUS, INNER_RADIUS);
        let mesh = extrude(&outline, DEPTH, BEVEL_SIZE, BEVEL_THICKNESS);
        let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            panic!("positions missing");
        };
        let half_total = DEPTH / 2.0 + BEVEL_THICKNESS;
        let max_z = positions.iter().map(|p| p[2]).fold(f32::MIN, f32::max);
        let min_z = positions.iter().map(|p| p[2]).fold(f32::MAX, f32::min);
        assert!((max_z - half_total).abs() < 1e-5);
        assert!((min_z + half_total).abs() < 1e-5);
    }

    #[test]
    fn topper_spins_and_pulses_with_the_clock() {
        use std::time::Duration;

        let mut app = App::new();
        app.insert_resource(Time::<()>::default());
        app.insert_resource(Assets::<StandardMaterial>::default());
        app.add_systems(Update, animate);

        let material = app
            .world_mut()
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial::default());
        let star = app
            .world_mut()
            .spawn((StarTopper, Transform::default(), MeshMaterial3d(material.clone())))
            .id();

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(0.5));
        app.update();

        let rotation = app.world().get::<Transform>(star).unwrap().rotation;
        let angle = rotation.angle_between(Quat::IDENTITY);
        assert!((angle - STAR_SPIN_EXPECTED).abs() < 1e-3, "angle {angle}");

        let emissive = app
            .world()
            .resource::<Assets<StandardMaterial>>()
            .get(&material)
            .unwrap()
            .emissive;
        let expected = STAR_COLOR.to_linear() * idle::star_emissive(0.5);
        assert!((emissive.red - expected.red).abs() < 1e-4);
        assert!((emissive.green - expected.green).abs() < 1e-4);
    }

    const STAR_SPIN_EXPECTED: f32 = idle::STAR_SPIN * 0.5;

    #[test]
    fn extrusion_normals_are_unit_length() {
        let outline = star_outline(STAR_POINTS, OUTER_RADIUS, INNER_RADIUS);
        let mesh = extrude(&outline, DEPTH, BEVEL_SIZE, BEVEL_THICKNESS);
        let Some(VertexAttributeValues::Float32x3(normals)) =
            mesh.attribute(Mesh::ATTRIBUTE_NORMAL)
        else {
            panic!("normals missing");
        };
        for n in normals {
            let len = Vec3::from_array(*n).length();
            assert!((len - 1.0).abs() < 1e-4, "normal length {len}");
        }
    }
}
