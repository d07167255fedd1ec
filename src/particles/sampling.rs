//! Initial-layout samplers for the three particle systems.
//!
//! All samplers take `&mut impl Rng` so tests can pin a seed and assert
//! statistical properties; the app passes `thread_rng()` and accepts that
//! each run looks slightly different.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

use crate::core::config::{OrnamentConfig, RibbonConfig, TreeConfig};
use crate::particles::buffers::ParticleField;
use crate::particles::palette;

/// Tree body: uniform height on the cone, uniform areal density inside the
/// tapered disk, weighted palette colors, and a precomputed outward burst
/// velocity biased upward (particles near the top fly farther).
pub fn tree_body(cfg: &TreeConfig, rng: &mut impl Rng) -> ParticleField {
    let mut positions = Vec::with_capacity(cfg.count);
    let mut colors = Vec::with_capacity(cfg.count);
    let mut velocities = Vec::with_capacity(cfg.count);
    let mut seeds = Vec::with_capacity(cfg.count);
    let mut phases = Vec::with_capacity(cfg.count);

    for _ in 0..cfg.count {
        let h = rng.gen::<f32>() * cfg.height;
        let progress = h / cfg.height;
        let radius_at_height = cfg.base_radius * (1.0 - progress);

        let angle = rng.gen::<f32>() * TAU;
        // sqrt keeps areal density uniform across the disk
        let dist = rng.gen::<f32>().sqrt() * radius_at_height;
        let (x, z) = (angle.cos() * dist, angle.sin() * dist);
        positions.push(Vec3::new(x, h, z));

        let dir = Vec3::new(x, (rng.gen::<f32>() - 0.1) * 3.0, z).normalize_or_zero();
        let base_speed = 1.5 + rng.gen::<f32>() * 4.0;
        // top flies farther
        let height_factor = 1.0 + progress * 2.0;
        let speed = base_speed * height_factor;
        let mut vel = dir * speed;
        vel.y += rng.gen::<f32>() * 2.0;
        velocities.push(vel);

        seeds.push(rng.gen::<f32>() * 30.0);
        phases.push(rng.gen::<f32>() * TAU);
        colors.push(palette::pick_linear(rng.gen::<f32>()));
    }

    ParticleField::new(positions, Some(colors), velocities, seeds, phases)
}

/// Golden ribbon: a descending spiral from apex to base with small radial
/// and height jitter for thickness. No turbulence seeds are needed; the
/// explosion path only uses the precomputed velocity.
pub fn spiral_ribbon(cfg: &RibbonConfig, height: f32, rng: &mut impl Rng) -> ParticleField {
    let mut positions = Vec::with_capacity(cfg.count);
    let mut velocities = Vec::with_capacity(cfg.count);

    for i in 0..cfg.count {
        let progress = i as f32 / cfg.count as f32;
        let h = height * (1.0 - progress);
        let r = cfg.base_radius * progress;
        let angle = progress * TAU * cfg.loops;

        let radial_offset = (rng.gen::<f32>() - 0.5) * cfg.width_spread;
        let height_offset = (rng.gen::<f32>() - 0.5) * cfg.height_spread;

        let x = angle.cos() * (r + radial_offset);
        let y = h + height_offset;
        let z = angle.sin() * (r + radial_offset);
        positions.push(Vec3::new(x, y, z));

        let dir = Vec3::new(x, (rng.gen::<f32>() - 0.3) * 2.0, z).normalize_or_zero();
        let speed = 1.2 + rng.gen::<f32>() * 3.8;
        velocities.push(dir * speed);
    }

    let seeds = vec![0.0; cfg.count];
    let phases = vec![0.0; cfg.count];
    ParticleField::new(positions, None, velocities, seeds, phases)
}

/// Ornaments: a sparse static field sitting on the cone surface (95% of the
/// taper radius), kept away from the apex and the ground. These never move;
/// only their material breathes.
pub fn ornaments(cfg: &OrnamentConfig, height: f32, rng: &mut impl Rng) -> Vec<Vec3> {
    let mut positions = Vec::with_capacity(cfg.count);
    for _ in 0..cfg.count {
        let h = rng.gen::<f32>() * (height - 2.0 * cfg.margin) + cfg.margin;
        let progress = h / height;
        let radius_at_height = cfg.base_radius * (1.0 - progress);
        let angle = rng.gen::<f32>() * TAU;
        let r = radius_at_height * 0.95;
        positions.push(Vec3::new(angle.cos() * r, h, angle.sin() * r));
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> rand::rngs::StdRng {
        rand::rngs::StdRng::seed_from_u64(42)
    }

    #[test]
    fn tree_taper_holds_for_all_samples() {
        let cfg = TreeConfig::default();
        let field = tree_body(&cfg, &mut rng());
        for p in field.initial() {
            assert!(p.y >= 0.0 && p.y <= cfg.height);
            let allowed = cfg.base_radius * (1.0 - p.y / cfg.height);
            let radial = (p.x * p.x + p.z * p.z).sqrt();
            assert!(
                radial <= allowed + 1e-4,
                "radial {radial} exceeds taper {allowed} at h={}",
                p.y
            );
        }
    }

    #[test]
    fn tree_reaches_base_radius_near_ground() {
        let cfg = TreeConfig::default();
        let field = tree_body(&cfg, &mut rng());
        let max_low = field
            .initial()
            .iter()
            .filter(|p| p.y < 0.5)
            .map(|p| (p.x * p.x + p.z * p.z).sqrt())
            .fold(0.0f32, f32::max);
        // within sampling noise of the full 4.2 base radius
        assert!(max_low > cfg.base_radius * 0.9, "max radius {max_low}");
    }

    #[test]
    fn tree_buffers_are_fully_populated() {
        let cfg = TreeConfig {
            count: 500,
            ..default()
        };
        let field = tree_body(&cfg, &mut rng());
        assert_eq!(field.len(), 500);
        assert_eq!(field.colors.as_ref().unwrap().len(), 500);
        assert!(field.velocities.iter().all(|v| v.length() > 0.0));
        assert!(field.seeds.iter().all(|s| (0.0..30.0).contains(s)));
        assert!(field.phases.iter().all(|p| (0.0..TAU).contains(p)));
    }

    #[test]
    fn tree_generation_is_deterministic_per_seed() {
        let cfg = TreeConfig {
            count: 64,
            ..default()
        };
        let a = tree_body(&cfg, &mut rng());
        let b = tree_body(&cfg, &mut rng());
        assert_eq!(a.initial(), b.initial());
        assert_eq!(a.velocities, b.velocities);
    }

    #[test]
    fn ribbon_descends_from_apex_to_base() {
        let cfg = RibbonConfig::default();
        let height = 10.0;
        let field = spiral_ribbon(&cfg, height, &mut rng());
        let first = field.initial()[0];
        let last = *field.initial().last().unwrap();
        // apex: full height, near the axis
        assert!((first.y - height).abs() <= cfg.height_spread);
        assert!((first.x * first.x + first.z * first.z).sqrt() <= cfg.width_spread);
        // base: near the ground at full radius
        assert!(last.y <= 0.5);
        let last_r = (last.x * last.x + last.z * last.z).sqrt();
        assert!((last_r - cfg.base_radius).abs() < cfg.width_spread + 0.01);
    }

    #[test]
    fn ornaments_sit_on_surface_within_margins() {
        let cfg = OrnamentConfig::default();
        let height = 10.0;
        let points = ornaments(&cfg, height, &mut rng());
        assert_eq!(points.len(), cfg.count);
        for p in &points {
            assert!(p.y >= cfg.margin && p.y <= height - cfg.margin);
            let expected = cfg.base_radius * (1.0 - p.y / height) * 0.95;
            let radial = (p.x * p.x + p.z * p.z).sqrt();
            assert!((radial - expected).abs() < 1e-4);
        }
    }
}
