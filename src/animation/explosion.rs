//! Explosion displacement math.
//!
//! Positions are always a closed-form function of the generated layout and
//! the elapsed explosion time `t`, never integrated frame to frame, so the
//! burst is deterministic for a given layout and cancelling it restores the
//! tree exactly.

use crate::core::config::ExplosionTuning;
use crate::particles::ParticleField;

/// Exponential burst profile: a fast initial expansion that decelerates and
/// asymptotically approaches `gain` without ever stopping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile {
    pub rate: f32,
    pub gain: f32,
}

impl Profile {
    pub fn tree(tuning: &ExplosionTuning) -> Self {
        Self {
            rate: tuning.tree_rate,
            gain: tuning.tree_gain,
        }
    }

    pub fn ribbon(tuning: &ExplosionTuning) -> Self {
        Self {
            rate: tuning.ribbon_rate,
            gain: tuning.ribbon_gain,
        }
    }

    /// `(1 - e^(-rate·t)) · gain`: monotone increasing, bounded by `gain`.
    #[inline]
    pub fn displacement(&self, t: f32) -> f32 {
        (1.0 - (-t * self.rate).exp()) * self.gain
    }
}

/// Tree body frame: base displacement along the precomputed velocity, three
/// decorrelated sinusoids under a slow turbulence envelope, an upward drift,
/// and a small outward spiral on X/Z.
pub fn advance_tree(field: &mut ParticleField, profile: &Profile, t: f32) {
    if t <= 0.0 {
        // settle frame: the layout must match the generator output exactly
        field.restore_initial();
        return;
    }
    let factor = profile.displacement(t);
    let envelope = (t * 2.0).sin() * 0.5 + 0.5;
    let spiral_radius = t * 0.3;

    for i in 0..field.live.len() {
        let initial = field.initial()[i];
        let vel = field.velocities[i];
        let seed = field.seeds[i];
        let phase = field.phases[i];

        let base = initial + vel * factor;

        let turb_x = (t * 2.5 + seed + phase).sin() * envelope * 0.8;
        let turb_y = (t * 1.8 + seed * 0.7).cos() * envelope * 0.6 + t * 0.5;
        let turb_z = (t * 2.2 + seed * 1.3 + phase).sin() * envelope * 0.8;

        let spiral_angle = t * 3.0 + seed;
        let spiral_x = spiral_angle.cos() * spiral_radius * 0.2;
        let spiral_z = spiral_angle.sin() * spiral_radius * 0.2;

        field.live[i].x = base.x + turb_x + spiral_x;
        field.live[i].y = base.y + turb_y;
        field.live[i].z = base.z + turb_z + spiral_z;
    }
    field.dirty = true;
}

/// Ribbon frame: displacement plus a uniform upward drift, no turbulence.
pub fn advance_ribbon(field: &mut ParticleField, profile: &Profile, t: f32) {
    if t <= 0.0 {
        field.restore_initial();
        return;
    }
    let factor = profile.displacement(t);
    for i in 0..field.live.len() {
        let initial = field.initial()[i];
        let vel = field.velocities[i];
        field.live[i] = initial + vel * factor;
        field.live[i].y += t * 0.2;
    }
    field.dirty = true;
}

/// Tree opacity: linear fade modulated by a small pulse, clamped at zero.
#[inline]
pub fn tree_opacity(t: f32) -> f32 {
    let pulse = (t * 4.0).sin() * 0.1 + 0.9;
    ((0.85 - t * 0.12) * pulse).max(0.0)
}

/// Tree point size oscillation during the burst.
#[inline]
pub fn tree_size(t: f32) -> f32 {
    0.045 + (t * 6.0).sin() * 0.02
}

#[inline]
pub fn ribbon_opacity(t: f32) -> f32 {
    (0.9 - t * 0.2).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{RibbonConfig, TreeConfig};
    use crate::particles::sampling;
    use bevy::prelude::Vec3;
    use rand::SeedableRng;

    fn small_tree() -> ParticleField {
        let cfg = TreeConfig {
            count: 200,
            ..TreeConfig::default()
        };
        sampling::tree_body(&cfg, &mut rand::rngs::StdRng::seed_from_u64(7))
    }

    #[test]
    fn displacement_monotone_and_bounded() {
        let p = Profile {
            rate: 0.6,
            gain: 8.0,
        };
        let mut prev = -1.0;
        // stop well before f32 saturation at the asymptote
        for i in 0..400 {
            let t = i as f32 * 0.05;
            let f = p.displacement(t);
            assert!(f > prev, "not monotone at t={t}");
            assert!(f < p.gain, "exceeds asymptote at t={t}");
            prev = f;
        }
        assert_eq!(p.displacement(0.0), 0.0);
    }

    #[test]
    fn positions_match_layout_at_time_zero() {
        let mut field = small_tree();
        let profile = Profile {
            rate: 0.6,
            gain: 8.0,
        };
        advance_tree(&mut field, &profile, 1.3);
        advance_tree(&mut field, &profile, 0.0);
        for (live, init) in field.live.clone().iter().zip(field.initial().iter()) {
            assert_eq!(live.to_array(), init.to_array());
        }
    }

    #[test]
    fn settle_after_long_burst_is_exact() {
        let mut field = small_tree();
        let profile = Profile {
            rate: 0.6,
            gain: 8.0,
        };
        for i in 1..=600 {
            advance_tree(&mut field, &profile, i as f32 * 0.016);
        }
        field.restore_initial();
        for (live, init) in field.live.clone().iter().zip(field.initial().iter()) {
            assert_eq!(live.to_array(), init.to_array());
        }
    }

    #[test]
    fn tree_frame_is_deterministic_in_t() {
        let mut a = small_tree();
        let mut b = a.clone();
        let profile = Profile {
            rate: 0.6,
            gain: 8.0,
        };
        // different frame histories, same final t
        advance_tree(&mut a, &profile, 0.4);
        advance_tree(&mut a, &profile, 2.0);
        advance_tree(&mut b, &profile, 2.0);
        assert_eq!(a.live, b.live);
    }

    #[test]
    fn ribbon_drifts_upward_only() {
        let cfg = RibbonConfig {
            count: 100,
            ..RibbonConfig::default()
        };
        let mut field =
            sampling::spiral_ribbon(&cfg, 10.0, &mut rand::rngs::StdRng::seed_from_u64(3));
        let profile = Profile {
            rate: 0.5,
            gain: 10.0,
        };
        let t = 1.0;
        advance_ribbon(&mut field, &profile, t);
        let factor = profile.displacement(t);
        for i in 0..field.len() {
            let expected = field.initial()[i] + field.velocities[i] * factor + Vec3::Y * 0.2 * t;
            assert!((field.live[i] - expected).length() < 1e-5);
        }
    }

    #[test]
    fn opacity_curves_clamp_at_zero() {
        assert!(tree_opacity(0.0) > 0.7);
        assert_eq!(tree_opacity(100.0), 0.0);
        assert!(ribbon_opacity(0.0) == 0.9);
        assert_eq!(ribbon_opacity(10.0), 0.0);
        // size oscillates around the idle size
        for i in 0..100 {
            let s = tree_size(i as f32 * 0.1);
            assert!((0.025..=0.065).contains(&s));
        }
    }
}
