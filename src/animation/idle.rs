//! Idle-state animation curves: slow spins and synchronized breathing.
//! All take the global clock time in seconds.

/// Tree body spin while settled, rad/s.
pub const TREE_SPIN: f32 = 0.05;
/// Ribbon spin while settled, rad/s.
pub const RIBBON_SPIN: f32 = 0.15;
/// Star topper spin, rad/s.
pub const STAR_SPIN: f32 = 1.2;

/// Fixed tree opacity and point size while settled.
pub const TREE_OPACITY: f32 = 0.75;
pub const TREE_SIZE: f32 = 0.045;

#[inline]
pub fn ribbon_opacity(t: f32) -> f32 {
    0.6 + t.sin() * 0.4
}

#[inline]
pub fn ornament_opacity(t: f32) -> f32 {
    0.5 + (t * 0.8).sin() * 0.5
}

/// Ornament size breathes in sync with its opacity.
#[inline]
pub fn ornament_size(t: f32) -> f32 {
    0.16 + (t * 0.8).sin() * 0.06
}

/// Star emissive pulse: slow, cinematic.
#[inline]
pub fn star_emissive(t: f32) -> f32 {
    2.5 + t.sin() * 1.5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range_over_time(f: fn(f32) -> f32) -> (f32, f32) {
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for i in 0..10_000 {
            let v = f(i as f32 * 0.01);
            min = min.min(v);
            max = max.max(v);
        }
        (min, max)
    }

    #[test]
    fn breathing_ranges() {
        let (min, max) = range_over_time(ribbon_opacity);
        assert!((min - 0.2).abs() < 1e-2 && (max - 1.0).abs() < 1e-2);

        let (min, max) = range_over_time(ornament_opacity);
        assert!(min >= -1e-3 && (max - 1.0).abs() < 1e-2);

        let (min, max) = range_over_time(ornament_size);
        assert!((min - 0.10).abs() < 1e-2 && (max - 0.22).abs() < 1e-2);

        let (min, max) = range_over_time(star_emissive);
        assert!((min - 1.0).abs() < 1e-2 && (max - 4.0).abs() < 1e-2);
    }

    #[test]
    fn ornament_breathing_is_synchronized() {
        // opacity and size peak at the same phase
        for i in 0..1000 {
            let t = i as f32 * 0.01;
            let o = (ornament_opacity(t) - 0.5) / 0.5;
            let s = (ornament_size(t) - 0.16) / 0.06;
            assert!((o - s).abs() < 1e-4);
        }
    }
}
