//! Centralized tree particle palette & weighted pick helper.
//! Single source of truth for the vertex-color path and tests.

use bevy::prelude::*;

pub const WHITE: Color = Color::srgb(1.0, 1.0, 1.0);
pub const GOLD: Color = Color::srgb(0.984, 0.749, 0.141); // #fbbf24
pub const MINT: Color = Color::srgb(0.204, 0.827, 0.600); // #34d399
pub const EMERALD: Color = Color::srgb(0.020, 0.588, 0.412); // #059669
pub const DARK_GREEN: Color = Color::srgb(0.024, 0.306, 0.231); // #064e3b

/// Weighted palette pick from a uniform draw in [0, 1).
/// Proportions: white 8%, gold 17%, mint 15%, emerald 30%, dark green 30%.
#[inline]
pub fn pick(rand: f32) -> Color {
    if rand > 0.92 {
        WHITE
    } else if rand > 0.75 {
        GOLD
    } else if rand > 0.6 {
        MINT
    } else if rand > 0.3 {
        EMERALD
    } else {
        DARK_GREEN
    }
}

/// Linear RGBA as stored in the mesh color attribute.
#[inline]
pub fn pick_linear(rand: f32) -> [f32; 4] {
    pick(rand).to_linear().to_f32_array()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    #[test]
    fn threshold_edges() {
        assert_eq!(pick(0.95), WHITE);
        assert_eq!(pick(0.921), WHITE);
        assert_eq!(pick(0.92), GOLD);
        assert_eq!(pick(0.75), MINT);
        assert_eq!(pick(0.6), EMERALD);
        assert_eq!(pick(0.3), DARK_GREEN);
        assert_eq!(pick(0.0), DARK_GREEN);
    }

    #[test]
    fn proportions_converge() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0xC0FFEE);
        let n = 100_000;
        let mut counts = [0usize; 5];
        for _ in 0..n {
            let c = pick(rng.gen::<f32>());
            let idx = if c == WHITE {
                0
            } else if c == GOLD {
                1
            } else if c == MINT {
                2
            } else if c == EMERALD {
                3
            } else {
                4
            };
            counts[idx] += 1;
        }
        let frac = |i: usize| counts[i] as f32 / n as f32;
        assert!((frac(0) - 0.08).abs() < 0.01, "white {}", frac(0));
        assert!((frac(1) - 0.17).abs() < 0.01, "gold {}", frac(1));
        assert!((frac(2) - 0.15).abs() < 0.01, "mint {}", frac(2));
        assert!((frac(3) - 0.30).abs() < 0.01, "emerald {}", frac(3));
        assert!((frac(4) - 0.30).abs() < 0.01, "dark green {}", frac(4));
    }
}
