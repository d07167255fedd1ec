//! Per-frame animation math. Pure functions over [`ParticleField`] buffers;
//! the scene layer decides when to call them and uploads the results.
pub mod explosion;
pub mod idle;

use bevy::prelude::*;

/// Lifecycle of one particle system's position buffer.
///
/// `Settled <-> Exploding`; there is no terminal state. Entering `Exploding`
/// zeroes the elapsed clock, entering `Settled` restores the generated
/// layout verbatim. The clock lives here (owned by the animator), never in
/// shared state.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub enum ExplosionState {
    #[default]
    Settled,
    Exploding {
        elapsed: f32,
    },
}

impl ExplosionState {
    pub fn begin(&mut self) {
        *self = ExplosionState::Exploding { elapsed: 0.0 };
    }

    pub fn settle(&mut self) {
        *self = ExplosionState::Settled;
    }

    pub fn is_exploding(&self) -> bool {
        matches!(self, ExplosionState::Exploding { .. })
    }

    /// Advance the explosion clock, returning the new elapsed time.
    /// No-op returning `None` while settled.
    pub fn tick(&mut self, dt: f32) -> Option<f32> {
        match self {
            ExplosionState::Settled => None,
            ExplosionState::Exploding { elapsed } => {
                *elapsed += dt;
                Some(*elapsed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_resets_clock() {
        let mut s = ExplosionState::Exploding { elapsed: 3.5 };
        s.begin();
        assert_eq!(s, ExplosionState::Exploding { elapsed: 0.0 });
    }

    #[test]
    fn tick_accumulates_only_while_exploding() {
        let mut s = ExplosionState::Settled;
        assert_eq!(s.tick(0.016), None);
        s.begin();
        assert_eq!(s.tick(0.25), Some(0.25));
        assert_eq!(s.tick(0.25), Some(0.5));
        s.settle();
        assert_eq!(s.tick(0.25), None);
    }
}
