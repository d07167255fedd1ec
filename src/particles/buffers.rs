use bevy::prelude::*;

/// Owner of one particle system's buffers: the immutable generated layout
/// plus the live positions the animator mutates each frame.
///
/// `live` is always recomputed from `initial` + elapsed explosion time, never
/// integrated incrementally, so there is no drift and a settle is an exact
/// restore. Generators construct this once and hand it over; after that only
/// the animator touches it (exclusive `&mut` through ECS ownership).
#[derive(Component, Debug, Clone)]
pub struct ParticleField {
    initial: Vec<Vec3>,
    pub live: Vec<Vec3>,
    /// Per-particle linear RGBA, tree body only.
    pub colors: Option<Vec<[f32; 4]>>,
    pub velocities: Vec<Vec3>,
    pub seeds: Vec<f32>,
    pub phases: Vec<f32>,
    /// Set whenever `live` changed and the mesh attribute needs re-upload.
    pub dirty: bool,
}

impl ParticleField {
    pub fn new(
        positions: Vec<Vec3>,
        colors: Option<Vec<[f32; 4]>>,
        velocities: Vec<Vec3>,
        seeds: Vec<f32>,
        phases: Vec<f32>,
    ) -> Self {
        debug_assert_eq!(positions.len(), velocities.len());
        debug_assert_eq!(positions.len(), seeds.len());
        debug_assert_eq!(positions.len(), phases.len());
        if let Some(c) = &colors {
            debug_assert_eq!(positions.len(), c.len());
        }
        Self {
            live: positions.clone(),
            initial: positions,
            colors,
            velocities,
            seeds,
            phases,
            dirty: false,
        }
    }

    pub fn len(&self) -> usize {
        self.initial.len()
    }

    pub fn is_empty(&self) -> bool {
        self.initial.is_empty()
    }

    pub fn initial(&self) -> &[Vec3] {
        &self.initial
    }

    /// Copy the generated layout back into the live buffer verbatim.
    /// Instant, no tween.
    pub fn restore_initial(&mut self) {
        self.live.copy_from_slice(&self.initial);
        self.dirty = true;
    }
}
