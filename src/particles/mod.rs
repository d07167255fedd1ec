//! Procedural particle field generation. Everything in here is pure over an
//! injected random source; the scene layer owns when (and how often) fields
//! are built.
pub mod buffers;
pub mod palette;
pub mod sampling;

pub use buffers::ParticleField;
