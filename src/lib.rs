//! Interactive animated greeting card: a particle Christmas tree that bursts
//! into the starfield on demand, revealing the card text.
//!
//! Layering, bottom up:
//! - [`particles`]: layout generators and the position buffers they produce.
//! - [`animation`]: pure per-frame math over those buffers.
//! - [`scene`]: entities, meshes, materials, camera; owns when animation runs.
//! - [`app`]: the phase state machine and plugin assembly.
//! - [`ui`]: overlays and audio commands.

pub mod animation;
pub mod app;
pub mod core;
pub mod debug;
pub mod particles;
pub mod scene;
pub mod ui;

pub use crate::app::card::CardPlugin;
pub use crate::app::state::CardPhase;
pub use crate::core::config::CardConfig;
