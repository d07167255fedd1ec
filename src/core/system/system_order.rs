//! Central system ordering labels to make update sequence explicit.
//! Stages (high-level):
//! 1. Animate (advance explosion clocks, mutate particle buffers)
//! 2. Upload (write live buffers into mesh attributes / material uniforms)
//! 3. Rendering (implicit)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct AnimateSet; // buffer mutation before any GPU upload

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct UploadSet; // mesh/material writes after animation
