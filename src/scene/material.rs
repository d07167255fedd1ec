//! Additive point-cloud material. wgpu point primitives are fixed at one
//! pixel, so the "point size" channel drives brightness instead; with
//! additive blending and bloom the visual effect is close enough.

use bevy::pbr::Material;
use bevy::prelude::*;
use bevy::render::render_resource::{AsBindGroup, ShaderRef, ShaderType};

pub const POINT_CLOUD_SHADER_PATH: &str = "shaders/point_cloud.wgsl";

#[derive(Debug, Clone, ShaderType)]
pub struct PointCloudUniform {
    /// Multiplied into vertex colors (white for fields that carry their own).
    pub tint: Vec4,
    /// x: opacity, y: brightness, z/w: unused padding.
    pub params: Vec4,
}

#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct PointCloudMaterial {
    #[uniform(0)]
    pub settings: PointCloudUniform,
}

impl PointCloudMaterial {
    pub fn new(tint: Color, opacity: f32, brightness: f32) -> Self {
        Self {
            settings: PointCloudUniform {
                tint: Vec4::from_array(tint.to_linear().to_f32_array()),
                params: Vec4::new(opacity, brightness, 0.0, 0.0),
            },
        }
    }

    pub fn set_style(&mut self, opacity: f32, brightness: f32) {
        self.settings.params.x = opacity;
        self.settings.params.y = brightness;
    }
}

impl Material for PointCloudMaterial {
    fn fragment_shader() -> ShaderRef {
        POINT_CLOUD_SHADER_PATH.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Add
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_updates_params_only() {
        let mut m = PointCloudMaterial::new(Color::WHITE, 0.75, 1.0);
        let tint = m.settings.tint;
        m.set_style(0.2, 1.4);
        assert_eq!(m.settings.params.x, 0.2);
        assert_eq!(m.settings.params.y, 1.4);
        assert_eq!(m.settings.tint, tint);
    }
}
