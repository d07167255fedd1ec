use anyhow::Context;
use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            title: "Season's Greetings".into(),
        }
    }
}

/// Tree body particle field. The cone tapers linearly from `base_radius`
/// at the ground to zero at `height`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TreeConfig {
    pub count: usize,
    pub height: f32,
    pub base_radius: f32,
}
impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            count: 25_000,
            height: 10.0,
            base_radius: 4.2,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RibbonConfig {
    pub count: usize,
    pub base_radius: f32,
    pub loops: f32,
    pub width_spread: f32,
    pub height_spread: f32,
}
impl Default for RibbonConfig {
    fn default() -> Self {
        Self {
            count: 12_000,
            base_radius: 4.5,
            loops: 6.0,
            width_spread: 0.2,
            height_spread: 0.1,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OrnamentConfig {
    pub count: usize,
    pub base_radius: f32,
    /// Keep ornaments this far away from the very top and bottom of the cone.
    pub margin: f32,
}
impl Default for OrnamentConfig {
    fn default() -> Self {
        Self {
            count: 70,
            base_radius: 3.8,
            margin: 0.5,
        }
    }
}

/// Exponential burst parameters: displacement factor is
/// `(1 - exp(-rate * t)) * gain` per system.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ExplosionTuning {
    pub tree_rate: f32,
    pub tree_gain: f32,
    pub ribbon_rate: f32,
    pub ribbon_gain: f32,
}
impl Default for ExplosionTuning {
    fn default() -> Self {
        Self {
            tree_rate: 0.6,
            tree_gain: 8.0,
            ribbon_rate: 0.5,
            ribbon_gain: 10.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RevealConfig {
    /// Delay between the discover gesture and the card overlay.
    pub delay_secs: f32,
    /// By default the reveal timer keeps running when the card is dismissed
    /// early, so the card pops back up when it fires. Set this to drop the
    /// pending reveal on any reset instead.
    pub cancel_on_reset: bool,
}
impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            delay_secs: 1.5,
            cancel_on_reset: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    pub background: String,
    pub effect: String,
    pub background_volume: f32,
    pub effect_volume: f32,
    pub start_muted: bool,
}
impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            background: "audio/background.ogg".into(),
            effect: "audio/sparkle.ogg".into(),
            background_volume: 0.4,
            effect_volume: 0.6,
            start_muted: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub fov_degrees: f32,
    /// Orbit auto-rotation in turns per minute (matches the usual
    /// orbit-controls convention where 2.0 is one turn every 30 s).
    pub auto_rotate_speed: f32,
    pub drag_sensitivity: f32,
    pub zoom_sensitivity: f32,
}
impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 18.0,
            min_distance: 10.0,
            max_distance: 25.0,
            fov_degrees: 40.0,
            auto_rotate_speed: 0.8,
            drag_sensitivity: 0.005,
            zoom_sensitivity: 0.8,
        }
    }
}

/// Bloom intensity per phase, in bevy's bloom intensity scale.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GlowConfig {
    pub idle: f32,
    pub burst: f32,
}
impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            idle: 0.25,
            burst: 0.45,
        }
    }
}

/// All user-facing copy, so a card can be re-worded without a rebuild.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CardTextConfig {
    pub heading: String,
    pub subheading: String,
    pub discover_label: String,
    pub title: String,
    pub message: String,
    pub signature: String,
    pub close_label: String,
}
impl Default for CardTextConfig {
    fn default() -> Self {
        Self {
            heading: "Merry Christmas".into(),
            subheading: "& a Happy New Year".into(),
            discover_label: "Discover wishes".into(),
            title: "Warmest Wishes".into(),
            message: "May the season bring you light, laughter and time \
                      with the people you love. Thank you for being part \
                      of our year."
                .into(),
            signature: "With love".into(),
            close_label: "Back to the tree".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StarfieldConfig {
    pub count: usize,
    pub radius: f32,
    pub depth: f32,
}
impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 3000,
            radius: 100.0,
            depth: 50.0,
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CardConfig {
    pub window: WindowConfig,
    pub tree: TreeConfig,
    pub ribbon: RibbonConfig,
    pub ornaments: OrnamentConfig,
    pub explosion: ExplosionTuning,
    pub reveal: RevealConfig,
    pub audio: AudioConfig,
    pub camera: CameraConfig,
    pub glow: GlowConfig,
    pub starfield: StarfieldConfig,
    pub card: CardTextConfig,
}

impl CardConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data =
            fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
        ron::from_str(&data).with_context(|| format!("parse RON {}", path.display()))
    }

    /// Missing or malformed config files are non-fatal; the built-in
    /// defaults cover every section.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<anyhow::Error>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
}
