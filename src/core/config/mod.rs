pub mod config;

pub use config::{
    AudioConfig, CameraConfig, CardConfig, CardTextConfig, ExplosionTuning, GlowConfig,
    OrnamentConfig, RevealConfig, RibbonConfig, StarfieldConfig, TreeConfig, WindowConfig,
};
