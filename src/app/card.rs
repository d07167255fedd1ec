use bevy::prelude::*;

use crate::app::flow::CardFlowPlugin;
use crate::core::system::system_order::{AnimateSet, UploadSet};
use crate::debug::DebugPlugin;
use crate::scene::camera::OrbitCameraPlugin;
use crate::scene::ScenePlugin;
use crate::ui::audio::CardAudioPlugin;
use crate::ui::overlay::OverlayPlugin;

pub struct CardPlugin;

impl Plugin for CardPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(Update, (AnimateSet, UploadSet.after(AnimateSet)))
            .add_plugins((
                CardFlowPlugin,
                OrbitCameraPlugin,
                ScenePlugin,
                OverlayPlugin,
                CardAudioPlugin,
                DebugPlugin,
            ));
    }
}
