use bevy::prelude::*;

use starwish::{CardConfig, CardPlugin};

fn main() {
    // Load configuration (fall back to defaults if missing)
    let (cfg, err) = CardConfig::load_or_default("assets/config/card.ron");
    if let Some(err) = err {
        eprintln!("config fallback to defaults: {err:#}");
    }

    App::new()
        .add_plugins(
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: cfg.window.title.clone(),
                    resolution: (cfg.window.width, cfg.window.height).into(),
                    resizable: true,
                    ..default()
                }),
                ..default()
            }),
        )
        .insert_resource(cfg)
        .add_plugins(CardPlugin)
        .run();
}
