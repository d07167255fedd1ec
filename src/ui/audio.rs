//! Best-effort audio wiring: one looping background track, one sparkle
//! one-shot per discover. UI systems only emit [`AudioCommand`]s; this module
//! applies them to the actual sinks. Any command that cannot be applied
//! (asset missing, sink not decoded yet) is logged and dropped by policy;
//! audio failure is never surfaced to the UI.

use bevy::audio::{AudioPlayer, AudioSink, AudioSinkPlayback, PlaybackMode, PlaybackSettings, Volume};
use bevy::prelude::*;

use crate::core::config::CardConfig;

/// Process-wide mute flag.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AudioSettings {
    pub muted: bool,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum AudioCommand {
    /// Fire the sparkle one-shot.
    PlayEffect,
    /// Resume the background loop if unmuted (autoplay unlock point).
    ResumeMusic,
    /// Flip the mute flag; unmuting also attempts a resume.
    SetMuted(bool),
}

#[derive(Component)]
pub struct BackgroundMusic;

pub struct CardAudioPlugin;

impl Plugin for CardAudioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AudioSettings>()
            .add_systems(Startup, setup_music)
            .add_systems(Update, apply_commands);
    }
}

fn setup_music(mut commands: Commands, asset_server: Res<AssetServer>, cfg: Res<CardConfig>) {
    commands.insert_resource(AudioSettings {
        muted: cfg.audio.start_muted,
    });
    let volume = if cfg.audio.start_muted {
        Volume::Linear(0.0)
    } else {
        Volume::Linear(cfg.audio.background_volume)
    };
    // starts paused: playback is unlocked by the first user gesture
    commands.spawn((
        BackgroundMusic,
        AudioPlayer::new(asset_server.load(cfg.audio.background.clone())),
        PlaybackSettings {
            mode: PlaybackMode::Loop,
            volume,
            paused: true,
            ..default()
        },
    ));
}

fn apply_commands(
    mut commands: Commands,
    mut ev: EventReader<AudioCommand>,
    mut settings: ResMut<AudioSettings>,
    asset_server: Res<AssetServer>,
    cfg: Res<CardConfig>,
    mut music: Query<&mut AudioSink, With<BackgroundMusic>>,
) {
    for cmd in ev.read() {
        match *cmd {
            AudioCommand::PlayEffect => {
                // fire-and-forget; a missing asset only logs an asset warning
                commands.spawn((
                    AudioPlayer::new(asset_server.load(cfg.audio.effect.clone())),
                    PlaybackSettings::DESPAWN.with_volume(Volume::Linear(cfg.audio.effect_volume)),
                ));
            }
            AudioCommand::ResumeMusic => {
                if settings.muted {
                    continue;
                }
                match music.single_mut() {
                    Ok(sink) => sink.play(),
                    // explicit discard: resume is best-effort by design
                    Err(err) => debug!(target: "audio", "resume skipped: {err}"),
                }
            }
            AudioCommand::SetMuted(muted) => {
                settings.muted = muted;
                match music.single_mut() {
                    Ok(mut sink) => {
                        if muted {
                            sink.set_volume(Volume::Linear(0.0));
                        } else {
                            sink.set_volume(Volume::Linear(cfg.audio.background_volume));
                            // the toggle gesture doubles as the unlock point
                            sink.play();
                        }
                    }
                    Err(err) => debug!(target: "audio", "mute toggle without sink: {err}"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::asset::AssetPlugin;
    use bevy::MinimalPlugins;

    // No audio device here: sinks never exist, which is exactly the
    // logged-and-dropped path the commands must survive.
    fn harness() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()));
        app.init_asset::<bevy::audio::AudioSource>();
        app.insert_resource(CardConfig::default());
        app.init_resource::<AudioSettings>();
        app.add_event::<AudioCommand>();
        app.add_systems(Update, apply_commands);
        app
    }

    #[test]
    fn set_muted_flips_the_flag_without_a_sink() {
        let mut app = harness();
        app.world_mut().send_event(AudioCommand::SetMuted(true));
        app.update();
        assert!(app.world().resource::<AudioSettings>().muted);

        app.world_mut().send_event(AudioCommand::SetMuted(false));
        app.update();
        assert!(!app.world().resource::<AudioSettings>().muted);
    }

    #[test]
    fn resume_while_muted_leaves_the_flag_alone() {
        let mut app = harness();
        app.world_mut().send_event(AudioCommand::SetMuted(true));
        app.update();
        app.world_mut().send_event(AudioCommand::ResumeMusic);
        app.update();
        assert!(app.world().resource::<AudioSettings>().muted);
    }

    #[test]
    fn commands_are_harmless_headless() {
        let mut app = harness();
        app.world_mut().send_event(AudioCommand::PlayEffect);
        app.world_mut().send_event(AudioCommand::ResumeMusic);
        app.world_mut().send_event(AudioCommand::SetMuted(false));
        app.update();
        app.update();
    }
}
