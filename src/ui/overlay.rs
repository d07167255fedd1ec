//! Screen overlays: the idle headings + discover button, the greeting card,
//! and the persistent mute toggle. Each overlay is spawned on state entry and
//! despawned on exit, in the same root-marker pattern as the rest of the UI.

use bevy::prelude::*;
use bevy::ui::{AlignItems, FlexDirection, JustifyContent, Node, PositionType};

use crate::app::flow::{CardClosed, DiscoverPressed};
use crate::app::state::CardPhase;
use crate::core::config::CardConfig;
use crate::ui::audio::{AudioCommand, AudioSettings};

const HEADING_COLOR: Color = Color::srgb(0.98, 0.85, 0.37);
const BODY_COLOR: Color = Color::srgb(0.92, 0.92, 0.95);
const BUTTON_BG: Color = Color::srgba(0.98, 0.75, 0.14, 0.92);
const BUTTON_BG_HOVER: Color = Color::srgba(1.0, 0.85, 0.35, 1.0);
const CARD_BG: Color = Color::srgba(0.03, 0.05, 0.04, 0.88);

/// Idle headings/button fade out over this long once the burst starts.
const FADE_OUT_SECS: f32 = 0.8;

#[derive(Component)]
struct IdleOverlayRoot;
#[derive(Component)]
struct CardOverlayRoot;
#[derive(Component)]
struct DiscoverButton;
#[derive(Component)]
struct CloseButton;
#[derive(Component)]
struct MuteButton;
#[derive(Component)]
struct MuteLabel;

/// Marks an overlay root as fading; despawned when the timer finishes.
#[derive(Component)]
struct FadeOut(Timer);

pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_mute_button)
            .add_systems(OnEnter(CardPhase::Idle), spawn_idle_overlay)
            .add_systems(OnExit(CardPhase::Idle), begin_idle_fade)
            .add_systems(OnEnter(CardPhase::CardShown), spawn_card_overlay)
            .add_systems(OnExit(CardPhase::CardShown), despawn_card_overlay)
            .add_systems(
                Update,
                (
                    discover_interaction.run_if(in_state(CardPhase::Idle)),
                    close_interaction.run_if(in_state(CardPhase::CardShown)),
                    mute_interaction,
                    refresh_mute_label,
                    fade_out_overlays,
                ),
            );
    }
}

fn spawn_idle_overlay(mut commands: Commands, cfg: Res<CardConfig>) {
    commands
        .spawn((
            IdleOverlayRoot,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::SpaceBetween,
                align_items: AlignItems::Center,
                padding: UiRect::all(Val::Px(48.0)),
                ..default()
            },
        ))
        .with_children(|root| {
            root.spawn(Node {
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                row_gap: Val::Px(6.0),
                ..default()
            })
            .with_children(|top| {
                top.spawn((
                    Text::new(cfg.card.heading.clone()),
                    TextFont {
                        font_size: 44.0,
                        ..default()
                    },
                    TextColor(HEADING_COLOR),
                ));
                top.spawn((
                    Text::new(cfg.card.subheading.clone()),
                    TextFont {
                        font_size: 26.0,
                        ..default()
                    },
                    TextColor(BODY_COLOR),
                ));
            });
            root.spawn((
                DiscoverButton,
                Button,
                Node {
                    padding: UiRect::axes(Val::Px(28.0), Val::Px(12.0)),
                    ..default()
                },
                BackgroundColor(BUTTON_BG),
            ))
            .with_children(|b| {
                b.spawn((
                    Text::new(cfg.card.discover_label.clone()),
                    TextFont {
                        font_size: 20.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.05, 0.08, 0.05)),
                ));
            });
        });
}

fn begin_idle_fade(mut commands: Commands, q_root: Query<Entity, With<IdleOverlayRoot>>) {
    for e in &q_root {
        commands
            .entity(e)
            .insert(FadeOut(Timer::from_seconds(FADE_OUT_SECS, TimerMode::Once)));
    }
}

/// Scale the alpha of every text/background under a fading root toward zero,
/// then despawn the whole subtree when the timer runs out.
fn fade_out_overlays(
    mut commands: Commands,
    time: Res<Time>,
    mut q_fading: Query<(Entity, &mut FadeOut)>,
    q_children: Query<&Children>,
    mut q_text: Query<&mut TextColor>,
    mut q_bg: Query<&mut BackgroundColor>,
) {
    for (root, mut fade) in &mut q_fading {
        let before = 1.0 - fade.0.fraction();
        fade.0.tick(time.delta());
        if fade.0.finished() {
            commands.entity(root).despawn();
            continue;
        }
        // multiplicative step so each alpha reaches zero exactly when the
        // timer does, whatever it started at
        let scale = (1.0 - fade.0.fraction()) / before;
        for e in q_children.iter_descendants(root) {
            if let Ok(mut text) = q_text.get_mut(e) {
                let a = text.0.alpha();
                text.0.set_alpha(a * scale);
            }
            if let Ok(mut bg) = q_bg.get_mut(e) {
                let a = bg.0.alpha();
                bg.0.set_alpha(a * scale);
            }
        }
    }
}

fn spawn_card_overlay(mut commands: Commands, cfg: Res<CardConfig>) {
    commands
        .spawn((
            CardOverlayRoot,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
        ))
        .with_children(|root| {
            root.spawn((
                Node {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    padding: UiRect::all(Val::Px(36.0)),
                    row_gap: Val::Px(14.0),
                    max_width: Val::Px(520.0),
                    ..default()
                },
                BackgroundColor(CARD_BG),
            ))
            .with_children(|card| {
                card.spawn((
                    Text::new(cfg.card.title.clone()),
                    TextFont {
                        font_size: 34.0,
                        ..default()
                    },
                    TextColor(HEADING_COLOR),
                ));
                card.spawn((
                    Text::new(cfg.card.message.clone()),
                    TextFont {
                        font_size: 20.0,
                        ..default()
                    },
                    TextColor(BODY_COLOR),
                ));
                card.spawn((
                    Text::new(cfg.card.signature.clone()),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(HEADING_COLOR),
                ));
                card.spawn((
                    CloseButton,
                    Button,
                    Node {
                        padding: UiRect::axes(Val::Px(22.0), Val::Px(8.0)),
                        margin: UiRect::top(Val::Px(10.0)),
                        ..default()
                    },
                    BackgroundColor(BUTTON_BG),
                ))
                .with_children(|b| {
                    b.spawn((
                        Text::new(cfg.card.close_label.clone()),
                        TextFont {
                            font_size: 18.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.05, 0.08, 0.05)),
                    ));
                });
            });
        });
}

fn despawn_card_overlay(mut commands: Commands, q_root: Query<Entity, With<CardOverlayRoot>>) {
    for e in &q_root {
        commands.entity(e).despawn();
    }
}

fn spawn_mute_button(mut commands: Commands) {
    commands
        .spawn((
            MuteButton,
            Button,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(16.0),
                right: Val::Px(16.0),
                padding: UiRect::axes(Val::Px(14.0), Val::Px(8.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.12, 0.1, 0.7)),
        ))
        .with_children(|b| {
            b.spawn((
                MuteLabel,
                Text::new("sound on"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(BODY_COLOR),
            ));
        });
}

fn discover_interaction(
    mut q: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<DiscoverButton>),
    >,
    mut ev: EventWriter<DiscoverPressed>,
) {
    for (interaction, mut bg) in &mut q {
        match interaction {
            Interaction::Pressed => {
                ev.write(DiscoverPressed);
            }
            Interaction::Hovered => *bg = BackgroundColor(BUTTON_BG_HOVER),
            Interaction::None => *bg = BackgroundColor(BUTTON_BG),
        }
    }
}

fn close_interaction(
    mut q: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<CloseButton>)>,
    mut ev: EventWriter<CardClosed>,
) {
    for (interaction, mut bg) in &mut q {
        match interaction {
            Interaction::Pressed => {
                ev.write(CardClosed);
            }
            Interaction::Hovered => *bg = BackgroundColor(BUTTON_BG_HOVER),
            Interaction::None => *bg = BackgroundColor(BUTTON_BG),
        }
    }
}

fn mute_interaction(
    q: Query<&Interaction, (Changed<Interaction>, With<MuteButton>)>,
    settings: Res<AudioSettings>,
    mut ev: EventWriter<AudioCommand>,
) {
    for interaction in &q {
        if *interaction == Interaction::Pressed {
            ev.write(AudioCommand::SetMuted(!settings.muted));
        }
    }
}

fn refresh_mute_label(
    settings: Res<AudioSettings>,
    mut q_label: Query<&mut Text, With<MuteLabel>>,
) {
    if !settings.is_changed() {
        return;
    }
    let label = if settings.muted { "muted" } else { "sound on" };
    for mut text in &mut q_label {
        if text.as_str() != label {
            *text = Text::new(label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::flow::{CardFlowPlugin, DiscoverPressed};
    use bevy::state::app::StatesPlugin;
    use std::time::Duration;

    fn harness() -> App {
        let mut app = App::new();
        app.add_plugins(StatesPlugin);
        app.insert_resource(CardConfig::default());
        app.insert_resource(Time::<()>::default());
        app.init_resource::<AudioSettings>();
        app.add_plugins((CardFlowPlugin, OverlayPlugin));
        app.update();
        app
    }

    fn step(app: &mut App, secs: f32) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(secs));
        app.update();
    }

    fn idle_roots(app: &mut App) -> usize {
        app.world_mut()
            .query_filtered::<Entity, With<IdleOverlayRoot>>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn idle_overlay_fades_out_then_despawns() {
        let mut app = harness();
        assert_eq!(idle_roots(&mut app), 1);

        app.world_mut().send_event(DiscoverPressed);
        step(&mut app, 0.0);
        step(&mut app, 0.0); // transition into the burst
        assert_eq!(idle_roots(&mut app), 1, "overlay lingers while fading");

        step(&mut app, 0.4);
        // heading, subheading and button label are mid-fade; the mute label
        // stays fully opaque
        let mut q = app.world_mut().query::<&TextColor>();
        let mid_fade = q
            .iter(app.world())
            .filter(|c| c.0.alpha() > 0.01 && c.0.alpha() < 0.99)
            .count();
        assert_eq!(mid_fade, 3, "expected exactly the idle overlay texts");
        let opaque = q.iter(app.world()).filter(|c| c.0.alpha() >= 0.99).count();
        assert_eq!(opaque, 1, "mute label must not fade");

        step(&mut app, 0.5);
        assert_eq!(idle_roots(&mut app), 0, "fade complete, overlay gone");
    }

    #[test]
    fn card_overlay_still_closes_instantly() {
        let mut app = harness();
        app.world_mut().send_event(DiscoverPressed);
        step(&mut app, 0.0);
        step(&mut app, 0.0);
        step(&mut app, 1.6);
        step(&mut app, 0.0);

        let mut q = app
            .world_mut()
            .query_filtered::<Entity, With<CardOverlayRoot>>();
        assert_eq!(q.iter(app.world()).count(), 1);

        app.world_mut().send_event(crate::app::flow::CardClosed);
        step(&mut app, 0.0);
        step(&mut app, 0.0);
        let mut q = app
            .world_mut()
            .query_filtered::<Entity, With<CardOverlayRoot>>();
        assert_eq!(q.iter(app.world()).count(), 0);
    }
}
