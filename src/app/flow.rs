//! UI flow: discover/close events, the phase state machine, and the card
//! reveal timer. Kept free of rendering so headless tests can drive it.

use bevy::prelude::*;

use crate::app::state::CardPhase;
use crate::core::config::CardConfig;
use crate::ui::audio::AudioCommand;

/// Primary action ("discover wishes").
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoverPressed;

/// Card overlay dismissed.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardClosed;

/// One-shot delay between the burst and the card overlay.
///
/// Ticked unconditionally, not gated on the current phase: by default the
/// pending reveal survives a reset, so closing early still shows the card
/// when the timer fires. `reveal.cancel_on_reset` opts into dropping it on
/// close instead (see [`handle_close`]).
#[derive(Resource, Deref, DerefMut)]
pub struct RevealTimer(pub Timer);

pub struct CardFlowPlugin;

impl Plugin for CardFlowPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<CardPhase>()
            .add_event::<DiscoverPressed>()
            .add_event::<CardClosed>()
            .add_event::<AudioCommand>()
            .add_systems(OnEnter(CardPhase::Exploding), arm_reveal_timer)
            .add_systems(Update, (handle_discover, handle_close, check_reveal));
    }
}

fn arm_reveal_timer(mut commands: Commands, cfg: Res<CardConfig>) {
    commands.insert_resource(RevealTimer(Timer::from_seconds(
        cfg.reveal.delay_secs,
        TimerMode::Once,
    )));
}

fn handle_discover(
    mut ev: EventReader<DiscoverPressed>,
    phase: Res<State<CardPhase>>,
    mut next: ResMut<NextState<CardPhase>>,
    mut audio: EventWriter<AudioCommand>,
) {
    if ev.read().count() == 0 {
        return;
    }
    if *phase.get() != CardPhase::Idle {
        return;
    }
    info!(target: "flow", "discover: entering burst");
    next.set(CardPhase::Exploding);
    // sparkle feedback, then the autoplay unlock attempt; both best-effort
    audio.write(AudioCommand::PlayEffect);
    audio.write(AudioCommand::ResumeMusic);
}

fn handle_close(
    mut commands: Commands,
    mut ev: EventReader<CardClosed>,
    phase: Res<State<CardPhase>>,
    mut next: ResMut<NextState<CardPhase>>,
    cfg: Res<CardConfig>,
) {
    if ev.read().count() == 0 {
        return;
    }
    if *phase.get() == CardPhase::Idle {
        return;
    }
    info!(target: "flow", "card closed: resetting");
    next.set(CardPhase::Idle);
    if cfg.reveal.cancel_on_reset {
        commands.remove_resource::<RevealTimer>();
    }
}

fn check_reveal(
    mut commands: Commands,
    time: Res<Time>,
    timer: Option<ResMut<RevealTimer>>,
    mut next: ResMut<NextState<CardPhase>>,
) {
    let Some(mut timer) = timer else {
        return;
    };
    timer.tick(time.delta());
    if timer.finished() {
        commands.remove_resource::<RevealTimer>();
        info!(target: "flow", "reveal timer fired: showing card");
        next.set(CardPhase::CardShown);
    }
}
