//! Debug module: feature gated runtime stats logging.
//! Built only when compiled with the `debug` feature (on by default).

#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
use crate::animation::ExplosionState;
#[cfg(feature = "debug")]
use crate::app::state::CardPhase;

pub struct DebugPlugin;

#[cfg(feature = "debug")]
impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(StatsTimer(Timer::from_seconds(2.0, TimerMode::Repeating)))
            .add_systems(Update, debug_stats_system);
    }
}

#[cfg(not(feature = "debug"))]
impl bevy::app::Plugin for DebugPlugin {
    fn build(&self, _app: &mut bevy::app::App) {}
}

#[cfg(feature = "debug")]
#[derive(Resource)]
struct StatsTimer(Timer);

#[cfg(feature = "debug")]
fn debug_stats_system(
    time: Res<Time>,
    mut timer: ResMut<StatsTimer>,
    phase: Res<State<CardPhase>>,
    fields: Query<&ExplosionState>,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }
    let clocks: Vec<f32> = fields
        .iter()
        .filter_map(|s| match s {
            ExplosionState::Exploding { elapsed } => Some(*elapsed),
            ExplosionState::Settled => None,
        })
        .collect();
    info!(
        target: "stats",
        "t={:.1}s dt={:.1}ms phase={:?} explosion_clocks={:?}",
        time.elapsed_secs(), time.delta_secs() * 1000.0, phase.get(), clocks
    );
}
