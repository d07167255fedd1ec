use bevy::prelude::*;

/// High-level card lifecycle state.
/// Idle -> Exploding -> CardShown -> Idle
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum CardPhase {
    /// Tree assembled, headings and discover button visible.
    #[default]
    Idle,
    /// Burst in progress; the card reveal timer is running.
    Exploding,
    /// Greeting card overlay covers the scene; camera auto-rotate suspended.
    CardShown,
}
