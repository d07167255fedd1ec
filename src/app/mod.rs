pub mod card;
pub mod flow;
pub mod state;
