// ── Domain model ──

pub mod player;

pub use player::{Player, PlayerId};
