// scoreboard-api: Async Rust client for the scoreboard players REST API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::PlayerClient;
pub use error::Error;
pub use models::{HealthStatus, NewPlayer, PlayerRecord, PointsUpdate};
pub use transport::{TlsMode, TransportConfig};
