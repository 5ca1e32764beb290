pub mod app;
pub mod core;
pub mod gameplay;
pub mod interaction;
pub mod physics;
pub mod rendering;

// Curated re-exports
pub use app::game::GamePlugin;
pub use core::components::{BallColor, EntityKind, Polarity};
pub use core::config::{config::GameConfig, config::WindowConfig};
pub use gameplay::state::{ObstacleRegistry, SessionPlugin, SessionState};
