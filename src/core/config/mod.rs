pub mod config;

pub use config::{
    BallConfig, EffectsConfig, GameConfig, GravityConfig, LayoutConfig, ObstacleConfig, Placement,
    SessionConfig, SlotPlacement, SpawnRange, WindowConfig, MISSING_FILE,
};
