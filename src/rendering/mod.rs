pub mod camera;
pub mod effects;
pub mod hud;
pub mod materials;
pub mod palette;
