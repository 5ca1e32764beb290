pub mod game_over;
pub mod input;
pub mod session;
