pub mod scoring;
pub mod session;
pub mod spawn;
pub mod state;
