use bevy::prelude::*;

/// Whether world taps are live or the game-over dialog owns input.
/// Playing -> GameOver on a refused drop; GameOver -> Playing on Retry or dismiss.
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum PlayState {
    #[default]
    Playing,
    /// Dialog open; session state is untouched until the player picks Retry.
    GameOver,
}
