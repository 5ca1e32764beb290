use bevy::prelude::*;

use crate::gameplay::state::SessionState;

/// A pointer press in world space that was not claimed by UI chrome.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TapEvent {
    pub location: Vec2,
}

/// Emitted after every mutation of `SessionState`; carries the new snapshot.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SessionChanged(pub SessionState);

/// A drop was attempted with no balls left.
#[derive(Event, Debug, Default, Clone, Copy)]
pub struct GameOver;

/// Ask the controller to reset score, ball count and obstacles.
#[derive(Event, Debug, Default, Clone, Copy)]
pub struct ResetRequested;

/// Ask the controller to flip edit mode.
#[derive(Event, Debug, Default, Clone, Copy)]
pub struct ToggleEditRequested;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    /// Burst left behind when a slot swallows a ball.
    FireBurst,
}

/// Fire-and-forget request for a cosmetic effect at a world position.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EffectRequest {
    pub kind: EffectKind,
    pub position: Vec2,
}
