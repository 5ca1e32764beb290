//! Central system ordering labels to make the update sequence explicit.
//! Stages (high-level, all in `Update`):
//! 1. Input (pointer / keyboard reduced into session events)
//! 2. Session (controller mutations: toggles, taps, contacts, resets)
//! 3. Presentation (HUD labels, effects, cosmetic animation)
//!
//! Rapier runs in `PostUpdate`, so contacts it reports are consumed by the
//! session stage on the following frame.
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct InputSet; // raw input -> TapEvent / requests

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct SessionSet; // the only place SessionState is mutated

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PresentationSet; // reacts to session events, never mutates session
