//! Session bookkeeping: score, balls remaining, edit mode and the live obstacle set.
//! Pure data + rules live here; the systems that drive them are in `gameplay::session`
//! and `gameplay::scoring`.

use std::collections::HashSet;

use bevy::prelude::*;
use bevy_rapier2d::prelude::CollisionEvent;

use crate::core::components::{EntityKind, Polarity};
use crate::core::config::{GameConfig, SessionConfig};
use crate::core::events::{
    EffectRequest, GameOver, ResetRequested, SessionChanged, TapEvent, ToggleEditRequested,
};
use crate::core::system::system_order::SessionSet;
use crate::gameplay::scoring::handle_ball_contacts;
use crate::gameplay::session::{
    announce_initial_state, handle_reset_requests, handle_taps, handle_toggle_requests,
};
use crate::gameplay::spawn::{spawn_scene_layout, GameRng};

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub score: i32,
    /// Not clamped: Bad-slot hits may take this below zero.
    pub balls_remaining: i32,
    pub edit_mode: bool,
}

impl FromWorld for SessionState {
    fn from_world(world: &mut World) -> Self {
        world
            .get_resource::<GameConfig>()
            .map(|cfg| Self::new(cfg.session.starting_balls))
            .unwrap_or_else(|| Self::new(SessionConfig::default().starting_balls))
    }
}

/// What a contact between a ball and some other collider amounts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// The ball fell into a slot and must be destroyed.
    Scored(Polarity),
    /// The obstacle must be destroyed; the ball keeps going.
    ObstacleHit,
    NoEffect,
}

impl SessionState {
    pub fn new(starting_balls: i32) -> Self {
        Self {
            score: 0,
            balls_remaining: starting_balls,
            edit_mode: false,
        }
    }

    #[inline]
    pub fn can_drop(&self) -> bool {
        self.balls_remaining > 0
    }

    /// Apply the scoring rule for a ball touching `other`. `None` means the other
    /// collider is not categorized (arena walls) and is treated as `NoEffect`.
    pub fn apply_contact(&mut self, other: Option<EntityKind>) -> ContactOutcome {
        match other {
            Some(EntityKind::Slot(polarity)) => {
                self.score += polarity.delta();
                self.balls_remaining += polarity.delta();
                ContactOutcome::Scored(polarity)
            }
            Some(EntityKind::Obstacle) => ContactOutcome::ObstacleHit,
            Some(EntityKind::Bouncer) | Some(EntityKind::Ball) | None => ContactOutcome::NoEffect,
        }
    }

    /// Returns the new edit mode.
    pub fn toggle_edit_mode(&mut self) -> bool {
        self.edit_mode = !self.edit_mode;
        self.edit_mode
    }

    /// Edit mode is left as is.
    pub fn reset(&mut self, starting_balls: i32) {
        self.score = 0;
        self.balls_remaining = starting_balls;
    }
}

/// Live obstacles placed in edit mode. The controller despawns through this set
/// instead of walking the scene.
#[derive(Resource, Debug, Default)]
pub struct ObstacleRegistry(HashSet<Entity>);

impl ObstacleRegistry {
    pub fn register(&mut self, entity: Entity) {
        self.0.insert(entity);
    }

    /// `true` if the entity was live and is now forgotten.
    pub fn remove(&mut self, entity: Entity) -> bool {
        self.0.remove(&entity)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Entity> + '_ {
        self.0.drain()
    }
}

/// Headless session controller: resources, events and the systems that mutate them.
/// Needs no window, renderer or physics pipeline, so tests run it on `MinimalPlugins`.
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameConfig>()
            .init_resource::<SessionState>()
            .init_resource::<ObstacleRegistry>()
            .init_resource::<GameRng>()
            .add_event::<TapEvent>()
            .add_event::<SessionChanged>()
            .add_event::<GameOver>()
            .add_event::<ResetRequested>()
            .add_event::<ToggleEditRequested>()
            .add_event::<EffectRequest>()
            .add_event::<CollisionEvent>()
            .add_systems(Startup, (spawn_scene_layout, announce_initial_state))
            .add_systems(
                Update,
                (
                    handle_toggle_requests,
                    handle_taps,
                    handle_ball_contacts,
                    handle_reset_requests,
                )
                    .chain()
                    .in_set(SessionSet),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn good_slot_adds_one_to_both_counters() {
        let mut s = SessionState::new(5);
        let out = s.apply_contact(Some(EntityKind::Slot(Polarity::Good)));
        assert_eq!(out, ContactOutcome::Scored(Polarity::Good));
        assert_eq!((s.score, s.balls_remaining), (1, 6));
    }

    #[test]
    fn bad_slot_is_not_clamped() {
        let mut s = SessionState::new(0);
        s.apply_contact(Some(EntityKind::Slot(Polarity::Bad)));
        s.apply_contact(Some(EntityKind::Slot(Polarity::Bad)));
        assert_eq!((s.score, s.balls_remaining), (-2, -2));
        assert!(!s.can_drop());
    }

    #[test]
    fn non_scoring_contacts_leave_state_alone() {
        let mut s = SessionState::new(5);
        let before = s;
        for other in [
            Some(EntityKind::Bouncer),
            Some(EntityKind::Ball),
            Some(EntityKind::Obstacle),
            None,
        ] {
            s.apply_contact(other);
        }
        assert_eq!(s, before);
        assert_eq!(
            s.apply_contact(Some(EntityKind::Obstacle)),
            ContactOutcome::ObstacleHit
        );
    }

    #[test]
    fn reset_is_idempotent_and_keeps_edit_mode() {
        let mut s = SessionState::new(5);
        s.score = -4;
        s.balls_remaining = 1;
        s.toggle_edit_mode();
        s.reset(5);
        let once = s;
        s.reset(5);
        assert_eq!(s, once);
        assert_eq!((s.score, s.balls_remaining, s.edit_mode), (0, 5, true));
    }

    #[test]
    fn registry_removes_once() {
        let mut world = World::new();
        let e = world.spawn_empty().id();
        let mut reg = ObstacleRegistry::default();
        reg.register(e);
        assert!(!reg.is_empty());
        assert!(reg.remove(e));
        assert!(!reg.remove(e));
        assert!(reg.is_empty());
    }

    #[test]
    fn state_seeds_from_config() {
        let mut app = App::new();
        let mut cfg = GameConfig::default();
        cfg.session.starting_balls = 9;
        app.add_plugins(MinimalPlugins)
            .insert_resource(cfg)
            .add_plugins(SessionPlugin);
        assert_eq!(app.world().resource::<SessionState>().balls_remaining, 9);
    }

    #[test]
    fn state_without_config_uses_default_starting_balls() {
        let mut world = World::new();
        let s = SessionState::from_world(&mut world);
        assert_eq!(s, SessionState::new(SessionConfig::default().starting_balls));
        assert_eq!((s.score, s.balls_remaining, s.edit_mode), (0, 5, false));
    }
}
