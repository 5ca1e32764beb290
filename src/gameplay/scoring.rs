use std::collections::HashSet;

use bevy::prelude::*;
use bevy_rapier2d::prelude::CollisionEvent;

use crate::core::components::EntityKind;
use crate::core::events::{EffectKind, EffectRequest, SessionChanged};
use crate::gameplay::state::{ContactOutcome, ObstacleRegistry, SessionState};

const LOG_TARGET: &str = "session";

/// Order a contact pair as `(ball, other)`. Pairs without a ball are irrelevant.
fn ball_first(a: Entity, b: Entity, kinds: &Query<(&EntityKind, &Transform)>) -> Option<(Entity, Entity)> {
    let is_ball = |e: Entity| matches!(kinds.get(e), Ok((EntityKind::Ball, _)));
    if is_ball(a) {
        Some((a, b))
    } else if is_ball(b) {
        Some((b, a))
    } else {
        None
    }
}

/// Apply the scoring policy to every new contact reported by Rapier.
///
/// A ball scores at most once: despawns are deferred, so balls consumed earlier in
/// this batch are tracked locally, and despawned balls no longer match `kinds` on
/// later frames.
pub fn handle_ball_contacts(
    mut commands: Commands,
    mut collisions: EventReader<CollisionEvent>,
    kinds: Query<(&EntityKind, &Transform)>,
    mut session: ResMut<SessionState>,
    mut registry: ResMut<ObstacleRegistry>,
    mut effects: EventWriter<EffectRequest>,
    mut changed: EventWriter<SessionChanged>,
) {
    let mut spent: HashSet<Entity> = HashSet::new();
    let mut dirty = false;
    for ev in collisions.read() {
        let CollisionEvent::Started(a, b, _flags) = ev else {
            continue;
        };
        let Some((ball, other)) = ball_first(*a, *b, &kinds) else {
            continue;
        };
        if spent.contains(&ball) {
            continue;
        }
        let other_kind = kinds.get(other).ok().map(|(k, _)| *k);
        match session.apply_contact(other_kind) {
            ContactOutcome::Scored(polarity) => {
                spent.insert(ball);
                if let Ok((_, tf)) = kinds.get(ball) {
                    effects.write(EffectRequest {
                        kind: EffectKind::FireBurst,
                        position: tf.translation.truncate(),
                    });
                }
                commands.entity(ball).despawn();
                dirty = true;
                info!(
                    target: LOG_TARGET,
                    "ball {:?} -> {:?} slot: score={} balls={}",
                    ball, polarity, session.score, session.balls_remaining
                );
            }
            ContactOutcome::ObstacleHit => {
                if registry.remove(other) {
                    commands.entity(other).despawn();
                    debug!(target: LOG_TARGET, "obstacle {:?} knocked out by {:?}", other, ball);
                }
            }
            ContactOutcome::NoEffect => {}
        }
    }
    if dirty {
        changed.write(SessionChanged(*session));
    }
}
