use bevy::prelude::*;

use crate::core::components::BallColor;
use crate::core::config::GameConfig;
use crate::core::events::{GameOver, ResetRequested, SessionChanged, TapEvent, ToggleEditRequested};
use crate::gameplay::spawn::{spawn_ball, spawn_obstacle, GameRng, ObstacleRoll};
use crate::gameplay::state::{ObstacleRegistry, SessionState};

const LOG_TARGET: &str = "session";

/// Startup: give presentation layers an initial snapshot to render.
pub fn announce_initial_state(session: Res<SessionState>, mut changed: EventWriter<SessionChanged>) {
    changed.write(SessionChanged(*session));
}

pub fn handle_toggle_requests(
    mut requests: EventReader<ToggleEditRequested>,
    mut session: ResMut<SessionState>,
    mut changed: EventWriter<SessionChanged>,
) {
    for _ in requests.read() {
        let editing = session.toggle_edit_mode();
        info!(target: LOG_TARGET, "edit mode {}", if editing { "on" } else { "off" });
        changed.write(SessionChanged(*session));
    }
}

/// Taps place an obstacle in edit mode, otherwise drop a ball if any are left.
/// With no balls left the tap only raises `GameOver`; nothing is spawned or counted.
pub fn handle_taps(
    mut commands: Commands,
    mut taps: EventReader<TapEvent>,
    session: Res<SessionState>,
    cfg: Res<GameConfig>,
    mut rng: ResMut<GameRng>,
    mut registry: ResMut<ObstacleRegistry>,
    mut game_over: EventWriter<GameOver>,
) {
    for tap in taps.read() {
        if session.edit_mode {
            let roll = ObstacleRoll::random(&mut rng.0, &cfg);
            let entity = spawn_obstacle(&mut commands, tap.location, roll, &cfg);
            registry.register(entity);
            debug!(
                target: LOG_TARGET,
                "obstacle {:?} at ({:.0}, {:.0}) width={:.0}",
                entity, tap.location.x, tap.location.y, roll.width
            );
        } else if session.can_drop() {
            let color = BallColor::random(&mut rng.0);
            let entity = spawn_ball(&mut commands, tap.location.x, color, &cfg);
            debug!(target: LOG_TARGET, "ball {:?} ({:?}) dropped at x={:.0}", entity, color, tap.location.x);
        } else {
            info!(
                target: LOG_TARGET,
                "drop refused: balls_remaining={}",
                session.balls_remaining
            );
            game_over.write(GameOver);
        }
    }
}

/// Reset score and ball count and clear every player-placed obstacle.
/// Live balls, slots and bouncers are left in place.
pub fn handle_reset_requests(
    mut commands: Commands,
    mut requests: EventReader<ResetRequested>,
    cfg: Res<GameConfig>,
    mut session: ResMut<SessionState>,
    mut registry: ResMut<ObstacleRegistry>,
    mut changed: EventWriter<SessionChanged>,
) {
    if requests.is_empty() {
        return;
    }
    // Several requests in one frame collapse into one reset.
    requests.clear();
    session.reset(cfg.session.starting_balls);
    let mut removed = 0usize;
    for entity in registry.drain() {
        commands.entity(entity).despawn();
        removed += 1;
    }
    info!(
        target: LOG_TARGET,
        "session reset: balls={} obstacles_removed={}", session.balls_remaining, removed
    );
    changed.write(SessionChanged(*session));
}
