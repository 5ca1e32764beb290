use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::config::GameConfig;

pub const PIXELS_PER_METER: f32 = 100.0;

/// Installs Rapier, applies configured gravity and walls the window frame in.
pub struct PhysicsSetupPlugin {
    pub debug_render: bool,
}

impl Plugin for PhysicsSetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(
            PIXELS_PER_METER,
        ))
        .add_systems(Startup, spawn_arena_bounds)
        .add_systems(Update, configure_gravity);
        if self.debug_render {
            app.add_plugins(RapierDebugRenderPlugin::default());
        }
    }
}

/// The Rapier context (and its configuration component) is created by the plugin,
/// so gravity is applied whenever a configuration shows up.
fn configure_gravity(
    mut rapier_cfg: Query<&mut RapierConfiguration, Added<RapierConfiguration>>,
    game_cfg: Res<GameConfig>,
) {
    for mut cfg in &mut rapier_cfg {
        cfg.gravity = Vect::new(0.0, game_cfg.gravity.y);
        info!(target: "physics", "gravity -> (0, {:.0})", game_cfg.gravity.y);
    }
}

/// Corners of the window frame in world space (origin at center), counter-clockwise.
pub fn arena_corners(width: f32, height: f32) -> [Vec2; 4] {
    let (hw, hh) = (width * 0.5, height * 0.5);
    [
        Vec2::new(-hw, -hh),
        Vec2::new(hw, -hh),
        Vec2::new(hw, hh),
        Vec2::new(-hw, hh),
    ]
}

/// Closed edge loop around the window; walls carry no `EntityKind`, so contacts with
/// them never affect the session.
fn spawn_arena_bounds(mut commands: Commands, cfg: Res<GameConfig>) {
    let corners = arena_corners(cfg.window.width, cfg.window.height);
    for i in 0..corners.len() {
        let (a, b) = (corners[i], corners[(i + 1) % corners.len()]);
        commands.spawn((
            Name::new("ArenaEdge"),
            Transform::default(),
            RigidBody::Fixed,
            Collider::segment(a, b),
        ));
    }
}
