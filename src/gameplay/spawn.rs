use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::core::components::{BallColor, BoxSize, EntityKind, Polarity, SlotGlow, Spin, Tint};
use crate::core::config::GameConfig;

/// Session-wide RNG. Seeded from `GameConfig::seed` when present so a session can be replayed.
#[derive(Resource, Debug)]
pub struct GameRng(pub StdRng);

impl FromWorld for GameRng {
    fn from_world(world: &mut World) -> Self {
        let seed = world.get_resource::<GameConfig>().and_then(|cfg| cfg.seed);
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

/// Randomized attributes of one player-placed obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleRoll {
    pub width: f32,
    pub rotation: f32,
    pub tint: Color,
}

impl ObstacleRoll {
    pub fn random(rng: &mut impl Rng, cfg: &GameConfig) -> Self {
        let o = &cfg.obstacle;
        let width = if o.width.max > o.width.min {
            rng.gen_range(o.width.min..=o.width.max)
        } else {
            o.width.min
        };
        let rotation = if o.max_rotation > 0.0 {
            rng.gen_range(0.0..=o.max_rotation)
        } else {
            0.0
        };
        let tint = Color::srgb(rng.gen::<f32>(), rng.gen::<f32>(), rng.gen::<f32>());
        Self {
            width,
            rotation,
            tint,
        }
    }
}

/// Spawn a dropped ball. It appears at `x` and the configured drop height, whatever the tap's y.
pub fn spawn_ball(commands: &mut Commands, x: f32, color: BallColor, cfg: &GameConfig) -> Entity {
    let radius = cfg.ball.radius;
    commands
        .spawn((
            Name::new("Ball"),
            EntityKind::Ball,
            color,
            Transform::from_xyz(x, cfg.session.drop_height, 1.0),
            RigidBody::Dynamic,
            Collider::ball(radius),
            Restitution::coefficient(cfg.ball.restitution),
            Velocity::zero(),
            ActiveEvents::COLLISION_EVENTS,
        ))
        .id()
}

pub fn spawn_obstacle(
    commands: &mut Commands,
    location: Vec2,
    roll: ObstacleRoll,
    cfg: &GameConfig,
) -> Entity {
    let size = Vec2::new(roll.width, cfg.obstacle.height);
    commands
        .spawn((
            Name::new("Obstacle"),
            EntityKind::Obstacle,
            BoxSize(size),
            Tint(roll.tint),
            Transform::from_xyz(location.x, location.y, 0.5)
                .with_rotation(Quat::from_rotation_z(roll.rotation)),
            RigidBody::Fixed,
            Collider::cuboid(size.x * 0.5, size.y * 0.5),
        ))
        .id()
}

fn spawn_slot(commands: &mut Commands, position: Vec2, polarity: Polarity, cfg: &GameConfig) {
    let (w, h) = cfg.layout.slot_size;
    let size = Vec2::new(w, h);
    commands.spawn((
        Name::new(match polarity {
            Polarity::Good => "SlotGood",
            Polarity::Bad => "SlotBad",
        }),
        EntityKind::Slot(polarity),
        BoxSize(size),
        Transform::from_translation(position.extend(0.0)),
        RigidBody::Fixed,
        Collider::cuboid(w * 0.5, h * 0.5),
    ));
    // Glow is a separate, collider-less entity so its rotation never moves the slot body.
    commands.spawn((
        Name::new("SlotGlow"),
        SlotGlow(polarity),
        BoxSize(size),
        Spin(cfg.layout.glow_spin),
        Transform::from_translation(position.extend(-0.5)),
    ));
}

fn spawn_bouncer(commands: &mut Commands, position: Vec2, cfg: &GameConfig) {
    let radius = cfg.layout.bouncer_radius;
    commands.spawn((
        Name::new("Bouncer"),
        EntityKind::Bouncer,
        Transform::from_translation(position.extend(0.0)),
        RigidBody::Fixed,
        Collider::ball(radius),
    ));
}

/// Startup: place the fixed slots and bouncers described by `LayoutConfig`.
pub fn spawn_scene_layout(mut commands: Commands, cfg: Res<GameConfig>) {
    for slot in &cfg.layout.slots {
        spawn_slot(&mut commands, Vec2::new(slot.x, slot.y), slot.polarity(), &cfg);
    }
    for bouncer in &cfg.layout.bouncers {
        spawn_bouncer(&mut commands, bouncer.to_vec2(), &cfg);
    }
    info!(
        target: "spawn",
        "scene layout: {} slots, {} bouncers",
        cfg.layout.slots.len(),
        cfg.layout.bouncers.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obstacle_roll_respects_ranges() {
        let cfg = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let roll = ObstacleRoll::random(&mut rng, &cfg);
            assert!((16.0..=128.0).contains(&roll.width), "width {}", roll.width);
            assert!((0.0..=3.0).contains(&roll.rotation), "rotation {}", roll.rotation);
        }
    }

    #[test]
    fn degenerate_width_range_uses_min() {
        let mut cfg = GameConfig::default();
        cfg.obstacle.width.max = cfg.obstacle.width.min;
        cfg.obstacle.max_rotation = 0.0;
        let roll = ObstacleRoll::random(&mut StdRng::seed_from_u64(3), &cfg);
        assert_eq!(roll.width, cfg.obstacle.width.min);
        assert_eq!(roll.rotation, 0.0);
    }

    #[test]
    fn layout_spawns_tagged_colliders() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<GameConfig>()
            .add_systems(Startup, spawn_scene_layout);
        app.update();
        let world = app.world_mut();
        let kinds: Vec<EntityKind> = world
            .query_filtered::<&EntityKind, With<Collider>>()
            .iter(world)
            .copied()
            .collect();
        let good = kinds.iter().filter(|k| **k == EntityKind::Slot(Polarity::Good)).count();
        let bad = kinds.iter().filter(|k| **k == EntityKind::Slot(Polarity::Bad)).count();
        let bouncers = kinds.iter().filter(|k| **k == EntityKind::Bouncer).count();
        assert_eq!((good, bad, bouncers), (2, 2, 5));
        let glows = world.query::<&SlotGlow>().iter(world).count();
        assert_eq!(glows, 4);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let mut cfg = GameConfig::default();
        cfg.seed = Some(99);
        let mut world = World::new();
        world.insert_resource(cfg);
        let mut a = GameRng::from_world(&mut world);
        let mut b = GameRng::from_world(&mut world);
        let xs: Vec<u32> = (0..4).map(|_| a.0.gen()).collect();
        let ys: Vec<u32> = (0..4).map(|_| b.0.gen()).collect();
        assert_eq!(xs, ys);
    }
}
