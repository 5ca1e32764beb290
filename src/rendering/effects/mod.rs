use bevy::prelude::*;
use rand::Rng;

use crate::core::components::Spin;
use crate::core::config::GameConfig;
use crate::core::events::{EffectKind, EffectRequest};
use crate::core::system::system_order::PresentationSet;

const FIRE_COLORS: [Color; 3] = [
    Color::srgb(1.0, 0.85, 0.25),
    Color::srgb(1.0, 0.50, 0.10),
    Color::srgb(0.95, 0.20, 0.05),
];

/// Short-lived spark drifting away from a burst origin.
#[derive(Component, Debug)]
pub struct Particle {
    pub velocity: Vec2,
    pub life: Timer,
}

pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (spawn_requested_effects, update_particles, spin_decorations).in_set(PresentationSet),
        );
    }
}

/// Effects are cosmetic: when disabled, requests are drained and dropped.
fn spawn_requested_effects(
    mut commands: Commands,
    mut requests: EventReader<EffectRequest>,
    cfg: Res<GameConfig>,
) {
    let fx = &cfg.effects;
    if !fx.enabled || fx.particle_count == 0 || fx.lifetime <= 0.0 {
        requests.clear();
        return;
    }
    let mut rng = rand::thread_rng();
    for req in requests.read() {
        match req.kind {
            EffectKind::FireBurst => {
                for _ in 0..fx.particle_count {
                    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
                    let speed = fx.speed * rng.gen_range(0.3..1.0);
                    let color = FIRE_COLORS[rng.gen_range(0..FIRE_COLORS.len())];
                    let size = rng.gen_range(3.0..7.0);
                    commands.spawn((
                        Particle {
                            velocity: Vec2::from_angle(angle) * speed,
                            life: Timer::from_seconds(
                                fx.lifetime * rng.gen_range(0.6..1.0),
                                TimerMode::Once,
                            ),
                        },
                        Sprite::from_color(color, Vec2::splat(size)),
                        Transform::from_translation(req.position.extend(2.0)),
                    ));
                }
            }
        }
    }
}

fn update_particles(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut Particle, &mut Transform, Option<&mut Sprite>)>,
) {
    let dt = time.delta_secs();
    for (entity, mut particle, mut tf, sprite) in &mut q {
        particle.life.tick(time.delta());
        if particle.life.finished() {
            commands.entity(entity).despawn();
            continue;
        }
        // Sparks rise like flame and slow down.
        particle.velocity.y += 120.0 * dt;
        particle.velocity *= 1.0 - 1.5 * dt;
        tf.translation += (particle.velocity * dt).extend(0.0);
        if let Some(mut sprite) = sprite {
            sprite.color.set_alpha(1.0 - particle.life.fraction());
        }
    }
}

fn spin_decorations(time: Res<Time>, mut q: Query<(&Spin, &mut Transform)>) {
    let dt = time.delta_secs();
    for (spin, mut tf) in &mut q {
        tf.rotate_z(spin.0 * dt);
    }
}
