use bevy::prelude::*;

use crate::core::components::{BallColor, BoxSize, EntityKind, SlotGlow, Tint};
use crate::core::config::GameConfig;
use crate::core::system::system_order::PresentationSet;
use crate::rendering::palette::palette::{ball_color, slot_colors, BOUNCER_COLOR};

/// Shared meshes/materials for circular bodies. Box bodies use plain sprites.
#[derive(Resource)]
pub struct SceneVisuals {
    pub ball_mesh: Handle<Mesh>,
    pub bouncer_mesh: Handle<Mesh>,
    pub ball_materials: Vec<Handle<ColorMaterial>>,
    pub bouncer_material: Handle<ColorMaterial>,
}

/// Gives gameplay entities something to draw. Gameplay spawns only data + physics,
/// so the session controller runs headless without this plugin.
pub struct MaterialsPlugin;

impl Plugin for MaterialsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_scene_visuals)
            .add_systems(
                Update,
                (attach_body_visuals, attach_glow_visuals).in_set(PresentationSet),
            );
    }
}

fn setup_scene_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    cfg: Res<GameConfig>,
) {
    let ball_materials = BallColor::ALL
        .iter()
        .map(|c| materials.add(ball_color(*c)))
        .collect();
    commands.insert_resource(SceneVisuals {
        ball_mesh: meshes.add(Circle::new(cfg.ball.radius)),
        bouncer_mesh: meshes.add(Circle::new(cfg.layout.bouncer_radius)),
        ball_materials,
        bouncer_material: materials.add(BOUNCER_COLOR),
    });
}

/// Newly spawned bodies get a mesh or sprite. Missing visual resources are not an error;
/// the body simply stays invisible.
fn attach_body_visuals(
    mut commands: Commands,
    visuals: Option<Res<SceneVisuals>>,
    q: Query<
        (
            Entity,
            &EntityKind,
            Option<&BallColor>,
            Option<&BoxSize>,
            Option<&Tint>,
        ),
        Added<EntityKind>,
    >,
) {
    for (entity, kind, color, size, tint) in &q {
        match kind {
            EntityKind::Ball => {
                let Some(v) = visuals.as_ref() else { continue };
                let color = color.copied().unwrap_or(BallColor::Grey);
                let Some(material) = v.ball_materials.get(color.index()) else {
                    continue;
                };
                commands
                    .entity(entity)
                    .insert((Mesh2d(v.ball_mesh.clone()), MeshMaterial2d(material.clone())));
            }
            EntityKind::Bouncer => {
                let Some(v) = visuals.as_ref() else { continue };
                commands.entity(entity).insert((
                    Mesh2d(v.bouncer_mesh.clone()),
                    MeshMaterial2d(v.bouncer_material.clone()),
                ));
            }
            EntityKind::Slot(polarity) => {
                let Some(size) = size else { continue };
                let (base, _) = slot_colors(*polarity);
                commands.entity(entity).insert(Sprite::from_color(base, size.0));
            }
            EntityKind::Obstacle => {
                let Some(size) = size else { continue };
                let tint = tint.map(|t| t.0).unwrap_or(Color::WHITE);
                commands.entity(entity).insert(Sprite::from_color(tint, size.0));
            }
        }
    }
}

fn attach_glow_visuals(
    mut commands: Commands,
    q: Query<(Entity, &SlotGlow, &BoxSize), Added<SlotGlow>>,
) {
    for (entity, glow, size) in &q {
        let (_, color) = slot_colors(glow.0);
        // Slightly oversized so the spinning glow peeks out around the base.
        let side = size.0.x.max(size.0.y) * 0.6;
        commands
            .entity(entity)
            .insert(Sprite::from_color(color, Vec2::splat(side)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::components::Polarity;

    fn visuals() -> SceneVisuals {
        SceneVisuals {
            ball_mesh: Handle::default(),
            bouncer_mesh: Handle::default(),
            ball_materials: BallColor::ALL.iter().map(|_| Handle::default()).collect(),
            bouncer_material: Handle::default(),
        }
    }

    fn app_with(visuals: Option<SceneVisuals>) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_systems(Update, (attach_body_visuals, attach_glow_visuals));
        if let Some(v) = visuals {
            app.insert_resource(v);
        }
        app
    }

    #[test]
    fn new_bodies_get_mesh_or_sprite() {
        let mut app = app_with(Some(visuals()));
        let ball = app.world_mut().spawn((EntityKind::Ball, BallColor::Red)).id();
        let slot = app
            .world_mut()
            .spawn((EntityKind::Slot(Polarity::Good), BoxSize(Vec2::new(200.0, 40.0))))
            .id();
        let glow = app
            .world_mut()
            .spawn((SlotGlow(Polarity::Bad), BoxSize(Vec2::new(200.0, 40.0))))
            .id();
        app.update();
        assert!(app.world().get::<Mesh2d>(ball).is_some());
        assert!(app.world().get::<Sprite>(slot).is_some());
        assert!(app.world().get::<Sprite>(glow).is_some());
    }

    #[test]
    fn missing_visuals_leave_round_bodies_bare() {
        let mut app = app_with(None);
        let ball = app.world_mut().spawn(EntityKind::Ball).id();
        let obstacle = app
            .world_mut()
            .spawn((EntityKind::Obstacle, BoxSize(Vec2::new(40.0, 16.0))))
            .id();
        app.update();
        assert!(app.world().get::<Mesh2d>(ball).is_none());
        assert!(app.world().get::<Sprite>(obstacle).is_some());
    }
}
