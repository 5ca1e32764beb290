use bevy::prelude::*;

use crate::core::config::GameConfig;
use crate::core::system::system_order::{InputSet, PresentationSet, SessionSet};
use crate::gameplay::state::SessionPlugin;
use crate::interaction::game_over::GameOverDialogPlugin;
use crate::interaction::input::input_interaction::InputInteractionPlugin;
use crate::interaction::session::auto_close::AutoClosePlugin;
use crate::physics::rapier::rapier_physics::PhysicsSetupPlugin;
use crate::rendering::camera::camera::CameraPlugin;
use crate::rendering::effects::EffectsPlugin;
use crate::rendering::hud::HudPlugin;
use crate::rendering::materials::materials::MaterialsPlugin;

/// Full game: session controller plus physics, input, and presentation.
/// Expects `DefaultPlugins` (or an equivalent windowed setup) to be present.
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        let rapier_debug = app
            .world()
            .get_resource::<GameConfig>()
            .is_some_and(|cfg| cfg.rapier_debug);
        app.configure_sets(
            Update,
            (
                InputSet,
                SessionSet.after(InputSet),
                PresentationSet.after(SessionSet),
            ),
        )
        .add_plugins((
            CameraPlugin,
            PhysicsSetupPlugin {
                debug_render: rapier_debug,
            },
            SessionPlugin,
            MaterialsPlugin,
            HudPlugin,
            EffectsPlugin,
            InputInteractionPlugin,
            GameOverDialogPlugin,
            AutoClosePlugin,
        ));
    }
}
