use bevy::prelude::*;

use crate::app::state::PlayState;
use crate::core::events::{ResetRequested, TapEvent, ToggleEditRequested};
use crate::core::system::system_order::InputSet;
use crate::rendering::hud::EditToggleButton;

const LOG_TARGET: &str = "input";

/// Convert a window cursor position (top-left origin, logical coordinates) to world coordinates.
fn cursor_world_pos(
    camera_q: &Query<(&Camera, &GlobalTransform)>,
    screen_pos: Vec2,
) -> Option<Vec2> {
    let (camera, cam_tf) = camera_q.iter().next()?; // assume single active camera
    camera.viewport_to_world_2d(cam_tf, screen_pos).ok()
}

/// Screen positions of every pointer that went down this frame (left mouse and new touches).
fn pressed_screen_positions(
    buttons: &ButtonInput<MouseButton>,
    touches: &Touches,
    window: &Window,
) -> Vec<Vec2> {
    let mut out: Vec<Vec2> = touches.iter_just_pressed().map(|t| t.position()).collect();
    if buttons.just_pressed(MouseButton::Left) {
        if let Some(cursor) = window.cursor_position() {
            out.push(cursor);
        }
    }
    out
}

/// A pointer over any UI button belongs to that button, not to the world.
fn pointer_over_ui<'a>(interactions: impl IntoIterator<Item = &'a Interaction>) -> bool {
    interactions.into_iter().any(|i| *i != Interaction::None)
}

/// Turn pointer presses into `TapEvent`s. Presses over a UI button belong to that button;
/// Bevy UI has already resolved them into `Interaction`.
pub fn emit_pointer_taps(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows_q: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    ui_buttons: Query<&Interaction, With<Button>>,
    mut taps: EventWriter<TapEvent>,
) {
    let Some(window) = windows_q.iter().next() else {
        return;
    };
    if pointer_over_ui(&ui_buttons) {
        return;
    }
    for screen_pos in pressed_screen_positions(&buttons, &touches, window) {
        if let Some(location) = cursor_world_pos(&camera_q, screen_pos) {
            taps.write(TapEvent { location });
        }
    }
}

pub fn edit_toggle_button(
    q: Query<&Interaction, (Changed<Interaction>, With<EditToggleButton>)>,
    mut toggles: EventWriter<ToggleEditRequested>,
) {
    for interaction in &q {
        if *interaction == Interaction::Pressed {
            toggles.write(ToggleEditRequested);
        }
    }
}

/// `E` flips edit mode, `R` resets the session.
pub fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut toggles: EventWriter<ToggleEditRequested>,
    mut resets: EventWriter<ResetRequested>,
) {
    if keys.just_pressed(KeyCode::KeyE) {
        toggles.write(ToggleEditRequested);
    }
    if keys.just_pressed(KeyCode::KeyR) {
        info!(target: LOG_TARGET, "reset requested from keyboard");
        resets.write(ResetRequested);
    }
}

pub struct InputInteractionPlugin;

impl Plugin for InputInteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (emit_pointer_taps, edit_toggle_button, keyboard_shortcuts)
                .in_set(InputSet)
                .run_if(in_state(PlayState::Playing)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_press_without_cursor_yields_nothing() {
        let mut buttons = ButtonInput::<MouseButton>::default();
        buttons.press(MouseButton::Left);
        let touches = Touches::default();
        let window = Window::default();
        assert!(pressed_screen_positions(&buttons, &touches, &window).is_empty());
    }

    #[test]
    fn held_button_is_not_a_new_press() {
        let mut buttons = ButtonInput::<MouseButton>::default();
        buttons.press(MouseButton::Left);
        buttons.clear();
        let touches = Touches::default();
        let mut window = Window::default();
        window.set_cursor_position(Some(Vec2::new(10.0, 10.0)));
        assert!(pressed_screen_positions(&buttons, &touches, &window).is_empty());
    }

    #[test]
    fn hovered_or_pressed_button_claims_the_pointer() {
        assert!(!pointer_over_ui(&[]));
        assert!(!pointer_over_ui(&[Interaction::None, Interaction::None]));
        assert!(pointer_over_ui(&[Interaction::None, Interaction::Pressed]));
        assert!(pointer_over_ui(&[Interaction::Hovered]));
    }

    fn input_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, bevy::state::app::StatesPlugin))
            .init_state::<PlayState>()
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<Touches>()
            .add_event::<TapEvent>()
            .add_event::<ToggleEditRequested>()
            .add_event::<ResetRequested>()
            .add_plugins(InputInteractionPlugin);
        let mut window = Window::default();
        window.set_cursor_position(Some(Vec2::new(200.0, 150.0)));
        app.world_mut().spawn(window);
        app.world_mut()
            .spawn((Camera2d, Camera::default(), GlobalTransform::default()));
        app
    }

    fn taps(app: &App) -> usize {
        app.world().resource::<Events<TapEvent>>().len()
    }

    #[test]
    fn press_on_ui_button_is_not_a_world_tap() {
        let mut app = input_app();
        app.world_mut().spawn((Button, Interaction::Pressed));
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        app.update();
        assert_eq!(taps(&app), 0);
    }

    #[test]
    fn input_is_ignored_while_game_over_is_shown() {
        let mut app = input_app();
        app.world_mut()
            .resource_mut::<NextState<PlayState>>()
            .set(PlayState::GameOver);
        app.update();
        {
            let world = app.world_mut();
            world
                .resource_mut::<ButtonInput<MouseButton>>()
                .press(MouseButton::Left);
            world.resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::KeyE);
        }
        app.update();
        assert_eq!(taps(&app), 0);
        assert!(app.world().resource::<Events<ToggleEditRequested>>().is_empty());

        // Same input once the dialog is gone reaches the session again.
        app.world_mut()
            .resource_mut::<NextState<PlayState>>()
            .set(PlayState::Playing);
        app.update();
        assert_eq!(app.world().resource::<Events<ToggleEditRequested>>().len(), 1);
    }

    #[test]
    fn keyboard_shortcuts_emit_requests() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<ButtonInput<KeyCode>>()
            .add_event::<ToggleEditRequested>()
            .add_event::<ResetRequested>()
            .add_systems(Update, keyboard_shortcuts);
        {
            let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keys.press(KeyCode::KeyE);
            keys.press(KeyCode::KeyR);
        }
        app.update();
        let toggles = app.world().resource::<Events<ToggleEditRequested>>().len();
        let resets = app.world().resource::<Events<ResetRequested>>().len();
        assert_eq!((toggles, resets), (1, 1));
    }
}
