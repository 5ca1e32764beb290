//! Game-over modal. Opens when a drop is refused, offers Retry (reset) and can be
//! dismissed with Escape, leaving the session as it was.

use bevy::prelude::*;
use bevy::ui::{AlignItems, FlexDirection, GlobalZIndex, JustifyContent, Node};

use crate::app::state::PlayState;
use crate::core::events::{GameOver, ResetRequested};
use crate::core::system::system_order::{InputSet, PresentationSet};

pub const TITLE: &str = "Game Over!";
pub const MESSAGE: &str = "You have ran out of balls!";

#[derive(Component)]
pub struct GameOverDialog;

#[derive(Component)]
pub struct RetryButton;

pub struct GameOverDialogPlugin;

impl Plugin for GameOverDialogPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<PlayState>()
            .add_systems(OnEnter(PlayState::GameOver), spawn_dialog)
            .add_systems(OnExit(PlayState::GameOver), despawn_dialog)
            .add_systems(Update, open_on_game_over.in_set(PresentationSet))
            .add_systems(
                Update,
                (retry_button, dismiss_with_escape)
                    .in_set(InputSet)
                    .run_if(in_state(PlayState::GameOver)),
            );
    }
}

/// Repeated signals while the dialog is already open are absorbed.
fn open_on_game_over(
    mut events: EventReader<GameOver>,
    state: Res<State<PlayState>>,
    mut next_state: ResMut<NextState<PlayState>>,
) {
    if events.is_empty() {
        return;
    }
    events.clear();
    if *state.get() == PlayState::Playing {
        info!(target: "session", "game over: out of balls");
        next_state.set(PlayState::GameOver);
    }
}

fn spawn_dialog(mut commands: Commands) {
    commands
        .spawn((
            GameOverDialog,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.55)),
            GlobalZIndex(10),
        ))
        .with_children(|root| {
            root.spawn((
                Node {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    padding: UiRect::all(Val::Px(24.0)),
                    row_gap: Val::Px(12.0),
                    ..default()
                },
                BackgroundColor(Color::srgba(0.12, 0.12, 0.16, 0.95)),
            ))
            .with_children(|panel| {
                panel.spawn((
                    Text::new(TITLE),
                    TextFont {
                        font_size: 32.0,
                        ..default()
                    },
                ));
                panel.spawn(Text::new(MESSAGE));
                panel
                    .spawn((
                        RetryButton,
                        Button,
                        Node {
                            padding: UiRect::axes(Val::Px(18.0), Val::Px(8.0)),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.2, 0.45, 0.9)),
                    ))
                    .with_children(|b| {
                        b.spawn(Text::new("Retry"));
                    });
            });
        });
}

fn despawn_dialog(mut commands: Commands, q_root: Query<Entity, With<GameOverDialog>>) {
    for e in &q_root {
        commands.entity(e).despawn();
    }
}

fn retry_button(
    q: Query<&Interaction, (Changed<Interaction>, With<RetryButton>)>,
    mut resets: EventWriter<ResetRequested>,
    mut next_state: ResMut<NextState<PlayState>>,
) {
    for interaction in &q {
        if *interaction == Interaction::Pressed {
            resets.write(ResetRequested);
            next_state.set(PlayState::Playing);
        }
    }
}

/// Closing without Retry keeps the session un-reset; the next drop tap reopens the dialog.
fn dismiss_with_escape(keys: Res<ButtonInput<KeyCode>>, mut next_state: ResMut<NextState<PlayState>>) {
    if keys.just_pressed(KeyCode::Escape) {
        next_state.set(PlayState::Playing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_resource::<ButtonInput<KeyCode>>()
            .add_event::<GameOver>()
            .add_event::<ResetRequested>()
            .add_plugins(GameOverDialogPlugin);
        app.update();
        app
    }

    fn dialogs(app: &mut App) -> usize {
        let world = app.world_mut();
        world.query::<&GameOverDialog>().iter(world).count()
    }

    fn state(app: &App) -> PlayState {
        *app.world().resource::<State<PlayState>>().get()
    }

    #[test]
    fn game_over_opens_single_dialog() {
        let mut app = test_app();
        app.world_mut().send_event(GameOver);
        app.update();
        app.update();
        assert_eq!(state(&app), PlayState::GameOver);
        assert_eq!(dialogs(&mut app), 1);
        app.world_mut().send_event(GameOver);
        app.update();
        app.update();
        assert_eq!(dialogs(&mut app), 1);
    }

    #[test]
    fn retry_resets_and_closes() {
        let mut app = test_app();
        app.world_mut().send_event(GameOver);
        app.update();
        app.update();
        let button = {
            let world = app.world_mut();
            world
                .query_filtered::<Entity, With<RetryButton>>()
                .single(world)
                .expect("retry button")
        };
        app.world_mut().entity_mut(button).insert(Interaction::Pressed);
        app.update();
        app.update();
        assert_eq!(state(&app), PlayState::Playing);
        assert_eq!(dialogs(&mut app), 0);
        assert_eq!(app.world().resource::<Events<ResetRequested>>().len(), 1);
    }

    #[test]
    fn escape_dismisses_without_reset() {
        let mut app = test_app();
        app.world_mut().send_event(GameOver);
        app.update();
        app.update();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Escape);
        app.update();
        app.update();
        assert_eq!(state(&app), PlayState::Playing);
        assert_eq!(dialogs(&mut app), 0);
        assert!(app.world().resource::<Events<ResetRequested>>().is_empty());
    }
}
