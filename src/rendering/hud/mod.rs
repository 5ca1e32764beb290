//! Score / ball-count labels and the edit toggle. Labels refresh only from
//! `SessionChanged`, never by polling the session resource.

use bevy::prelude::*;

use crate::core::config::SessionConfig;
use crate::core::events::SessionChanged;
use crate::core::system::system_order::PresentationSet;
use crate::gameplay::state::SessionState;

#[derive(Component)]
pub struct ScoreLabel;

#[derive(Component)]
pub struct BallCountLabel;

/// Top-left button; pressing it toggles edit mode.
#[derive(Component)]
pub struct EditToggleButton;

#[derive(Component)]
pub struct EditLabel;

/// Formatted HUD strings for one session snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudText {
    pub score: String,
    pub balls: String,
    pub edit: &'static str,
}

impl HudText {
    pub fn from_state(state: &SessionState) -> Self {
        Self {
            score: format!("Score: {}", state.score),
            balls: format!("Ball Count: {}", state.balls_remaining),
            edit: if state.edit_mode { "Done" } else { "Edit" },
        }
    }
}

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud)
            .add_systems(Update, refresh_hud.in_set(PresentationSet));
    }
}

fn label_font() -> TextFont {
    TextFont {
        font_size: 28.0,
        ..default()
    }
}

fn spawn_hud(mut commands: Commands, session: Option<Res<SessionState>>) {
    let initial = session
        .map(|s| *s)
        .unwrap_or_else(|| SessionState::new(SessionConfig::default().starting_balls));
    let blank = HudText::from_state(&initial);
    commands.spawn((
        Name::new("EditToggle"),
        EditToggleButton,
        Button,
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(24.0),
            top: Val::Px(16.0),
            padding: UiRect::axes(Val::Px(14.0), Val::Px(6.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.08)),
        children![(EditLabel, Text::new(blank.edit), label_font())],
    ));
    commands.spawn((
        Name::new("Scoreboard"),
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(24.0),
            top: Val::Px(16.0),
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::FlexEnd,
            row_gap: Val::Px(8.0),
            ..default()
        },
        children![
            (ScoreLabel, Text::new(blank.score), label_font()),
            (BallCountLabel, Text::new(blank.balls), label_font()),
        ],
    ));
}

/// Only the newest snapshot in a frame matters.
fn refresh_hud(
    mut events: EventReader<SessionChanged>,
    mut score_q: Query<&mut Text, (With<ScoreLabel>, Without<BallCountLabel>, Without<EditLabel>)>,
    mut balls_q: Query<&mut Text, (With<BallCountLabel>, Without<ScoreLabel>, Without<EditLabel>)>,
    mut edit_q: Query<&mut Text, (With<EditLabel>, Without<ScoreLabel>, Without<BallCountLabel>)>,
) {
    let Some(SessionChanged(state)) = events.read().last().copied() else {
        return;
    };
    let hud = HudText::from_state(&state);
    for mut text in &mut score_q {
        text.0 = hud.score.clone();
    }
    for mut text in &mut balls_q {
        text.0 = hud.balls.clone();
    }
    for mut text in &mut edit_q {
        text.0 = hud.edit.to_string();
    }
}
