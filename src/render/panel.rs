//! Debug panel for the grid configuration.

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

use super::components::{PanelButton, PanelRoot, PanelValue};
use super::resources::{GridRes, SettingsRes};
use crate::core::GridField;

const BUTTON_IDLE: Color = Color::srgba(0.2, 0.2, 0.25, 0.9);
const BUTTON_HOVER: Color = Color::srgba(0.3, 0.3, 0.38, 0.95);
const BUTTON_PRESSED: Color = Color::srgba(0.35, 0.5, 0.85, 1.0);

pub fn setup_panel(mut commands: Commands, grid: Res<GridRes>) {
    commands
        .spawn((
            PanelRoot,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                right: Val::Px(10.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                padding: UiRect::all(Val::Px(8.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.1, 0.12, 0.85)),
        ))
        .with_children(|panel| {
            for field in GridField::ALL {
                panel
                    .spawn(Node {
                        flex_direction: FlexDirection::Row,
                        align_items: AlignItems::Center,
                        column_gap: Val::Px(6.0),
                        ..default()
                    })
                    .with_children(|row| {
                        row.spawn((
                            Text::new(field.label()),
                            TextFont {
                                font_size: 12.0,
                                ..default()
                            },
                            TextColor(Color::srgba(0.85, 0.85, 0.85, 1.0)),
                            Node {
                                width: Val::Px(96.0),
                                ..default()
                            },
                        ));
                        spawn_step_button(row, field, -1, "-");
                        row.spawn((
                            PanelValue(field),
                            Text::new(format_value(grid.0.value(field))),
                            TextFont {
                                font_size: 12.0,
                                ..default()
                            },
                            TextColor(Color::WHITE),
                            Node {
                                width: Val::Px(28.0),
                                justify_content: JustifyContent::Center,
                                ..default()
                            },
                        ));
                        spawn_step_button(row, field, 1, "+");
                    });
            }
        });
}

fn spawn_step_button(
    row: &mut ChildSpawnerCommands<'_>,
    field: GridField,
    steps: i32,
    label: &str,
) {
    row.spawn((
        Button,
        PanelButton { field, steps },
        Node {
            width: Val::Px(20.0),
            height: Val::Px(20.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
        BackgroundColor(BUTTON_IDLE),
    ))
    .with_children(|button| {
        button.spawn((
            Text::new(label),
            TextFont {
                font_size: 12.0,
                ..default()
            },
            TextColor(Color::WHITE),
        ));
    });
}

fn format_value(value: f32) -> String {
    format!("{value:.0}")
}

/// Apply presses to the grid configuration, clamped to the panel limits.
pub fn handle_panel_buttons(
    mut buttons: Query<(&Interaction, &PanelButton, &mut BackgroundColor), Changed<Interaction>>,
    settings: Res<SettingsRes>,
    mut grid: ResMut<GridRes>,
) {
    for (interaction, button, mut background) in buttons.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                background.0 = BUTTON_PRESSED;
                let mut next = grid.0;
                if next.step(button.field, button.steps, &settings.0.limits) {
                    info!(
                        "{} -> {}",
                        button.field.label(),
                        format_value(next.value(button.field))
                    );
                    // Only touch the resource on a real change so the rebuild stays idle
                    grid.0 = next;
                }
            }
            Interaction::Hovered => background.0 = BUTTON_HOVER,
            Interaction::None => background.0 = BUTTON_IDLE,
        }
    }
}

pub fn refresh_panel_values(grid: Res<GridRes>, mut values: Query<(&PanelValue, &mut Text)>) {
    for (value, mut text) in values.iter_mut() {
        text.0 = format_value(grid.0.value(value.0));
    }
}
