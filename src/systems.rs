use bevy::prelude::*;
use lattice_walkers::constants::{PANEL_SIZE, TRAJECTORY_MARKER_SCALE};
use lattice_walkers::Position;

use crate::resources::*;

#[derive(Component)]
pub struct CellSprite {
    position: Position,
}

#[derive(Component)]
pub struct ProgressText;

#[derive(Component)]
pub struct PositionText;

#[derive(Component)]
pub enum UiAction {
    Run,
    Reset,
}

// ==================== Setup Systems ====================
pub fn setup(
    mut commands: Commands,
    simulation: Res<Simulation>,
    layout: Res<PanelLayout>,
) {
    commands.spawn(Camera2dBundle::default());

    let grid_size = simulation.field.grid_size();
    // Leave a hairline between cells while they are large enough to show it.
    let gap = if layout.cell_size > 4.0 { 1.0 } else { 0.0 };

    for row in 0..grid_size {
        for col in 0..grid_size {
            let position = Position::new(row, col);
            let center = layout.cell_center(layout.grid_origin, position);
            commands.spawn((
                SpriteBundle {
                    sprite: Sprite {
                        color: cell_color(simulation.field.is_occupied(position)),
                        custom_size: Some(Vec2::splat(layout.cell_size - gap)),
                        ..default()
                    },
                    transform: Transform::from_translation(center.extend(0.0)),
                    ..default()
                },
                CellSprite { position },
            ));
        }
    }

    let title_anchor = PanelLayout::panel_center(layout.trajectory_origin)
        + Vec2::new(0.0, PANEL_SIZE / 2.0 + 24.0);
    commands.spawn(Text2dBundle {
        text: Text::from_section(
            "Trajectory first walker",
            TextStyle {
                font_size: 24.0,
                color: Color::WHITE,
                ..default()
            },
        ),
        transform: Transform::from_translation(title_anchor.extend(1.0)),
        ..default()
    });

    info!(
        grid_size,
        walkers = simulation.field.walker_count(),
        boundary = %simulation.field.boundary(),
        "viewer ready, press Run or Space to start"
    );
}

pub fn setup_ui(mut commands: Commands, run_state: Res<RunState>) {
    commands
        .spawn(NodeBundle {
            style: Style {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::SpaceBetween,
                ..default()
            },
            ..default()
        })
        .with_children(|parent| {
            // Status line
            parent
                .spawn(NodeBundle {
                    style: Style {
                        flex_direction: FlexDirection::Row,
                        justify_content: JustifyContent::SpaceBetween,
                        padding: UiRect::all(Val::Px(10.0)),
                        ..default()
                    },
                    ..default()
                })
                .with_children(|parent| {
                    parent.spawn((
                        TextBundle::from_section(
                            format!("Step 0 / {}", run_state.iterations),
                            TextStyle {
                                font_size: 20.0,
                                color: Color::WHITE,
                                ..default()
                            },
                        ),
                        ProgressText,
                    ));
                    parent.spawn((
                        TextBundle::from_section(
                            "x,y: -,-",
                            TextStyle {
                                font_size: 16.0,
                                color: Color::WHITE,
                                ..default()
                            },
                        ),
                        PositionText,
                    ));
                });

            // Control panel
            parent
                .spawn(NodeBundle {
                    style: Style {
                        width: Val::Percent(100.0),
                        height: Val::Px(70.0),
                        flex_direction: FlexDirection::Row,
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::SpaceEvenly,
                        padding: UiRect::all(Val::Px(10.0)),
                        ..default()
                    },
                    background_color: Color::srgba(0.1, 0.1, 0.1, 0.5).into(),
                    ..default()
                })
                .with_children(|parent| {
                    spawn_button(parent, "Run", UiAction::Run);
                    spawn_button(parent, "Reset", UiAction::Reset);
                });
        });
}

fn spawn_button(parent: &mut ChildBuilder, text: &str, action: UiAction) {
    parent
        .spawn((
            ButtonBundle {
                style: Style {
                    width: Val::Px(150.0),
                    height: Val::Px(50.0),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                background_color: Color::srgb_u8(38, 38, 38).into(),
                ..default()
            },
            action,
        ))
        .with_children(|parent| {
            parent.spawn(TextBundle::from_section(
                text,
                TextStyle {
                    font_size: 20.0,
                    color: Color::WHITE,
                    ..default()
                },
            ));
        });
}

// ==================== Input Handling Systems ====================
pub fn handle_button_clicks(
    interaction_query: Query<(&Interaction, &UiAction), (Changed<Interaction>, With<Button>)>,
    mut simulation: ResMut<Simulation>,
    mut run_state: ResMut<RunState>,
    mut rng: ResMut<SimulationRng>,
    settings: Res<SimulationSettings>,
) {
    for (interaction, action) in interaction_query.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match action {
            UiAction::Run => start_run(&mut run_state),
            UiAction::Reset => reset_run(&settings, &mut rng, &mut simulation, &mut run_state),
        }
    }
}

pub fn keyboard_controls(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut simulation: ResMut<Simulation>,
    mut run_state: ResMut<RunState>,
    mut rng: ResMut<SimulationRng>,
    settings: Res<SimulationSettings>,
) {
    if keyboard.just_pressed(KeyCode::Space) {
        start_run(&mut run_state);
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        reset_run(&settings, &mut rng, &mut simulation, &mut run_state);
    }
}

fn start_run(run_state: &mut RunState) {
    if run_state.running {
        return;
    }
    if run_state.finished() {
        info!("run already complete, press Reset for a new one");
        return;
    }
    run_state.running = true;
    info!(iterations = run_state.iterations, "run started");
}

fn reset_run(
    settings: &SimulationSettings,
    rng: &mut SimulationRng,
    simulation: &mut Simulation,
    run_state: &mut RunState,
) {
    match Simulation::reseeded(&settings.0, rng) {
        Ok(fresh) => {
            *simulation = fresh;
            run_state.rewind();
            info!("simulation reset");
        }
        Err(err) => error!("reset failed: {err}"),
    }
}

// ==================== Simulation Systems ====================
pub fn advance_simulation(
    time: Res<Time>,
    mut run_state: ResMut<RunState>,
    mut simulation: ResMut<Simulation>,
) {
    if !run_state.running {
        return;
    }
    if let Some(timer) = run_state.pacing.as_mut() {
        if !timer.tick(time.delta()).just_finished() {
            return;
        }
    }

    simulation.advance();
    run_state.step += 1;

    if run_state.finished() {
        run_state.running = false;
        info!(
            steps = run_state.step,
            occupied = simulation.field.occupied_count(),
            "run complete"
        );
    }
}

// ==================== Rendering Systems ====================
pub fn paint_cells(simulation: Res<Simulation>, mut query: Query<(&CellSprite, &mut Sprite)>) {
    if !simulation.is_changed() {
        return;
    }
    for (cell, mut sprite) in query.iter_mut() {
        sprite.color = cell_color(simulation.field.is_occupied(cell.position));
    }
}

pub fn draw_trajectory(
    mut gizmos: Gizmos,
    simulation: Res<Simulation>,
    layout: Res<PanelLayout>,
) {
    let panel = Vec2::splat(PANEL_SIZE);
    gizmos.rect_2d(
        PanelLayout::panel_center(layout.grid_origin),
        0.0,
        panel,
        Color::srgb(0.2, 0.2, 0.2),
    );
    gizmos.rect_2d(
        PanelLayout::panel_center(layout.trajectory_origin),
        0.0,
        panel,
        Color::WHITE.with_alpha(0.6),
    );

    let marker = Vec2::splat(layout.cell_size * TRAJECTORY_MARKER_SCALE);
    for &point in simulation.trajectory.points() {
        gizmos.rect_2d(
            layout.cell_center(layout.trajectory_origin, point),
            0.0,
            marker,
            Color::srgba(0.0, 0.0, 1.0, 0.3),
        );
    }
}

pub fn update_status_text(
    run_state: Res<RunState>,
    simulation: Res<Simulation>,
    mut progress_query: Query<&mut Text, (With<ProgressText>, Without<PositionText>)>,
    mut position_query: Query<&mut Text, (With<PositionText>, Without<ProgressText>)>,
) {
    if !run_state.is_changed() && !simulation.is_changed() {
        return;
    }

    for mut text in progress_query.iter_mut() {
        text.sections[0].value = format!("Step {} / {}", run_state.step, run_state.iterations);
    }

    // Column on x, row on y, as in the trajectory panel.
    let Position { row, col } = simulation.field.first_walker_position();
    for mut text in position_query.iter_mut() {
        text.sections[0].value = format!("x,y: {},{}", col, row);
    }
}

fn cell_color(occupied: bool) -> Color {
    if occupied {
        Color::srgb(0.9, 0.1, 0.1)
    } else {
        Color::WHITE
    }
}
