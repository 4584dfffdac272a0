use lattice_walkers::{
    BoundaryMode, Direction, PlacementPolicy, Position, SimulationConfig, Trajectory, WalkerField,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn single_walker(grid_size: usize, boundary: BoundaryMode, at: Position) -> WalkerField {
    WalkerField::from_positions(grid_size, boundary, &[at], ChaCha8Rng::seed_from_u64(0))
        .expect("valid field")
}

fn seeded_config(seed: u64) -> SimulationConfig {
    SimulationConfig {
        population: 400,
        walkers: 60,
        seed: Some(seed),
        ..Default::default()
    }
}

#[test]
fn periodic_three_by_three_loop_returns_home() {
    let mut field = single_walker(3, BoundaryMode::Periodic, Position::new(0, 0));
    let mut trajectory = Trajectory::starting_at(field.first_walker_position());

    for index in [2, 3, 0, 1] {
        let direction = Direction::from_index(index).expect("direction index");
        field.step_with_directions(&[direction]).expect("one direction");
        trajectory.record(field.first_walker_position());
    }

    assert_eq!(
        trajectory.points(),
        &[
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(1, 1),
            Position::new(0, 1),
            Position::new(0, 0),
        ]
    );
    assert_eq!(field.occupied_count(), 1);
    assert!(field.is_occupied(Position::new(0, 0)));
}

#[test]
fn edge_moves_follow_the_boundary_mode() {
    let cases = [
        (BoundaryMode::Periodic, Position::new(0, 3), Direction::Up, Position::new(6, 3)),
        (BoundaryMode::Mirror, Position::new(0, 3), Direction::Up, Position::new(1, 3)),
        (BoundaryMode::Periodic, Position::new(6, 3), Direction::Down, Position::new(0, 3)),
        (BoundaryMode::Mirror, Position::new(6, 3), Direction::Down, Position::new(5, 3)),
        (BoundaryMode::Periodic, Position::new(3, 0), Direction::Left, Position::new(3, 6)),
        (BoundaryMode::Mirror, Position::new(3, 0), Direction::Left, Position::new(3, 1)),
        (BoundaryMode::Periodic, Position::new(3, 6), Direction::Right, Position::new(3, 0)),
        (BoundaryMode::Mirror, Position::new(3, 6), Direction::Right, Position::new(3, 5)),
    ];

    for (mode, start, direction, expected) in cases {
        let mut field = single_walker(7, mode, start);
        field.step_with_directions(&[direction]).unwrap();
        assert_eq!(field.first_walker_position(), expected, "{mode} {start} {direction:?}");
        assert!(field.is_occupied(expected));
        assert!(!field.is_occupied(start));
    }
}

#[test]
fn seeded_fields_are_reproducible() {
    let mut a = WalkerField::new(&seeded_config(0xC0FFEE)).unwrap();
    let mut b = WalkerField::new(&seeded_config(0xC0FFEE)).unwrap();
    assert_eq!(a.positions(), b.positions());

    for _ in 0..50 {
        a.step();
        b.step();
        assert_eq!(a.positions(), b.positions());
    }
    assert_eq!(a.ticks(), 50);
}

#[test]
fn different_seeds_diverge() {
    let a = WalkerField::new(&seeded_config(1)).unwrap();
    let b = WalkerField::new(&seeded_config(2)).unwrap();
    assert_ne!(a.positions(), b.positions());
}

#[test]
fn forced_directions_are_reproducible_from_fixed_starts() {
    let starts = [Position::new(0, 0), Position::new(0, 1), Position::new(4, 4)];
    let script = [
        [Direction::Right, Direction::Down, Direction::Up],
        [Direction::Down, Direction::Left, Direction::Right],
        [Direction::Left, Direction::Left, Direction::Down],
    ];

    let run = || {
        let mut field = WalkerField::from_positions(
            5,
            BoundaryMode::Mirror,
            &starts,
            ChaCha8Rng::seed_from_u64(9),
        )
        .unwrap();
        for directions in &script {
            field.step_with_directions(directions).unwrap();
        }
        field.positions().to_vec()
    };

    assert_eq!(run(), run());
}

#[test]
fn occupancy_is_conserved_when_starts_are_distinct() {
    for boundary in [BoundaryMode::Periodic, BoundaryMode::Mirror] {
        let config = SimulationConfig {
            population: 100,
            walkers: 40,
            boundary,
            placement: PlacementPolicy::RejectOverlap,
            seed: Some(17),
            ..Default::default()
        };
        let mut field = WalkerField::new(&config).unwrap();
        assert_eq!(field.occupied_count(), 40);

        for _ in 0..200 {
            field.step();
            assert_eq!(field.occupied_count(), 40);
            assert!(field.positions().iter().all(|&p| field.is_occupied(p)));
        }
    }
}

#[test]
fn walkers_stay_on_the_grid() {
    let config = SimulationConfig {
        population: 30,
        walkers: 10,
        boundary: BoundaryMode::Mirror,
        seed: Some(4),
        ..Default::default()
    };
    let mut field = WalkerField::new(&config).unwrap();
    let size = field.grid_size();

    for _ in 0..500 {
        field.step();
        assert!(field
            .positions()
            .iter()
            .all(|p| p.row < size && p.col < size));
    }
}

#[test]
fn blocked_walker_keeps_its_cell_through_a_random_step() {
    // Walker 0 sits in the centre of a 3x3 torus with all four neighbours
    // taken. It moves first, so whatever it draws is blocked.
    let starts = [
        Position::new(1, 1),
        Position::new(0, 1),
        Position::new(1, 0),
        Position::new(2, 1),
        Position::new(1, 2),
    ];
    let mut field = WalkerField::from_positions(
        3,
        BoundaryMode::Periodic,
        &starts,
        ChaCha8Rng::seed_from_u64(21),
    )
    .unwrap();
    field.step();
    assert_eq!(field.first_walker_position(), Position::new(1, 1));
}
