//! World lifecycle and tick tests

use crossroad_sim::simulation::{Direction, EnergyKind, Rect, SimConfig, SimWorld, VehicleId};

fn four_way_deadlock(world: &mut SimWorld) -> [VehicleId; 4] {
    let up = world.add_vehicle(
        EnergyKind::Combustion,
        Direction::Up,
        Rect::new(522, 470, 50, 100),
    );
    let left = world.add_vehicle(
        EnergyKind::Electric,
        Direction::Left,
        Rect::new(610, 324, 100, 50),
    );
    let down = world.add_vehicle(
        EnergyKind::Hybrid,
        Direction::Down,
        Rect::new(452, 200, 50, 100),
    );
    let right = world.add_vehicle(
        EnergyKind::Combustion,
        Direction::Right,
        Rect::new(300, 394, 100, 50),
    );
    [up, left, down, right]
}

fn rect_of(world: &SimWorld, id: VehicleId) -> Rect {
    world.vehicle(id).expect("vehicle should be alive").rect()
}

#[test]
fn test_new_world_is_populated_to_target() {
    let world = SimWorld::new_with_seed(SimConfig::default(), 1).expect("valid config");
    assert_eq!(world.len(), SimConfig::default().min_vehicle_count);
    assert_eq!(world.stats().total_spawned, world.len() as u64);
    assert!(world
        .vehicles()
        .all(|vehicle| vehicle.is_in_bounds(world.config())));
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = SimConfig {
        vehicle_width: 0,
        ..SimConfig::default()
    };
    assert!(SimWorld::new_with_seed(config, 1).is_err());

    let config = SimConfig {
        speed: 0,
        ..SimConfig::default()
    };
    assert!(SimWorld::empty_with_seed(config, 1).is_err());
}

#[test]
fn test_spawned_vehicles_queue_without_overlap() {
    let mut world = SimWorld::empty_with_seed(SimConfig::default(), 99).expect("valid config");

    // Twenty spawns over four entry edges guarantees shared edges
    for _ in 0..20 {
        world.spawn_vehicle();
    }
    assert_eq!(world.len(), 20);

    let vehicles: Vec<_> = world.vehicles().collect();
    let mut same_direction_pairs = 0;
    for (i, a) in vehicles.iter().enumerate() {
        for b in &vehicles[i + 1..] {
            if a.direction() == b.direction() {
                same_direction_pairs += 1;
                assert!(
                    !a.rect().overlaps(&b.rect()),
                    "{:?} overlaps {:?}",
                    a,
                    b
                );
            }
        }
    }
    assert!(same_direction_pairs > 0);
}

#[test]
fn test_spawn_queues_behind_manually_placed_vehicle() {
    let config = SimConfig::default();
    let mut world = SimWorld::empty_with_seed(config.clone(), 5).expect("valid config");

    // Occupy every entry edge so whichever edge is picked needs queuing
    world.add_vehicle(EnergyKind::Combustion, Direction::Left, Rect::new(1024, 324, 100, 50));
    world.add_vehicle(EnergyKind::Combustion, Direction::Right, Rect::new(-100, 394, 100, 50));
    world.add_vehicle(EnergyKind::Combustion, Direction::Up, Rect::new(522, 768, 50, 100));
    world.add_vehicle(EnergyKind::Combustion, Direction::Down, Rect::new(452, -100, 50, 100));

    let id = world.spawn_vehicle();
    let spawned = world.vehicle(id).expect("spawned vehicle").rect();
    let expected = match world.vehicle(id).map(|v| v.direction()) {
        Some(Direction::Left) => Rect::new(1024 + 100 + 125, 324, 100, 50),
        Some(Direction::Right) => Rect::new(-100 - 225, 394, 100, 50),
        Some(Direction::Up) => Rect::new(522, 768 + 100 + 125, 50, 100),
        Some(Direction::Down) => Rect::new(452, -100 - 225, 50, 100),
        other => panic!("unexpected direction {:?}", other),
    };
    assert_eq!(spawned, expected);
}

#[test]
fn test_four_way_deadlock_releases_rightward_vehicle() {
    let mut world = SimWorld::empty_with_seed(SimConfig::default(), 3).expect("valid config");
    let [up, left, down, right] = four_way_deadlock(&mut world);
    let before: Vec<Rect> = [up, left, down, right]
        .iter()
        .map(|id| rect_of(&world, *id))
        .collect();

    let report = world.tick();

    assert_eq!(report.moved, 0);
    assert_eq!(report.respawned, 0);
    assert!(report.deadlock_broken);
    assert_eq!(world.stats().deadlock_breaks, 1);

    assert_eq!(rect_of(&world, up), before[0]);
    assert_eq!(rect_of(&world, left), before[1]);
    assert_eq!(rect_of(&world, down), before[2]);
    assert_eq!(rect_of(&world, right), before[3].translated(5, 0));
}

#[test]
fn test_deadlock_counts_right_of_way_yields() {
    let mut world = SimWorld::empty_with_seed(SimConfig::default(), 3).expect("valid config");
    four_way_deadlock(&mut world);

    world.tick();

    let stats = world.stats();
    assert_eq!(stats.ticks, 1);
    assert_eq!(stats.right_of_way_yields, 4);
    assert_eq!(stats.direct_blocks, 0);
}

#[test]
fn test_lone_vehicle_advances() {
    let mut world = SimWorld::empty_with_seed(SimConfig::default(), 8).expect("valid config");
    let id = world.add_vehicle(
        EnergyKind::Hybrid,
        Direction::Down,
        Rect::new(452, 0, 50, 100),
    );

    let report = world.tick();

    assert_eq!(report.moved, 1);
    assert!(!report.deadlock_broken);
    assert_eq!(rect_of(&world, id), Rect::new(452, 5, 50, 100));
    assert_eq!(world.vehicle(id).map(|v| v.energy().level()), Some(10));
}

#[test]
fn test_respawn_restores_target_count() {
    let config = SimConfig {
        min_vehicle_count: 3,
        ..SimConfig::default()
    };
    let mut world = SimWorld::empty_with_seed(config, 21).expect("valid config");
    let gone = world.add_vehicle(
        EnergyKind::Combustion,
        Direction::Right,
        Rect::new(1030, 394, 100, 50),
    );
    world.add_vehicle(EnergyKind::Electric, Direction::Up, Rect::new(522, 600, 50, 100));
    world.add_vehicle(EnergyKind::Hybrid, Direction::Down, Rect::new(452, 20, 50, 100));

    let report = world.tick();

    assert_eq!(report.respawned, 1);
    assert!(world.vehicle(gone).is_none());
    assert!(world.len() >= 3);
    assert_eq!(world.stats().total_exited, 1);
    assert_eq!(world.stats().total_spawned, 4);
}

#[test]
fn test_respawn_does_not_overfill() {
    let config = SimConfig {
        min_vehicle_count: 1,
        ..SimConfig::default()
    };
    let mut world = SimWorld::empty_with_seed(config, 4).expect("valid config");
    let first = world.add_vehicle(
        EnergyKind::Combustion,
        Direction::Up,
        Rect::new(522, 600, 50, 100),
    );
    world.add_vehicle(EnergyKind::Combustion, Direction::Down, Rect::new(452, 20, 50, 100));

    assert_eq!(world.respawn(first), None);
    assert_eq!(world.len(), 1);
    assert!(world.respawn(VehicleId(1000)).is_none());
    assert_eq!(world.len(), 1);
}

#[test]
fn test_same_seed_runs_identically() {
    let mut a = SimWorld::new_with_seed(SimConfig::default(), 1234).expect("valid config");
    let mut b = SimWorld::new_with_seed(SimConfig::default(), 1234).expect("valid config");

    for _ in 0..300 {
        assert_eq!(a.tick(), b.tick());
    }
    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(a.stats(), b.stats());
}

#[test]
fn test_long_run_keeps_world_at_target() {
    let config = SimConfig::default();
    let target = config.min_vehicle_count;
    let mut world = SimWorld::new_with_seed(config, 77).expect("valid config");

    for _ in 0..2000 {
        world.tick();
        assert!(world.len() >= target);
        assert!(world
            .vehicles()
            .all(|vehicle| vehicle.direction() != Direction::Undef));
    }
    assert!(world.stats().total_exited > 0, "traffic should flow");
}

#[test]
fn test_snapshot_matches_vehicles() {
    let world = SimWorld::new_with_seed(SimConfig::default(), 2).expect("valid config");
    let snapshot = world.snapshot();

    assert_eq!(snapshot.len(), world.len());
    for (view, vehicle) in snapshot.iter().zip(world.vehicles()) {
        assert_eq!(view.id, vehicle.id);
        assert_eq!(view.rect, vehicle.rect());
        assert_eq!(view.direction, vehicle.direction());
        assert_eq!(view.energy_kind, vehicle.energy().kind());
        assert_eq!(view.energy_level, vehicle.energy().level());
    }
    assert!(world.summary().contains("Vehicles: 10"));
}

/// Two vertical vehicles facing each other at column `x`, each directly
/// blocking the other, placed clear of the rightward lane
fn head_on_pair(world: &mut SimWorld, x: i32) -> [VehicleId; 2] {
    let up = world.add_vehicle(
        EnergyKind::Electric,
        Direction::Up,
        Rect::new(x, 450, 50, 100),
    );
    let down = world.add_vehicle(
        EnergyKind::Electric,
        Direction::Down,
        Rect::new(x, 290, 50, 100),
    );
    [up, down]
}

#[test]
fn test_deadlock_not_broken_when_path_is_occupied() {
    let mut world = SimWorld::empty_with_seed(SimConfig::default(), 3).expect("valid config");
    let mut ids = four_way_deadlock(&mut world).to_vec();
    // Sits in the rightward vehicle's path and is itself stuck behind the
    // downward vehicle
    ids.push(world.add_vehicle(
        EnergyKind::Hybrid,
        Direction::Up,
        Rect::new(440, 400, 50, 100),
    ));
    let before: Vec<Rect> = ids.iter().map(|id| rect_of(&world, *id)).collect();

    for _ in 0..3 {
        let report = world.tick();
        assert_eq!(report.moved, 0);
        assert!(!report.deadlock_broken);
    }

    assert_eq!(world.stats().deadlock_breaks, 0);
    let after: Vec<Rect> = ids.iter().map(|id| rect_of(&world, *id)).collect();
    assert_eq!(after, before);
}

#[test]
fn test_deadlock_window_lower_edge() {
    // Window for rightward vehicles is 257 <= x < 512 with the default config
    for (x, released) in [(256, false), (257, true)] {
        let mut world =
            SimWorld::empty_with_seed(SimConfig::default(), 5).expect("valid config");
        head_on_pair(&mut world, 450);
        let right = world.add_vehicle(
            EnergyKind::Combustion,
            Direction::Right,
            Rect::new(x, 394, 100, 50),
        );

        let report = world.tick();

        assert_eq!(report.moved, 0, "nothing should move on its own at x={}", x);
        assert_eq!(report.deadlock_broken, released, "x={}", x);
        let expected_x = if released { x + 5 } else { x };
        assert_eq!(rect_of(&world, right), Rect::new(expected_x, 394, 100, 50));
    }
}

#[test]
fn test_deadlock_window_upper_edge() {
    for (x, released) in [(511, true), (512, false)] {
        let mut world =
            SimWorld::empty_with_seed(SimConfig::default(), 5).expect("valid config");
        head_on_pair(&mut world, 710);
        let right = world.add_vehicle(
            EnergyKind::Combustion,
            Direction::Right,
            Rect::new(x, 394, 100, 50),
        );

        let report = world.tick();

        assert_eq!(report.moved, 0, "nothing should move on its own at x={}", x);
        assert_eq!(report.deadlock_broken, released, "x={}", x);
        let expected_x = if released { x + 5 } else { x };
        assert_eq!(rect_of(&world, right), Rect::new(expected_x, 394, 100, 50));
    }
}
