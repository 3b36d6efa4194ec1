#[cfg(test)]
mod tests {
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use cogfront_core::config::{ConveyorConfig, PowerReserveConfig, TilePatternConfig};
    use cogfront_core::constants::DT;
    use cogfront_core::enums::PartKind;
    use cogfront_core::state::PartLocation;
    use cogfront_core::types::{CellKey, PartId};

    use crate::board::{Board, PartHit};
    use crate::conveyor::{ConveyorBelt, ShuffleBag};
    use crate::parts::PartRegistry;
    use crate::pattern::TilePattern;
    use crate::power::propagate;
    use crate::reserve::PowerReserve;
    use crate::surface::PlaceableSurface;
    use crate::turret::{aim_auto_gears, can_shoot, charge_turrets};

    /// 5x5 board with cell (row, col) centered at world (col, row).
    fn board() -> Board {
        Board::new(5, 5, 1.0, Vec2::ZERO)
    }

    fn put(board: &mut Board, parts: &mut PartRegistry, kind: PartKind, x: f32, y: f32) -> PartId {
        let id = parts.spawn(kind, Some(3.0));
        assert!(board.place(parts, id, Vec2::new(x, y)), "place {kind:?} at ({x}, {y})");
        id
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(11)
    }

    // --- Placement ---

    #[test]
    fn test_place_sets_placed_and_snaps_to_cell() {
        let mut board = board();
        let mut parts = PartRegistry::new();
        let id = parts.spawn(PartKind::Gear, None);
        assert!(board.place(&mut parts, id, Vec2::new(1.2, 2.9)));

        let part = parts.get(id).unwrap();
        assert!(part.placed);
        assert_eq!(part.location, PartLocation::Board(CellKey::new(3, 1)));
        assert_eq!(part.position, Vec2::new(1.0, 3.0));
        assert_eq!(board.occupant(CellKey::new(3, 1)), Some(id));
    }

    #[test]
    fn test_place_off_board_fails_without_mutation() {
        let mut board = board();
        let mut parts = PartRegistry::new();
        let id = parts.spawn(PartKind::Gear, None);
        assert!(!board.place(&mut parts, id, Vec2::new(-3.0, 0.0)));
        assert!(!board.place(&mut parts, id, Vec2::new(0.0, 7.0)));

        let part = parts.get(id).unwrap();
        assert!(!part.placed);
        assert_eq!(part.location, PartLocation::Loose);
        assert_eq!(board.occupied().count(), 0);
    }

    #[test]
    fn test_place_on_occupied_cell_fails() {
        let mut board = board();
        let mut parts = PartRegistry::new();
        let first = put(&mut board, &mut parts, PartKind::Wall, 2.0, 2.0);
        let second = parts.spawn(PartKind::Gear, None);

        assert!(!board.place(&mut parts, second, Vec2::new(2.1, 1.9)));
        assert_eq!(board.occupant(CellKey::new(2, 2)), Some(first));
        assert!(!parts.get(second).unwrap().placed);
    }

    #[test]
    fn test_place_unknown_part_fails() {
        let mut board = board();
        let mut parts = PartRegistry::new();
        assert!(!board.place(&mut parts, PartId(99), Vec2::ZERO));
        assert_eq!(board.occupant(CellKey::new(0, 0)), None);
    }

    #[test]
    fn test_pick_up_empty_cell_returns_none() {
        let mut board = board();
        let mut parts = PartRegistry::new();
        assert_eq!(board.pick_up(&mut parts, Vec2::new(1.0, 1.0)), None);
        assert_eq!(board.pick_up(&mut parts, Vec2::new(40.0, 1.0)), None);
    }

    proptest! {
        #[test]
        fn place_then_pick_up_round_trips(
            row in 0i32..5,
            col in 0i32..5,
            jx in -0.45f32..0.45,
            jy in -0.45f32..0.45,
            rotation in -180.0f32..180.0,
        ) {
            let mut board = board();
            let mut parts = PartRegistry::new();
            board.set_rotation(&mut parts, rotation);
            let key = CellKey::new(row, col);
            let at = board.transform.to_world(board.cell_local(key) + Vec2::new(jx, jy));

            let id = parts.spawn(PartKind::Turret, Some(3.0));
            prop_assert!(board.place(&mut parts, id, at));
            prop_assert_eq!(board.pick_up(&mut parts, at), Some(id));
            prop_assert_eq!(board.occupant(key), None);
            prop_assert!(!parts.get(id).unwrap().placed);
        }
    }

    // --- Power ---

    /// Source at (0,0), gears at (1,0) and (2,0).
    #[test]
    fn test_source_chain_powers_and_breaks() {
        let mut board = board();
        let mut parts = PartRegistry::new();
        let source = put(&mut board, &mut parts, PartKind::PowerSource, 0.0, 0.0);
        let near = put(&mut board, &mut parts, PartKind::Gear, 1.0, 0.0);
        let far = put(&mut board, &mut parts, PartKind::Gear, 2.0, 0.0);

        propagate(&board, &mut parts, true);
        assert!(parts.is_powered(source));
        assert!(parts.is_powered(near));
        assert!(parts.is_powered(far));

        assert_eq!(board.pick_up(&mut parts, Vec2::new(1.0, 0.0)), Some(near));
        let report = propagate(&board, &mut parts, true);
        assert!(!parts.is_powered(near));
        assert!(!parts.is_powered(far));
        assert_eq!(report.powered_down, vec![near, far]);
    }

    #[test]
    fn test_long_chain_powers_in_one_tick_regardless_of_id_order() {
        let mut board = board();
        let mut parts = PartRegistry::new();
        // Spawn far-to-near so ids run against the chain direction.
        let mut gears = Vec::new();
        for col in (1..5).rev() {
            gears.push(put(&mut board, &mut parts, PartKind::Gear, col as f32, 0.0));
        }
        for row in 1..5 {
            gears.push(put(&mut board, &mut parts, PartKind::Gear, 4.0, row as f32));
        }
        put(&mut board, &mut parts, PartKind::PowerSource, 0.0, 0.0);

        propagate(&board, &mut parts, true);
        assert!(gears.iter().all(|g| parts.is_powered(*g)));

        // Removing the source kills the whole chain in one tick.
        board.pick_up(&mut parts, Vec2::ZERO).unwrap();
        propagate(&board, &mut parts, true);
        assert!(gears.iter().all(|g| !parts.is_powered(*g)));
    }

    #[test]
    fn test_gear_off_chain_stays_dark() {
        let mut board = board();
        let mut parts = PartRegistry::new();
        put(&mut board, &mut parts, PartKind::PowerSource, 0.0, 0.0);
        let diagonal = put(&mut board, &mut parts, PartKind::Gear, 1.0, 1.0);
        propagate(&board, &mut parts, true);
        assert!(!parts.is_powered(diagonal));
    }

    #[test]
    fn test_replacing_gear_elsewhere_in_same_tick_drops_power() {
        let mut board = board();
        let mut parts = PartRegistry::new();
        put(&mut board, &mut parts, PartKind::PowerSource, 0.0, 0.0);
        let gear = put(&mut board, &mut parts, PartKind::Gear, 1.0, 0.0);
        propagate(&board, &mut parts, true);
        assert!(parts.is_powered(gear));

        // Moved without an intervening tick: still placed, but not where it powered up.
        board.pick_up(&mut parts, Vec2::new(1.0, 0.0)).unwrap();
        assert!(board.place(&mut parts, gear, Vec2::new(3.0, 3.0)));
        propagate(&board, &mut parts, true);
        assert!(!parts.is_powered(gear));
    }

    #[test]
    fn test_board_rotation_keeps_power() {
        let mut board = board();
        let mut parts = PartRegistry::new();
        put(&mut board, &mut parts, PartKind::PowerSource, 0.0, 0.0);
        let gear = put(&mut board, &mut parts, PartKind::Gear, 1.0, 0.0);
        propagate(&board, &mut parts, true);

        let before = parts.get(gear).unwrap().position;
        board.set_rotation(&mut parts, -90.0);
        let after = parts.get(gear).unwrap().position;
        assert!(before.distance(after) > 0.5);
        assert_eq!(board.cell_at(after), Some(CellKey::new(0, 1)));

        let report = propagate(&board, &mut parts, true);
        assert!(parts.is_powered(gear));
        assert!(report.powered_down.is_empty());
    }

    #[test]
    fn test_sources_go_dark_when_offline() {
        let mut board = board();
        let mut parts = PartRegistry::new();
        let source = put(&mut board, &mut parts, PartKind::PowerSource, 0.0, 0.0);
        let gear = put(&mut board, &mut parts, PartKind::Gear, 0.0, 1.0);
        propagate(&board, &mut parts, true);
        assert!(parts.is_powered(gear));

        propagate(&board, &mut parts, false);
        assert!(!parts.is_powered(source));
        assert!(!parts.is_powered(gear));
    }

    #[test]
    fn test_destroyed_link_breaks_chain() {
        let mut board = board();
        let mut parts = PartRegistry::new();
        put(&mut board, &mut parts, PartKind::PowerSource, 0.0, 0.0);
        let link = put(&mut board, &mut parts, PartKind::Gear, 1.0, 0.0);
        let tail = put(&mut board, &mut parts, PartKind::Gear, 2.0, 0.0);
        propagate(&board, &mut parts, true);

        assert_eq!(board.damage_part(&mut parts, link, 1.0), PartHit::Survived);
        assert_eq!(board.damage_part(&mut parts, link, 5.0), PartHit::Destroyed);
        assert!(!parts.contains(link));
        propagate(&board, &mut parts, true);
        assert!(!parts.is_powered(tail));
    }

    // --- Turrets ---

    #[test]
    fn test_turret_charges_only_next_to_power() {
        let mut board = board();
        let mut parts = PartRegistry::new();
        put(&mut board, &mut parts, PartKind::PowerSource, 0.0, 0.0);
        let live = put(&mut board, &mut parts, PartKind::Turret, 1.0, 0.0);
        let dead = put(&mut board, &mut parts, PartKind::Turret, 3.0, 3.0);
        propagate(&board, &mut parts, true);
        assert!(can_shoot(&board, &parts, live));
        assert!(!can_shoot(&board, &parts, dead));

        let mut shots = Vec::new();
        for _ in 0..125 {
            propagate(&board, &mut parts, true);
            shots.extend(charge_turrets(&board, &mut parts, DT, 1.0));
        }
        assert_eq!(shots.len(), 2);
        assert!(shots.iter().all(|s| s.turret == live));
        assert!((shots[0].direction - Vec2::Y).length() < 1e-5);
        assert_eq!(parts.get(dead).unwrap().charge, 0.0);
    }

    #[test]
    fn test_turret_charge_resets_when_power_lost() {
        let mut board = board();
        let mut parts = PartRegistry::new();
        put(&mut board, &mut parts, PartKind::PowerSource, 0.0, 0.0);
        let turret = put(&mut board, &mut parts, PartKind::Turret, 1.0, 0.0);
        for _ in 0..30 {
            propagate(&board, &mut parts, true);
            charge_turrets(&board, &mut parts, DT, 1.0);
        }
        assert!(parts.get(turret).unwrap().charge > 0.4);

        propagate(&board, &mut parts, false);
        charge_turrets(&board, &mut parts, DT, 1.0);
        assert_eq!(parts.get(turret).unwrap().charge, 0.0);
    }

    #[test]
    fn test_auto_gear_snaps_adjacent_turret() {
        let mut board = board();
        let mut parts = PartRegistry::new();
        put(&mut board, &mut parts, PartKind::PowerSource, 0.0, 0.0);
        put(&mut board, &mut parts, PartKind::AutoGear, 1.0, 0.0);
        let turret = put(&mut board, &mut parts, PartKind::Turret, 1.0, 1.0);
        propagate(&board, &mut parts, true);

        let target = Vec2::new(11.0, 1.0);
        aim_auto_gears(&board, &mut parts, &[target, Vec2::new(-40.0, 1.0)]);
        let t = parts.get(turret).unwrap();
        assert!((t.rotation - 270.0).abs() < 1e-3);
        assert!((t.facing(board.rotation()) - Vec2::X).length() < 1e-4);
    }

    #[test]
    fn test_gears_refuse_rotation() {
        let mut parts = PartRegistry::new();
        let gear = parts.spawn(PartKind::Gear, None);
        let wall = parts.spawn(PartKind::Wall, None);
        assert!(!parts.get_mut(gear).unwrap().try_rotate(30.0));
        assert!(parts.get_mut(wall).unwrap().try_rotate(-30.0));
        assert_eq!(parts.get(wall).unwrap().rotation, 330.0);
    }

    // --- Board queries ---

    #[test]
    fn test_boss_ratio_and_rightmost() {
        let mut board = Board::new(3, 3, 1.0, Vec2::ZERO);
        let mut parts = PartRegistry::new();
        assert_eq!(board.boss_ratio(), 0.0);
        assert_eq!(board.rightmost_part(&parts), None);

        put(&mut board, &mut parts, PartKind::Wall, 0.0, 0.0);
        let right = put(&mut board, &mut parts, PartKind::Gear, 2.0, 1.0);
        put(&mut board, &mut parts, PartKind::Turret, 1.0, 2.0);
        assert!((board.boss_ratio() - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(board.rightmost_part(&parts), Some(right));
    }

    #[test]
    fn test_destroy_option_prefers_occupied_cells() {
        let mut board = Board::new(3, 3, 1.0, Vec2::ZERO);
        let mut parts = PartRegistry::new();
        let mut rng = rng();
        let victim = put(&mut board, &mut parts, PartKind::Gear, 2.0, 1.0);

        let key = board.take_destroy_option(&mut rng).unwrap();
        assert_eq!(key, CellKey::new(1, 2));
        assert_eq!(board.destroy_cell(&mut parts, key), Some(victim));
        assert!(!parts.contains(victim));
        assert!(!board.has_cell(key));

        let extra = parts.spawn(PartKind::Wall, None);
        assert!(!board.place(&mut parts, extra, Vec2::new(2.0, 1.0)));

        let mut taken = 0;
        while board.take_destroy_option(&mut rng).is_some() {
            taken += 1;
        }
        assert_eq!(taken, 8);
    }

    // --- Conveyor ---

    fn belt_config() -> ConveyorConfig {
        ConveyorConfig {
            speed: 1.0,
            spawn_interval: 2.0,
            destroy_distance: 3.0,
            lanes: vec![Vec2::ZERO],
            bag: vec![PartKind::Gear, PartKind::Turret, PartKind::Wall],
        }
    }

    #[test]
    fn test_shuffle_bag_draws_each_before_repeat() {
        let mut bag = ShuffleBag::new(vec![1, 2, 3, 4]);
        let mut rng = rng();
        for _ in 0..5 {
            let mut round: Vec<i32> = (0..4).map(|_| bag.draw(&mut rng).unwrap()).collect();
            round.sort();
            assert_eq!(round, vec![1, 2, 3, 4]);
        }
        assert!(ShuffleBag::<i32>::new(vec![]).draw(&mut rng).is_none());
    }

    #[test]
    fn test_conveyor_spawns_moves_and_evicts() {
        let mut belt = ConveyorBelt::new(0, Vec2::new(-5.0, -4.0), &belt_config(), Some(3.0));
        let mut parts = PartRegistry::new();
        let mut rng = rng();

        for _ in 0..60 {
            belt.tick(&mut parts, &mut rng, DT);
        }
        assert!(parts.is_empty(), "belt idle until started");

        belt.set_running(true);
        let mut spawned = Vec::new();
        let mut evicted = Vec::new();
        for _ in 0..410 {
            let out = belt.tick(&mut parts, &mut rng, DT);
            spawned.extend(out.spawned);
            evicted.extend(out.evicted);
        }
        assert_eq!(spawned.len(), 3);
        assert_eq!(evicted, vec![spawned[0]]);
        assert!(!parts.contains(spawned[0]));

        let newest = parts.get(spawned[2]).unwrap();
        assert!(!newest.placed);
        assert_eq!(newest.location, PartLocation::Conveyor { belt: 0 });
        assert!(newest.position.x > -5.0 && newest.position.y == -4.0);
    }

    #[test]
    fn test_conveyor_pick_up_and_place_back() {
        let mut belt = ConveyorBelt::new(0, Vec2::ZERO, &belt_config(), None);
        let mut parts = PartRegistry::new();
        let mut rng = rng();
        belt.set_running(true);
        let mut id = None;
        for _ in 0..130 {
            id = id.or(belt.tick(&mut parts, &mut rng, DT).spawned);
        }
        let id = id.unwrap();
        let at = parts.get(id).unwrap().position;

        assert_eq!(belt.pick_up(&mut parts, at), Some(id));
        assert!(!parts.get(id).unwrap().placed);
        assert!(belt.has_cell_at(at));
        assert!(belt.place(&mut parts, id, at));
        let other = parts.spawn(PartKind::Wall, None);
        assert!(!belt.place(&mut parts, other, at));
        assert!(!parts.get(id).unwrap().placed);
    }

    // --- Reserve and pattern ---

    #[test]
    fn test_reserve_drains_until_sources_go_offline() {
        let mut board = board();
        let mut parts = PartRegistry::new();
        put(&mut board, &mut parts, PartKind::PowerSource, 0.0, 0.0);
        let config = PowerReserveConfig {
            enabled: true,
            reserve_max: 2.0,
            goal_max: 5.0,
            period: 1.0,
            goal_cell: CellKey::new(4, 4),
        };
        let mut reserve = PowerReserve::new(&config);
        assert!(reserve.is_online());
        for _ in 0..(60 * 3) {
            propagate(&board, &mut parts, reserve.is_online());
            reserve.tick(&board, &parts, DT);
        }
        assert!(!reserve.is_online());
        assert_eq!(reserve.view().goal, 0.0);
    }

    #[test]
    fn test_reserve_fills_goal_while_goal_gear_powered() {
        let mut board = board();
        let mut parts = PartRegistry::new();
        put(&mut board, &mut parts, PartKind::PowerSource, 4.0, 3.0);
        put(&mut board, &mut parts, PartKind::Gear, 4.0, 4.0);
        let config = PowerReserveConfig {
            enabled: true,
            reserve_max: 2.0,
            goal_max: 2.0,
            period: 0.5,
            goal_cell: CellKey::new(4, 4),
        };
        let mut reserve = PowerReserve::new(&config);
        for _ in 0..(60 * 2) {
            propagate(&board, &mut parts, reserve.is_online());
            reserve.tick(&board, &parts, DT);
        }
        assert!(reserve.goal_reached());
        assert_eq!(reserve.view().reserve, 2.0);
    }

    #[test]
    fn test_tile_pattern_reports_once() {
        let mut board = board();
        let mut parts = PartRegistry::new();
        let mut pattern = TilePattern::new(&TilePatternConfig {
            cells: vec![CellKey::new(0, 0), CellKey::new(4, 4)],
            kind: PartKind::Wall,
            scene: "BossFourScene".into(),
        });
        put(&mut board, &mut parts, PartKind::Wall, 0.0, 0.0);
        assert!(!pattern.check(&board, &parts));
        put(&mut board, &mut parts, PartKind::Gear, 4.0, 4.0);
        assert!(!pattern.check(&board, &parts));

        board.pick_up(&mut parts, Vec2::new(4.0, 4.0)).unwrap();
        put(&mut board, &mut parts, PartKind::Wall, 4.0, 4.0);
        assert!(pattern.check(&board, &parts));
        assert!(!pattern.check(&board, &parts));
        assert!(pattern.is_found());
    }
}
