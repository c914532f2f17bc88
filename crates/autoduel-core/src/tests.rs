#[cfg(test)]
mod tests {
    use crate::commands::{InputFrame, PlayerCommand};
    use crate::components::*;
    use crate::constants::*;
    use crate::enums::*;
    use crate::events::{DamageEvent, SimEvent};
    use crate::geometry::*;
    use crate::state::GameStateSnapshot;
    use crate::types::{Position, Rect, SimTime};

    // ---- Heading math ----

    #[test]
    fn test_wrap_stays_in_range_for_every_heading() {
        let mut d = 0.0;
        while d < 360.0 {
            for rate in [DEFAULT_TURN_RATE, 7.5, 180.0, 359.0] {
                let up = wrap_degrees(d + rate);
                let down = wrap_degrees(d - rate);
                assert!((0.0..360.0).contains(&up), "{d} + {rate} wrapped to {up}");
                assert!((0.0..360.0).contains(&down), "{d} - {rate} wrapped to {down}");
            }
            d += 0.25;
        }
    }

    #[test]
    fn test_wrap_handles_exact_full_turn_and_tiny_negatives() {
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(720.0), 0.0);
        assert_eq!(wrap_degrees(-90.0), 270.0);
        assert!(wrap_degrees(-1e-18) < 360.0);
    }

    #[test]
    fn test_direction_cardinals() {
        assert!((direction(0.0, 0.0, 0.0, 10.0) - 0.0).abs() < 1e-10);
        assert!((direction(0.0, 0.0, 10.0, 0.0) - 90.0).abs() < 1e-10);
        assert!((direction(0.0, 0.0, 0.0, -10.0) - 180.0).abs() < 1e-10);
        assert!((direction(0.0, 0.0, -10.0, 0.0) - 270.0).abs() < 1e-10);
    }

    #[test]
    fn test_direction_is_relative_to_origin() {
        let d = direction(100.0, 100.0, 110.0, 110.0);
        assert!((d - 45.0).abs() < 1e-10, "expected 45, got {d}");
    }

    #[test]
    fn test_range() {
        assert!((range(0.0, 0.0, 3.0, 4.0) - 5.0).abs() < 1e-10);
        assert!((range(-1.0, -1.0, -1.0, -1.0)).abs() < 1e-10);
    }

    #[test]
    fn test_offset_uses_sin_for_x_and_cos_for_y() {
        let ahead = offset_for_direction_and_distance(0.0, 15.0);
        assert!(ahead.x.abs() < 1e-10);
        assert!((ahead.y - 15.0).abs() < 1e-10);

        let right = offset_for_direction_and_distance(90.0, 15.0);
        assert!((right.x - 15.0).abs() < 1e-10);
        assert!(right.y.abs() < 1e-10);
    }

    #[test]
    fn test_shortest_turn_prefers_left_across_zero() {
        // 10 -> 350: 20 degrees left versus 340 right
        assert_eq!(shortest_turn(10.0, 350.0), TurnDirection::Left);
        let next = steer_toward(10.0, 350.0, DEFAULT_TURN_RATE);
        assert!((next - 8.0).abs() < 1e-10, "got {next}");
    }

    #[test]
    fn test_shortest_turn_prefers_right_across_zero() {
        assert_eq!(shortest_turn(350.0, 10.0), TurnDirection::Right);
        let next = steer_toward(359.0, 10.0, DEFAULT_TURN_RATE);
        assert!((next - 1.0).abs() < 1e-10, "got {next}");
    }

    #[test]
    fn test_on_target_heading_swings_right() {
        assert_eq!(shortest_turn(90.0, 90.0), TurnDirection::Right);
        assert_eq!(steer_toward(90.0, 450.0, 5.0), 95.0);
        assert_eq!(steer_toward(358.0, 358.0, DEFAULT_TURN_RATE), 0.0);
    }

    #[test]
    fn test_opposite_heading_turns_right() {
        assert_eq!(shortest_turn(0.0, 180.0), TurnDirection::Right);
    }

    #[test]
    fn test_steer_overshoots_without_clamping() {
        // One degree away with a 2 degree turn rate: passes the target.
        let next = steer_toward(0.0, 1.0, 2.0);
        assert!((next - 2.0).abs() < 1e-10);
        let back = steer_toward(next, 1.0, 2.0);
        assert!((back - 0.0).abs() < 1e-10);
    }

    // ---- Approach angle / facings ----

    #[test]
    fn test_approach_angle_formula() {
        assert_eq!(approach_angle(0.0, 0.0), 0.0);
        assert_eq!(approach_angle(0.0, 180.0), 180.0);
        assert_eq!(approach_angle(90.0, 0.0), 270.0);
        assert_eq!(approach_angle(270.0, 90.0), 180.0);
    }

    #[test]
    fn test_armor_facing_buckets_are_total_and_disjoint() {
        let mut a = 0.0;
        while a < 360.0 {
            let facing = armor_facing(a);
            let in_front = (135.0..225.0).contains(&a);
            let in_back = !(45.0..315.0).contains(&a);
            let in_right = (45.0..135.0).contains(&a);
            let in_left = (225.0..315.0).contains(&a);
            let hits = [in_front, in_back, in_right, in_left]
                .iter()
                .filter(|b| **b)
                .count();
            assert_eq!(hits, 1, "angle {a} landed in {hits} sectors");
            let expected = if in_front {
                ArmorFacing::Front
            } else if in_back {
                ArmorFacing::Back
            } else if in_right {
                ArmorFacing::Right
            } else {
                ArmorFacing::Left
            };
            assert_eq!(facing, expected, "angle {a}");
            a += 0.5;
        }
    }

    #[test]
    fn test_armor_facing_integer_boundaries() {
        assert_eq!(armor_facing(44.0), ArmorFacing::Back);
        assert_eq!(armor_facing(45.0), ArmorFacing::Right);
        assert_eq!(armor_facing(134.0), ArmorFacing::Right);
        assert_eq!(armor_facing(135.0), ArmorFacing::Front);
        assert_eq!(armor_facing(224.0), ArmorFacing::Front);
        assert_eq!(armor_facing(225.0), ArmorFacing::Left);
        assert_eq!(armor_facing(314.0), ArmorFacing::Left);
        assert_eq!(armor_facing(315.0), ArmorFacing::Back);
        assert_eq!(armor_facing(360.0), ArmorFacing::Back);
    }

    // ---- Components ----

    #[test]
    fn test_rect_intersection_is_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Touching edges only
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(0.0, 10.0, 10.0, 10.0)));
        // Zero area
        assert!(!a.intersects(&Rect::new(5.0, 5.0, 0.0, 10.0)));
        // Containment
        assert!(a.intersects(&Rect::new(2.0, 2.0, 1.0, 1.0)));
    }

    #[test]
    fn test_hitbox_is_anchored_at_position() {
        let hitbox = Hitbox::square(VEHICLE_HITBOX_SIZE);
        let rect = hitbox.rect_at(&Position::new(3.0, 4.0));
        assert_eq!(rect, Rect::new(3.0, 4.0, 20.0, 20.0));
    }

    #[test]
    fn test_history_evicts_oldest_when_full() {
        let mut history = PositionHistory::default();
        for i in 0..(POSITION_HISTORY_CAPACITY + 5) {
            history.push(Position::new(i as f64, 0.0));
        }
        assert!(history.is_full());
        assert_eq!(history.len(), POSITION_HISTORY_CAPACITY);
        assert_eq!(history.oldest(), Some(Position::new(5.0, 0.0)));
        assert_eq!(
            history.newest(),
            Some(Position::new((POSITION_HISTORY_CAPACITY + 4) as f64, 0.0))
        );
    }

    #[test]
    fn test_history_ticks_back_matches_index_three_when_full() {
        let mut history = PositionHistory::default();
        for i in 0..40 {
            history.push(Position::new(i as f64, 0.0));
        }
        assert_eq!(history.ticks_back(ROLLBACK_TICKS), history.get(3));
    }

    #[test]
    fn test_history_ticks_back_clamps_to_oldest() {
        let mut history = PositionHistory::default();
        assert_eq!(history.ticks_back(ROLLBACK_TICKS), None);

        history.push(Position::new(1.0, 1.0));
        history.push(Position::new(2.0, 2.0));
        assert_eq!(
            history.ticks_back(ROLLBACK_TICKS),
            Some(Position::new(1.0, 1.0))
        );
        assert_eq!(history.ticks_back(1), Some(Position::new(2.0, 2.0)));
    }

    #[test]
    fn test_fire_control_cycle() {
        let mut fc = FireControl::new(2);
        let shots: Vec<bool> = (0..6).map(|_| fc.cycle()).collect();
        assert_eq!(shots, vec![false, false, true, false, false, true]);
        assert_eq!(fc.limiter, 0);
    }

    #[test]
    fn test_armor_damage_has_no_floor() {
        let mut armor = Armor::uniform(5.0);
        armor.apply_damage(ArmorFacing::Left, PROJECTILE_DAMAGE);
        assert_eq!(armor.left, -5.0);
        assert_eq!(armor.get(ArmorFacing::Front), 5.0);
        assert_eq!(armor.weakest(), -5.0);
    }

    #[test]
    fn test_kinematics_wraps_direction() {
        let mut k = Kinematics::default();
        k.set_direction(-2.0);
        assert_eq!(k.current_direction, 358.0);
        k.current_speed = 3.0;
        k.current_acceleration = 0.1;
        k.stop();
        assert_eq!(k.current_speed, 0.0);
        assert_eq!(k.current_acceleration, 0.0);
    }

    #[test]
    fn test_projectile_detonate() {
        let mut p = ProjectileState::new(7, PROJECTILE_FUEL, PROJECTILE_DAMAGE);
        assert!(!p.destroyed);
        p.detonate();
        assert!(p.destroyed);
        assert_eq!(p.fuel, FUEL_UNLIMITED);
    }

    // ---- Serde ----

    #[test]
    fn test_entity_kind_serializes_lowercase() {
        let json = serde_json::to_string(&EntityKind::Projectile).unwrap();
        assert_eq!(json, "\"projectile\"");
    }

    /// Verify PlayerCommand round-trips through serde (tagged union).
    #[test]
    fn test_player_command_serde() {
        let commands = vec![
            PlayerCommand::StartMatch,
            PlayerCommand::Pause,
            PlayerCommand::Resume,
            PlayerCommand::Input {
                frame: InputFrame {
                    heading: 90.0,
                    throttle: 0.5,
                    fire: true,
                },
            },
            PlayerCommand::RemoveVehicle { vehicle_id: 42 },
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: PlayerCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    #[test]
    fn test_sim_event_serde() {
        let event = SimEvent::Damage(DamageEvent {
            target: 1,
            attacker: 2,
            approach: 0.0,
            facing: ArmorFacing::Back,
            amount: PROJECTILE_DAMAGE,
        });
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"Damage\""));
        let _back: SimEvent = serde_json::from_str(&json).unwrap();
    }

    #[test]
    fn test_snapshot_serde() {
        let snapshot = GameStateSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.time.tick, back.time.tick);
        assert_eq!(snapshot.phase, back.phase);
        assert!(back.player().is_none());
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..TICK_RATE {
            time.advance();
        }
        assert_eq!(time.tick, TICK_RATE as u64);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-10);
    }
}
