#[cfg(test)]
mod tests {
    use crate::commands::SessionCommand;
    use crate::definitions::*;
    use crate::entities::*;
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::SimulationStepResult;
    use crate::fixed_point::{self, FixedPoint};
    use crate::settings::GameSettings;
    use crate::state::{GameState, TargetLock};
    use crate::types::{sanitize_dt, Float2, Float2Ext, GridCell};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn test_player() -> PlayerEntity {
        PlayerDefinition::default().create_entity(Float2::new(0.0, -4.0))
    }

    fn test_enemy(id: u32, max_health: f32) -> EnemyEntity {
        let definition = EnemyDefinition {
            max_health,
            ..EnemyDefinition::default()
        };
        definition.create_entity(id, GridCell::new(0, 0), Float2::ZERO)
    }

    fn test_state() -> GameState {
        let fortress = FortressEntity::new(Float2::new(0.0, -5.0), Float2::new(1.5, 0.75), 500.0);
        GameState::new(test_player(), fortress)
    }

    // --- Vector math ---

    #[test]
    fn test_normalized_or_falls_back_on_zero() {
        assert_eq!(Float2::ZERO.normalized_or(Float2::UP), Float2::UP);
        let n = Float2::new(3.0, 4.0).normalized_or(Float2::UP);
        assert!(approx(n.x, 0.6) && approx(n.y, 0.8), "got {n:?}");
    }

    #[test]
    fn test_reflect_across_normal() {
        let r = Float2::new(1.0, -1.0).reflect_across(Float2::new(0.0, 2.0));
        assert!(approx(r.x, 1.0) && approx(r.y, 1.0), "got {r:?}");
    }

    #[test]
    fn test_sanitize_dt() {
        assert_eq!(sanitize_dt(0.016), 0.016);
        assert_eq!(sanitize_dt(-1.0), 0.0);
        assert_eq!(sanitize_dt(f32::NAN), 0.0);
        assert_eq!(sanitize_dt(f32::INFINITY), 0.0);
        assert_eq!(sanitize_dt(1.0e9), 1.0e9);
    }

    // --- Fixed point ---

    #[test]
    fn test_fixed_point_conversions() {
        assert_eq!(fixed_point::to_float(25_000), 2.5);
        assert_eq!(fixed_point::from_float(0.75), 7_500);
        assert_eq!(fixed_point::from_float(-3.0), 0, "negative values clamp to zero");
        assert_eq!(FixedPoint::from_raw(1_000_000).to_float(), 100.0);
    }

    #[test]
    fn test_fixed_point_serializes_as_integer() {
        let json = serde_json::to_string(&FixedPoint::from_raw(7_500)).unwrap();
        assert_eq!(json, "7500");
        let back: FixedPoint = serde_json::from_str("25000").unwrap();
        assert_eq!(back.to_float(), 2.5);
    }

    // --- Player ---

    #[test]
    fn test_player_definition_defaults() {
        let player = test_player();
        assert_eq!(player.move_speed(), 8.0);
        assert_eq!(player.attack_damage(), 25.0);
        assert_eq!(player.attack_range(), 2.5);
        assert_eq!(player.attack_cooldown(), 0.75);
        assert_eq!(player.max_health(), 100.0);
        assert_eq!(player.level(), 1);
    }

    #[test]
    fn test_player_constructor_clamps_stats() {
        let stats = PlayerStats {
            move_speed: -1.0,
            attack_damage: -5.0,
            attack_range: -2.0,
            attack_cooldown: -0.5,
        };
        let player = PlayerEntity::new(Float2::ZERO, stats, 0.0, -3.0);
        assert_eq!(player.move_speed(), 0.0);
        assert_eq!(player.attack_damage(), 0.0);
        assert_eq!(player.attack_range(), 0.0);
        assert_eq!(player.attack_cooldown(), 0.0);
        assert_eq!(player.max_health(), 1.0, "max health floors at 1");
        assert_eq!(player.luck(), 0.0);
    }

    #[test]
    fn test_add_experience_levels_multiple_times() {
        let mut player = test_player();
        player.configure_experience_progression(100.0, 1.25, 1);
        let gained = player.add_experience(250.0);
        assert_eq!(gained, 2);
        assert_eq!(player.level(), 3);
        assert!(approx(player.current_experience(), 25.0));
        assert!(approx(player.experience_to_next_level(), 156.25));
    }

    #[test]
    fn test_add_experience_ignores_non_positive() {
        let mut player = test_player();
        assert_eq!(player.add_experience(0.0), 0);
        assert_eq!(player.add_experience(-10.0), 0);
        assert_eq!(player.current_experience(), 0.0);
    }

    #[test]
    fn test_experience_progression_floors() {
        let mut player = test_player();
        player.configure_experience_progression(0.5, 0.5, 0);
        assert_eq!(player.level(), 1);
        assert_eq!(player.experience_to_next_level(), 1.0);
        assert_eq!(player.add_experience(3.0), 3, "growth floors at 1, so every point levels");
        assert_eq!(player.level(), 4);
    }

    #[test]
    fn test_move_horizontal_clamps_to_bounds() {
        let mut player = test_player();
        player.set_horizontal_bounds(-6.0, 6.0);
        player.move_horizontal(1.0, 1.0);
        assert_eq!(player.position().x, 6.0);
        player.move_horizontal(-1.0, 0.5);
        assert_eq!(player.position().x, 2.0);
        player.move_horizontal(-1.0, 10.0);
        assert_eq!(player.position().x, -6.0);
    }

    #[test]
    fn test_reversed_bounds_are_swapped() {
        let mut player = test_player();
        player.set_horizontal_bounds(5.0, -5.0);
        assert_eq!(player.horizontal_bounds(), (-5.0, 5.0));
    }

    #[test]
    fn test_try_attack_respects_cooldown() {
        let mut player = test_player();
        assert!(player.try_attack());
        assert!(!player.try_attack(), "second attack is on cooldown");
        assert_eq!(player.attack_cooldown_remaining(), 0.75);
        player.update_cooldown(0.5);
        assert!(!player.can_attack());
        player.update_cooldown(0.5);
        assert_eq!(player.attack_cooldown_remaining(), 0.0);
        assert!(player.try_attack());
    }

    #[test]
    fn test_modifiers_apply_with_floors() {
        let mut player = test_player();
        player.apply_modifier(&EffectModifier::new(
            GameplayAttribute::AttackDamage,
            ModifierOperation::Add,
            5.0,
        ));
        assert_eq!(player.attack_damage(), 30.0);

        player.apply_modifier(&EffectModifier::new(
            GameplayAttribute::AttackCooldown,
            ModifierOperation::Multiply,
            0.001,
        ));
        assert_eq!(player.attack_cooldown(), 0.05, "cooldown floors at 0.05");

        player.apply_modifier(&EffectModifier::new(
            GameplayAttribute::MoveSpeed,
            ModifierOperation::Add,
            -100.0,
        ));
        assert_eq!(player.move_speed(), 0.0);

        player.apply_modifier(&EffectModifier::new(
            GameplayAttribute::AttackRange,
            ModifierOperation::Multiply,
            2.0,
        ));
        assert_eq!(player.attack_range(), 5.0);
    }

    #[test]
    fn test_apply_ability_applies_every_modifier() {
        let mut player = test_player();
        let ability = AbilityDefinition {
            id: "twin".into(),
            effects: vec![
                EffectDefinition {
                    name: "a".into(),
                    modifiers: vec![EffectModifier::new(
                        GameplayAttribute::AttackDamage,
                        ModifierOperation::Add,
                        10.0,
                    )],
                },
                EffectDefinition {
                    name: "b".into(),
                    modifiers: vec![EffectModifier::new(
                        GameplayAttribute::AttackDamage,
                        ModifierOperation::Multiply,
                        2.0,
                    )],
                },
            ],
            ..AbilityDefinition::default()
        };
        player.apply_ability(&ability);
        assert_eq!(player.attack_damage(), 70.0);
    }

    #[test]
    fn test_player_damage_and_heal_clamp() {
        let mut player = test_player();
        assert_eq!(player.apply_damage(30.0), 30.0);
        assert_eq!(player.heal(50.0), 30.0, "heal clamps to max");
        assert_eq!(player.apply_damage(500.0), 100.0);
        assert_eq!(player.current_health(), 0.0);
        assert_eq!(player.apply_damage(5.0), 0.0);
    }

    #[test]
    fn test_player_reset_restores_base_values() {
        let mut player = test_player();
        player.set_horizontal_bounds(-6.0, 6.0);
        player.move_horizontal(1.0, 0.5);
        player.apply_damage(40.0);
        player.add_gold(12.0);
        player.add_experience(150.0);
        player.apply_modifier(&EffectModifier::new(
            GameplayAttribute::AttackDamage,
            ModifierOperation::Add,
            5.0,
        ));
        player.reset();
        assert_eq!(player.position(), Float2::new(0.0, -4.0));
        assert_eq!(player.current_health(), player.max_health());
        assert_eq!(player.attack_damage(), 25.0);
        assert_eq!(player.gold(), 0.0);
        assert_eq!(player.level(), 1);
        assert_eq!(player.experience_to_next_level(), 100.0);
    }

    // --- Enemy ---

    #[test]
    fn test_enemy_damage_kills_and_stays_dead() {
        let mut enemy = test_enemy(1, 50.0);
        assert_eq!(enemy.apply_damage(30.0), 30.0);
        assert!(enemy.is_alive());
        assert_eq!(enemy.apply_damage(30.0), 20.0, "damage clamps to remaining health");
        assert!(!enemy.is_alive());
        assert_eq!(enemy.apply_damage(10.0), 0.0);
        assert_eq!(enemy.heal(10.0), 0.0, "dead enemies cannot heal");
    }

    #[test]
    fn test_enemy_min_health() {
        let enemy = test_enemy(1, 0.0);
        assert_eq!(enemy.max_health(), 0.1);
        assert!(enemy.is_alive());
    }

    #[test]
    fn test_enemy_try_attack_cooldown() {
        let mut enemy = test_enemy(1, 50.0);
        assert!(enemy.try_attack());
        assert!(!enemy.try_attack());
        enemy.update_cooldown(1.0);
        assert!(enemy.try_attack());
    }

    #[test]
    fn test_enemy_move_towards_stops_on_target() {
        let mut enemy = test_enemy(1, 50.0);
        enemy.move_towards(Float2::new(0.0, 10.0), 1.0);
        assert!(approx(enemy.position().y, 2.0));
        enemy.move_towards(Float2::new(0.0, 3.0), 1.0);
        assert_eq!(enemy.position(), Float2::new(0.0, 3.0));
    }

    #[test]
    fn test_enemy_preferred_range_tolerance() {
        let definition = EnemyDefinition {
            role: EnemyCombatRole::Ranged,
            preferred_distance: 4.0,
            ..EnemyDefinition::default()
        };
        let enemy = definition.create_entity(1, GridCell::new(0, 0), Float2::ZERO);
        assert!(enemy.is_in_preferred_range(Float2::new(0.0, 4.2)));
        assert!(!enemy.is_in_preferred_range(Float2::new(0.0, 4.5)));

        let melee = test_enemy(2, 50.0);
        assert!(melee.is_in_preferred_range(Float2::new(0.0, 1.7)));
        assert!(!melee.is_in_preferred_range(Float2::new(0.0, 2.0)));
    }

    #[test]
    fn test_enemy_advance_row() {
        let mut enemy = test_enemy(1, 50.0);
        enemy.advance_row();
        assert_eq!(enemy.cell(), GridCell::new(1, 0));
    }

    // --- Fortress ---

    #[test]
    fn test_fortress_destroyed_is_terminal() {
        let mut fortress = FortressEntity::new(Float2::ZERO, Float2::ZERO, 0.0);
        assert_eq!(fortress.max_health(), 1.0);
        assert_eq!(fortress.apply_damage(5.0), 1.0);
        assert!(fortress.is_destroyed());
        assert_eq!(fortress.heal(1.0), 0.0);
        assert_eq!(fortress.apply_damage(1.0), 0.0);
        fortress.reset();
        assert!(!fortress.is_destroyed());
    }

    #[test]
    fn test_fortress_nearest_point() {
        let fortress = FortressEntity::new(Float2::new(0.0, -5.0), Float2::new(1.5, 0.75), 500.0);
        assert_eq!(fortress.nearest_point(Float2::new(4.0, 3.0)), Float2::new(1.5, -4.25));
        assert_eq!(fortress.nearest_point(Float2::new(0.5, -5.0)), Float2::new(0.5, -5.0));
        let point = FortressEntity::new(Float2::new(2.0, 2.0), Float2::ZERO, 10.0);
        assert_eq!(point.nearest_point(Float2::new(9.0, 9.0)), Float2::new(2.0, 2.0));
    }

    // --- Projectiles and drops ---

    #[test]
    fn test_projectile_reaches_target_on_pass() {
        let mut projectile = ProjectileEntity::new(
            1,
            ProjectileSource::Player,
            Float2::ZERO,
            Float2::new(5.0, 0.0),
            Float2::new(10.0, 0.0),
            10.0,
            0.0,
        );
        projectile.advance(1.0);
        assert!(!projectile.has_reached_target());
        projectile.advance(1.0);
        assert!(projectile.has_reached_target());
        assert!(projectile.position().x >= 10.0);
    }

    #[test]
    fn test_projectile_source_and_faction() {
        let projectile = ProjectileEntity::new(
            3,
            ProjectileSource::Enemy(7),
            Float2::ZERO,
            Float2::Y,
            Float2::Y,
            -2.0,
            -1.0,
        );
        assert_eq!(projectile.source_id(), Some(7));
        assert_eq!(projectile.faction(), ProjectileFaction::Enemy);
        assert_eq!(projectile.damage(), 0.0);
        assert_eq!(projectile.explosion_radius(), 0.0);
    }

    #[test]
    fn test_resource_drop_ready_after_delay() {
        let mut drop = ResourceDropEntity::new(1, ResourceDropType::Gold, Float2::ZERO, 5.0, 1.0);
        assert!(!drop.tick(0.4));
        assert!(!drop.tick(0.4));
        assert!(drop.tick(0.4));
    }

    #[test]
    fn test_drop_probability_from_fixed_point() {
        let drop = EnemyDropDefinition::chance(ResourceDropType::Health, 5.0, 0.1);
        assert_eq!(drop.probability_raw.raw(), 1_000);
        assert!(approx(drop.probability(), 0.1));
        assert!(EnemyDropDefinition::guaranteed(ResourceDropType::Gold, 1.0).guaranteed);
    }

    // --- Game state ---

    #[test]
    fn test_ids_are_monotonic() {
        let mut state = test_state();
        let a = state.next_enemy_id();
        let b = state.next_enemy_id();
        assert!(b > a);
        let p1 = state.add_player_projectile(Float2::ZERO, Float2::Y, 1.0, 0.0, Float2::Y).id();
        let p2 = state.add_enemy_projectile(a, Float2::ZERO, -Float2::Y, 1.0, -Float2::Y).id();
        assert_ne!(p1, p2, "projectile ids are shared across factions");
    }

    #[test]
    fn test_add_enemy_ignores_duplicate_id() {
        let mut state = test_state();
        assert!(state.add_enemy(test_enemy(1, 50.0)));
        assert!(!state.add_enemy(test_enemy(1, 20.0)));
        assert_eq!(state.enemies().len(), 1);
    }

    #[test]
    fn test_remove_dead_enemies_keeps_order() {
        let mut state = test_state();
        for id in 1..=3 {
            state.add_enemy(test_enemy(id, 50.0));
        }
        state.enemies_mut()[1].kill();
        assert_eq!(state.remove_dead_enemies(), 1);
        let ids: Vec<u32> = state.enemies().iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_collect_ready_drops() {
        let mut state = test_state();
        state.queue_resource_drop(ResourceDropType::Experience, Float2::ZERO, 10.0, 0.5);
        state.queue_resource_drop(ResourceDropType::Gold, Float2::ZERO, 5.0, 2.0);
        state.queue_resource_drop(ResourceDropType::Health, Float2::ZERO, 5.0, 0.0);
        let mut ready = Vec::new();
        assert_eq!(state.collect_ready_resource_drops(1.0, &mut ready), 2);
        let types: Vec<ResourceDropType> = ready.iter().map(|d| d.drop_type()).collect();
        assert_eq!(types, vec![ResourceDropType::Experience, ResourceDropType::Health]);
        assert_eq!(state.resource_drops().len(), 1);
    }

    #[test]
    fn test_target_locks_are_exclusive() {
        let mut state = test_state();
        state.set_target_cell(2, 3);
        assert_eq!(state.target_cell(), Some(GridCell::new(2, 3)));
        state.clear_fixed_bombardment();
        assert_eq!(state.target(), TargetLock::Cell { row: 2, column: 3 }, "point clear leaves cell lock");
        state.set_fixed_bombardment(Float2::new(1.0, 1.0));
        assert_eq!(state.target_cell(), None);
        assert_eq!(state.fixed_bombardment(), Some(Float2::new(1.0, 1.0)));
        state.clear_target_cell();
        assert!(state.fixed_bombardment().is_some());
        state.clear_target();
        assert_eq!(state.target(), TargetLock::None);
    }

    #[test]
    fn test_state_reset() {
        let mut state = test_state();
        let id = state.next_enemy_id();
        state.add_enemy(test_enemy(id, 50.0));
        state.add_player_projectile(Float2::ZERO, Float2::Y, 1.0, 0.0, Float2::Y);
        state.queue_resource_drop(ResourceDropType::Gold, Float2::ZERO, 1.0, 1.0);
        state.fortress_mut().apply_damage(100.0);
        state.player_mut().apply_damage(10.0);
        state.set_target_cell(0, 0);
        state.advance_time(0.5);

        state.reset();
        assert!(state.enemies().is_empty());
        assert!(state.player_projectiles().is_empty());
        assert!(state.enemy_projectiles().is_empty());
        assert!(state.resource_drops().is_empty());
        assert_eq!(state.id_counters(), (0, 0, 0));
        assert_eq!(state.fortress().current_health(), 500.0);
        assert_eq!(state.player().current_health(), state.player().max_health());
        assert_eq!(state.target(), TargetLock::None);
        assert_eq!(state.elapsed(), 0.0);
    }

    #[test]
    fn test_game_over_tracks_fortress() {
        let mut state = test_state();
        assert!(!state.is_game_over());
        state.fortress_mut().apply_damage(1_000.0);
        assert!(state.is_game_over());
    }

    // --- Settings ---

    #[test]
    fn test_settings_partial_json_uses_defaults() {
        let settings = GameSettings::from_json_str(r#"{ "grid_rows": 4, "enemy_projectile_speed": 3.0 }"#).unwrap();
        assert_eq!(settings.grid_rows, 4);
        assert_eq!(settings.enemy_projectile_speed, 3.0);
        assert_eq!(settings.grid_columns, 6);
        assert_eq!(settings.fortress_max_health, 500.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_rejects_missing_players() {
        let settings = GameSettings::from_json_str(r#"{ "player_definitions": [] }"#).unwrap();
        assert!(matches!(settings.validate(), Err(ConfigError::NoPlayerDefinitions)));
        assert!(settings.default_player_definition().is_err());
    }

    #[test]
    fn test_settings_rejects_small_ability_pool() {
        let settings = GameSettings {
            ability_pool: AbilityDefinition::stock_pool().into_iter().take(2).collect(),
            ability_choices_per_level: 3,
            ..GameSettings::default()
        };
        match settings.validate() {
            Err(ConfigError::AbilityPoolTooSmall { available, required }) => {
                assert_eq!((available, required), (2, 3));
            }
            other => panic!("expected AbilityPoolTooSmall, got {other:?}"),
        }

        let empty = GameSettings {
            ability_pool: Vec::new(),
            ..GameSettings::default()
        };
        assert!(matches!(empty.validate(), Err(ConfigError::AbilityPoolTooSmall { .. })));
    }

    #[test]
    fn test_settings_parse_and_io_errors() {
        assert!(matches!(GameSettings::from_json_str("not json"), Err(ConfigError::Parse(_))));
        assert!(matches!(
            GameSettings::from_json_file("/definitely/not/here.json"),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_player_index_is_clamped() {
        let settings = GameSettings {
            default_player_index: 9,
            ..GameSettings::default()
        };
        assert_eq!(settings.resolved_player_index(), Some(0));
        assert!(settings.default_player_definition().is_ok());
    }

    #[test]
    fn test_columns_per_row() {
        let mut settings = GameSettings::default();
        assert_eq!(settings.columns_per_row(), 2);
        settings.wave_column_fill_ratio = 0.0;
        assert_eq!(settings.columns_per_row(), 2, "unset ratio uses default");
        settings.wave_column_fill_ratio = 0.01;
        assert_eq!(settings.columns_per_row(), 1, "at least one column");
        settings.wave_column_fill_ratio = 5.0;
        assert_eq!(settings.columns_per_row(), 6, "capped at all columns");
        settings.grid_columns = 0;
        assert_eq!(settings.columns_per_row(), 0);
    }

    #[test]
    fn test_cell_world_position() {
        let settings = GameSettings::default();
        let p = settings.cell_world_position(2, 3);
        assert!(approx(p.x, 1.2) && approx(p.y, 6.7), "got {p:?}");
        let standby = settings.cell_world_position(-1, 0);
        assert!(approx(standby.y, 7.9));
        assert_eq!(settings.fortress_row(), 7);
    }

    // --- Serde ---

    #[test]
    fn test_session_command_serde() {
        let commands = vec![
            SessionCommand::StartGame,
            SessionCommand::SelectAbility { index: 2 },
            SessionCommand::ForceAbilitySelection,
            SessionCommand::SetTargetCell { row: 1, column: 4 },
            SessionCommand::ClearTarget,
            SessionCommand::SetInputBlocked { blocked: true },
        ];
        for command in commands {
            let json = serde_json::to_string(&command).unwrap();
            let back: SessionCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(command, back);
        }
        let parsed: SessionCommand = serde_json::from_str(r#"{"type":"SelectAbility","index":1}"#).unwrap();
        assert_eq!(parsed, SessionCommand::SelectAbility { index: 1 });
    }

    #[test]
    fn test_step_result_record_removed_dedups() {
        let mut result = SimulationStepResult::default();
        assert!(result.is_empty());
        assert!(result.record_removed(4));
        assert!(!result.record_removed(4));
        assert_eq!(result.removed_enemy_ids, vec![4]);
        result.clear();
        assert!(result.is_empty());
    }
}
