#[cfg(test)]
mod tests {
    use crate::commands::PlayerCommand;
    use crate::config::SimConfig;
    use crate::enums::*;
    use crate::error::{CommandError, ConfigError};
    use crate::events::GameEvent;
    use crate::state::GameStateSnapshot;
    use crate::types::{BoundingBox, Position, SimTime};

    #[test]
    fn test_entity_kind_serde() {
        let variants = vec![
            EntityKind::Player,
            EntityKind::EnemyLight,
            EntityKind::EnemyHeavy,
            EntityKind::PlayerBullet,
            EntityKind::EnemyBullet,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: EntityKind = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_entity_kind_predicates() {
        assert!(EntityKind::EnemyLight.is_enemy());
        assert!(EntityKind::EnemyHeavy.is_enemy());
        assert!(!EntityKind::Player.is_enemy());
        assert!(EntityKind::PlayerBullet.is_bullet());
        assert!(EntityKind::EnemyBullet.is_bullet());
        assert!(!EntityKind::EnemyHeavy.is_bullet());
    }

    #[test]
    fn test_game_phase_predicates() {
        assert!(GamePhase::Idle.awaiting_wave());
        assert!(GamePhase::Cleared.awaiting_wave());
        assert!(!GamePhase::GameOver.awaiting_wave());
        assert!(GamePhase::Spawning.in_wave());
        assert!(GamePhase::Active.in_wave());
        assert!(!GamePhase::Cleared.in_wave());
        assert_eq!(GamePhase::default(), GamePhase::Idle);
    }

    /// Commands are a tagged union on the wire.
    #[test]
    fn test_player_command_serde() {
        let commands = vec![
            PlayerCommand::MoveUp { held: true },
            PlayerCommand::MoveDown { held: false },
            PlayerCommand::Fire,
            PlayerCommand::StartNextWave,
            PlayerCommand::PurchaseUpgrade {
                kind: UpgradeKind::MultiShot,
            },
            PlayerCommand::Restart,
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: PlayerCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(*cmd, back);
        }

        let json = serde_json::to_string(&PlayerCommand::Fire).unwrap();
        assert_eq!(json, r#"{"type":"Fire"}"#);
    }

    #[test]
    fn test_command_parse_from_frontend_json() {
        let cmd: PlayerCommand =
            serde_json::from_str(r#"{"type":"PurchaseUpgrade","kind":"Health"}"#).unwrap();
        assert_eq!(
            cmd,
            PlayerCommand::PurchaseUpgrade {
                kind: UpgradeKind::Health
            }
        );
        assert_eq!(cmd.name(), "purchase_upgrade");
    }

    #[test]
    fn test_game_event_serde() {
        let events = vec![
            GameEvent::WaveStarted { wave: 3 },
            GameEvent::PlayerHit {
                cause: DamageCause::EnemyEscaped,
                remaining_health: 4,
            },
            GameEvent::GameOver {
                final_score: 17,
                wave: 2,
            },
            GameEvent::CommandRejected {
                command: "restart".to_string(),
                reason: "restart is not valid during Active".to_string(),
            },
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let back: GameEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(*event, back);
        }
    }

    #[test]
    fn test_snapshot_serde() {
        let snapshot = GameStateSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.time.tick, back.time.tick);
        assert_eq!(snapshot.phase, back.phase);
        assert!(
            json.len() < 1024,
            "Empty snapshot should be <1KB, was {} bytes",
            json.len()
        );
    }

    #[test]
    fn test_bounding_box_overlap() {
        let a = BoundingBox::new(10.0, 10.0);
        let b = BoundingBox::new(4.0, 4.0);
        let origin = Position::new(0.0, 0.0);

        assert!(a.overlaps(&origin, &b, &Position::new(6.0, 0.0)));
        assert!(a.overlaps(&origin, &b, &Position::new(-6.0, 6.0)));
        // Edges exactly touching: 5 + 2 = 7.
        assert!(!a.overlaps(&origin, &b, &Position::new(7.0, 0.0)));
        assert!(!a.overlaps(&origin, &b, &Position::new(0.0, 7.5)));
        // Symmetric.
        assert_eq!(
            a.overlaps(&origin, &b, &Position::new(3.0, 6.9)),
            b.overlaps(&Position::new(3.0, 6.9), &a, &origin)
        );
    }

    #[test]
    fn test_bounding_box_from_frame() {
        let player = BoundingBox::from_frame(32.0, 2.0, 0.6, 0.6);
        assert!((player.width - 38.4).abs() < 1e-9);
        assert!((player.height - 38.4).abs() < 1e-9);

        let bullet = BoundingBox::from_frame(16.0, 1.0, 0.5, 0.3);
        assert!((bullet.width - 8.0).abs() < 1e-9);
        assert!((bullet.height - 4.8).abs() < 1e-9);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        assert_eq!(time.tick, 0);
        assert_eq!(time.elapsed_ms, 0.0);

        for _ in 0..60 {
            time.advance();
        }
        assert_eq!(time.tick, 60);
        // 60 ticks at 16ms = 960ms of simulated time.
        assert!((time.elapsed_ms - 960.0).abs() < 1e-9);
    }

    #[test]
    fn test_config_defaults_and_validation() {
        let config = SimConfig::default();
        assert_eq!(config.world_width, 800.0);
        assert_eq!(config.world_height, 600.0);
        assert!(config.validate().is_ok());

        let bad = SimConfig {
            world_width: 0.0,
            ..Default::default()
        };
        assert_eq!(
            bad.validate(),
            Err(ConfigError::InvalidDimension {
                field: "world_width",
                value: 0.0
            })
        );
        let nan = SimConfig {
            world_height: f64::NAN,
            ..Default::default()
        };
        let err = nan.validate().unwrap_err();
        assert!(err.to_string().starts_with("world_height must be positive"));

        // Missing fields fall back to defaults.
        let partial: SimConfig = serde_json::from_str(r#"{"seed": 7}"#).unwrap();
        assert_eq!(partial.seed, 7);
        assert_eq!(partial.world_height, 600.0);
    }

    #[test]
    fn test_command_error_display() {
        let err = CommandError::InsufficientFunds { cost: 100, score: 12 };
        assert_eq!(err.to_string(), "insufficient funds: cost 100, score 12");

        let err = CommandError::InvalidPhase {
            command: "restart",
            phase: GamePhase::Active,
        };
        assert_eq!(err.to_string(), "restart is not valid during Active");

        assert_eq!(
            CommandError::FireAlreadyPending.to_string(),
            "a shot is already pending this tick"
        );
    }
}
