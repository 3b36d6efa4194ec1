#[cfg(test)]
mod tests {
    use glam::Vec2;

    use crate::commands::PlayerCommand;
    use crate::config::{GameConfig, SimConfig};
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::{GameEvent, SoundCue};
    use crate::services::*;
    use crate::state::GameStateSnapshot;
    use crate::types::*;

    #[test]
    fn test_boss_phase_is_ordered_by_severity() {
        assert!(BossPhase::Normal < BossPhase::PhaseTwo);
        assert!(BossPhase::PhaseTwo < BossPhase::PhaseThree);
    }

    #[test]
    fn test_player_command_serde() {
        let cmds = vec![
            PlayerCommand::Move {
                direction: Vec2::new(1.0, 0.0),
            },
            PlayerCommand::Interact {
                at: Vec2::new(0.5, -1.0),
            },
            PlayerCommand::Shoot {
                toward: Vec2::new(0.0, 4.0),
            },
            PlayerCommand::RotatePart {
                at: Vec2::ZERO,
                degrees: -30.0,
            },
            PlayerCommand::Pause,
            PlayerCommand::Resume,
        ];
        for cmd in cmds {
            let json = serde_json::to_string(&cmd).unwrap();
            let back: PlayerCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(cmd, back);
        }
    }

    #[test]
    fn test_command_tag_format() {
        let json = r#"{"type":"Interact","at":[1.0,2.0]}"#;
        let cmd: PlayerCommand = serde_json::from_str(json).unwrap();
        assert_eq!(
            cmd,
            PlayerCommand::Interact {
                at: Vec2::new(1.0, 2.0)
            }
        );
    }

    #[test]
    fn test_empty_snapshot_serializes() {
        let snap = GameStateSnapshot::default();
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"phase\":\"Intro\""));
    }

    #[test]
    fn test_sound_names_match_variants() {
        assert_eq!(SoundCue::TurretShoot.name(), "TurretShoot");
        assert_eq!(SoundCue::BossNameLetter.name(), "BossNameLetter");
        assert_eq!(
            format!("{:?}", SoundCue::FinalBossLaser),
            SoundCue::FinalBossLaser.name()
        );
    }

    #[test]
    fn test_boss_titles() {
        assert_eq!(BossKind::Eye.title(), "THE SPY");
        assert_eq!(BossKind::Drone.title(), "THE SWARM");
        assert_eq!(BossKind::Goat.title(), "THE DEMON");
        assert_eq!(BossKind::Final.title(), "THE DIRECTOR");
    }

    #[test]
    fn test_sim_time_advance() {
        let mut t = SimTime::default();
        for _ in 0..60 {
            t.advance();
        }
        assert_eq!(t.tick, 60);
        assert!((t.elapsed_secs - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_angle_helpers() {
        assert!((heading(90.0) - Vec2::Y).length() < 1e-6);
        assert!((angle_of(Vec2::new(-1.0, 0.0)).abs() - 180.0).abs() < 1e-4);
        assert!((delta_angle(350.0, 10.0) - 20.0).abs() < 1e-4);
        assert!((delta_angle(10.0, 350.0) + 20.0).abs() < 1e-4);
        assert!((rotate(Vec2::X, 90.0) - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn test_bounds_clamp() {
        let b = Bounds::centered(10.0, 7.0);
        let p = b.clamp(Vec2::new(50.0, -50.0), 0.5);
        assert_eq!(p, Vec2::new(9.5, -6.5));
        assert!(b.contains(Vec2::ZERO));
        assert!(!b.contains(Vec2::new(10.5, 0.0)));
    }

    #[test]
    fn test_config_defaults_validate() {
        GameConfig::default().validate().unwrap();
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let cfg = GameConfig::from_json_str(r#"{"drone":{"phase_two_threshold":80.0}}"#).unwrap();
        assert_eq!(cfg.drone.phase_two_threshold, 80.0);
        assert_eq!(cfg.drone.phase_three_threshold, 33.0);
        assert_eq!(cfg.board.rows, 5);
    }

    #[test]
    fn test_config_rejects_empty_bag() {
        let err = GameConfig::from_json_str(r#"{"conveyor":{"bag":[]}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "conveyor.bag", .. }));
    }

    #[test]
    fn test_config_rejects_empty_eye_range() {
        let err = GameConfig::from_json_str(r#"{"eye":{"left_bound":2.0,"right_bound":2.0}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "eye.left_bound", .. }));
    }

    #[test]
    fn test_config_rejects_bad_json() {
        let err = GameConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_sim_config_roundtrip() {
        let cfg = SimConfig {
            seed: 7,
            boss: BossKind::Final,
            ..Default::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: SimConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, 7);
        assert_eq!(back.boss, BossKind::Final);
    }

    #[derive(Default)]
    struct Recorder {
        sounds: Vec<SoundCue>,
        music: Vec<bool>,
        menus: Vec<String>,
        main_menu: u32,
        scale: Option<f32>,
    }

    impl AudioSink for Recorder {
        fn play_sound(&mut self, cue: SoundCue) {
            self.sounds.push(cue);
        }
        fn set_music(&mut self, playing: bool) {
            self.music.push(playing);
        }
    }

    impl MenuHost for Recorder {
        fn open_menu(&mut self, name: &str) {
            self.menus.push(name.to_string());
        }
        fn main_menu(&mut self) {
            self.main_menu += 1;
        }
        fn set_time_scale(&mut self, scale: f32) {
            self.scale = Some(scale);
        }
    }

    #[test]
    fn test_dispatch_routes_events() {
        let mut audio = Recorder::default();
        let mut menus = Recorder::default();
        let mut progress = InMemoryProgress::default();
        let events = vec![
            GameEvent::sound(SoundCue::BossDefeat),
            GameEvent::Music { playing: false },
            GameEvent::animation("Close"),
            GameEvent::OpenMenu {
                name: "YouWinMenuCanvas".into(),
            },
            GameEvent::TimeScale { scale: 0.0 },
            GameEvent::BossDefeated { index: 2 },
            GameEvent::EasterEggFound {
                scene: "BossFourScene".into(),
            },
            GameEvent::MainMenu,
        ];
        let mut services = Services {
            audio: &mut audio,
            menus: &mut menus,
            progress: &mut progress,
        };
        dispatch(&events, &mut services);

        assert_eq!(audio.sounds, vec![SoundCue::BossDefeat]);
        assert_eq!(audio.music, vec![false]);
        assert_eq!(menus.menus, vec!["YouWinMenuCanvas".to_string()]);
        assert_eq!(menus.main_menu, 1);
        assert_eq!(menus.scale, Some(0.0));
        assert!(progress.is_boss_defeated(2));
        assert!(!progress.is_boss_defeated(1));
        assert!(progress.has_easter_egg("BossFourScene"));
    }
}
