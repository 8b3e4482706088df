use super::*;

#[test]
fn empty_object_yields_defaults() {
    let cfg = CelebrationConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, CelebrationConfig::default());
    assert_eq!(cfg.update_interval, 300);
    assert_eq!(cfg.celebration_hours, 1.0);
    assert_eq!(cfg.animation_fps, 12.0);
    assert_eq!(cfg.font_size, 6);
    assert!(cfg.show_score && cfg.show_text && !cfg.simulate_win);
    assert_eq!(cfg.team_abbr, "CHC");
}

#[test]
fn partial_config_overrides_only_given_keys() {
    let cfg =
        CelebrationConfig::from_json_str(r#"{"celebration_hours": 2.5, "show_text": false}"#)
            .unwrap();
    assert_eq!(cfg.celebration_hours, 2.5);
    assert!(!cfg.show_text);
    assert_eq!(cfg.animation_fps, 12.0);
}

#[test]
fn celebration_hours_range_is_enforced() {
    for bad in [0.0, -1.0, 24.5, f64::NAN] {
        let cfg = CelebrationConfig {
            celebration_hours: bad,
            ..Default::default()
        };
        assert!(
            matches!(cfg.validate(), Err(FlyError::Config(_))),
            "{bad} accepted"
        );
    }
    let edge = CelebrationConfig {
        celebration_hours: 24.0,
        ..Default::default()
    };
    edge.validate().unwrap();
}

#[test]
fn animation_fps_range_is_enforced() {
    for bad in [0.0, -3.0, 60.01, f64::INFINITY] {
        let cfg = CelebrationConfig {
            animation_fps: bad,
            ..Default::default()
        };
        assert!(cfg.validate().is_err(), "{bad} accepted");
    }
    let edge = CelebrationConfig {
        animation_fps: 60.0,
        ..Default::default()
    };
    edge.validate().unwrap();
}

#[test]
fn wrong_types_are_config_errors() {
    let err = CelebrationConfig::from_json_str(r#"{"celebration_hours": "lots"}"#).unwrap_err();
    assert!(matches!(err, FlyError::Config(_)));
    let err = CelebrationConfig::from_json_value(serde_json::json!({"animation_fps": 99.0}))
        .unwrap_err();
    assert!(err.to_string().contains("animation_fps"));
}

#[test]
fn window_and_frame_duration_derivations() {
    let cfg = CelebrationConfig {
        celebration_hours: 0.0001,
        animation_fps: 0.5,
        ..Default::default()
    };
    assert_eq!(cfg.celebration_window().num_milliseconds(), 360);
    // fps is floored at 1.0 for the synthesized loop
    assert_eq!(cfg.synth_frame_secs(), 1.0);

    let cfg = CelebrationConfig::default();
    assert_eq!(cfg.celebration_window().num_seconds(), 3600);
    assert!((cfg.synth_frame_secs() - 1.0 / 12.0).abs() < 1e-12);
    assert_eq!(cfg.poll_interval(), Duration::from_secs(300));
}
