use super::*;

#[test]
fn defaults_are_valid() {
    let cfg = RenderConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.circle_color, Rgb8::RED);
    assert_eq!(cfg.dot_spacing, 36);
    assert_eq!(cfg.trim_percent, 10);
}

#[test]
fn out_of_range_fields_are_rejected() {
    let cases = [
        RenderConfig {
            circle_size: 0,
            ..RenderConfig::default()
        },
        RenderConfig {
            dot_spacing: 0,
            ..RenderConfig::default()
        },
        RenderConfig {
            margin: 0.3,
            ..RenderConfig::default()
        },
        RenderConfig {
            margin: -0.01,
            ..RenderConfig::default()
        },
        RenderConfig {
            background_opacity: 1.5,
            ..RenderConfig::default()
        },
        RenderConfig {
            map_opacity: f64::NAN,
            ..RenderConfig::default()
        },
        RenderConfig {
            trim_percent: 51,
            ..RenderConfig::default()
        },
    ];
    for cfg in cases {
        let err = cfg.validate().unwrap_err();
        assert!(
            matches!(err, TrackArtError::InvalidConfig(_)),
            "{cfg:?} -> {err}"
        );
    }
}

#[test]
fn boundary_values_are_accepted() {
    RenderConfig {
        margin: 0.25,
        background_opacity: 1.0,
        map_opacity: 0.0,
        trim_percent: 50,
        ..RenderConfig::default()
    }
    .validate()
    .unwrap();
}

#[test]
fn partial_json_uses_defaults() {
    let cfg = RenderConfig::from_json_str(r##"{ "circle_color": "#00ff00", "margin": 0.1 }"##)
        .unwrap();
    assert_eq!(cfg.circle_color, Rgb8::new(0, 255, 0));
    assert_eq!(cfg.margin, 0.1);
    assert_eq!(cfg.circle_size, RenderConfig::default().circle_size);
}

#[test]
fn json_is_validated_and_strict() {
    assert!(matches!(
        RenderConfig::from_json_str(r#"{ "trim_percent": 80 }"#).unwrap_err(),
        TrackArtError::InvalidConfig(_)
    ));
    assert!(RenderConfig::from_json_str(r#"{ "dot_size": 3 }"#).is_err());
}

#[test]
fn dot_style_mirrors_fields() {
    let cfg = RenderConfig::default();
    let style = cfg.dot_style();
    assert_eq!(style.color, cfg.circle_color);
    assert_eq!(style.radius, cfg.circle_size);
    assert_eq!(style.spacing, cfg.dot_spacing);
    assert_eq!(style.margin, cfg.margin);
}
