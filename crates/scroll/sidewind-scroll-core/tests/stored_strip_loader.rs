//! StoredStrip JSON loading, from fixture files through layer creation.

use sidewind_scroll_core::{
    config::{CameraConfig, Config, LayerCfg},
    engine::Engine,
    error::{ConfigError, CoreError},
    parse_stored_strip_json,
};

fn approx(a: f64, b: f64, eps: f64) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn engine() -> Engine {
    Engine::new(Config {
        camera: CameraConfig {
            orthographic_size: 4.0,
            aspect: 2.0,
            position_x: 0.0,
        },
    })
    .unwrap()
}

/// it should parse the seafloor fixture with margin defaults applied
#[test]
fn parse_seafloor_fixture() {
    let json = sidewind_test_fixtures::strip_json("seafloor").unwrap();
    let strip = parse_stored_strip_json(&json).unwrap();
    assert_eq!(strip.name, "seafloor");
    assert_eq!(strip.prototypes.len(), 2);
    assert_eq!(strip.ingredients.len(), 2);

    let rock = &strip.prototypes[0];
    assert_eq!(rock.name, "flat-rock");
    assert_eq!(rock.margins.left_inner, 0.0);
    assert_eq!(rock.margins.right_outer, 0.0);

    let kelp = &strip.prototypes[1];
    assert_eq!(kelp.margins.left_inner, 1.0);
    assert_eq!(kelp.margins.right_inner, 1.0);
    assert_eq!(kelp.margins.left_outer, 0.0);
}

/// it should build the documented slot layout when loading the fixture
#[test]
fn load_seafloor_layout() {
    let json = sidewind_test_fixtures::strip_json("seafloor").unwrap();
    let strip = parse_stored_strip_json(&json).unwrap();
    let mut eng = engine();
    let layer = eng.load_strip(&strip, LayerCfg::default()).unwrap();

    let slots = eng.slots(layer).unwrap();
    assert_eq!(slots.len(), 3);
    approx(slots[2].start, 19.0, 1e-6);
    approx(slots[2].end, 23.0, 1e-6);
    approx(slots[2].anchor, 19.0, 1e-6);
    approx(eng.layer_period(layer).unwrap(), 22.0, 1e-6);
}

/// it should parse outer margins and origins from the caverns fixture
#[test]
fn load_caverns_fixture() {
    let json = sidewind_test_fixtures::strip_json("caverns").unwrap();
    let strip = parse_stored_strip_json(&json).unwrap();
    let run = &strip.prototypes[0];
    assert_eq!(run.local_origin_x, 0.5);
    assert_eq!(run.margins.left_outer, 2.0);

    let mut eng = engine();
    let layer = eng
        .load_strip(
            &strip,
            LayerCfg {
                looping: true,
                ..Default::default()
            },
        )
        .unwrap();
    let slots = eng.slots(layer).unwrap();
    assert_eq!(slots.len(), 5);
    // First slot: start = 0 - 0.5 - 2, anchor = 0 - 0.5 - (-3) + 0.5.
    approx(slots[0].start, -2.5, 1e-6);
    approx(slots[0].end, 9.5, 1e-6);
    approx(slots[0].anchor, 3.0, 1e-6);
    // Second repetition strides by the net extent (8 - 1 = 7).
    approx(slots[1].start, 4.5, 1e-6);
}

/// it should reject malformed JSON
#[test]
fn reject_malformed_json() {
    assert!(parse_stored_strip_json("{ not json").is_err());
}

/// it should reject an ingredient referencing an undeclared prototype
#[test]
fn reject_undeclared_prototype() {
    let json = r#"{
        "name": "broken",
        "prototypes": [
            { "name": "a", "extent": { "min": 0.0, "max": 5.0 } }
        ],
        "ingredients": [
            { "prototype": "missing", "repeat": 2 }
        ]
    }"#;
    let err = parse_stored_strip_json(json).unwrap_err();
    assert!(err.contains("missing"), "unexpected error: {err}");
}

/// it should reject negative margins at validation time
#[test]
fn reject_negative_margin() {
    let json = r#"{
        "name": "broken",
        "prototypes": [
            { "name": "a", "extent": { "min": 0.0, "max": 5.0 },
              "margins": { "leftInner": -1.0 } }
        ],
        "ingredients": [
            { "prototype": "a", "repeat": 1 }
        ]
    }"#;
    assert!(parse_stored_strip_json(json).is_err());
}

/// it should surface an empty-extent prototype as a configuration error
#[test]
fn reject_empty_extent_via_engine() {
    let json = r#"{
        "name": "broken",
        "prototypes": [
            { "name": "a", "extent": { "min": 5.0, "max": 5.0 } }
        ],
        "ingredients": [
            { "prototype": "a", "repeat": 1 }
        ]
    }"#;
    // The loader already refuses this; feed the engine directly to check the
    // engine-side guard too.
    assert!(parse_stored_strip_json(json).is_err());

    let mut eng = engine();
    let strip = sidewind_scroll_core::StripData {
        name: "broken".into(),
        prototypes: vec![sidewind_scroll_core::PrototypeDesc {
            name: "a".into(),
            min_x: 5.0,
            max_x: 5.0,
            local_origin_x: 0.0,
            margins: Default::default(),
        }],
        ingredients: vec![sidewind_scroll_core::StripIngredient {
            prototype: "a".into(),
            repeat: 1,
        }],
    };
    let err = eng.load_strip(&strip, LayerCfg::default()).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Config(ConfigError::InvalidStrip { .. })
    ));
}

/// it should expose every manifest fixture as loadable
#[test]
fn all_fixtures_load() {
    for name in sidewind_test_fixtures::strip_names() {
        let json = sidewind_test_fixtures::strip_json(&name).unwrap();
        let strip = parse_stored_strip_json(&json)
            .unwrap_or_else(|e| panic!("fixture '{name}' should parse: {e}"));
        let mut eng = engine();
        eng.load_strip(&strip, LayerCfg::default())
            .unwrap_or_else(|e| panic!("fixture '{name}' should load: {e}"));
    }
}
