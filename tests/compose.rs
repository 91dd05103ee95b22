use geolayers::prelude::*;
use geolayers::style;

fn point(lng: f64, lat: f64) -> DefaultRecord {
    let mut r = DefaultRecord::new();
    r.insert("coordinates".to_string(), Value::from([lng, lat]));
    r
}

#[test]
fn one_invalid_style_out_of_n() {
    let engine = RecordingEngine::new().shared();
    let map = bootstrap(&engine, MapConfig::default()).unwrap();

    let specs: Vec<LayerSpec> = (0..5)
        .map(|i| {
            let spec = LayerSpec::new(format!("layer-{}", i), LayerKind::Point)
                .with_dataset(vec![point(i as f64, 0.0)]);
            if i == 2 {
                spec.with_style(style! { "opacity" => 0.5, "strokeDash" => 3 })
            } else {
                spec.with_style(style! { "opacity" => 0.5 })
            }
        })
        .collect();

    let composition = compose(&map, specs);
    assert_eq!(composition.len(), 4);
    assert_eq!(composition.failures().len(), 1);
    assert_eq!(composition.failures()[0].name, "layer-2");
    assert!(matches!(composition.failures()[0].error, LayerError::StyleValidation(_)));
    assert!(composition.layer("layer-2").is_none());
    assert_eq!(engine.borrow().layer_count(map.id()), 4);
    assert_eq!(engine.borrow().feature_count(map.id()), 4);
}

#[test]
fn every_failure_is_reported() {
    let engine = RecordingEngine::new().without_kind(LayerKind::Link).shared();
    let map = bootstrap(&engine, MapConfig::default()).unwrap();

    let mut missing = DefaultRecord::new();
    missing.insert("name".to_string(), Value::from("no geometry"));

    let composition = compose(&map, vec![
        LayerSpec::new("bad-style", LayerKind::Line).with_style(style! { "radius" => 2 }),
        LayerSpec::new("bad-data", LayerKind::Point).with_dataset(vec![missing]),
        LayerSpec::new("bad-engine", LayerKind::Link),
        LayerSpec::new("good", LayerKind::Polygon),
        LayerSpec::new("good", LayerKind::Point),
    ]);

    let errors: Vec<(&str, &LayerError)> = composition.failures().iter()
        .map(|f| (f.name.as_str(), &f.error))
        .collect();
    assert_eq!(errors.len(), 4);
    assert!(matches!(errors[0], ("bad-style", LayerError::StyleValidation(_))));
    assert!(matches!(errors[1], ("bad-data", LayerError::FieldMapping(_))));
    assert!(matches!(errors[2], ("bad-engine", LayerError::EngineInit(_))));
    assert!(matches!(errors[3], ("good", LayerError::Duplicate(_))));
    assert_eq!(composition.len(), 1);
}

#[test]
fn z_index_orders_draw_list() {
    let engine = RecordingEngine::new().shared();
    let map = bootstrap(&engine, MapConfig::default()).unwrap();

    let composition = compose(&map, vec![
        LayerSpec::new("top", LayerKind::Line).with_options(LayerOptions::with_z_index(400)),
        LayerSpec::new("first", LayerKind::Polygon),
        LayerSpec::new("below", LayerKind::Point).with_options(LayerOptions::with_z_index(-1)),
        LayerSpec::new("second", LayerKind::Point),
    ]);
    assert!(composition.is_complete());

    let order: Vec<_> = engine.borrow().draw_list(map.id()).iter().map(|item| item.layer).collect();
    let expected: Vec<_> = ["below", "first", "second", "top"].iter()
        .map(|name| composition.layer(name).map(|l| l.id()).unwrap())
        .collect();
    assert_eq!(order, expected);
}

#[test]
fn composed_layers_keep_construction_order() {
    let engine = RecordingEngine::new().shared();
    let map = bootstrap(&engine, MapConfig::default()).unwrap();
    let composition = compose(&map, ["c", "a", "b"].map(|n| LayerSpec::new(n, LayerKind::Point)));
    let names: Vec<_> = composition.layers().map(|l| l.name()).collect();
    assert_eq!(names, vec!["c", "a", "b"]);
}

#[test]
fn composed_layer_can_be_reloaded_and_toggled() {
    let engine = RecordingEngine::new().shared();
    let map = bootstrap(&engine, MapConfig::default()).unwrap();
    let mut composition = compose(&map, vec![presets::cities(vec![point(1.0, 1.0)])]);

    let cities = composition.layer_mut("cities").unwrap();
    cities.load_data(&[point(1.0, 1.0), point(2.0, 2.0)], &FieldMapping::default()).unwrap();
    cities.render();
    assert_eq!(engine.borrow().feature_count(map.id()), 2);

    composition.set_visibility("cities", false);
    assert_eq!(engine.borrow().feature_count(map.id()), 0);
    composition.set_visibility("cities", true);
    assert_eq!(engine.borrow().feature_count(map.id()), 2);
}

#[test]
fn segmentation_page_presets() {
    let engine = RecordingEngine::new().shared();
    let map = bootstrap(&engine, MapConfig::default()).unwrap();

    let mut boundary = DefaultRecord::new();
    boundary.insert("coordinates".to_string(), Value::from(vec![[120.0, 30.0], [120.5, 30.0], [120.5, 30.5]]));
    let mut brick = DefaultRecord::new();
    brick.insert("coordinates".to_string(), Value::from(vec![[120.1, 30.1], [120.2, 30.1], [120.2, 30.2]]));

    let composition = compose(&map, vec![
        presets::boundaries(vec![boundary]),
        presets::bricks(vec![brick]),
        presets::cities(vec![point(120.15, 30.15)]),
    ]);
    assert!(composition.is_complete());

    let drawn = engine.borrow().draw_list(map.id());
    let kinds: Vec<_> = drawn.iter().map(|item| item.kind).collect();
    assert_eq!(kinds, vec![LayerKind::Polygon, LayerKind::Point, LayerKind::Line]);

    let view = engine.borrow().view_bounds(map.id()).unwrap();
    assert_eq!(view.min.lng, 120.15);
}
