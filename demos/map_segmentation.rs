use geolayers::prelude::*;
use geolayers::parser::parse_dataset;
use tracing_subscriber::EnvFilter;

/// Composes the map segmentation view: region boundaries, the bricks the region
/// was cut into and the leads inside them.
///
/// Run with `RUST_LOG=geolayers=debug` to follow every layer through its lifecycle.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let engine = RecordingEngine::new().shared();
    let map = bootstrap(&engine, MapConfig::default()).unwrap();

    let boundaries = parse_dataset(
        "MS.data.boundaries = [{\"coordinates\": [[121.40, 31.15], [121.55, 31.15], [121.55, 31.30], [121.40, 31.30], [121.40, 31.15]]}];"
    ).unwrap();
    let bricks = parse_dataset(
        "MS.data.bricks  = [\
            {\"coordinates\": [[121.40, 31.15], [121.47, 31.15], [121.47, 31.22], [121.40, 31.22]]},\
            {\"coordinates\": [[121.47, 31.15], [121.55, 31.15], [121.55, 31.22], [121.47, 31.22]]},\
            {\"coordinates\": [[121.40, 31.22], [121.55, 31.22], [121.55, 31.30], [121.40, 31.30]]}\
        ];"
    ).unwrap();
    let leads = parse_dataset(
        r#"[{"name": "north", "coordinates": [121.45, 31.26]}, {"name": "east", "coordinates": [121.51, 31.18]}]"#
    ).unwrap();

    let mut composition = compose(&map, vec![
        presets::boundaries(boundaries.records),
        presets::bricks(bricks.records),
        presets::cities(leads.records),
    ]);

    print_draw_list(&engine.borrow(), &map);

    println!("\nHiding bricks");
    composition.set_visibility("bricks", false);
    print_draw_list(&engine.borrow(), &map);
}

fn print_draw_list(engine: &RecordingEngine, map: &MapHandle<RecordingEngine>) {
    for item in engine.draw_list(map.id()) {
        println!(
            "{:>8} z={:<4} features={} color={}",
            item.kind,
            item.z_index,
            item.features.len(),
            item.style.color.map(|c| c.to_string()).unwrap_or_default(),
        );
    }
    if let Some(view) = engine.view_bounds(map.id()) {
        println!("view: {:?} .. {:?}", view.min, view.max);
    }
}
