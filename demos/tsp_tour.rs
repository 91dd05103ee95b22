use geolayers::prelude::*;
use geolayers::Record;
use geolayers::layer::to_dataset;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Record)]
struct City {
    name: &'static str,
    #[record(name = "coordinates")]
    position: [f64; 2],
}

#[derive(Record)]
struct Leg {
    #[record(name = "line")]
    ends: Vec<String>,
}

/// Draws a round trip through a handful of cities as points joined by links.
///
/// Legs are written as `"lng,lat"` text, the way the tour solver exports them.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cities = vec![
        City { name: "Chongqing", position: [106.551556, 29.563009] },
        City { name: "Chengdu", position: [104.065735, 30.659462] },
        City { name: "Xi'an", position: [108.948024, 34.263161] },
        City { name: "Wuhan", position: [114.305392, 30.593098] },
    ];

    let legs: Vec<Leg> = cities.iter()
        .zip(cities.iter().cycle().skip(1))
        .map(|(from, to)| Leg {
            ends: vec![
                format!("{},{}", from.position[0], from.position[1]),
                format!("{},{}", to.position[0], to.position[1]),
            ],
        })
        .collect();

    let engine = RecordingEngine::new().shared();
    let map = bootstrap(&engine, MapConfig::default()).unwrap();
    let mut composition = compose(&map, vec![
        presets::cities(to_dataset(cities.clone())),
        presets::tour(to_dataset(legs)),
    ]);
    if !composition.is_complete() {
        for failure in composition.failures() {
            eprintln!("{}: {}", failure.name, failure.error);
        }
        return;
    }

    for item in engine.borrow().draw_list(map.id()) {
        println!("{} layer with {} features", item.kind, item.features.len());
    }

    // The page toggles the tour with a checkbox.
    if let Some(tour) = composition.layer_mut("tour") {
        let mut on_toggle = toggle_hook(tour);
        on_toggle(false);
    }
    println!("tour hidden, {} features drawn", engine.borrow().feature_count(map.id()));
}
