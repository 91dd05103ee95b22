use geolayers::prelude::*;
use geolayers::layer::{ to_dataset, RecordSchema };
use geolayers::Record;

#[derive(Debug, Clone, Record)]
struct City {
    name: String,
    #[record(name = "coordinates")]
    position: [f64; 2],
    population: Option<u32>,
    #[record(skip)]
    #[allow(dead_code)]
    rank: usize,
}

#[derive(Record)]
struct Leg {
    #[record(name = "line")]
    ends: Vec<[f64; 2]>,
}

#[test]
fn derived_record_uses_declared_names() {
    assert_eq!(City::field_names(), vec!["name", "coordinates", "population"]);

    let city = City { name: "Chengdu".to_string(), position: [104.07, 30.67], population: None, rank: 4 };
    let record = city.into_record();
    let keys: Vec<_> = record.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["name", "coordinates", "population"]);
    assert_eq!(record.get_text("name"), Some("Chengdu"));
    assert!(record.get_value("population").unwrap().is_null());
}

#[test]
fn derived_records_feed_layers() {
    let engine = RecordingEngine::new().shared();
    let map = bootstrap(&engine, MapConfig::default()).unwrap();

    let cities = vec![
        City { name: "Chongqing".to_string(), position: [106.55, 29.56], population: Some(32), rank: 1 },
        City { name: "Chengdu".to_string(), position: [104.07, 30.67], population: Some(21), rank: 2 },
    ];
    let legs = vec![Leg { ends: vec![cities[0].position, cities[1].position] }];

    let composition = compose(&map, vec![
        presets::cities(to_dataset(cities)),
        presets::tour(to_dataset(legs)),
    ]);
    assert!(composition.is_complete());
    assert_eq!(engine.borrow().feature_count(map.id()), 3);
    let tour = composition.layer("tour").unwrap();
    assert!(tour.features()[0].properties.is_empty());
}

#[test]
fn serde_structs_convert_too() {
    #[derive(serde::Serialize)]
    struct Shop {
        coordinates: [f64; 2],
        open: bool,
    }

    let ds = geolayers::to_dataset_serde(&[Shop { coordinates: [116.4, 39.9], open: true }]).unwrap();
    assert_eq!(ds[0].get_bool("open"), Some(true));
    assert_eq!(ds[0].get_list("coordinates").map(|c| c.len()), Some(2));
}
