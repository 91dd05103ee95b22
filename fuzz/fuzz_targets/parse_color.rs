#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(color) = geolayers::parser::parse_color(text) {
            assert!((0.0..=1.0).contains(&color.alpha));
            let _ = geolayers::parser::parse_color(&color.to_string());
        }
        let _ = geolayers::parser::parse_style_id(text);
        let _ = geolayers::parser::parse_coordinate_text(text);
    }
});
