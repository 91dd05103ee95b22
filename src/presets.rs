//! Stock layers of the segmentation and tour pages.
//!
//! Each function wraps a dataset into a ready [`LayerSpec`] with the fixed style the
//! pages were published with. All of them read geometry from `coordinates`, except
//! [`tour`], whose legs live under `line`.

use crate::compose::LayerSpec;
use crate::layer::{ Dataset, FieldMapping, LayerKind, LayerOptions };

/// Stacking priority of region boundaries, above every unprioritized layer.
pub const BOUNDARIES_Z_INDEX: i32 = 400;

/// Region boundaries: thin translucent red lines.
pub fn boundaries(dataset: Dataset) -> LayerSpec {
    LayerSpec::new("boundaries", LayerKind::Line)
        .with_options(LayerOptions::with_z_index(BOUNDARIES_Z_INDEX))
        .with_style(crate::style! {
            "color" => "#ff0000",
            "borderWidth" => 3,
            "opacity" => 0.3,
        })
        .with_dataset(dataset)
}

/// Map bricks: filled polygons, highlighted yellow when selected.
pub fn bricks(dataset: Dataset) -> LayerSpec {
    LayerSpec::new("bricks", LayerKind::Polygon)
        .with_options(LayerOptions::fit_view())
        .with_style(crate::style! {
            "opacity" => 0.3,
            "color" => "#a1dab4",
            "borderWidth" => 2,
            "borderColor" => "#ff5123",
        })
        .with_select_style(crate::style! { "color" => "#FFF684" })
        .with_dataset(dataset)
}

/// Cities or leads: round orange points.
pub fn cities(dataset: Dataset) -> LayerSpec {
    LayerSpec::new("cities", LayerKind::Point)
        .with_options(LayerOptions::fit_view())
        .with_style(crate::style! {
            "radius" => 6,
            "color" => "#E8641C",
            "borderColor" => "#E8641C",
            "opacity" => 0.75,
        })
        .with_dataset(dataset)
}

/// Tour legs: one link per consecutive pair of cities.
pub fn tour(dataset: Dataset) -> LayerSpec {
    LayerSpec::new("tour", LayerKind::Link)
        .with_options(LayerOptions::fit_view())
        .with_style(crate::style! {
            "color" => "#ff910f",
            "borderWidth" => 2,
            "opacity" => 0.8,
        })
        .with_dataset(dataset)
        .with_mapping(FieldMapping::geometry("line"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::Style;

    #[test]
    fn preset_styles_are_valid() {
        for spec in [boundaries(vec![]), bricks(vec![]), cities(vec![]), tour(vec![])] {
            assert!(Style::validate(spec.kind, &spec.style).is_ok(), "{}", spec.name);
            if let Some(ref select) = spec.select_style {
                assert!(Style::validate(spec.kind, select).is_ok(), "{}", spec.name);
            }
        }
    }

    #[test]
    fn tour_reads_line_field() {
        assert_eq!(tour(vec![]).mapping.geometry_field().unwrap(), "line");
        assert_eq!(bricks(vec![]).mapping.geometry_field().unwrap(), "coordinates");
    }
}
