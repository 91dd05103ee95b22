//! Geometry extraction from dataset records.
//!
//! A [`FieldMapping`] names the record field that holds the geometry. What that
//! field must look like depends on the [`LayerKind`]:
//!
//! - point: one coordinate,
//! - line: a path of at least two coordinates,
//! - polygon: one ring, or a list of rings, of at least three coordinates each,
//! - link: exactly two coordinates.
//!
//! A coordinate is either a `[lng, lat]` pair or a `"lng,lat"` text.

use serde::{ Deserialize, Serialize };

use crate::errors::{ LayerError, LayerResult };
use crate::parser;
use crate::util::RecordTracker;
use super::{ DefaultRecord, KeyMap, LayerKind, RecordAccess, Value };

/// A longitude/latitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    /// Longitude in `[-180, 180]`.
    pub lng: f64,
    /// Latitude in `[-90, 90]`.
    pub lat: f64,
}

impl Coord {
    /// Creates a coordinate without range checks.
    pub const fn new(lng: f64, lat: f64) -> Self {
        Coord { lng, lat }
    }
}

/// Closed or open sequence of coordinates bounding a polygon.
pub type Ring = Vec<Coord>;

/// Validated geometry of one feature.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// A single location.
    Point(Coord),
    /// An open polyline.
    Path(Vec<Coord>),
    /// One or more rings.
    Polygon(Vec<Ring>),
    /// A straight connection between two locations.
    Link(Coord, Coord),
}

impl Geometry {
    /// Interprets `value` as the geometry expected by `kind`.
    ///
    /// The error message describes the mismatch; callers add record context.
    pub fn from_value(kind: LayerKind, value: &Value) -> Result<Geometry, String> {
        match kind {
            LayerKind::Point => Ok(Geometry::Point(coord(value)?)),
            LayerKind::Line => {
                let path = coord_list(value)?;
                if path.len() < 2 {
                    return Err(format!("a path needs at least 2 coordinates, found {}", path.len()));
                }
                Ok(Geometry::Path(path))
            }
            LayerKind::Link => {
                let ends = coord_list(value)?;
                match ends[..] {
                    [from, to] => Ok(Geometry::Link(from, to)),
                    _ => Err(format!("a link needs exactly 2 coordinates, found {}", ends.len())),
                }
            }
            LayerKind::Polygon => {
                let items = value.as_list()
                    .ok_or_else(|| format!("expected a ring, found {}", value.type_name()))?;
                let first = items.first().ok_or_else(|| "a polygon needs at least one ring".to_string())?;
                let rings = if coord(first).is_ok() {
                    vec![coord_list(value)?]
                } else {
                    items.iter().map(coord_list).collect::<Result<Vec<_>, _>>()?
                };
                if let Some(short) = rings.iter().find(|r| r.len() < 3) {
                    return Err(format!("a ring needs at least 3 coordinates, found {}", short.len()));
                }
                Ok(Geometry::Polygon(rings))
            }
        }
    }

    /// Iterates every coordinate of the geometry.
    pub fn coords(&self) -> Box<dyn Iterator<Item = &Coord> + '_> {
        match *self {
            Geometry::Point(ref c) => Box::new(std::iter::once(c)),
            Geometry::Path(ref path) => Box::new(path.iter()),
            Geometry::Polygon(ref rings) => Box::new(rings.iter().flatten()),
            Geometry::Link(ref a, ref b) => Box::new([a, b].into_iter()),
        }
    }

    /// Bounding box of the geometry.
    pub fn bounds(&self) -> Option<Bounds> {
        self.coords().fold(None, |acc: Option<Bounds>, c| {
            Some(match acc {
                Some(b) => b.extend(*c),
                None => Bounds::from_coord(*c),
            })
        })
    }
}

/// Axis-aligned bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// South-west corner.
    pub min: Coord,
    /// North-east corner.
    pub max: Coord,
}

impl Bounds {
    /// Degenerate box around one coordinate.
    pub fn from_coord(c: Coord) -> Self {
        Bounds { min: c, max: c }
    }

    /// Grows the box to contain `c`.
    pub fn extend(self, c: Coord) -> Self {
        Bounds {
            min: Coord::new(self.min.lng.min(c.lng), self.min.lat.min(c.lat)),
            max: Coord::new(self.max.lng.max(c.lng), self.max.lat.max(c.lat)),
        }
    }

    /// Smallest box containing both boxes.
    pub fn union(self, other: Bounds) -> Self {
        self.extend(other.min).extend(other.max)
    }
}

/// A record that passed validation: its geometry plus the remaining fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Geometry taken from the mapped field.
    pub geometry: Geometry,
    /// Every other field of the record, in original order.
    pub properties: DefaultRecord,
}

/// Declares which record field holds each semantic role.
///
/// The only role the layers need is [`FieldMapping::GEOMETRY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMapping {
    roles: KeyMap<String>,
}

impl Default for FieldMapping {
    fn default() -> Self {
        FieldMapping::geometry("coordinates")
    }
}

impl FieldMapping {
    /// Role name of the geometry field.
    pub const GEOMETRY: &'static str = "geometry";

    /// Mapping without any role.
    pub fn empty() -> Self {
        FieldMapping { roles: KeyMap::new() }
    }

    /// Mapping whose geometry lives in `field`.
    pub fn geometry(field: &str) -> Self {
        FieldMapping::empty().with_role(Self::GEOMETRY, field)
    }

    /// Adds or replaces a role.
    pub fn with_role(mut self, role: &str, field: &str) -> Self {
        self.roles.insert(role.to_string(), field.to_string());
        self
    }

    /// Field name bound to `role`.
    pub fn field(&self, role: &str) -> Option<&str> {
        self.roles.get(role).map(String::as_str)
    }

    /// Field name of the geometry role.
    pub fn geometry_field(&self) -> LayerResult<&str> {
        self.field(Self::GEOMETRY).ok_or_else(|| {
            LayerError::FieldMapping(format!("mapping declares no `{}` role", Self::GEOMETRY))
        })
    }
}

/// Validates every record of `dataset` and converts it into a [`Feature`].
///
/// Nothing is returned unless all records are well-formed.
pub fn build_features(kind: LayerKind, dataset: &[DefaultRecord], mapping: &FieldMapping) -> LayerResult<Vec<Feature>> {
    let field = mapping.geometry_field()?;
    let mut location = RecordTracker::new();
    let mut features = Vec::with_capacity(dataset.len());
    for record in dataset {
        let value = record.get_value(field).ok_or_else(|| {
            LayerError::FieldMapping(location.describe(&format!("missing geometry field `{}`", field)))
        })?;
        let geometry = Geometry::from_value(kind, value).map_err(|e| {
            LayerError::FieldMapping(location.describe(&format!("field `{}` is not a {} geometry: {}", field, kind, e)))
        })?;
        let mut properties = record.clone();
        properties.shift_remove(field);
        features.push(Feature { geometry, properties });
        location.next_record();
    }
    Ok(features)
}

fn coord(value: &Value) -> Result<Coord, String> {
    let (lng, lat) = match *value {
        Value::List(ref items) => match items[..] {
            [Value::Number(lng), Value::Number(lat)] => (lng, lat),
            _ => return Err("expected a coordinate pair of two numbers".to_string()),
        },
        Value::Text(ref s) => parser::parse_coordinate_text(s).map_err(|e| e.to_string())?,
        _ => return Err(format!("expected a coordinate, found {}", value.type_name())),
    };
    if !lng.is_finite() || !lat.is_finite() {
        return Err("coordinate is not finite".to_string());
    }
    if !(-180.0..=180.0).contains(&lng) || !(-90.0..=90.0).contains(&lat) {
        return Err(format!("coordinate ({}, {}) is out of range", lng, lat));
    }
    Ok(Coord::new(lng, lat))
}

fn coord_list(value: &Value) -> Result<Vec<Coord>, String> {
    let items = value.as_list()
        .ok_or_else(|| format!("expected a list of coordinates, found {}", value.type_name()))?;
    items.iter().map(coord).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Value {
        Value::from(vec![[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]])
    }

    #[test]
    fn point_from_pair_and_text() {
        let g = Geometry::from_value(LayerKind::Point, &Value::from([120.15, 30.28])).unwrap();
        assert_eq!(g, Geometry::Point(Coord::new(120.15, 30.28)));
        let g = Geometry::from_value(LayerKind::Point, &Value::from("116.405285,39.904989")).unwrap();
        assert_eq!(g, Geometry::Point(Coord::new(116.405285, 39.904989)));
    }

    #[test]
    fn polygon_accepts_ring_or_rings() {
        let single = Geometry::from_value(LayerKind::Polygon, &square()).unwrap();
        let nested = Geometry::from_value(LayerKind::Polygon, &Value::List(vec![square()])).unwrap();
        assert_eq!(single, nested);
        match single {
            Geometry::Polygon(rings) => assert_eq!(rings[0].len(), 5),
            other => panic!("unexpected geometry {:?}", other),
        }
    }

    #[test]
    fn shape_mismatches_rejected() {
        // a single pair where a ring is required
        assert!(Geometry::from_value(LayerKind::Polygon, &Value::from([0.0, 0.0])).is_err());
        assert!(Geometry::from_value(LayerKind::Polygon, &Value::List(vec![])).is_err());
        assert!(Geometry::from_value(LayerKind::Line, &Value::from(vec![[0.0, 0.0]])).is_err());
        assert!(Geometry::from_value(LayerKind::Link, &square()).is_err());
        assert!(Geometry::from_value(LayerKind::Point, &Value::from("north")).is_err());
        assert!(Geometry::from_value(LayerKind::Point, &Value::from([200.0, 0.0])).is_err());
    }

    #[test]
    fn link_from_text_pairs() {
        let v = Value::from(vec!["116.405285,39.904989", "121.472644,31.231706"]);
        let g = Geometry::from_value(LayerKind::Link, &v).unwrap();
        assert_eq!(g, Geometry::Link(Coord::new(116.405285, 39.904989), Coord::new(121.472644, 31.231706)));
    }

    #[test]
    fn bounds_cover_all_coords() {
        let g = Geometry::from_value(LayerKind::Polygon, &square()).unwrap();
        let b = g.bounds().unwrap();
        assert_eq!(b.min, Coord::new(0.0, 0.0));
        assert_eq!(b.max, Coord::new(1.0, 1.0));
        let u = b.union(Bounds::from_coord(Coord::new(-2.0, 3.0)));
        assert_eq!(u.min, Coord::new(-2.0, 0.0));
        assert_eq!(u.max, Coord::new(1.0, 3.0));
    }

    #[test]
    fn build_features_reports_record_index() {
        let mut good = DefaultRecord::new();
        good.insert("name".to_string(), Value::from("a"));
        good.insert("coordinates".to_string(), Value::from([1.0, 2.0]));
        let mut bad = DefaultRecord::new();
        bad.insert("name".to_string(), Value::from("b"));
        let err = build_features(LayerKind::Point, &[good.clone(), bad], &FieldMapping::default()).unwrap_err();
        match err {
            LayerError::FieldMapping(msg) => assert!(msg.starts_with("Record 1:"), "{}", msg),
            other => panic!("unexpected error {:?}", other),
        }

        let features = build_features(LayerKind::Point, &[good], &FieldMapping::default()).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].properties.get_text("name"), Some("a"));
        assert!(features[0].properties.get_value("coordinates").is_none());
    }

    #[test]
    fn mapping_without_geometry_role() {
        let err = build_features(LayerKind::Point, &[], &FieldMapping::empty()).unwrap_err();
        assert!(matches!(err, LayerError::FieldMapping(_)));
        assert_eq!(FieldMapping::geometry("line").field("geometry"), Some("line"));
    }
}
