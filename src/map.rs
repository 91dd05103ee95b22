//! Map configuration and bootstrap.
//!
//! Exactly one [`MapHandle`] is created per view, before any layer. It is the only
//! dependency every [`LayerWrapper`](crate::layer::LayerWrapper) needs.

use std::cell::{ Ref, RefCell, RefMut };
use std::fmt;
use std::io::Read;
use std::rc::Rc;

use serde::{ Deserialize, Serialize };
use tracing::info;

use crate::engine::{ Engine, MapId };
use crate::errors::{ LayerError, LayerResult };
use crate::parser;

/// Smallest zoom level accepted by [`MapConfig::validate`].
pub const MIN_ZOOM: f64 = 2.0;
/// Largest zoom level accepted by [`MapConfig::validate`].
pub const MAX_ZOOM: f64 = 20.0;
/// Steepest pitch in degrees accepted by [`MapConfig::validate`].
pub const MAX_PITCH: f64 = 83.0;

/// Style the segmentation and tour pages were published with.
pub const DEFAULT_MAP_STYLE: &str = "amap://styles/1de318cbb8d12c02303a22c550b9ccc9";

/// Projection mode of the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    /// Flat map.
    #[default]
    #[serde(rename = "2D")]
    Flat,
    /// Perspective map honoring pitch.
    #[serde(rename = "3D")]
    Perspective,
}

/// Base-map feature classes that can be enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseFeature {
    /// Land and water background.
    Bg,
    /// Points of interest.
    Point,
    /// Roads.
    Road,
    /// Buildings.
    Building,
}

/// Parsed map style identifier.
///
/// Either `<scheme>://styles/<name>` or a bare style name such as `normal`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleId {
    /// URL scheme, absent for bare names.
    pub scheme: Option<String>,
    /// Style name or id.
    pub name: String,
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.scheme {
            Some(ref scheme) => write!(f, "{}://styles/{}", scheme, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Fixed visual configuration of the map surface.
///
/// Deserializes from the camelCase JSON the page scripts used, every field is
/// optional and falls back to [`MapConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapConfig {
    /// Id of the container surface hosting the map.
    pub container: String,
    /// Style identifier, see [`StyleId`].
    pub map_style: String,
    /// Camera pitch in degrees.
    pub pitch: f64,
    /// Initial zoom level.
    pub zoom: f64,
    /// Enabled base-map features.
    pub features: Vec<BaseFeature>,
    /// Projection mode.
    pub view_mode: ViewMode,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            container: "container".to_string(),
            map_style: DEFAULT_MAP_STYLE.to_string(),
            pitch: 0.0,
            zoom: 10.0,
            features: vec![BaseFeature::Bg, BaseFeature::Road],
            view_mode: ViewMode::Flat,
        }
    }
}

impl MapConfig {
    /// Reads a configuration from JSON text.
    pub fn from_json_str(text: &str) -> LayerResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads a configuration from a JSON source.
    pub fn from_reader<R: Read>(source: R) -> LayerResult<Self> {
        Ok(serde_json::from_reader(source)?)
    }

    /// Parses [`MapConfig::map_style`].
    pub fn style_id(&self) -> LayerResult<StyleId> {
        parser::parse_style_id(&self.map_style)
    }

    /// Checks every field, failing with [`LayerError::MapInit`].
    pub fn validate(&self) -> LayerResult<()> {
        if self.container.trim().is_empty() {
            return Err(LayerError::MapInit("container id is empty".to_string()));
        }
        self.style_id().map_err(|e| {
            LayerError::MapInit(format!("invalid map style `{}`: {}", self.map_style, e))
        })?;
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&self.zoom) {
            return Err(LayerError::MapInit(
                format!("zoom {} is outside [{}, {}]", self.zoom, MIN_ZOOM, MAX_ZOOM)
            ));
        }
        if !(0.0..=MAX_PITCH).contains(&self.pitch) {
            return Err(LayerError::MapInit(format!("pitch {} is outside [0, {}]", self.pitch, MAX_PITCH)));
        }
        for (i, feature) in self.features.iter().enumerate() {
            if self.features[..i].contains(feature) {
                return Err(LayerError::MapInit(format!("base feature {:?} listed twice", feature)));
            }
        }
        Ok(())
    }
}

/// Shared handle to one map surface.
///
/// Cloning is cheap; every clone refers to the same engine and map.
pub struct MapHandle<E: Engine> {
    engine: Rc<RefCell<E>>,
    id: MapId,
    config: Rc<MapConfig>,
}

impl<E: Engine> Clone for MapHandle<E> {
    fn clone(&self) -> Self {
        MapHandle {
            engine: Rc::clone(&self.engine),
            id: self.id,
            config: Rc::clone(&self.config),
        }
    }
}

impl<E: Engine> fmt::Debug for MapHandle<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("MapHandle")
            .field("id", &self.id)
            .field("config", &self.config)
            .finish()
    }
}

impl<E: Engine> MapHandle<E> {
    /// Engine id of the map.
    pub fn id(&self) -> MapId {
        self.id
    }

    /// Configuration the map was created with.
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Read access to the engine.
    ///
    /// # Panics
    ///
    /// Panics if the engine is currently borrowed mutably.
    pub fn engine(&self) -> Ref<'_, E> {
        self.engine.borrow()
    }

    pub(crate) fn engine_mut(&self) -> RefMut<'_, E> {
        self.engine.borrow_mut()
    }
}

/// Validates `config` and creates the map on `engine`.
///
/// # Examples
///
/// ```rust
/// use geolayers::prelude::*;
///
/// let engine = RecordingEngine::new().shared();
/// let map = bootstrap(&engine, MapConfig { zoom: 12.0, ..MapConfig::default() }).unwrap();
/// assert_eq!(map.config().zoom, 12.0);
///
/// let bad = MapConfig { map_style: "amap://styles/".to_string(), ..MapConfig::default() };
/// assert!(bootstrap(&engine, bad).is_err());
/// ```
pub fn bootstrap<E: Engine>(engine: &Rc<RefCell<E>>, config: MapConfig) -> LayerResult<MapHandle<E>> {
    config.validate()?;
    let id = engine.borrow_mut().create_map(&config)?;
    info!(?id, container = %config.container, style = %config.map_style, zoom = config.zoom, "map created");
    Ok(MapHandle {
        engine: Rc::clone(engine),
        id,
        config: Rc::new(config),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MapConfig::default();
        assert!(config.validate().is_ok());
        let id = config.style_id().unwrap();
        assert_eq!(id.scheme.as_deref(), Some("amap"));
        assert_eq!(id.name, "1de318cbb8d12c02303a22c550b9ccc9");
        assert_eq!(id.to_string(), DEFAULT_MAP_STYLE);
    }

    #[test]
    fn test_config_from_json() {
        let config = MapConfig::from_json_str(
            r#"{"mapStyle": "normal", "pitch": 45, "zoom": 10, "features": ["bg", "road", "building"], "viewMode": "3D"}"#
        ).unwrap();
        assert_eq!(config.container, "container");
        assert_eq!(config.view_mode, ViewMode::Perspective);
        assert_eq!(config.features.len(), 3);
        assert_eq!(config.style_id().unwrap(), StyleId { scheme: None, name: "normal".to_string() });
    }

    #[test]
    fn test_unknown_feature_is_parse_error() {
        let err = MapConfig::from_json_str(r#"{"features": ["rivers"]}"#).unwrap_err();
        assert!(matches!(err, LayerError::Parse(_)));
    }

    #[test]
    fn test_invalid_configs() {
        let invalid = [
            MapConfig { zoom: 25.0, ..MapConfig::default() },
            MapConfig { pitch: -1.0, ..MapConfig::default() },
            MapConfig { container: " ".to_string(), ..MapConfig::default() },
            MapConfig { map_style: "amap://styles/has space".to_string(), ..MapConfig::default() },
            MapConfig { features: vec![BaseFeature::Road, BaseFeature::Road], ..MapConfig::default() },
        ];
        for config in invalid {
            assert!(matches!(config.validate(), Err(LayerError::MapInit(_))), "{:?}", config);
        }
    }
}
