//! The rendering engine boundary.
//!
//! Drawing itself is not part of this crate. An [`Engine`] provides the primitives
//! the layers are built from: create a map, allocate a layer on it, set its options
//! and data, render, show and hide. [`RecordingEngine`] is a headless implementation
//! that records what would have been drawn.

use crate::errors::LayerResult;
use crate::layer::{ Feature, LayerKind, LayerOptions, Style };
use crate::map::MapConfig;

mod recording;

pub use self::recording::{ DrawItem, RecordingEngine };

/// Identifies a map inside an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MapId(pub usize);

/// Identifies a layer inside an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub usize);

/// Primitives consumed from a rendering engine.
///
/// Only the two allocation calls may fail. Calls with an id the engine does not
/// know are ignored.
pub trait Engine {
    /// Creates a map surface.
    ///
    /// Fails with [`LayerError::MapInit`](crate::errors::LayerError::MapInit) if the
    /// container surface is unavailable.
    fn create_map(&mut self, config: &MapConfig) -> LayerResult<MapId>;

    /// Allocates a layer of `kind` on `map` and appends it to the map's render list.
    ///
    /// Fails with [`LayerError::EngineInit`](crate::errors::LayerError::EngineInit)
    /// for unknown maps or unsupported kinds.
    fn create_layer(&mut self, map: MapId, kind: LayerKind, options: &LayerOptions) -> LayerResult<LayerId>;

    /// Sets the style and the optional select style.
    fn set_options(&mut self, layer: LayerId, style: &Style, select_style: Option<&Style>);

    /// Replaces the features of a layer. Does not draw.
    fn set_data(&mut self, layer: LayerId, features: &[Feature]);

    /// Issues a draw command with the current options and data.
    fn render(&mut self, layer: LayerId);

    /// Makes the layer visible.
    fn show(&mut self, layer: LayerId);

    /// Hides the layer.
    fn hide(&mut self, layer: LayerId);
}
