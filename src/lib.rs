//! Composable map layers on top of a pluggable rendering engine.
//!
//! A view is built in two steps: [`map::bootstrap`] validates a [`map::MapConfig`]
//! and creates the single map surface, then [`compose::compose`] builds every layer
//! against it. Each layer is a [`layer::LayerWrapper`] of one [`layer::LayerKind`]
//! and goes through the same lifecycle: construct, style, load data, render.
//! Visibility can be toggled afterwards, see [`visibility`].
//!
//! Rendering itself is delegated to an [`engine::Engine`]. The crate ships the
//! headless [`engine::RecordingEngine`], which keeps a draw list instead of pixels.
//!
//! ```rust
//! use geolayers::prelude::*;
//!
//! let engine = RecordingEngine::new().shared();
//! let map = bootstrap(&engine, MapConfig::default()).unwrap();
//!
//! let bricks = geolayers::parser::parse_dataset(
//!     r#"MS.data.bricks = [{"coordinates": [[0, 0], [0, 1], [1, 1], [1, 0]]}];"#
//! ).unwrap();
//! let composition = compose(&map, vec![presets::bricks(bricks.records)]);
//! assert!(composition.is_complete());
//! assert_eq!(engine.borrow().draw_list(map.id()).len(), 1);
//! ```
//!
//! Records can also be produced from typed structs with `#[derive(Record)]`:
//!
//! ```rust
//! use geolayers::Record;
//! use geolayers::layer::{ to_dataset, RecordAccess };
//!
//! #[derive(Record)]
//! struct Lead {
//!     name: String,
//!     #[record(name = "coordinates")]
//!     position: [f64; 2],
//!     #[record(skip)]
//!     _internal: u32,
//! }
//!
//! let ds = to_dataset(vec![Lead { name: "shop".into(), position: [116.4, 39.9], _internal: 0 }]);
//! assert_eq!(ds[0].get_text("name"), Some("shop"));
//! assert!(ds[0].get_value("_internal").is_none());
//! ```

// The derive macro refers to this crate by its public name.
extern crate self as geolayers;

#[cfg(doctest)]
doc_comment::doctest!("../README.md");

pub mod compose;
pub mod engine;
pub mod errors;
pub mod layer;
pub mod map;
pub mod parser;
pub mod presets;
pub mod visibility;

mod serde_impl;
mod util;

pub use geolayers_macros::Record;
pub use serde_impl::to_dataset_serde;

/// The types needed to bootstrap a map and compose layers on it.
pub mod prelude {
    pub use crate::compose::{ compose, Composition, LayerFailure, LayerSpec };
    pub use crate::engine::{ Engine, RecordingEngine };
    pub use crate::errors::{ LayerError, LayerResult };
    pub use crate::layer::{
        Dataset, DefaultRecord, FieldMapping, IntoRecord, LayerKind, LayerOptions, LayerState, LayerWrapper,
        RecordAccess, StyleDescriptor, Value,
    };
    pub use crate::map::{ bootstrap, MapConfig, MapHandle };
    pub use crate::presets;
    pub use crate::visibility::{ set_visibility, toggle_hook };
}
