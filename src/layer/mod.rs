//! Layer definitions and the data they draw.
//!
//! This module groups the building blocks of a map layer:
//! - [`LayerKind`] and [`StyleAttr`] describe what a layer draws and which style
//!   attributes it accepts.
//! - [`StyleDescriptor`] / [`Style`] are the raw and the validated style.
//! - [`Value`], [`DefaultRecord`] and [`Dataset`] model externally supplied data,
//!   [`FieldMapping`] declares where the geometry lives and [`Feature`] is a record
//!   that passed validation.
//! - [`LayerWrapper`] ties all of it to one engine layer.

mod geometry;
mod key_map;
mod kind;
mod record;
mod style;
mod value;
mod wrapper;

pub use self::geometry::*;
pub use self::key_map::*;
pub use self::kind::*;
pub use self::record::*;
pub use self::style::*;
pub use self::value::*;
pub use self::wrapper::*;
