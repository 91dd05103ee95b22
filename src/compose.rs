//! Composes an ordered set of layers onto one map.
//!
//! Every spec is attempted. A spec that fails to validate, construct or load is
//! reported in [`Composition::failures`] and leaves nothing behind; the remaining
//! specs are composed as usual, so one bad dataset does not blank the whole view.

use tracing::{ info, warn };

use crate::engine::Engine;
use crate::errors::{ LayerError, LayerResult };
use crate::layer::{
    build_features, Addable, Dataset, FieldMapping, KeyMap, LayerKind, LayerOptions, LayerWrapper, Style,
    StyleDescriptor,
};
use crate::map::MapHandle;

/// Everything needed to build one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    /// Unique name within the composition.
    pub name: String,
    /// Primitive to draw with.
    pub kind: LayerKind,
    /// Engine construction options.
    pub options: LayerOptions,
    /// Style, validated against `kind`.
    pub style: StyleDescriptor,
    /// Style of selected features.
    pub select_style: Option<StyleDescriptor>,
    /// Records to draw.
    pub dataset: Dataset,
    /// Where the geometry lives in each record.
    pub mapping: FieldMapping,
}

impl LayerSpec {
    /// Spec with default options, an empty style, no data and the default mapping.
    pub fn new(name: impl Into<String>, kind: LayerKind) -> Self {
        LayerSpec {
            name: name.into(),
            kind,
            options: LayerOptions::default(),
            style: StyleDescriptor::new(),
            select_style: None,
            dataset: Dataset::new(),
            mapping: FieldMapping::default(),
        }
    }

    /// Replaces the construction options.
    pub fn with_options(mut self, options: LayerOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the style.
    pub fn with_style(mut self, style: StyleDescriptor) -> Self {
        self.style = style;
        self
    }

    /// Sets the select style.
    pub fn with_select_style(mut self, style: StyleDescriptor) -> Self {
        self.select_style = Some(style);
        self
    }

    /// Replaces the dataset.
    pub fn with_dataset(mut self, dataset: Dataset) -> Self {
        self.dataset = dataset;
        self
    }

    /// Replaces the field mapping.
    pub fn with_mapping(mut self, mapping: FieldMapping) -> Self {
        self.mapping = mapping;
        self
    }
}

/// A spec that could not be composed.
#[derive(Debug)]
pub struct LayerFailure {
    /// Name of the spec.
    pub name: String,
    /// Why it failed.
    pub error: LayerError,
}

/// Layers composed onto one map, in construction order, plus the failures.
#[derive(Debug)]
pub struct Composition<E: Engine> {
    layers: KeyMap<LayerWrapper<E>>,
    failures: Vec<LayerFailure>,
}

impl<E: Engine> Composition<E> {
    /// Successfully rendered layers in construction order.
    pub fn layers(&self) -> impl Iterator<Item = &LayerWrapper<E>> {
        self.layers.values()
    }

    /// Number of successfully rendered layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// `true` if no layer was composed.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Looks a layer up by name.
    pub fn layer(&self, name: &str) -> Option<&LayerWrapper<E>> {
        self.layers.get(name)
    }

    /// Looks a layer up by name for reloading or toggling.
    pub fn layer_mut(&mut self, name: &str) -> Option<&mut LayerWrapper<E>> {
        self.layers.get_mut(name)
    }

    /// Failures collected while composing.
    pub fn failures(&self) -> &[LayerFailure] {
        &self.failures
    }

    /// `true` if every spec was composed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Shows or hides the named layer. Returns `false` if there is no such layer.
    pub fn set_visibility(&mut self, name: &str, visible: bool) -> bool {
        match self.layers.get_mut(name) {
            Some(layer) => {
                crate::visibility::set_visibility(layer, visible);
                true
            }
            None => false,
        }
    }
}

/// Builds, loads and renders every spec on `map`.
///
/// # Examples
///
/// ```rust
/// use geolayers::prelude::*;
///
/// let engine = RecordingEngine::new().shared();
/// let map = bootstrap(&engine, MapConfig::default()).unwrap();
///
/// let specs = vec![
///     LayerSpec::new("ok", LayerKind::Point),
///     LayerSpec::new("bad", LayerKind::Point).with_style(geolayers::style! { "opacity" => 3 }),
/// ];
/// let composition = compose(&map, specs);
/// assert_eq!(composition.len(), 1);
/// assert_eq!(composition.failures()[0].name, "bad");
/// ```
pub fn compose<E, I>(map: &MapHandle<E>, specs: I) -> Composition<E>
where
    E: Engine,
    I: IntoIterator<Item = LayerSpec>,
{
    let mut layers: KeyMap<LayerWrapper<E>> = KeyMap::new();
    let mut failures = Vec::new();
    for spec in specs {
        if layers.contains_key(&spec.name) {
            warn!(layer = %spec.name, "duplicate layer name");
            failures.push(LayerFailure {
                error: LayerError::Duplicate(spec.name.clone()),
                name: spec.name,
            });
            continue;
        }
        match build_layer(map, &spec) {
            Ok(layer) => layers.add(layer),
            Err(error) => {
                warn!(layer = %spec.name, %error, "layer not composed");
                failures.push(LayerFailure { name: spec.name, error });
            }
        }
    }
    info!(layers = layers.len(), failures = failures.len(), "composition finished");
    Composition { layers, failures }
}

// Validation runs before the engine allocates anything, so a rejected spec
// leaves no layer behind in the engine.
fn build_layer<E: Engine>(map: &MapHandle<E>, spec: &LayerSpec) -> LayerResult<LayerWrapper<E>> {
    let style = Style::validate(spec.kind, &spec.style)?;
    let select_style = match spec.select_style {
        Some(ref descriptor) => Some(Style::validate(spec.kind, descriptor)?),
        None => None,
    };
    let features = build_features(spec.kind, &spec.dataset, &spec.mapping)?;

    let mut layer = LayerWrapper::construct(map, spec.name.clone(), spec.kind, spec.options)?;
    layer.install_style(style);
    if let Some(select_style) = select_style {
        layer.install_select_style(select_style);
    }
    layer.install_features(features, spec.mapping.clone());
    layer.render();
    Ok(layer)
}
