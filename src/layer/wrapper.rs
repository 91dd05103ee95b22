//! The layer wrapper: one engine layer with its style, data and visibility.

use serde::{ Deserialize, Serialize };
use tracing::{ debug, trace };

use crate::engine::{ Engine, LayerId };
use crate::errors::LayerResult;
use crate::map::MapHandle;
use super::geometry::build_features;
use super::{ DefaultRecord, Feature, FieldMapping, LayerKind, Style, StyleDescriptor };

/// Construction options forwarded to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayerOptions {
    /// Explicit stacking priority. Layers without one stack at `0`.
    pub z_index: Option<i32>,
    /// Ask the engine to move the view onto this layer's data once rendered.
    pub fit_view: bool,
}

impl LayerOptions {
    /// Options with an explicit z-index.
    pub fn with_z_index(z_index: i32) -> Self {
        LayerOptions { z_index: Some(z_index), ..LayerOptions::default() }
    }

    /// Options that fit the view to the layer.
    pub fn fit_view() -> Self {
        LayerOptions { fit_view: true, ..LayerOptions::default() }
    }
}

/// Where a layer is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerState {
    /// The engine layer exists, nothing else happened yet.
    Constructed,
    /// A style was applied since construction or the last render.
    StyleApplied,
    /// Data was (re)loaded and waits for the next render.
    DataLoaded,
    /// A draw command was issued.
    Rendered,
}

/// One visual layer bound to a map.
///
/// The engine layer is allocated once in [`LayerWrapper::construct`] and stays
/// bound to the same map and [`LayerKind`] for the lifetime of the wrapper.
/// Everything else follows the same four steps for every kind:
/// construct, style, load data, render.
///
/// # Examples
///
/// ```rust
/// use geolayers::prelude::*;
///
/// let engine = RecordingEngine::new().shared();
/// let map = bootstrap(&engine, MapConfig::default()).unwrap();
///
/// let mut tour = LayerWrapper::construct(&map, "tour", LayerKind::Link, LayerOptions::fit_view()).unwrap();
/// tour.apply_style(&geolayers::style! { "color" => "#ff910f", "borderWidth" => 2 }).unwrap();
///
/// let mut leg = DefaultRecord::new();
/// leg.insert("line".to_string(), Value::from(vec![[0.0, 0.0], [1.0, 1.0]]));
/// tour.load_data(&[leg], &FieldMapping::geometry("line")).unwrap();
/// tour.render();
///
/// assert_eq!(engine.borrow().feature_count(map.id()), 1);
/// ```
#[derive(Debug)]
pub struct LayerWrapper<E: Engine> {
    name: String,
    kind: LayerKind,
    options: LayerOptions,
    id: LayerId,
    map: MapHandle<E>,
    style: Option<Style>,
    select_style: Option<Style>,
    mapping: FieldMapping,
    features: Vec<Feature>,
    visible: bool,
    state: LayerState,
}

impl<E: Engine> LayerWrapper<E> {
    /// Allocates the engine layer on `map`.
    ///
    /// Fails with [`LayerError::EngineInit`](crate::errors::LayerError::EngineInit)
    /// if the engine refuses the layer.
    pub fn construct(map: &MapHandle<E>, name: impl Into<String>, kind: LayerKind, options: LayerOptions) -> LayerResult<Self> {
        let name = name.into();
        let id = map.engine_mut().create_layer(map.id(), kind, &options)?;
        debug!(layer = %name, %kind, ?id, "layer constructed");
        Ok(LayerWrapper {
            name,
            kind,
            options,
            id,
            map: map.clone(),
            style: None,
            select_style: None,
            mapping: FieldMapping::default(),
            features: Vec::new(),
            visible: true,
            state: LayerState::Constructed,
        })
    }

    /// Validates `descriptor` for this kind and makes it the layer style.
    ///
    /// On error the previous style stays in place. The style reaches the engine
    /// with the next [`LayerWrapper::render`].
    pub fn apply_style(&mut self, descriptor: &StyleDescriptor) -> LayerResult<()> {
        let style = Style::validate(self.kind, descriptor)?;
        self.install_style(style);
        Ok(())
    }

    /// Validates `descriptor` and uses it for selected features.
    pub fn apply_select_style(&mut self, descriptor: &StyleDescriptor) -> LayerResult<()> {
        let style = Style::validate(self.kind, descriptor)?;
        self.install_select_style(style);
        Ok(())
    }

    /// Replaces the bound dataset.
    ///
    /// Every record is validated first; if one is missing the mapped geometry
    /// field or its geometry does not fit the kind, the error is returned and the
    /// previously loaded data is left untouched. Does not draw.
    pub fn load_data(&mut self, dataset: &[DefaultRecord], mapping: &FieldMapping) -> LayerResult<()> {
        let features = build_features(self.kind, dataset, mapping)?;
        self.install_features(features, mapping.clone());
        Ok(())
    }

    /// Pushes the current style and issues a draw command.
    ///
    /// Layers without an applied style are drawn with [`Style::default_for`] their kind.
    /// Rendering before any data was loaded draws nothing and is not an error.
    pub fn render(&mut self) {
        let style = self.style.clone().unwrap_or_else(|| Style::default_for(self.kind));
        {
            let mut engine = self.map.engine_mut();
            engine.set_options(self.id, &style, self.select_style.as_ref());
            engine.render(self.id);
        }
        self.state = LayerState::Rendered;
        debug!(layer = %self.name, features = self.features.len(), "layer rendered");
    }

    /// Makes the layer visible. No-op if it already is.
    pub fn show(&mut self) {
        if self.visible {
            return;
        }
        self.visible = true;
        self.map.engine_mut().show(self.id);
        debug!(layer = %self.name, "layer shown");
    }

    /// Hides the layer. No-op if it already is hidden.
    pub fn hide(&mut self) {
        if !self.visible {
            return;
        }
        self.visible = false;
        self.map.engine_mut().hide(self.id);
        debug!(layer = %self.name, "layer hidden");
    }

    pub(crate) fn install_style(&mut self, style: Style) {
        self.style = Some(style);
        self.mark(LayerState::StyleApplied);
    }

    pub(crate) fn install_select_style(&mut self, style: Style) {
        self.select_style = Some(style);
        self.mark(LayerState::StyleApplied);
    }

    pub(crate) fn install_features(&mut self, features: Vec<Feature>, mapping: FieldMapping) {
        self.map.engine_mut().set_data(self.id, &features);
        trace!(layer = %self.name, records = features.len(), "data loaded");
        self.features = features;
        self.mapping = mapping;
        self.state = LayerState::DataLoaded;
    }

    // Loaded data waiting for a render is not demoted by a style change.
    fn mark(&mut self, state: LayerState) {
        if self.state != LayerState::DataLoaded {
            self.state = state;
        }
    }

    /// Name the layer was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind fixed at construction.
    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    /// Engine layer id.
    pub fn id(&self) -> LayerId {
        self.id
    }

    /// Options passed at construction.
    pub fn options(&self) -> LayerOptions {
        self.options
    }

    /// The applied style, if any.
    pub fn style(&self) -> Option<&Style> {
        self.style.as_ref()
    }

    /// The applied select style, if any.
    pub fn select_style(&self) -> Option<&Style> {
        self.select_style.as_ref()
    }

    /// Mapping of the loaded dataset.
    pub fn field_mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    /// Features of the loaded dataset.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// `true` unless [`LayerWrapper::hide`] was called last.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LayerState {
        self.state
    }

    /// The map this layer belongs to.
    pub fn map(&self) -> &MapHandle<E> {
        &self.map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RecordingEngine;
    use crate::layer::Value;
    use crate::map::{ bootstrap, MapConfig };

    fn point(lng: f64, lat: f64) -> DefaultRecord {
        let mut r = DefaultRecord::new();
        r.insert("coordinates".to_string(), Value::from([lng, lat]));
        r
    }

    #[test]
    fn test_lifecycle_states() {
        let engine = RecordingEngine::new().shared();
        let map = bootstrap(&engine, MapConfig::default()).unwrap();
        let mut layer = LayerWrapper::construct(&map, "cities", LayerKind::Point, LayerOptions::default()).unwrap();
        assert_eq!(layer.state(), LayerState::Constructed);

        layer.apply_style(&crate::style! { "radius" => 6 }).unwrap();
        assert_eq!(layer.state(), LayerState::StyleApplied);

        layer.load_data(&[point(1.0, 2.0)], &FieldMapping::default()).unwrap();
        assert_eq!(layer.state(), LayerState::DataLoaded);

        layer.apply_style(&crate::style! { "radius" => 8 }).unwrap();
        assert_eq!(layer.state(), LayerState::DataLoaded);

        layer.render();
        assert_eq!(layer.state(), LayerState::Rendered);

        layer.load_data(&[point(3.0, 4.0)], &FieldMapping::default()).unwrap();
        assert_eq!(layer.state(), LayerState::DataLoaded);
        layer.render();
        assert_eq!(layer.state(), LayerState::Rendered);
    }

    #[test]
    fn test_failed_style_keeps_previous() {
        let engine = RecordingEngine::new().shared();
        let map = bootstrap(&engine, MapConfig::default()).unwrap();
        let mut layer = LayerWrapper::construct(&map, "l", LayerKind::Line, LayerOptions::default()).unwrap();
        layer.apply_style(&crate::style! { "opacity" => 0.3 }).unwrap();
        assert!(layer.apply_style(&crate::style! { "radius" => 3 }).is_err());
        assert_eq!(layer.style().and_then(|s| s.opacity), Some(0.3));
    }

    #[test]
    fn test_show_hide_forward_only_on_change() {
        let engine = RecordingEngine::new().shared();
        let map = bootstrap(&engine, MapConfig::default()).unwrap();
        let mut layer = LayerWrapper::construct(&map, "l", LayerKind::Point, LayerOptions::default()).unwrap();
        layer.show();
        assert_eq!(engine.borrow().visibility_changes(layer.id()), 0);
        layer.hide();
        layer.hide();
        assert_eq!(engine.borrow().visibility_changes(layer.id()), 1);
        assert!(!layer.is_visible());
        layer.show();
        assert_eq!(engine.borrow().visibility_changes(layer.id()), 2);
    }
}
