//! Headless engine that records draw commands instead of drawing.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{ trace, warn };

use crate::errors::{ LayerError, LayerResult };
use crate::layer::{ Bounds, Feature, LayerKind, LayerOptions, Style };
use crate::map::MapConfig;
use super::{ Engine, LayerId, MapId };

/// One rendered, visible layer as it would appear on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    /// The layer that was drawn.
    pub layer: LayerId,
    /// Primitive it was drawn with.
    pub kind: LayerKind,
    /// Effective stacking priority.
    pub z_index: i32,
    /// Style in effect at the last render.
    pub style: Style,
    /// Features in effect at the last render.
    pub features: Vec<Feature>,
}

#[derive(Debug)]
struct MapRecord {
    config: MapConfig,
    view: Option<Bounds>,
}

#[derive(Debug)]
struct Frame {
    style: Style,
    features: Vec<Feature>,
}

#[derive(Debug)]
struct LayerRecord {
    map: MapId,
    kind: LayerKind,
    options: LayerOptions,
    style: Style,
    select_style: Option<Style>,
    data: Vec<Feature>,
    frame: Option<Frame>,
    visible: bool,
    renders: usize,
    visibility_changes: usize,
}

/// An [`Engine`] that keeps every layer in memory and exposes what was drawn.
///
/// Only container surfaces registered up front can host a map; the default
/// engine offers a single surface called `container`. Layer kinds can be
/// disabled to simulate an engine that cannot allocate them.
#[derive(Debug)]
pub struct RecordingEngine {
    containers: Vec<String>,
    unsupported: Vec<LayerKind>,
    maps: Vec<MapRecord>,
    layers: Vec<LayerRecord>,
}

impl Default for RecordingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingEngine {
    /// Engine with the `container` surface and every layer kind available.
    pub fn new() -> Self {
        RecordingEngine {
            containers: vec!["container".to_string()],
            unsupported: Vec::new(),
            maps: Vec::new(),
            layers: Vec::new(),
        }
    }

    /// Registers another container surface.
    pub fn with_container(mut self, container: &str) -> Self {
        self.containers.push(container.to_string());
        self
    }

    /// Makes layer allocation fail for `kind`.
    pub fn without_kind(mut self, kind: LayerKind) -> Self {
        self.unsupported.push(kind);
        self
    }

    /// Wraps the engine for sharing with map handles.
    pub fn shared(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }

    /// Number of maps created so far.
    pub fn map_count(&self) -> usize {
        self.maps.len()
    }

    /// Configuration `map` was created with.
    pub fn map_config(&self, map: MapId) -> Option<&MapConfig> {
        self.maps.get(map.0).map(|m| &m.config)
    }

    /// Number of layers allocated on `map`, drawn or not.
    pub fn layer_count(&self, map: MapId) -> usize {
        self.layers.iter().filter(|l| l.map == map).count()
    }

    /// Visible, rendered layers of `map` from bottom to top.
    ///
    /// Layers stack by z-index; equal z-indices keep construction order, the
    /// earlier layer beneath.
    pub fn draw_list(&self, map: MapId) -> Vec<DrawItem> {
        let mut items: Vec<DrawItem> = self.layers.iter()
            .enumerate()
            .filter(|(_, l)| l.map == map && l.visible)
            .filter_map(|(i, l)| {
                l.frame.as_ref().map(|frame| DrawItem {
                    layer: LayerId(i),
                    kind: l.kind,
                    z_index: l.options.z_index.unwrap_or(0),
                    style: frame.style.clone(),
                    features: frame.features.clone(),
                })
            })
            .collect();
        items.sort_by_key(|item| item.z_index);
        items
    }

    /// Number of features across the draw list of `map`.
    pub fn feature_count(&self, map: MapId) -> usize {
        self.draw_list(map).iter().map(|item| item.features.len()).sum()
    }

    /// View the map moved to after rendering `fit_view` layers.
    pub fn view_bounds(&self, map: MapId) -> Option<Bounds> {
        self.maps.get(map.0).and_then(|m| m.view)
    }

    /// Number of draw commands issued for `layer`.
    pub fn render_count(&self, layer: LayerId) -> usize {
        self.layers.get(layer.0).map_or(0, |l| l.renders)
    }

    /// Number of show/hide commands that reached `layer`.
    pub fn visibility_changes(&self, layer: LayerId) -> usize {
        self.layers.get(layer.0).map_or(0, |l| l.visibility_changes)
    }

    /// Visibility of `layer`, if it exists.
    pub fn is_visible(&self, layer: LayerId) -> Option<bool> {
        self.layers.get(layer.0).map(|l| l.visible)
    }

    /// Select style currently set on `layer`.
    pub fn select_style(&self, layer: LayerId) -> Option<&Style> {
        self.layers.get(layer.0).and_then(|l| l.select_style.as_ref())
    }

    /// Features set on `layer`, rendered or not.
    pub fn data(&self, layer: LayerId) -> &[Feature] {
        self.layers.get(layer.0).map(|l| l.data.as_slice()).unwrap_or(&[])
    }

    fn layer_mut(&mut self, layer: LayerId) -> Option<&mut LayerRecord> {
        let found = self.layers.get_mut(layer.0);
        if found.is_none() {
            warn!(?layer, "command for unknown layer ignored");
        }
        found
    }
}

impl Engine for RecordingEngine {
    fn create_map(&mut self, config: &MapConfig) -> LayerResult<MapId> {
        if !self.containers.iter().any(|c| *c == config.container) {
            return Err(LayerError::MapInit(format!("container surface `{}` is unavailable", config.container)));
        }
        self.maps.push(MapRecord { config: config.clone(), view: None });
        Ok(MapId(self.maps.len() - 1))
    }

    fn create_layer(&mut self, map: MapId, kind: LayerKind, options: &LayerOptions) -> LayerResult<LayerId> {
        if map.0 >= self.maps.len() {
            return Err(LayerError::EngineInit(format!("unknown map {:?}", map)));
        }
        if self.unsupported.contains(&kind) {
            return Err(LayerError::EngineInit(format!("{} layers are not supported", kind)));
        }
        self.layers.push(LayerRecord {
            map,
            kind,
            options: *options,
            style: Style::default(),
            select_style: None,
            data: Vec::new(),
            frame: None,
            visible: true,
            renders: 0,
            visibility_changes: 0,
        });
        Ok(LayerId(self.layers.len() - 1))
    }

    fn set_options(&mut self, layer: LayerId, style: &Style, select_style: Option<&Style>) {
        if let Some(l) = self.layer_mut(layer) {
            l.style = style.clone();
            l.select_style = select_style.cloned();
        }
    }

    fn set_data(&mut self, layer: LayerId, features: &[Feature]) {
        if let Some(l) = self.layer_mut(layer) {
            l.data = features.to_vec();
        }
    }

    fn render(&mut self, layer: LayerId) {
        let Some(l) = self.layer_mut(layer) else {
            return;
        };
        l.frame = Some(Frame { style: l.style.clone(), features: l.data.clone() });
        l.renders += 1;
        let map = l.map;
        let fit = if l.options.fit_view {
            l.data.iter()
                .filter_map(|f| f.geometry.bounds())
                .reduce(Bounds::union)
        } else {
            None
        };
        trace!(?layer, renders = l.renders, "draw command recorded");
        if let (Some(bounds), Some(m)) = (fit, self.maps.get_mut(map.0)) {
            m.view = Some(bounds);
        }
    }

    fn show(&mut self, layer: LayerId) {
        if let Some(l) = self.layer_mut(layer) {
            l.visible = true;
            l.visibility_changes += 1;
        }
    }

    fn hide(&mut self, layer: LayerId) {
        if let Some(l) = self.layer_mut(layer) {
            l.visible = false;
            l.visibility_changes += 1;
        }
    }
}
