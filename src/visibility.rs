//! Maps external toggle state (a checkbox, a key binding) onto layer visibility.

use crate::engine::Engine;
use crate::layer::LayerWrapper;

/// Shows `layer` if `visible`, hides it otherwise.
pub fn set_visibility<E: Engine>(layer: &mut LayerWrapper<E>, visible: bool) {
    if visible {
        layer.show();
    } else {
        layer.hide();
    }
}

/// Returns an `on_toggle(checked)` callback bound to `layer`.
///
/// ```rust
/// use geolayers::prelude::*;
///
/// let engine = RecordingEngine::new().shared();
/// let map = bootstrap(&engine, MapConfig::default()).unwrap();
/// let mut layer = LayerWrapper::construct(&map, "bricks", LayerKind::Polygon, LayerOptions::default()).unwrap();
///
/// let mut on_toggle = toggle_hook(&mut layer);
/// on_toggle(false);
/// on_toggle(false);
/// drop(on_toggle);
/// assert!(!layer.is_visible());
/// ```
pub fn toggle_hook<E: Engine>(layer: &mut LayerWrapper<E>) -> impl FnMut(bool) + '_ {
    move |checked| set_visibility(layer, checked)
}
