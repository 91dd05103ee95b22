//! Style descriptors and their validated form.
//!
//! A [`StyleDescriptor`] is what callers write: a plain mapping from attribute name
//! to value, e.g. `{opacity: 0.3, color: "#a1dab4"}`. Before it reaches the engine
//! it is checked against the attribute table of the layer kind and turned into a
//! typed [`Style`].

use std::fmt::{ Display, Formatter };
use std::fmt;
use std::str::FromStr;

use crate::errors::{ LayerError, LayerResult };
use crate::parser;
use super::{ KeyMap, LayerKind, StyleAttr, Value };

/// Named-attribute mapping as supplied by the caller.
pub type StyleDescriptor = KeyMap<Value>;

/// Builds a [`StyleDescriptor`] from `name => value` pairs.
///
/// ```rust
/// let s = geolayers::style! { "opacity" => 0.3, "color" => "#a1dab4" };
/// assert_eq!(s.len(), 2);
/// ```
#[macro_export]
macro_rules! style {
    ($($name:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut descriptor = $crate::layer::StyleDescriptor::new();
        $( descriptor.insert(($name).to_string(), $crate::layer::Value::from($value)); )*
        descriptor
    }};
}

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
    /// Alpha in `[0, 1]`.
    pub alpha: f64,
}

impl Color {
    /// Opaque color from its channels.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Color { red, green, blue, alpha: 1.0 }
    }

    /// Color with explicit alpha.
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Color { red, green, blue, alpha }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        if self.alpha >= 1.0 {
            write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
        } else {
            write!(f, "rgba({},{},{},{})", self.red, self.green, self.blue, self.alpha)
        }
    }
}

impl FromStr for Color {
    type Err = LayerError;

    fn from_str(s: &str) -> LayerResult<Color> {
        parser::parse_color(s)
    }
}

/// A style that passed validation for one layer kind.
///
/// Attributes left unset fall back to whatever the engine draws by default.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    /// Fill or stroke color.
    pub color: Option<Color>,
    /// Opacity in `[0, 1]`.
    pub opacity: Option<f64>,
    /// Stroke width in pixels.
    pub border_width: Option<f64>,
    /// Stroke color of filled shapes and points.
    pub border_color: Option<Color>,
    /// Point radius in pixels.
    pub radius: Option<f64>,
}

impl Style {
    /// Checks every attribute of `descriptor` against the table of `kind`.
    ///
    /// Unknown attributes, attributes of another kind and malformed values are all
    /// rejected with [`LayerError::StyleValidation`].
    pub fn validate(kind: LayerKind, descriptor: &StyleDescriptor) -> LayerResult<Style> {
        let mut style = Style::default();
        for (name, value) in descriptor {
            let attr = StyleAttr::from_name(name).ok_or_else(|| {
                LayerError::StyleValidation(format!("unknown attribute `{}` for {} layer", name, kind))
            })?;
            if !kind.accepts(attr) {
                return Err(LayerError::StyleValidation(
                    format!("attribute `{}` is not supported by {} layers", name, kind)
                ));
            }
            match attr {
                StyleAttr::Color => style.color = Some(color_value(name, value)?),
                StyleAttr::BorderColor => style.border_color = Some(color_value(name, value)?),
                StyleAttr::Opacity => {
                    let x = number_value(name, value)?;
                    if !(0.0..=1.0).contains(&x) {
                        return Err(LayerError::StyleValidation(
                            format!("attribute `{}` must be within [0, 1], got {}", name, x)
                        ));
                    }
                    style.opacity = Some(x);
                }
                StyleAttr::BorderWidth => style.border_width = Some(non_negative(name, value)?),
                StyleAttr::Radius => style.radius = Some(non_negative(name, value)?),
            }
        }
        Ok(style)
    }

    /// The style a layer is rendered with when none was applied.
    pub fn default_for(kind: LayerKind) -> Style {
        let blue = Color::rgb(0x18, 0x90, 0xff);
        match kind {
            LayerKind::Line | LayerKind::Link => Style {
                color: Some(blue),
                opacity: Some(1.0),
                border_width: Some(1.0),
                ..Style::default()
            },
            LayerKind::Polygon => Style {
                color: Some(blue),
                opacity: Some(0.5),
                border_width: Some(1.0),
                border_color: Some(blue),
                ..Style::default()
            },
            LayerKind::Point => Style {
                color: Some(blue),
                opacity: Some(1.0),
                border_width: Some(1.0),
                border_color: Some(blue),
                radius: Some(4.0),
            },
        }
    }
}

fn color_value(name: &str, value: &Value) -> LayerResult<Color> {
    let text = value.as_text().ok_or_else(|| {
        LayerError::StyleValidation(format!("attribute `{}` expects a color, found {}", name, value.type_name()))
    })?;
    parser::parse_color(text).map_err(|e| {
        LayerError::StyleValidation(format!("attribute `{}`: {}", name, e))
    })
}

fn number_value(name: &str, value: &Value) -> LayerResult<f64> {
    match value.as_number() {
        Some(x) if x.is_finite() => Ok(x),
        Some(x) => Err(LayerError::StyleValidation(format!("attribute `{}` must be finite, got {}", name, x))),
        None => Err(LayerError::StyleValidation(
            format!("attribute `{}` expects a number, found {}", name, value.type_name())
        )),
    }
}

fn non_negative(name: &str, value: &Value) -> LayerResult<f64> {
    let x = number_value(name, value)?;
    if x < 0.0 {
        return Err(LayerError::StyleValidation(format!("attribute `{}` must not be negative, got {}", name, x)));
    }
    Ok(x)
}
