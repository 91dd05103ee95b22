//! Layer kinds and the style attributes each of them accepts.

use std::fmt::{ Display, Formatter };
use std::fmt;
use serde::{ Deserialize, Serialize };

/// The rendering primitive a layer draws with.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    /// Open polylines, e.g. administrative boundaries.
    Line,
    /// Filled rings, e.g. block polygons.
    Polygon,
    /// Round points, e.g. cities or shops.
    Point,
    /// Straight segments between two coordinates, e.g. the legs of a tour.
    Link,
}

impl LayerKind {
    /// Every kind, in declaration order.
    pub const ALL: [LayerKind; 4] = [LayerKind::Line, LayerKind::Polygon, LayerKind::Point, LayerKind::Link];

    /// Style attributes recognized for this kind.
    pub fn attributes(self) -> &'static [StyleAttr] {
        use StyleAttr::*;
        match self {
            LayerKind::Line => &[Color, Opacity, BorderWidth],
            LayerKind::Polygon => &[Color, Opacity, BorderWidth, BorderColor],
            LayerKind::Point => &[Color, Opacity, BorderWidth, BorderColor, Radius],
            LayerKind::Link => &[Color, Opacity, BorderWidth],
        }
    }

    /// Returns `true` if `attr` may appear in a style for this kind.
    pub fn accepts(self, attr: StyleAttr) -> bool {
        self.attributes().contains(&attr)
    }
}

impl Display for LayerKind {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        f.write_str(
            match *self {
                LayerKind::Line => "line",
                LayerKind::Polygon => "polygon",
                LayerKind::Point => "point",
                LayerKind::Link => "link",
            }
        )
    }
}

/// A named style attribute.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum StyleAttr {
    /// Fill or stroke color.
    Color,
    /// Opacity in `[0, 1]`.
    Opacity,
    /// Stroke width in pixels.
    BorderWidth,
    /// Stroke color of filled shapes.
    BorderColor,
    /// Point radius in pixels.
    Radius,
}

impl StyleAttr {
    /// The attribute name as it appears in a style descriptor.
    pub fn name(self) -> &'static str {
        match self {
            StyleAttr::Color => "color",
            StyleAttr::Opacity => "opacity",
            StyleAttr::BorderWidth => "borderWidth",
            StyleAttr::BorderColor => "borderColor",
            StyleAttr::Radius => "radius",
        }
    }

    /// Looks an attribute up by its descriptor name.
    pub fn from_name(name: &str) -> Option<StyleAttr> {
        match name {
            "color" => Some(StyleAttr::Color),
            "opacity" => Some(StyleAttr::Opacity),
            "borderWidth" => Some(StyleAttr::BorderWidth),
            "borderColor" => Some(StyleAttr::BorderColor),
            "radius" => Some(StyleAttr::Radius),
            _ => None,
        }
    }
}
