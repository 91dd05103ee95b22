//! Parses style literals, map style ids and datasets.
//!
//! Datasets are JSON arrays of records. The generators behind the published
//! map pages wrote them as script assignments instead, e.g.
//! `MS.data.bricks = [{"coordinates": [...]}];`. [`read_dataset`] accepts both and
//! reports the binding name when there is one.

use std::fmt::Debug;
use std::io::Read;

use tracing::debug;

use crate::errors::{ LayerError, LayerResult };
use crate::layer::{ Color, Dataset };
use crate::map::StyleId;

mod style_grammar;

use self::style_grammar::grammar;

fn parse_rethrow<T, E: Debug>(input: &str, e: E, message: &str) -> LayerResult<T> {
    Err(LayerError::Parse(
        format!("{}\n\tString: '{}'\n\tError: {:?}", message, input, e)
    ))
}

/// Parses a color literal: `#rgb`, `#rrggbb`, `rgb(r,g,b)` or `rgba(r,g,b,a)`.
///
/// # Examples
///
/// ```rust
/// # use geolayers::parser::parse_color;
/// # use geolayers::layer::Color;
/// assert_eq!(parse_color("#a1dab4").unwrap(), Color::rgb(0xa1, 0xda, 0xb4));
/// assert_eq!(parse_color("rgba(255, 0, 0, 0.5)").unwrap(), Color::rgba(255, 0, 0, 0.5));
/// assert!(parse_color("red").is_err());
/// ```
pub fn parse_color(input: &str) -> LayerResult<Color> {
    match grammar::color(input) {
        Ok(c) => Ok(c),
        Err(e) => parse_rethrow(input, e, "Couldn't parse color."),
    }
}

/// Parses a map style id: `<scheme>://styles/<name>` or a bare name.
pub fn parse_style_id(input: &str) -> LayerResult<StyleId> {
    match grammar::style_id(input) {
        Ok(id) => Ok(id),
        Err(e) => parse_rethrow(input, e, "Couldn't parse map style id."),
    }
}

/// Parses a `"lng,lat"` coordinate text into its two numbers.
pub fn parse_coordinate_text(input: &str) -> LayerResult<(f64, f64)> {
    match grammar::coordinate_text(input) {
        Ok(pair) => Ok(pair),
        Err(e) => parse_rethrow(input, e, "Couldn't parse coordinate."),
    }
}

/// A dataset read from text, with the name it was bound to if any.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDataset {
    /// Binding of a script assignment, e.g. `S.data.tour`.
    pub binding: Option<String>,
    /// The records.
    pub records: Dataset,
}

/// Parses a dataset from text.
///
/// # Examples
///
/// ```rust
/// # use geolayers::parser::parse_dataset;
/// let loaded = parse_dataset(r#"S.data.cities = [{"name": "Beijing", "coordinates": [116.40, 39.90]}];"#).unwrap();
/// assert_eq!(loaded.binding.as_deref(), Some("S.data.cities"));
/// assert_eq!(loaded.records.len(), 1);
/// ```
pub fn parse_dataset(text: &str) -> LayerResult<LoadedDataset> {
    let trimmed = text.trim();
    let (binding, body) = if trimmed.starts_with('[') {
        (None, trimmed)
    } else {
        match grammar::assignment(trimmed) {
            Ok((binding, offset)) => {
                let body = trimmed[offset..].trim();
                let body = body.strip_suffix(';').unwrap_or(body).trim_end();
                (Some(binding.to_string()), body)
            }
            Err(e) => return parse_rethrow(first_line(trimmed), e, "Expected a JSON array or a script assignment."),
        }
    };
    let records: Dataset = serde_json::from_str(body)?;
    debug!(binding = binding.as_deref().unwrap_or("-"), records = records.len(), "dataset parsed");
    Ok(LoadedDataset { binding, records })
}

/// Reads and parses a whole dataset from `source`.
pub fn read_dataset<R: Read>(source: &mut R) -> LayerResult<LoadedDataset> {
    let mut text = String::new();
    source.read_to_string(&mut text)?;
    parse_dataset(&text)
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}
