use thiserror::Error;

/// Errors that can occur when bootstrapping a map or building its layers.
#[derive(Debug, Error)]
pub enum LayerError {
    /// An I/O error occurred while reading a dataset or configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A dataset, configuration or style literal could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),
    /// The map configuration is invalid or the map surface is unavailable.
    #[error("Map initialization failed: {0}")]
    MapInit(String),
    /// The engine could not allocate a layer.
    #[error("Engine initialization failed: {0}")]
    EngineInit(String),
    /// A style attribute is unknown for the layer kind or its value is malformed.
    #[error("Invalid style: {0}")]
    StyleValidation(String),
    /// A dataset record is missing its geometry field or the geometry has the wrong shape.
    #[error("Field mapping error: {0}")]
    FieldMapping(String),
    /// A layer with the same name is already part of the composition.
    #[error("Duplicate layer: {0}")]
    Duplicate(String),
}

impl From<serde_json::Error> for LayerError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            LayerError::Io(e.into())
        } else {
            LayerError::Parse(e.to_string())
        }
    }
}

/// A specialized `Result` type for layer operations.
pub type LayerResult<T> = Result<T, LayerError>;
