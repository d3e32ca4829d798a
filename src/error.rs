use std::path::PathBuf;

/// Errors raised while fetching or decoding the model asset.
#[derive(Debug, thiserror::Error)]
pub enum AssetLoadError {
    /// The asset could not be read or decoded.
    #[error("failed to load model {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: gltf::Error,
    },

    /// The asset decoded but held no triangle geometry.
    #[error("model {} contains no triangles", .0.display())]
    Empty(PathBuf),

    /// A primitive had indices but no positions.
    #[error("mesh {mesh} in {} has no position data", path.display())]
    MissingPositions { path: PathBuf, mesh: String },

    /// The loader thread went away before reporting a result.
    #[error("model loader for {} stopped without a result", .0.display())]
    Disconnected(PathBuf),
}

/// Top level viewer errors.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error(transparent)]
    AssetLoad(#[from] AssetLoadError),

    /// A parameter write outside the binding's declared range.
    #[error("{key} = {value} is outside {min}..={max}")]
    RangeViolation {
        key: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    /// A color written to a numeric binding or the other way round.
    #[error("{key} does not accept a {given} value")]
    KindMismatch {
        key: &'static str,
        given: &'static str,
    },

    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = ViewerError> = std::result::Result<T, E>;
