use crate::tree::ComponentId;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid alignment: {0}")]
    InvalidAlignment(String),

    #[error("{0} is not implemented for this component")]
    NotImplemented(&'static str),

    #[error("surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompilation { stage: ShaderStage, log: String },

    #[error("failed to load asset '{path}': {reason}")]
    AssetLoad { path: String, reason: String },

    #[error("unknown component {0:?}")]
    UnknownComponent(ComponentId),

    #[error("component {0:?} has no position yet")]
    Unpositioned(ComponentId),
}
