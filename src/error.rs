use thiserror::Error;

use crate::schema::SchemaError;

pub type Result<T> = std::result::Result<T, AgentParseError>;

#[derive(Debug, Error)]
pub enum AgentParseError {
    #[error("failed to decode arguments of function `{function}`: {source}")]
    Decode {
        function: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("final response `{0}` carried no output fields")]
    EmptyFinalOutput(String),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("invalid model response: {0}")]
    InvalidResponse(String),
    #[error("tool `{0}` not registered")]
    ToolNotRegistered(String),
    #[error("{kind} manifest does not match registered name `{name}`")]
    ManifestMismatch { kind: &'static str, name: String },
    #[error("maximum iterations {0} exceeded")]
    MaxIterationsExceeded(u32),
    #[error("config error: {0}")]
    Config(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
