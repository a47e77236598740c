mod client;
#[cfg(feature = "openai-client")]
mod openai;
mod scripted;
mod types;

pub use client::{DynLlmClient, LlmClient};
#[cfg(feature = "openai-client")]
pub use openai::OpenAiClient;
pub use scripted::ScriptedClient;
pub use types::{
    FunctionCall, FunctionDefinition, LlmMessage, LlmRequest, MessageRole, ModelResponse,
};

pub(crate) use types::default_temperature;
