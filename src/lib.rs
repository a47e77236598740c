pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod schema;
pub mod tools;
pub mod utils;

pub use agent::{
    AgentExecutor, AgentRun, AgentStep, ClassifierConfig, FinalResult, ResponseClassifier,
    StepRecord, ToolInvocationRequest,
};
pub use config::{AgentConfig, EnvConfig, ExecutorConfig, LlmConfig};
pub use error::{AgentParseError, Result};
#[cfg(feature = "openai-client")]
pub use llm::OpenAiClient;
pub use llm::{
    DynLlmClient, FunctionCall, FunctionDefinition, LlmClient, LlmMessage, LlmRequest,
    MessageRole, ModelResponse, ScriptedClient,
};
pub use schema::{validate_value, Schema, SchemaError, SchemaKind, SchemaRegistry};
pub use tools::{EchoTool, Tool, ToolManifest, ToolManifestBuilder, ToolRegistry};
pub use utils::logging;
