pub mod agent_config;
pub mod env;

pub use agent_config::{AgentConfig, ExecutorConfig, LlmConfig, DEFAULT_MAX_ITERATIONS};
pub use env::EnvConfig;
