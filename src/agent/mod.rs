pub mod classifier;
pub mod executor;
pub mod prompt;
pub mod step;

pub use classifier::{
    ClassifierConfig, ResponseClassifier, DEFAULT_FINAL_RESPONSE_NAME, DEFAULT_OUTPUT_KEY,
};
pub use executor::AgentExecutor;
pub use step::{AgentRun, AgentStep, FinalResult, StepRecord, ToolInvocationRequest};
