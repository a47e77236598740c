use std::path::Path;

use serde_json::Value;

use crate::agent::{AgentStep, ResponseClassifier};
use crate::config::AgentConfig;
use crate::error::{AgentParseError, Result};
use crate::llm::{FunctionDefinition, ModelResponse};

/// 读取配置文件，未指定时使用默认配置
pub fn load_config(path: Option<&Path>) -> Result<AgentConfig> {
    match path {
        Some(path) => AgentConfig::from_path(path),
        None => Ok(AgentConfig::default()),
    }
}

/// 解析一条响应并分类
///
/// `openai` 为真时输入是 OpenAI assistant 消息，否则是带 `kind` 标签的 `ModelResponse`。
pub fn classify_input(
    raw: &str,
    config: &AgentConfig,
    final_name: Option<&str>,
    openai: bool,
) -> Result<AgentStep> {
    let mut classifier = config.resolve_classifier()?;
    if let Some(name) = final_name {
        classifier.final_response_name = name.to_string();
    }

    let response = if openai {
        let message: Value = serde_json::from_str(raw)
            .map_err(|e| AgentParseError::InvalidResponse(format!("input is not valid JSON: {e}")))?;
        ModelResponse::from_openai_message(&message)?
    } else {
        serde_json::from_str::<ModelResponse>(raw).map_err(|e| {
            AgentParseError::InvalidResponse(format!("input is not a model response: {e}"))
        })?
    };

    ResponseClassifier::new(classifier).classify(&response)
}

pub fn final_response_definition(config: &AgentConfig) -> Result<FunctionDefinition> {
    Ok(ResponseClassifier::new(config.resolve_classifier()?).final_response_function())
}
