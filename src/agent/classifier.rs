use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use super::step::{AgentStep, FinalResult, ToolInvocationRequest};
use crate::error::{AgentParseError, Result};
use crate::llm::{FunctionDefinition, ModelResponse};
use crate::schema::{validate_value, Schema};

pub const DEFAULT_FINAL_RESPONSE_NAME: &str = "Response";
pub const DEFAULT_OUTPUT_KEY: &str = "output";

/// 分类器配置
///
/// `final_response_name` 必须与绑定到模型的最终响应函数同名，
/// 否则最终答案会被当作普通工具调用。
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClassifierConfig {
    pub final_response_name: String,
    pub output_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_response_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_response_schema: Option<Schema>,
    /// 引用 `AgentConfig::schemas` 中登记的 Schema，由 `AgentConfig::resolve_classifier` 展开
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_response_schema_ref: Option<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            final_response_name: DEFAULT_FINAL_RESPONSE_NAME.to_string(),
            output_key: DEFAULT_OUTPUT_KEY.to_string(),
            final_response_description: None,
            final_response_schema: None,
            final_response_schema_ref: None,
        }
    }
}

impl ClassifierConfig {
    pub fn with_final_response_name(mut self, name: impl Into<String>) -> Self {
        self.final_response_name = name.into();
        self
    }

    pub fn with_output_key(mut self, key: impl Into<String>) -> Self {
        self.output_key = key.into();
        self
    }

    pub fn with_final_response_schema(mut self, schema: Schema) -> Self {
        self.final_response_schema = Some(schema);
        self
    }

    pub fn with_final_response_description(mut self, description: impl Into<String>) -> Self {
        self.final_response_description = Some(description.into());
        self
    }
}

/// 将模型响应分类为最终结果或工具调用
///
/// 不持有可变状态，同一响应多次分类得到相同结果。
#[derive(Clone, Debug, Default)]
pub struct ResponseClassifier {
    config: ClassifierConfig,
}

impl ResponseClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        if let (Some(name), None) = (
            &config.final_response_schema_ref,
            &config.final_response_schema,
        ) {
            warn!(schema = %name, "final response schema reference was not resolved, validation disabled");
        }
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn final_response_name(&self) -> &str {
        &self.config.final_response_name
    }

    pub fn classify(&self, response: &ModelResponse) -> Result<AgentStep> {
        let (content, call) = match response {
            ModelResponse::PlainText { content } => {
                debug!("plain text response, finishing");
                let mut return_values = Map::new();
                return_values.insert(self.config.output_key.clone(), Value::String(content.clone()));
                return Ok(AgentStep::Finish(FinalResult {
                    return_values,
                    log: content.clone(),
                }));
            }
            ModelResponse::FunctionCall { content, call } => (content, call),
        };

        if call.name == self.config.final_response_name {
            let return_values: Map<String, Value> = serde_json::from_str(&call.arguments)
                .map_err(|source| AgentParseError::Decode {
                    function: call.name.clone(),
                    source,
                })?;
            if return_values.is_empty() {
                return Err(AgentParseError::EmptyFinalOutput(call.name.clone()));
            }
            if let Some(schema) = &self.config.final_response_schema {
                validate_value(schema, &Value::Object(return_values.clone()), &mut Vec::new())?;
            }
            debug!(fields = return_values.len(), "final response function called");
            return Ok(AgentStep::Finish(FinalResult {
                return_values,
                log: content.clone(),
            }));
        }

        let tool_input: Value =
            serde_json::from_str(&call.arguments).map_err(|source| AgentParseError::Decode {
                function: call.name.clone(),
                source,
            })?;
        debug!(tool = %call.name, "tool invocation requested");
        Ok(AgentStep::Invoke(ToolInvocationRequest {
            tool: call.name.clone(),
            tool_input,
            log: content.clone(),
        }))
    }

    /// 与分类器约定一致的最终响应函数定义
    pub fn final_response_function(&self) -> FunctionDefinition {
        let parameters = self
            .config
            .final_response_schema
            .as_ref()
            .map(Schema::to_json_schema)
            .unwrap_or_else(|| json!({ "type": "object", "properties": {} }));
        let definition = FunctionDefinition::new(self.config.final_response_name.clone(), parameters);
        match &self.config.final_response_description {
            Some(description) => definition.with_description(description.clone()),
            None => definition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_uses_configured_output_key() {
        let classifier =
            ResponseClassifier::new(ClassifierConfig::default().with_output_key("answer"));
        let step = classifier.classify(&ModelResponse::text("done")).unwrap();

        match step {
            AgentStep::Finish(result) => {
                assert_eq!(result.get("answer"), Some(&json!("done")));
                assert_eq!(result.log, "done");
            }
            other => panic!("unexpected step: {other:?}"),
        }
    }

    #[test]
    fn final_response_must_be_an_object() {
        let classifier = ResponseClassifier::default();
        let response = ModelResponse::function_call("", "Response", r#"["x"]"#);
        assert!(matches!(
            classifier.classify(&response),
            Err(AgentParseError::Decode { .. })
        ));
    }

    #[test]
    fn empty_final_response_is_rejected() {
        let classifier = ResponseClassifier::default();
        let response = ModelResponse::function_call("", "Response", "{}");
        assert!(matches!(
            classifier.classify(&response),
            Err(AgentParseError::EmptyFinalOutput(name)) if name == "Response"
        ));
    }

    #[test]
    fn name_match_is_case_sensitive() {
        let classifier = ResponseClassifier::default();
        let response = ModelResponse::function_call("", "response", r#"{"answer":"x"}"#);
        assert!(!classifier.classify(&response).unwrap().is_finish());
    }

    #[test]
    fn final_response_function_defaults_to_open_object() {
        let definition = ResponseClassifier::default().final_response_function();
        assert_eq!(definition.name, "Response");
        assert_eq!(definition.parameters["type"], "object");
        assert!(definition.description.is_none());
    }
}
