use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::instrument;

use super::client::LlmClient;
use super::types::{LlmRequest, ModelResponse};
use crate::config::LlmConfig;
use crate::error::{AgentParseError, Result};

/// OpenAI 兼容的 chat/completions 客户端
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new<S: Into<String>>(api_key: S, model: S) -> Self {
        Self::with_base_url("https://api.openai.com/v1", api_key, model)
    }

    pub fn with_base_url<S1, S2, S3>(base_url: S1, api_key: S2, model: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let api_key = config.resolve_api_key()?;
        Ok(Self::with_base_url(
            config.base_url.clone(),
            api_key,
            config.model.clone(),
        ))
    }

    fn build_body(&self, request: &LlmRequest) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": request.messages,
            "temperature": request.temperature,
        });
        if !request.functions.is_empty() {
            body["functions"] = json!(request.functions);
            body["function_call"] = json!("auto");
        }
        body
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn complete(&self, request: LlmRequest) -> Result<ModelResponse> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = self.build_body(&request);

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AgentParseError::Other(e.into()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AgentParseError::Other(anyhow::anyhow!(
                "chat completion request failed with status {}",
                status
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| AgentParseError::Other(e.into()))?;
        let message = payload["choices"]
            .get(0)
            .map(|choice| &choice["message"])
            .ok_or_else(|| AgentParseError::InvalidResponse("missing choices[0].message".into()))?;

        ModelResponse::from_openai_message(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{FunctionCall, FunctionDefinition, LlmMessage};

    #[test]
    fn body_includes_functions_only_when_present() {
        let client = OpenAiClient::new("sk-test", "gpt-4o-mini");

        let plain = client.build_body(&LlmRequest::new(vec![LlmMessage::user("hi")]));
        assert!(plain.get("functions").is_none());
        assert_eq!(plain["messages"][0]["role"], "user");

        let request = LlmRequest::new(vec![LlmMessage::user("hi")]).with_functions(vec![
            FunctionDefinition::new("Response", json!({ "type": "object" })),
        ]);
        let body = client.build_body(&request);
        assert_eq!(body["functions"][0]["name"], "Response");
        assert_eq!(body["function_call"], "auto");
        assert!(body.get("tools").is_none());
        assert!(body.get("tool_choice").is_none());
    }

    #[test]
    fn scratchpad_uses_function_call_message_shape() {
        let client = OpenAiClient::new("sk-test", "gpt-4o-mini");
        let request = LlmRequest::new(vec![
            LlmMessage::user("hi"),
            LlmMessage::assistant(
                "looking it up",
                Some(FunctionCall::new("search", r#"{"q":"rust"}"#)),
            ),
            LlmMessage::function("search", "found it"),
        ]);
        let body = client.build_body(&request);

        let assistant = &body["messages"][1];
        assert_eq!(assistant["role"], "assistant");
        assert_eq!(assistant["function_call"]["name"], "search");
        assert_eq!(assistant["function_call"]["arguments"], r#"{"q":"rust"}"#);

        let observation = &body["messages"][2];
        assert_eq!(observation["role"], "function");
        assert_eq!(observation["name"], "search");
        assert_eq!(observation["content"], "found it");
    }
}
