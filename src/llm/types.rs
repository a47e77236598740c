use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{AgentParseError, Result};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    Function,
}

/// 模型请求的函数调用描述，`arguments` 保留未解码的原始文本
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// 一次模型调用的输出
///
/// 在构造时即确定是纯文本还是函数调用，后续无需再检查字段。
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelResponse {
    PlainText {
        content: String,
    },
    FunctionCall {
        #[serde(default)]
        content: String,
        call: FunctionCall,
    },
}

impl ModelResponse {
    pub fn text(content: impl Into<String>) -> Self {
        ModelResponse::PlainText {
            content: content.into(),
        }
    }

    pub fn function_call(
        content: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        ModelResponse::FunctionCall {
            content: content.into(),
            call: FunctionCall::new(name, arguments),
        }
    }

    pub fn from_parts(content: impl Into<String>, call: Option<FunctionCall>) -> Self {
        let content = content.into();
        match call {
            Some(call) => ModelResponse::FunctionCall { content, call },
            None => ModelResponse::PlainText { content },
        }
    }

    pub fn content(&self) -> &str {
        match self {
            ModelResponse::PlainText { content } | ModelResponse::FunctionCall { content, .. } => {
                content
            }
        }
    }

    pub fn call(&self) -> Option<&FunctionCall> {
        match self {
            ModelResponse::PlainText { .. } => None,
            ModelResponse::FunctionCall { call, .. } => Some(call),
        }
    }

    /// 解析 OpenAI 风格的 assistant 消息
    ///
    /// 优先读取 `function_call`，其次读取 `tool_calls` 中的第一项。
    pub fn from_openai_message(message: &Value) -> Result<Self> {
        let object = message.as_object().ok_or_else(|| {
            AgentParseError::InvalidResponse("assistant message must be an object".into())
        })?;

        let content = match object.get("content") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        };

        let descriptor = if let Some(call) = object.get("function_call").filter(|v| !v.is_null())
        {
            Some(call)
        } else {
            match object.get("tool_calls").and_then(Value::as_array) {
                Some(calls) if !calls.is_empty() => {
                    if calls.len() > 1 {
                        warn!(
                            dropped = calls.len() - 1,
                            "model returned several tool calls, keeping the first"
                        );
                    }
                    Some(calls[0].get("function").ok_or_else(|| {
                        AgentParseError::InvalidResponse("tool call without `function`".into())
                    })?)
                }
                _ => None,
            }
        };

        let call = descriptor.map(parse_descriptor).transpose()?;
        Ok(Self::from_parts(content, call))
    }
}

fn parse_descriptor(descriptor: &Value) -> Result<FunctionCall> {
    let name = descriptor
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| AgentParseError::InvalidResponse("function call without `name`".into()))?;
    let arguments = match descriptor.get("arguments") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    };
    Ok(FunctionCall::new(name, arguments))
}

/// 暴露给模型的可调用函数
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FunctionDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub parameters: Value,
}

impl FunctionDefinition {
    pub fn new(name: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: None,
            parameters,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LlmMessage {
    pub role: MessageRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
}

impl LlmMessage {
    fn with_role(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            name: None,
            function_call: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::with_role(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>, call: Option<FunctionCall>) -> Self {
        Self {
            function_call: call,
            ..Self::with_role(MessageRole::Assistant, content)
        }
    }

    pub fn function(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::with_role(MessageRole::Function, content)
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LlmRequest {
    pub messages: Vec<LlmMessage>,
    #[serde(default)]
    pub functions: Vec<FunctionDefinition>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl LlmRequest {
    pub fn new(messages: Vec<LlmMessage>) -> Self {
        Self {
            messages,
            functions: Vec::new(),
            temperature: default_temperature(),
            metadata: None,
        }
    }

    pub fn with_functions(mut self, functions: Vec<FunctionDefinition>) -> Self {
        self.functions = functions;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

pub(crate) fn default_temperature() -> f32 {
    0.0
}
