use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::env::EnvConfig;
use crate::agent::ClassifierConfig;
use crate::error::{AgentParseError, Result};
use crate::schema::{Schema, SchemaRegistry};

pub const DEFAULT_MAX_ITERATIONS: u32 = 15;
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// 顶层配置文件（JSON），各节均可省略
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AgentConfig {
    pub classifier: ClassifierConfig,
    pub executor: ExecutorConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm: Option<LlmConfig>,
    /// 具名 Schema，可被 `classifier.final_response_schema_ref` 引用
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub schemas: BTreeMap<String, Schema>,
}

impl AgentConfig {
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| AgentParseError::Config(format!("invalid agent config: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    pub fn schema_registry(&self) -> SchemaRegistry {
        self.schemas
            .iter()
            .map(|(name, schema)| (name.clone(), schema.clone()))
            .collect()
    }

    /// 展开最终响应 Schema 的名称引用
    ///
    /// 引用与内联 Schema 不能同时出现；引用未登记时返回 `Schema` 错误。
    pub fn resolve_classifier(&self) -> Result<ClassifierConfig> {
        let mut classifier = self.classifier.clone();
        if let Some(name) = classifier.final_response_schema_ref.take() {
            if classifier.final_response_schema.is_some() {
                return Err(AgentParseError::Config(format!(
                    "final response schema given both inline and by reference `{name}`"
                )));
            }
            let schema = self.schema_registry().get(&name)?.clone();
            classifier.final_response_schema = Some(schema);
        }
        Ok(classifier)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExecutorConfig {
    pub max_iterations: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    pub temperature: f32,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            system_prompt: None,
            temperature: crate::llm::default_temperature(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LlmConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 支持 `${VAR}` 占位，留空时读取 `OPENAI_API_KEY`
    #[serde(default)]
    pub api_key: String,
    pub model: String,
}

impl LlmConfig {
    pub fn resolve_api_key(&self) -> Result<String> {
        EnvConfig::get_api_key(&self.api_key, DEFAULT_API_KEY_ENV)
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}
