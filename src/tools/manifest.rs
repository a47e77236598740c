use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::llm::FunctionDefinition;
use crate::schema::Schema;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ToolManifest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Schema>,
}

impl ToolManifest {
    pub fn builder(name: impl Into<String>) -> ToolManifestBuilder {
        ToolManifestBuilder::new(name)
    }

    /// 转换为绑定到模型的函数定义，未声明参数时使用开放对象
    pub fn to_function_definition(&self) -> FunctionDefinition {
        let parameters = self
            .parameters
            .as_ref()
            .map(Schema::to_json_schema)
            .unwrap_or_else(|| json!({ "type": "object", "properties": {} }));
        let definition = FunctionDefinition::new(self.name.clone(), parameters);
        match &self.description {
            Some(description) => definition.with_description(description.clone()),
            None => definition,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ToolManifestBuilder {
    manifest: ToolManifest,
}

impl ToolManifestBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            manifest: ToolManifest {
                name: name.into(),
                description: None,
                parameters: None,
            },
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.manifest.description = Some(description.into());
        self
    }

    pub fn parameters(mut self, schema: Schema) -> Self {
        self.manifest.parameters = Some(schema);
        self
    }

    pub fn build(self) -> ToolManifest {
        self.manifest
    }
}
