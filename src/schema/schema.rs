use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Schema 类型枚举
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum SchemaKind {
    #[serde(rename = "null")]
    Null,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "integer")]
    Integer,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "string")]
    String,
    #[serde(rename = "array")]
    Array { items: Box<Schema> },
    #[serde(rename = "object")]
    Object {
        #[serde(default)]
        properties: BTreeMap<String, Schema>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        required: Vec<String>,
        #[serde(
            rename = "additionalProperties",
            default = "Schema::allow_additional",
            skip_serializing_if = "Schema::is_open"
        )]
        additional: bool,
    },
    #[serde(rename = "any")]
    Any,
}

/// 函数参数与最终输出使用的结构描述
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Schema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub kind: SchemaKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Schema {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            name: None,
            kind,
            description: None,
        }
    }

    pub fn string() -> Self {
        Self::new(SchemaKind::String)
    }

    pub fn array_of(items: Schema) -> Self {
        Self::new(SchemaKind::Array {
            items: Box::new(items),
        })
    }

    /// 构造对象 Schema，`required` 中列出的字段必须出现
    pub fn object<I, R>(properties: I, required: R) -> Self
    where
        I: IntoIterator<Item = (&'static str, Schema)>,
        R: IntoIterator<Item = &'static str>,
    {
        Self::new(SchemaKind::Object {
            properties: properties
                .into_iter()
                .map(|(key, schema)| (key.to_string(), schema))
                .collect(),
            required: required.into_iter().map(str::to_string).collect(),
            additional: true,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn closed(mut self) -> Self {
        if let SchemaKind::Object { additional, .. } = &mut self.kind {
            *additional = false;
        }
        self
    }

    fn allow_additional() -> bool {
        true
    }

    fn is_open(additional: &bool) -> bool {
        *additional
    }

    /// 渲染为 JSON Schema，用于函数调用的 `parameters` 字段
    pub fn to_json_schema(&self) -> Value {
        let mut rendered = match &self.kind {
            SchemaKind::Null => json!({ "type": "null" }),
            SchemaKind::Boolean => json!({ "type": "boolean" }),
            SchemaKind::Integer => json!({ "type": "integer" }),
            SchemaKind::Number => json!({ "type": "number" }),
            SchemaKind::String => json!({ "type": "string" }),
            SchemaKind::Array { items } => json!({
                "type": "array",
                "items": items.to_json_schema(),
            }),
            SchemaKind::Object {
                properties,
                required,
                additional,
            } => {
                let props: Map<String, Value> = properties
                    .iter()
                    .map(|(key, schema)| (key.clone(), schema.to_json_schema()))
                    .collect();
                let mut object = json!({
                    "type": "object",
                    "properties": props,
                });
                if !required.is_empty() {
                    object["required"] = json!(required);
                }
                if !additional {
                    object["additionalProperties"] = Value::Bool(false);
                }
                object
            }
            SchemaKind::Any => json!({}),
        };

        if let (Some(description), Some(map)) = (&self.description, rendered.as_object_mut()) {
            map.insert("description".into(), Value::String(description.clone()));
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_schema_renders_required_and_descriptions() {
        let schema = Schema::object(
            [
                ("answer", Schema::string().with_description("final answer")),
                ("sources", Schema::array_of(Schema::string())),
            ],
            ["answer", "sources"],
        )
        .closed();

        assert_eq!(
            schema.to_json_schema(),
            json!({
                "type": "object",
                "properties": {
                    "answer": { "type": "string", "description": "final answer" },
                    "sources": { "type": "array", "items": { "type": "string" } }
                },
                "required": ["answer", "sources"],
                "additionalProperties": false
            })
        );
    }

    #[test]
    fn additional_properties_key_round_trips() {
        let schema: Schema = serde_json::from_value(json!({
            "type": "object",
            "properties": { "answer": { "type": "string" } },
            "additionalProperties": false
        }))
        .unwrap();

        assert!(matches!(
            schema.kind,
            SchemaKind::Object { additional: false, .. }
        ));
        assert_eq!(schema.to_json_schema()["additionalProperties"], json!(false));
        assert_eq!(
            serde_json::to_value(&schema).unwrap()["additionalProperties"],
            json!(false)
        );
    }

    #[test]
    fn schema_deserializes_from_tagged_json() {
        let schema: Schema = serde_json::from_value(json!({
            "type": "object",
            "properties": { "answer": { "type": "string" } },
            "required": ["answer"]
        }))
        .unwrap();

        match schema.kind {
            SchemaKind::Object {
                properties,
                required,
                additional,
            } => {
                assert!(properties.contains_key("answer"));
                assert_eq!(required, vec!["answer"]);
                assert!(additional);
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }
}
