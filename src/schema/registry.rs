use std::collections::BTreeMap;

use serde_json::Value;

use super::error::SchemaError;
use super::schema::Schema;
use super::validation::validate_value;

/// 按名称登记的 Schema，供配置中以名称引用最终响应结构
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, Schema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self {
            schemas: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, name: impl Into<String>, schema: Schema) {
        self.schemas.insert(name.into(), schema);
    }

    pub fn get(&self, name: &str) -> std::result::Result<&Schema, SchemaError> {
        self.schemas
            .get(name)
            .ok_or_else(|| SchemaError::NotRegistered(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn validate(&self, name: &str, value: &Value) -> std::result::Result<(), SchemaError> {
        let schema = self.get(name)?;
        validate_value(schema, value, &mut Vec::new())
    }
}

impl FromIterator<(String, Schema)> for SchemaRegistry {
    fn from_iter<T: IntoIterator<Item = (String, Schema)>>(iter: T) -> Self {
        Self {
            schemas: iter.into_iter().collect(),
        }
    }
}
