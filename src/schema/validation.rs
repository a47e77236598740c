use serde_json::Value;

use super::error::SchemaError;
use super::schema::{Schema, SchemaKind};

/// 验证值是否符合 Schema
///
/// `path` 记录当前所在的字段路径，出错时随错误一起返回。
pub fn validate_value(
    schema: &Schema,
    value: &Value,
    path: &mut Vec<String>,
) -> std::result::Result<(), SchemaError> {
    match &schema.kind {
        SchemaKind::Null => expect(value.is_null(), "null", path),
        SchemaKind::Boolean => expect(value.is_boolean(), "boolean", path),
        SchemaKind::Integer => expect(value.is_i64() || value.is_u64(), "integer", path),
        SchemaKind::Number => expect(value.is_number(), "number", path),
        SchemaKind::String => expect(value.is_string(), "string", path),
        SchemaKind::Any => Ok(()),
        SchemaKind::Array { items } => {
            let array = value
                .as_array()
                .ok_or_else(|| SchemaError::at(path, "expected array"))?;
            for (idx, element) in array.iter().enumerate() {
                path.push(idx.to_string());
                validate_value(items, element, path)?;
                path.pop();
            }
            Ok(())
        }
        SchemaKind::Object {
            properties,
            required,
            additional,
        } => {
            let object = value
                .as_object()
                .ok_or_else(|| SchemaError::at(path, "expected object"))?;

            if let Some(missing) = required.iter().find(|key| !object.contains_key(*key)) {
                path.push(missing.clone());
                return Err(SchemaError::at(
                    path,
                    format!("missing required property `{missing}`"),
                ));
            }

            for (key, val) in object {
                path.push(key.clone());
                match properties.get(key) {
                    Some(sub_schema) => validate_value(sub_schema, val, path)?,
                    None if !additional => {
                        return Err(SchemaError::at(
                            path,
                            format!("unexpected property `{key}`"),
                        ))
                    }
                    None => {}
                }
                path.pop();
            }
            Ok(())
        }
    }
}

fn expect(ok: bool, what: &str, path: &[String]) -> std::result::Result<(), SchemaError> {
    if ok {
        Ok(())
    } else {
        Err(SchemaError::at(path, format!("expected {what}")))
    }
}
