use thiserror::Error;

/// Schema 错误类型
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("schema `{0}` not registered")]
    NotRegistered(String),
    #[error("schema validation failed at `{}`: {message}", .path.join("."))]
    Validation { message: String, path: Vec<String> },
}

impl SchemaError {
    pub(crate) fn at(path: &[String], message: impl Into<String>) -> Self {
        SchemaError::Validation {
            message: message.into(),
            path: path.to_vec(),
        }
    }

    /// 校验失败时的字段路径，未注册错误返回空路径
    pub fn path(&self) -> &[String] {
        match self {
            SchemaError::NotRegistered(_) => &[],
            SchemaError::Validation { path, .. } => path,
        }
    }
}
