use crate::error::{AgentParseError, Result};
use std::env;

/// 环境变量配置管理
pub struct EnvConfig;

impl EnvConfig {
    /// 解析 API Key
    ///
    /// 优先级：
    /// 1. `${VAR_NAME}` 形式时读取对应环境变量
    /// 2. 为空时读取 `default_env_var`
    /// 3. 其余情况原样返回
    pub fn get_api_key(api_key: &str, default_env_var: &str) -> Result<String> {
        if let Some(name) = api_key
            .strip_prefix("${")
            .and_then(|rest| rest.strip_suffix('}'))
        {
            Self::get_env(name)
        } else if api_key.is_empty() {
            Self::get_env(default_env_var)
        } else {
            Ok(api_key.to_string())
        }
    }

    pub fn get_env(key: &str) -> Result<String> {
        env::var(key).map_err(|_| {
            AgentParseError::Config(format!("environment variable `{key}` is not set"))
        })
    }

    pub fn get_env_optional(key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_key_is_returned_unchanged() {
        let result = EnvConfig::get_api_key("sk-1234567890abcdef", "AGENTPARSE_TEST_UNUSED");
        assert_eq!(result.unwrap(), "sk-1234567890abcdef");
    }

    #[test]
    fn placeholder_reads_named_variable() {
        env::set_var("AGENTPARSE_TEST_KEY", "from_env");
        let result = EnvConfig::get_api_key("${AGENTPARSE_TEST_KEY}", "AGENTPARSE_TEST_FALLBACK");
        assert_eq!(result.unwrap(), "from_env");
        env::remove_var("AGENTPARSE_TEST_KEY");
    }

    #[test]
    fn empty_key_reads_default_variable() {
        env::set_var("AGENTPARSE_TEST_DEFAULT", "default_value");
        let result = EnvConfig::get_api_key("", "AGENTPARSE_TEST_DEFAULT");
        assert_eq!(result.unwrap(), "default_value");
        env::remove_var("AGENTPARSE_TEST_DEFAULT");
    }

    #[test]
    fn missing_variable_is_config_error() {
        let result = EnvConfig::get_api_key("${AGENTPARSE_TEST_MISSING}", "X");
        assert!(matches!(result, Err(AgentParseError::Config(_))));
    }
}
