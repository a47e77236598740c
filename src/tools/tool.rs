use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// 可被代理调用的工具，返回值作为观察结果回填给模型
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    async fn call(&self, input: Value) -> Result<String>;
}
