use std::sync::Arc;

use async_trait::async_trait;

use super::types::{LlmRequest, ModelResponse};
use crate::error::Result;

/// 绑定了函数定义的对话模型
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: LlmRequest) -> Result<ModelResponse>;
}

pub type DynLlmClient = Arc<dyn LlmClient>;
