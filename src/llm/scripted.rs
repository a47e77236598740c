use std::collections::VecDeque;
use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use parking_lot::Mutex;

use super::client::LlmClient;
use super::types::{LlmRequest, ModelResponse};
use crate::error::{AgentParseError, Result};

/// 按顺序回放预设响应的本地客户端，并记录收到的每个请求
#[derive(Clone, Default)]
pub struct ScriptedClient {
    responses: Arc<Mutex<VecDeque<ModelResponse>>>,
    requests: Arc<Mutex<Vec<LlmRequest>>>,
}

impl ScriptedClient {
    pub fn new<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = ModelResponse>,
    {
        Self {
            responses: Arc::new(Mutex::new(responses.into_iter().collect())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn push(&self, response: ModelResponse) {
        self.responses.lock().push_back(response);
    }

    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().clone()
    }

    pub fn remaining(&self) -> usize {
        self.responses.lock().len()
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn complete(&self, request: LlmRequest) -> Result<ModelResponse> {
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .ok_or_else(|| AgentParseError::Other(anyhow!("scripted client has no responses left")))
    }
}
