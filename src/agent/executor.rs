use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::classifier::ResponseClassifier;
use super::prompt::build_messages;
use super::step::{AgentRun, AgentStep, StepRecord};
use crate::config::{AgentConfig, DEFAULT_MAX_ITERATIONS};
use crate::error::{AgentParseError, Result};
use crate::llm::{DynLlmClient, FunctionDefinition, LlmRequest};
use crate::tools::ToolRegistry;

/// 代理执行器
///
/// 循环调用模型并分类响应：工具调用的观察结果回填到下一轮，
/// 直到得到最终结果或超过迭代上限。
#[derive(Clone)]
pub struct AgentExecutor {
    client: DynLlmClient,
    tools: Arc<ToolRegistry>,
    classifier: ResponseClassifier,
    system_prompt: Option<String>,
    max_iterations: u32,
    temperature: f32,
}

impl AgentExecutor {
    pub fn new(client: DynLlmClient, tools: ToolRegistry) -> Self {
        Self {
            client,
            tools: Arc::new(tools),
            classifier: ResponseClassifier::default(),
            system_prompt: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            temperature: crate::llm::default_temperature(),
        }
    }

    pub fn from_config(
        client: DynLlmClient,
        tools: ToolRegistry,
        config: &AgentConfig,
    ) -> Result<Self> {
        let executor = Self::new(client, tools)
            .with_classifier(ResponseClassifier::new(config.resolve_classifier()?))
            .with_max_iterations(config.executor.max_iterations)
            .with_temperature(config.executor.temperature);
        Ok(match &config.executor.system_prompt {
            Some(prompt) => executor.with_system_prompt(prompt.clone()),
            None => executor,
        })
    }

    pub fn with_classifier(mut self, classifier: ResponseClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn classifier(&self) -> &ResponseClassifier {
        &self.classifier
    }

    /// 绑定到模型的函数：全部工具加上最终响应函数
    ///
    /// 与最终响应函数同名的工具永远无法被调用，视为配置错误。
    pub fn functions(&self) -> Result<Vec<FunctionDefinition>> {
        let reserved = self.classifier.final_response_name();
        if self.tools.get(reserved).is_some() {
            return Err(AgentParseError::Config(format!(
                "tool `{reserved}` collides with the final response function"
            )));
        }
        let mut functions = self.tools.function_definitions();
        functions.push(self.classifier.final_response_function());
        Ok(functions)
    }

    #[instrument(skip(self, input))]
    pub async fn run(&self, input: &str) -> Result<AgentRun> {
        let functions = self.functions()?;
        let mut steps: Vec<StepRecord> = Vec::new();
        let mut iterations = 0u32;

        loop {
            if iterations >= self.max_iterations {
                return Err(AgentParseError::MaxIterationsExceeded(self.max_iterations));
            }
            iterations += 1;
            debug!(iteration = iterations, "calling model");

            let request = LlmRequest::new(build_messages(
                self.system_prompt.as_deref(),
                input,
                &steps,
            ))
            .with_functions(functions.clone())
            .with_temperature(self.temperature);

            let response = self.client.complete(request).await?;
            match self.classifier.classify(&response)? {
                AgentStep::Finish(result) => {
                    info!(iterations, steps = steps.len(), "agent finished");
                    return Ok(AgentRun {
                        result,
                        intermediate_steps: steps,
                        iterations,
                    });
                }
                AgentStep::Invoke(invocation) => {
                    let tool = self
                        .tools
                        .get(&invocation.tool)
                        .ok_or_else(|| AgentParseError::ToolNotRegistered(invocation.tool.clone()))?;
                    info!(tool = %invocation.tool, input = %invocation.tool_input, "invoking tool");
                    let observation = tool.call(invocation.tool_input.clone()).await?;
                    steps.push(StepRecord {
                        invocation,
                        observation,
                    });
                }
            }
        }
    }
}
