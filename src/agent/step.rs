use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::classifier::DEFAULT_OUTPUT_KEY;

/// 请求外部循环执行指定工具
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ToolInvocationRequest {
    pub tool: String,
    pub tool_input: Value,
    pub log: String,
}

/// 结束本次交互的最终结果，`return_values` 至少包含一个字段
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FinalResult {
    pub return_values: Map<String, Value>,
    pub log: String,
}

impl FinalResult {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.return_values.get(key)
    }

    /// 读取默认 `output` 键的文本
    ///
    /// 只查默认键；`ClassifierConfig::output_key` 被修改时改用 `output_for`。
    pub fn output(&self) -> Option<&str> {
        self.output_for(DEFAULT_OUTPUT_KEY)
    }

    pub fn output_for(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }
}

/// 单次分类的结果：要么结束，要么继续调用工具
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentStep {
    Finish(FinalResult),
    Invoke(ToolInvocationRequest),
}

impl AgentStep {
    pub fn log(&self) -> &str {
        match self {
            AgentStep::Finish(result) => &result.log,
            AgentStep::Invoke(request) => &request.log,
        }
    }

    pub fn is_finish(&self) -> bool {
        matches!(self, AgentStep::Finish(_))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StepRecord {
    pub invocation: ToolInvocationRequest,
    pub observation: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AgentRun {
    pub result: FinalResult,
    pub intermediate_steps: Vec<StepRecord>,
    pub iterations: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{ClassifierConfig, ResponseClassifier};
    use crate::llm::ModelResponse;

    #[test]
    fn output_reads_only_the_default_key() {
        let classifier =
            ResponseClassifier::new(ClassifierConfig::default().with_output_key("answer"));
        let step = classifier.classify(&ModelResponse::text("done")).unwrap();

        match step {
            AgentStep::Finish(result) => {
                assert_eq!(result.output(), None);
                assert_eq!(result.output_for("answer"), Some("done"));
            }
            other => panic!("unexpected step: {other:?}"),
        }
    }
}
