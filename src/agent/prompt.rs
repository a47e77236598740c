use super::step::StepRecord;
use crate::llm::{FunctionCall, LlmMessage};

/// 组装一次模型调用的消息序列
///
/// 每个已执行步骤展开为两条消息：携带函数调用的 assistant 消息，
/// 以及以工具名命名、内容为观察结果的 function 消息。
pub fn build_messages(system: Option<&str>, input: &str, steps: &[StepRecord]) -> Vec<LlmMessage> {
    let mut messages = Vec::with_capacity(steps.len() * 2 + 2);
    if let Some(system) = system {
        messages.push(LlmMessage::system(system));
    }
    messages.push(LlmMessage::user(input));

    for step in steps {
        let invocation = &step.invocation;
        messages.push(LlmMessage::assistant(
            invocation.log.clone(),
            Some(FunctionCall::new(
                invocation.tool.clone(),
                invocation.tool_input.to_string(),
            )),
        ));
        messages.push(LlmMessage::function(
            invocation.tool.clone(),
            step.observation.clone(),
        ));
    }
    messages
}
