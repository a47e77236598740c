use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::schema::Schema;
use crate::tools::manifest::{ToolManifest, ToolManifestBuilder};
use crate::tools::tool::Tool;

pub struct EchoTool;

impl EchoTool {
    pub fn manifest() -> ToolManifest {
        ToolManifestBuilder::new("echo")
            .description("Echo the given text back")
            .parameters(Schema::object([("text", Schema::string())], ["text"]))
            .build()
    }
}

#[async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &'static str {
        "echo"
    }

    async fn call(&self, input: Value) -> Result<String> {
        let text = match input.get("text").and_then(Value::as_str) {
            Some(text) => text.to_string(),
            None => input.to_string(),
        };
        Ok(format!("Echo: {text}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn echoes_text_field_or_whole_input() {
        assert_eq!(
            EchoTool.call(json!({ "text": "hi" })).await.unwrap(),
            "Echo: hi"
        );
        assert_eq!(EchoTool.call(json!([1, 2])).await.unwrap(), "Echo: [1,2]");
    }
}
