use agentparse::{
    AgentParseError, AgentStep, ClassifierConfig, ModelResponse, ResponseClassifier, Schema,
};
use serde_json::json;

fn classifier() -> ResponseClassifier {
    ResponseClassifier::new(ClassifierConfig::default())
}

#[test]
fn plain_text_finishes_with_output_field() {
    let response = ModelResponse::text("The answer is 42.");
    let step = classifier().classify(&response).unwrap();

    match step {
        AgentStep::Finish(result) => {
            assert_eq!(result.output(), Some("The answer is 42."));
            assert_eq!(result.return_values.len(), 1);
            assert_eq!(result.log, "The answer is 42.");
        }
        other => panic!("expected finish, got {other:?}"),
    }
}

#[test]
fn final_response_fields_are_spread() {
    let response = ModelResponse::function_call(
        "wrapping up",
        "Response",
        r#"{"answer":"x","sources":["y"]}"#,
    );
    let step = classifier().classify(&response).unwrap();

    match step {
        AgentStep::Finish(result) => {
            assert_eq!(
                serde_json::Value::Object(result.return_values),
                json!({ "answer": "x", "sources": ["y"] })
            );
            assert_eq!(result.log, "wrapping up");
        }
        other => panic!("expected finish, got {other:?}"),
    }
}

#[test]
fn other_function_names_become_tool_invocations() {
    let response = ModelResponse::function_call("", "retriever", r#"{"q":"v"}"#);
    let step = classifier().classify(&response).unwrap();

    match step {
        AgentStep::Invoke(request) => {
            assert_eq!(request.tool, "retriever");
            assert_eq!(request.tool_input, json!({ "q": "v" }));
            assert_eq!(request.log, "");
        }
        other => panic!("expected invoke, got {other:?}"),
    }
}

#[test]
fn truncated_arguments_raise_decode_fault() {
    for name in ["Response", "retriever"] {
        let response = ModelResponse::function_call("", name, r#"{"q":"#);
        match classifier().classify(&response) {
            Err(AgentParseError::Decode { function, .. }) => assert_eq!(function, name),
            other => panic!("expected decode fault, got {other:?}"),
        }
    }
}

#[test]
fn log_always_mirrors_response_content() {
    let responses = [
        ModelResponse::text("plain"),
        ModelResponse::function_call("final", "Response", r#"{"answer":"a"}"#),
        ModelResponse::function_call("tool", "search", r#"{"q":"v"}"#),
    ];
    for response in &responses {
        let step = classifier().classify(response).unwrap();
        assert_eq!(step.log(), response.content());
    }
}

#[test]
fn classification_is_idempotent() {
    let classifier = classifier();
    let response = ModelResponse::function_call("", "search", r#"{"q":"v"}"#);
    let first = classifier.classify(&response).unwrap();
    let second = classifier.classify(&response).unwrap();
    assert_eq!(first, second);
}

#[test]
fn custom_final_response_name_is_honoured() {
    let classifier = ResponseClassifier::new(
        ClassifierConfig::default().with_final_response_name("submit_answer"),
    );

    let done = ModelResponse::function_call("", "submit_answer", r#"{"answer":"x"}"#);
    assert!(classifier.classify(&done).unwrap().is_finish());

    let default_name = ModelResponse::function_call("", "Response", r#"{"answer":"x"}"#);
    assert!(!classifier.classify(&default_name).unwrap().is_finish());
}

#[test]
fn configured_schema_rejects_missing_required_field() {
    let schema = Schema::object(
        [
            ("answer", Schema::string()),
            ("sources", Schema::array_of(Schema::string())),
        ],
        ["answer", "sources"],
    );
    let classifier =
        ResponseClassifier::new(ClassifierConfig::default().with_final_response_schema(schema));

    let missing = ModelResponse::function_call("", "Response", r#"{"answer":"x"}"#);
    match classifier.classify(&missing) {
        Err(AgentParseError::Schema(err)) => assert_eq!(err.path(), ["sources".to_string()]),
        other => panic!("expected schema error, got {other:?}"),
    }

    let complete = ModelResponse::function_call("", "Response", r#"{"answer":"x","sources":[]}"#);
    assert!(classifier.classify(&complete).unwrap().is_finish());
}

#[test]
fn schema_does_not_apply_to_tool_calls() {
    let schema = Schema::object([("answer", Schema::string())], ["answer"]);
    let classifier =
        ResponseClassifier::new(ClassifierConfig::default().with_final_response_schema(schema));

    let response = ModelResponse::function_call("", "search", r#"{"q":"v"}"#);
    assert!(!classifier.classify(&response).unwrap().is_finish());
}

#[test]
fn final_response_function_matches_classifier_config() {
    let schema = Schema::object([("answer", Schema::string())], ["answer"]);
    let classifier = ResponseClassifier::new(
        ClassifierConfig::default()
            .with_final_response_name("Answer")
            .with_final_response_description("Return the final answer")
            .with_final_response_schema(schema),
    );

    let definition = classifier.final_response_function();
    assert_eq!(definition.name, "Answer");
    assert_eq!(definition.description.as_deref(), Some("Return the final answer"));
    assert_eq!(definition.parameters["required"], json!(["answer"]));
}

#[test]
fn steps_serialize_with_type_tag() {
    let step = classifier()
        .classify(&ModelResponse::function_call("", "search", r#"{"q":"v"}"#))
        .unwrap();
    assert_eq!(
        serde_json::to_value(&step).unwrap(),
        json!({ "type": "invoke", "tool": "search", "tool_input": { "q": "v" }, "log": "" })
    );
}
