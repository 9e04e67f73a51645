//! `prompts/list` and `prompts/get`.

use std::collections::HashMap;

use serde_json::{json, Value};
use tracing::warn;

use super::{params_object, HandlerError, UseCases};

pub(super) fn list(use_cases: &UseCases) -> Value {
    json!({ "prompts": use_cases.prompts.list_prompts() })
}

pub(super) fn get(use_cases: &UseCases, params: &Value) -> Result<Value, HandlerError> {
    let params = params_object(params)?;
    let name = params
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| HandlerError::InvalidParams("Missing required parameter: name".to_string()))?;

    let mut arguments = HashMap::new();
    match params.get("arguments") {
        None | Some(Value::Null) => {}
        Some(Value::Object(map)) => {
            for (key, value) in map {
                if let Some(text) = argument_text(key, value)? {
                    arguments.insert(key.clone(), text);
                }
            }
        }
        Some(_) => {
            return Err(HandlerError::InvalidParams(
                "Prompt arguments must be an object".to_string(),
            ))
        }
    }

    let prompt = use_cases
        .prompts
        .generate_prompt(name, &arguments)
        .map_err(|e| {
            warn!(prompt = name, error = %e, "Prompt generation failed");
            HandlerError::failed(e.kind(), e)
        })?;

    let messages: Vec<Value> = prompt
        .messages
        .iter()
        .map(|message| {
            json!({
                "role": message.role,
                "content": {
                    "type": "text",
                    "text": message.text
                }
            })
        })
        .collect();

    Ok(json!({
        "description": prompt.description,
        "messages": messages
    }))
}

/// Scalars are accepted as text; `null` counts as absent.
fn argument_text(name: &str, value: &Value) -> Result<Option<String>, HandlerError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err(HandlerError::InvalidParams(format!(
            "Prompt argument '{}' must be a string, number or boolean",
            name
        ))),
    }
}
