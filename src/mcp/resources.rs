//! `resources/list` and `resources/read`.

use serde_json::{json, Value};
use tracing::warn;

use super::{params_object, HandlerError, UseCases};

pub(super) fn list(use_cases: &UseCases) -> Result<Value, HandlerError> {
    let resources = use_cases.resources.list_resources().map_err(|e| {
        warn!(error = %e, "Listing resources failed");
        HandlerError::failed(e.kind(), e)
    })?;
    Ok(json!({ "resources": resources }))
}

pub(super) fn read(use_cases: &UseCases, params: &Value) -> Result<Value, HandlerError> {
    let uri = params_object(params)?
        .get("uri")
        .and_then(Value::as_str)
        .ok_or_else(|| HandlerError::InvalidParams("Missing required parameter: uri".to_string()))?;

    let content = use_cases.resources.read_resource(uri).map_err(|e| {
        warn!(uri, error = %e, "Reading resource failed");
        HandlerError::failed(e.kind(), e)
    })?;
    Ok(json!({ "contents": [content] }))
}
