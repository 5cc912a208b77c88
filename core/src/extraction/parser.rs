use super::model::{DocumentKind, ExtractionResult, ExtractionStatus};
use crate::error::{CoreError, CoreResult};
use serde_json::{Map, Value};

const KEY_STATUS: &str = "status";
const KEY_FILE_NAME: &str = "file_name";
const KEY_DOCUMENT_TYPE: &str = "document_type";
const KEY_ROLL_NUMBER: &str = "roll_number";
const KEY_STUDENT_NAME: &str = "student_name";
const KEY_COURSE: &str = "course";
const KEY_CGPA: &str = "cgpa";
const KEY_POINTS: &str = "points";

/// Parse a batch document: either an array of result objects or one object.
pub fn parse_batch(json_str: &str) -> CoreResult<Vec<ExtractionResult>> {
    let raw: Value = serde_json::from_str(json_str)
        .map_err(|e| CoreError::InvalidInput(format!("Failed to parse batch: {}", e)))?;

    match &raw {
        Value::Array(items) => Ok(items.iter().map(parse_result).collect()),
        Value::Object(_) => Ok(vec![parse_result(&raw)]),
        other => Err(CoreError::InvalidInput(format!(
            "batch must be an array or an object, got {}",
            json_type_name(other)
        ))),
    }
}

/// Parse one result object. Never fails: anything unusable becomes a
/// failure-status result, and a field of the wrong type is treated as absent
/// (its raw value stays in `extra`).
pub fn parse_result(value: &Value) -> ExtractionResult {
    let Some(obj) = value.as_object() else {
        return ExtractionResult::failure(None);
    };

    let status = match obj.get(KEY_STATUS).and_then(|v| v.as_str()) {
        Some("success") => ExtractionStatus::Success,
        _ => ExtractionStatus::Failure,
    };

    let mut extra = Map::new();
    let mut origin_label = None;
    let mut document_kind = None;
    let mut identity_key = None;
    let mut student_name = None;
    let mut course = None;
    let mut cgpa = None;
    let mut points = None;

    for (key, v) in obj {
        let consumed = match key.as_str() {
            KEY_STATUS => true,
            KEY_FILE_NAME => take_str(v, &mut origin_label),
            KEY_DOCUMENT_TYPE => match v.as_str().and_then(DocumentKind::parse) {
                Some(kind) => {
                    document_kind = Some(kind);
                    true
                }
                None => false,
            },
            KEY_ROLL_NUMBER => take_str(v, &mut identity_key),
            KEY_STUDENT_NAME => take_str(v, &mut student_name),
            KEY_COURSE => take_str(v, &mut course),
            KEY_CGPA => take_number(v, &mut cgpa),
            KEY_POINTS => take_number(v, &mut points),
            _ => false,
        };
        if !consumed {
            extra.insert(key.clone(), v.clone());
        }
    }

    ExtractionResult {
        status,
        origin_label,
        document_kind,
        identity_key,
        student_name,
        course,
        cgpa,
        points,
        extra,
        received: Some(obj.clone()),
    }
}

fn take_str(v: &Value, slot: &mut Option<String>) -> bool {
    match v.as_str() {
        Some(s) => {
            *slot = Some(s.to_string());
            true
        }
        None => false,
    }
}

fn take_number(v: &Value, slot: &mut Option<f64>) -> bool {
    match v.as_f64() {
        Some(n) => {
            *slot = Some(n);
            true
        }
        None => false,
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
