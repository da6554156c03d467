// draft.rs - Loading goal drafts from JSON or YAML.
//
// Drafts come from editors, scripts, and hand-written files, so loading is
// deliberately forgiving about *values*: a field with the wrong type is read
// as absent and surfaces as a missing field in the verdict, rather than
// aborting the load. Only syntax errors and a non-object top level fail.
// Unknown keys are ignored.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::DraftError;
use crate::goal::{PartialBudget, PartialGoal, Verification};

/// Source format of a draft document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftFormat {
    Json,
    Yaml,
}

impl DraftFormat {
    /// `.yaml` / `.yml` are YAML; everything else is treated as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => DraftFormat::Yaml,
            _ => DraftFormat::Json,
        }
    }
}

/// Read and parse a draft file, picking the format from its extension.
pub fn load_draft(path: &Path) -> Result<PartialGoal, DraftError> {
    let text = fs::read_to_string(path).map_err(|source| DraftError::IoError {
        path: path.display().to_string(),
        source,
    })?;
    let draft = parse_draft(&text, DraftFormat::from_path(path))?;
    tracing::debug!(
        path = %path.display(),
        absent = draft.absent_fields().len(),
        "loaded goal draft"
    );
    Ok(draft)
}

/// Parse draft text in the given format.
pub fn parse_draft(text: &str, format: DraftFormat) -> Result<PartialGoal, DraftError> {
    let value: Value = match format {
        DraftFormat::Json => serde_json::from_str(text)?,
        DraftFormat::Yaml => serde_yaml::from_str(text)?,
    };
    from_value(&value)
}

/// Build a draft from an already-parsed document.
pub fn from_value(value: &Value) -> Result<PartialGoal, DraftError> {
    let Some(object) = value.as_object() else {
        return Err(DraftError::NotAnObject {
            found: kind_of(value).to_string(),
        });
    };

    Ok(PartialGoal {
        description: text_field(object, "description"),
        observable_return: text_field(object, "observable_return"),
        external_verification: match object.get("external_verification") {
            None => Verification::Unset,
            Some(Value::Null) => Verification::NotApplicable,
            Some(Value::String(text)) => Verification::Named(text.clone()),
            Some(_) => Verification::Unset,
        },
        time_horizon_days: object.get("time_horizon_days").and_then(integer),
        reversibility: object.get("reversibility").and_then(Value::as_bool),
        resource_constraints: object
            .get("resource_constraints")
            .and_then(Value::as_object)
            .map(|budget| PartialBudget {
                time: budget.get("time").and_then(Value::as_f64),
                energy: budget.get("energy").and_then(Value::as_f64),
                attention: budget.get("attention").and_then(Value::as_f64),
            }),
    })
}

fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

// Accepts integral floats (`30.0`) as well as integers; fractional days are
// not a valid horizon and read as absent.
fn integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
