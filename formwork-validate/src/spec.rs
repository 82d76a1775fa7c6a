//! Validator rule specifications.
//!
//! Domains declare their rules as `{type, options}` records; hosts ship
//! them as JSON alongside the rest of the metadata. Adding a rule family
//! means adding a variant and its check, nothing else: callers only ever
//! go through `ValidatorSpec::check`.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One validation rule of a domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "options", rename_all = "snake_case")]
pub enum ValidatorSpec {
    /// The value must be present: null, blank strings and empty arrays
    /// count as missing.
    Required,

    /// Length bounds for string values. Non-string values pass; presence
    /// is the `required` family's concern.
    #[serde(rename = "string", rename_all = "camelCase")]
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },

    /// Numeric bounds. Accepts JSON numbers and numeric strings, since
    /// raw input usually arrives as text.
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },

    /// The string value must match the regular expression.
    Pattern { regex: String },
}

impl ValidatorSpec {
    /// Checks a raw value against this rule. `Err` carries the message
    /// shown next to the field.
    pub fn check(&self, value: &Value) -> Result<(), String> {
        match self {
            Self::Required => check_required(value),
            Self::Text {
                min_length,
                max_length,
            } => check_text(value, *min_length, *max_length),
            Self::Number { min, max } => check_number(value, *min, *max),
            Self::Pattern { regex } => check_pattern(value, regex),
        }
    }
}

fn check_required(value: &Value) -> Result<(), String> {
    let missing = match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    };
    if missing {
        Err("value is required".to_string())
    } else {
        Ok(())
    }
}

fn check_text(
    value: &Value,
    min_length: Option<usize>,
    max_length: Option<usize>,
) -> Result<(), String> {
    let s = match value {
        Value::String(s) => s,
        _ => return Ok(()),
    };
    let len = s.chars().count();
    if let Some(min) = min_length {
        if len < min {
            return Err(format!("must be at least {min} characters"));
        }
    }
    if let Some(max) = max_length {
        if len > max {
            return Err(format!("must be at most {max} characters"));
        }
    }
    Ok(())
}

fn check_number(value: &Value, min: Option<f64>, max: Option<f64>) -> Result<(), String> {
    let parsed = match value {
        Value::Null => return Ok(()),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    let number = match parsed {
        Some(n) => n,
        None => return Err("must be a number".to_string()),
    };
    if let Some(min) = min {
        if number < min {
            return Err(format!("must be at least {min}"));
        }
    }
    if let Some(max) = max {
        if number > max {
            return Err(format!("must be at most {max}"));
        }
    }
    Ok(())
}

fn check_pattern(value: &Value, pattern: &str) -> Result<(), String> {
    let s = match value {
        Value::Null => return Ok(()),
        Value::String(s) => s,
        _ => return Err("must be text".to_string()),
    };
    let regex = Regex::new(pattern).map_err(|e| format!("invalid pattern: {e}"))?;
    if regex.is_match(s) {
        Ok(())
    } else {
        Err("does not match the expected format".to_string())
    }
}
