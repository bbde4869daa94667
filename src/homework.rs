//! Homework records: response validation and status rendering

use serde_json::Value;

use crate::{BotError, Result};

/// Review status codes the API is allowed to report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Approved,
    Reviewing,
    Rejected,
}

impl Status {
    /// Parse an API status code; anything outside the fixed set is `None`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(Status::Approved),
            "reviewing" => Some(Status::Reviewing),
            "rejected" => Some(Status::Rejected),
            _ => None,
        }
    }

    /// Human-readable verdict text for the status
    pub fn verdict(self) -> &'static str {
        match self {
            Status::Approved => "The review is complete: the reviewer liked everything. Hooray!",
            Status::Reviewing => "The work has been taken up for review.",
            Status::Rejected => "The review is complete: the reviewer has some remarks.",
        }
    }
}

/// Check the response shape and extract the homework records.
///
/// An empty slice is a valid result and means no status changed since the
/// cursor. The caller may re-check the same response at any time and gets
/// the same answer.
pub fn check_response(response: &Value) -> Result<&[Value]> {
    let object = response
        .as_object()
        .ok_or_else(|| BotError::Schema("response is not a JSON object".to_string()))?;
    let homeworks = object
        .get("homeworks")
        .ok_or_else(|| BotError::Schema("response is missing the \"homeworks\" key".to_string()))?;
    let records = homeworks
        .as_array()
        .ok_or_else(|| BotError::Schema("\"homeworks\" is not an array".to_string()))?;
    Ok(records)
}

/// Render the notification line for one homework record.
///
/// Checks run in a fixed order: the status key, then the name key, then the
/// status value against the known set.
pub fn parse_status(homework: &Value) -> Result<String> {
    let status_value = homework
        .get("status")
        .ok_or_else(|| BotError::Schema("homework record is missing the \"status\" key".to_string()))?;
    let name = match homework.get("homework_name") {
        Some(Value::String(name)) => name.clone(),
        Some(other) => other.to_string(),
        None => {
            return Err(BotError::Schema(
                "homework record is missing the \"homework_name\" key".to_string(),
            ))
        }
    };
    let status = status_value
        .as_str()
        .and_then(Status::from_code)
        .ok_or_else(|| BotError::Schema(format!("unknown homework status {}", status_value)))?;
    Ok(format!("Changed review status of \"{}\". {}", name, status.verdict()))
}
