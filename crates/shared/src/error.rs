use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of a request-validation failure body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    #[serde(default)]
    pub loc: Vec<Value>,
    pub msg: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Issues(Vec<ValidationIssue>),
}

/// Error body returned by the backend on non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<ErrorDetail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Human-readable message carried by the body, if any.
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            Some(ErrorDetail::Message(text)) if !text.trim().is_empty() => {
                return Some(text.clone());
            }
            Some(ErrorDetail::Issues(issues)) if !issues.is_empty() => {
                return Some(
                    issues
                        .iter()
                        .map(|issue| issue.msg.as_str())
                        .collect::<Vec<_>>()
                        .join("; "),
                );
            }
            _ => {}
        }
        self.message
            .as_ref()
            .filter(|text| !text.trim().is_empty())
            .cloned()
    }

    pub fn from_payload(payload: &Value) -> Option<Self> {
        serde_json::from_value(payload.clone()).ok()
    }
}
