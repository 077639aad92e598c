use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{ApplicationId, MessageId, SignupId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialState {
    Active,
    Expired,
    Cancelled,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationState {
    Pending,
    Approved,
    Rejected,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactState {
    New,
    Read,
    Replied,
    #[serde(other)]
    Unknown,
}

/// `POST /trial`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialSignupRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialSignupResponse {
    pub id: SignupId,
    pub email: String,
    pub status: TrialState,
    pub trial_start: NaiveDateTime,
    pub activation_code: String,
    pub message: String,
}

/// `GET /trial/{email}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialStatus {
    pub id: SignupId,
    pub email: String,
    pub status: TrialState,
    pub trial_start: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_end: Option<NaiveDateTime>,
    #[serde(default)]
    pub activated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation_code: Option<String>,
}

/// `POST /reseller`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResellerApplicationRequest {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResellerApplicationResponse {
    pub id: ApplicationId,
    pub name: String,
    pub email: String,
    pub status: ApplicationState,
    pub message: String,
}

/// `POST /contact`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessageRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessageResponse {
    pub id: MessageId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: ContactState,
}

/// `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reseller_request_omits_absent_optional_fields() {
        let body = serde_json::to_value(ResellerApplicationRequest {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            company: None,
            message: Some("hi".into()),
        })
        .expect("encode");
        assert_eq!(
            body,
            serde_json::json!({ "name": "Ada", "email": "ada@example.com", "message": "hi" })
        );
    }

    #[test]
    fn unknown_status_strings_do_not_fail_decoding() {
        let status: TrialState = serde_json::from_str("\"suspended\"").expect("decode");
        assert_eq!(status, TrialState::Unknown);
    }
}
