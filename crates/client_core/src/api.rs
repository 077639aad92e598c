use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use shared::{
    domain::{AppSettings, Feature, Plan},
    protocol::{
        ContactMessageRequest, ContactMessageResponse, HealthStatus, ResellerApplicationRequest,
        ResellerApplicationResponse, TrialSignupRequest, TrialSignupResponse, TrialStatus,
    },
};
use tracing::error;
use url::Url;

use crate::{error::ClientError, transport::Transport};

pub const PLANS_PATH: &str = "/plans";
pub const FEATURES_PATH: &str = "/features";
pub const SETTINGS_PATH: &str = "/settings";
pub const TRIAL_PATH: &str = "/trial";
pub const RESELLER_PATH: &str = "/reseller";
pub const CONTACT_PATH: &str = "/contact";
pub const HEALTH_PATH: &str = "/health";

/// Typed view of the storefront backend.
#[derive(Clone)]
pub struct StorefrontApi {
    transport: Arc<dyn Transport>,
}

impl StorefrontApi {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn plans(&self) -> Result<Vec<Plan>, ClientError> {
        self.fetch(PLANS_PATH, "subscription plans").await
    }

    pub async fn features(&self) -> Result<Vec<Feature>, ClientError> {
        self.fetch(FEATURES_PATH, "features").await
    }

    pub async fn settings(&self) -> Result<AppSettings, ClientError> {
        self.fetch(SETTINGS_PATH, "app settings").await
    }

    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.fetch(HEALTH_PATH, "health status").await
    }

    pub async fn trial_status(&self, email: &str) -> Result<TrialStatus, ClientError> {
        let email = required("email", email)?;
        let path = format!("{TRIAL_PATH}/{}", encode_path_segment(email)?);
        self.fetch(&path, "trial status").await
    }

    pub async fn create_trial(
        &self,
        request: &TrialSignupRequest,
    ) -> Result<TrialSignupResponse, ClientError> {
        let request = TrialSignupRequest {
            email: required("email", &request.email)?.to_string(),
        };
        self.send(TRIAL_PATH, &request, "trial signup").await
    }

    pub async fn create_reseller_application(
        &self,
        request: &ResellerApplicationRequest,
    ) -> Result<ResellerApplicationResponse, ClientError> {
        let request = ResellerApplicationRequest {
            name: required("name", &request.name)?.to_string(),
            email: required("email", &request.email)?.to_string(),
            ..request.clone()
        };
        self.send(RESELLER_PATH, &request, "reseller application")
            .await
    }

    pub async fn send_contact_message(
        &self,
        request: &ContactMessageRequest,
    ) -> Result<ContactMessageResponse, ClientError> {
        let request = ContactMessageRequest {
            name: required("name", &request.name)?.to_string(),
            email: required("email", &request.email)?.to_string(),
            subject: required("subject", &request.subject)?.to_string(),
            message: required("message", &request.message)?.to_string(),
        };
        self.send(CONTACT_PATH, &request, "contact message").await
    }

    async fn fetch<R: DeserializeOwned>(&self, path: &str, what: &str) -> Result<R, ClientError> {
        let body = self
            .transport
            .get(path)
            .await
            .inspect_err(|err| error!("error fetching {what}: {err}"))?;
        decode(path, body).inspect_err(|err| error!("error fetching {what}: {err}"))
    }

    async fn send<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        request: &B,
        what: &str,
    ) -> Result<R, ClientError> {
        let payload = serde_json::to_value(request)
            .map_err(|err| ClientError::Validation(format!("cannot encode {what}: {err}")))?;
        let body = self
            .transport
            .post(path, payload)
            .await
            .inspect_err(|err| error!("error creating {what}: {err}"))?;
        decode(path, body).inspect_err(|err| error!("error creating {what}: {err}"))
    }
}

fn decode<R: DeserializeOwned>(path: &str, body: Value) -> Result<R, ClientError> {
    serde_json::from_value(body).map_err(|err| ClientError::Decode {
        path: path.to_string(),
        reason: err.to_string(),
    })
}

fn required<'a>(field: &str, value: &'a str) -> Result<&'a str, ClientError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ClientError::Validation(format!("{field} is required")));
    }
    Ok(trimmed)
}

/// Percent-encodes `segment` as a single path segment, so `/`, `%`, spaces
/// and `?` cannot change the route.
fn encode_path_segment(segment: &str) -> Result<String, ClientError> {
    let mut scratch = Url::parse("http://localhost/")
        .map_err(|err| ClientError::Validation(format!("cannot encode path: {err}")))?;
    scratch
        .path_segments_mut()
        .map_err(|()| ClientError::Validation("cannot encode path".into()))?
        .push(segment);
    Ok(scratch.path().trim_start_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
