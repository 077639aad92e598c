//! Write path: wraps a mutation in an observable [`SubmissionState`].

use std::{future::Future, sync::Arc};

use futures::{future::BoxFuture, FutureExt};
use shared::protocol::{
    ContactMessageRequest, ContactMessageResponse, ResellerApplicationRequest,
    ResellerApplicationResponse, TrialSignupRequest, TrialSignupResponse,
};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::{api::StorefrontApi, error::ClientError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionState {
    pub loading: bool,
    pub error: Option<String>,
    pub success: bool,
}

impl SubmissionState {
    fn in_flight() -> Self {
        Self {
            loading: true,
            error: None,
            success: false,
        }
    }

    fn succeeded() -> Self {
        Self {
            loading: false,
            error: None,
            success: true,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            loading: false,
            error: Some(message),
            success: false,
        }
    }
}

type Mutation<P, R> = Arc<dyn Fn(P) -> BoxFuture<'static, Result<R, ClientError>> + Send + Sync>;

pub struct SubmissionController<P, R> {
    name: String,
    mutation: Mutation<P, R>,
    state: watch::Sender<SubmissionState>,
}

impl<P, R> SubmissionController<P, R>
where
    P: Send + 'static,
    R: Send + 'static,
{
    pub fn new<F, Fut>(name: impl Into<String>, mutation: F) -> Self
    where
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, ClientError>> + Send + 'static,
    {
        let (state, _) = watch::channel(SubmissionState::default());
        Self {
            name: name.into(),
            mutation: Arc::new(move |payload| mutation(payload).boxed()),
            state,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    /// Performs exactly one remote attempt. On failure the state records the
    /// user-facing message and the error is still returned so the caller can
    /// keep its form populated.
    pub async fn submit(&self, payload: P) -> Result<R, ClientError> {
        self.state.send_replace(SubmissionState::in_flight());

        match (self.mutation)(payload).await {
            Ok(result) => {
                info!(action = %self.name, "submission succeeded");
                self.state.send_replace(SubmissionState::succeeded());
                Ok(result)
            }
            Err(err) => {
                let message = err.user_message();
                warn!(action = %self.name, "submission failed: {err}");
                self.state.send_replace(SubmissionState::failed(message));
                Err(err)
            }
        }
    }
}

pub fn trial_signup_controller(
    api: &StorefrontApi,
) -> SubmissionController<TrialSignupRequest, TrialSignupResponse> {
    let api = api.clone();
    SubmissionController::new("trial signup", move |request: TrialSignupRequest| {
        let api = api.clone();
        async move { api.create_trial(&request).await }
    })
}

pub fn reseller_application_controller(
    api: &StorefrontApi,
) -> SubmissionController<ResellerApplicationRequest, ResellerApplicationResponse> {
    let api = api.clone();
    SubmissionController::new(
        "reseller application",
        move |request: ResellerApplicationRequest| {
            let api = api.clone();
            async move { api.create_reseller_application(&request).await }
        },
    )
}

pub fn contact_message_controller(
    api: &StorefrontApi,
) -> SubmissionController<ContactMessageRequest, ContactMessageResponse> {
    let api = api.clone();
    SubmissionController::new("contact message", move |request: ContactMessageRequest| {
        let api = api.clone();
        async move { api.send_contact_message(&request).await }
    })
}

#[cfg(test)]
#[path = "tests/submission_tests.rs"]
mod tests;
