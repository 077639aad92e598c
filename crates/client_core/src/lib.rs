use std::sync::Arc;

use shared::{
    domain::{AppSettings, Feature, Plan},
    protocol::{
        ContactMessageRequest, ContactMessageResponse, ResellerApplicationRequest,
        ResellerApplicationResponse, TrialSignupRequest, TrialSignupResponse,
    },
};
use tracing::info;

pub mod api;
pub mod config;
pub mod defaults;
pub mod error;
pub mod fallback;
pub mod fetch;
pub mod submission;
pub mod transport;

pub use api::StorefrontApi;
pub use config::{load_settings, ClientSettings, TransportConfig};
pub use defaults::DefaultContent;
pub use error::{ClientError, FALLBACK_ERROR_MESSAGE};
pub use fallback::{compose_page, resolve, PageContent};
pub use fetch::{FetchState, ResourceFetcher};
pub use submission::{SubmissionController, SubmissionState};
pub use transport::{HttpTransport, TracingObserver, Transport, TransportObserver};

/// Entry point handed to the rendering layer. Every fetcher and controller it
/// creates shares the one transport it was built with.
#[derive(Clone)]
pub struct Storefront {
    api: StorefrontApi,
    defaults: &'static DefaultContent,
}

impl Storefront {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            api: StorefrontApi::new(transport),
            defaults: DefaultContent::builtin(),
        }
    }

    /// Fails with [`ClientError::Configuration`] when no backend URL is set.
    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ClientError> {
        let transport = HttpTransport::from_settings(settings)?;
        info!("storefront api at {}", transport.config().api_base());
        Ok(Self::new(Arc::new(transport)))
    }

    pub fn api(&self) -> &StorefrontApi {
        &self.api
    }

    pub fn defaults(&self) -> &'static DefaultContent {
        self.defaults
    }

    pub fn plans(&self) -> ResourceFetcher<Vec<Plan>> {
        fetch::plans_fetcher(&self.api)
    }

    pub fn features(&self) -> ResourceFetcher<Vec<Feature>> {
        fetch::features_fetcher(&self.api)
    }

    pub fn settings(&self) -> ResourceFetcher<AppSettings> {
        fetch::settings_fetcher(&self.api)
    }

    pub fn trial_signup(&self) -> SubmissionController<TrialSignupRequest, TrialSignupResponse> {
        submission::trial_signup_controller(&self.api)
    }

    pub fn reseller_application(
        &self,
    ) -> SubmissionController<ResellerApplicationRequest, ResellerApplicationResponse> {
        submission::reseller_application_controller(&self.api)
    }

    pub fn contact_message(
        &self,
    ) -> SubmissionController<ContactMessageRequest, ContactMessageResponse> {
        submission::contact_message_controller(&self.api)
    }

    /// Loads the three page resources concurrently and merges them with the
    /// built-in content. Read failures never surface here.
    pub async fn load_page(&self) -> PageContent {
        let plans = self.plans();
        let features = self.features();
        let settings = self.settings();

        let (plans, features, settings) = futures::join!(
            plans.refetch(),
            features.refetch(),
            settings.refetch()
        );

        compose_page(&plans, &features, &settings, self.defaults)
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
