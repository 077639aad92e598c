use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
    Client, Method,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    config::{ClientSettings, TransportConfig},
    error::ClientError,
};

/// Remote side of every storefront call. Paths are relative to the API base
/// (for example `/plans`).
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str) -> Result<Value, ClientError>;
    async fn post(&self, path: &str, body: Value) -> Result<Value, ClientError>;
}

/// Hooks invoked around each request. Implementations must return quickly and
/// cannot influence the outcome of the call.
pub trait TransportObserver: Send + Sync {
    fn on_request(&self, method: &Method, url: &str);
    fn on_response(&self, method: &Method, url: &str, status: u16, body: &Value);
    fn on_failure(&self, method: &Method, url: &str, error: &ClientError);
}

pub struct TracingObserver;

impl TransportObserver for TracingObserver {
    fn on_request(&self, method: &Method, url: &str) {
        info!("api request: {method} {url}");
    }

    fn on_response(&self, method: &Method, url: &str, status: u16, body: &Value) {
        info!("api response: {method} {url} status={status} body={body}");
    }

    fn on_failure(&self, method: &Method, url: &str, error: &ClientError) {
        match error {
            ClientError::Http {
                status,
                payload: Some(payload),
            } => warn!("api error: {method} {url} status={status} body={payload}"),
            other => warn!("api error: {method} {url}: {other}"),
        }
    }
}

#[derive(Clone)]
pub struct HttpTransport {
    http: Client,
    config: TransportConfig,
    observer: Arc<dyn TransportObserver>,
}

impl HttpTransport {
    pub fn new(
        config: TransportConfig,
        observer: Arc<dyn TransportObserver>,
    ) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|err| {
                ClientError::Configuration(format!("failed to build http client: {err}"))
            })?;

        Ok(Self {
            http,
            config,
            observer,
        })
    }

    /// Validates `settings` and builds a transport that logs through `tracing`.
    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ClientError> {
        Self::new(
            TransportConfig::from_settings(settings)?,
            Arc::new(TracingObserver),
        )
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        let url = self.config.endpoint(path);
        self.observer.on_request(&method, &url);

        let mut request = self.http.request(method.clone(), &url);
        if let Some(body) = &body {
            request = request.json(body);
        }

        let result = async {
            let response = request
                .send()
                .await
                .map_err(|err| ClientError::network(&url, &err))?;
            let status = response.status();
            let bytes = response
                .bytes()
                .await
                .map_err(|err| ClientError::network(&url, &err))?;

            if !status.is_success() {
                return Err(ClientError::Http {
                    status: status.as_u16(),
                    payload: error_payload(&bytes),
                });
            }

            let value = success_payload(path, &bytes)?;
            Ok::<_, ClientError>((status.as_u16(), value))
        }
        .await;

        match result {
            Ok((status, value)) => {
                self.observer.on_response(&method, &url, status, &value);
                Ok(value)
            }
            Err(err) => {
                self.observer.on_failure(&method, &url, &err);
                Err(err)
            }
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.execute(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, ClientError> {
        self.execute(Method::POST, path, Some(body)).await
    }
}

fn success_payload(path: &str, bytes: &[u8]) -> Result<Value, ClientError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(bytes).map_err(|err| ClientError::Decode {
        path: path.to_string(),
        reason: format!("response body is not json: {err}"),
    })
}

/// Non-2xx bodies are kept even when they are not JSON so callers can inspect them.
fn error_payload(bytes: &[u8]) -> Option<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    serde_json::from_slice(bytes)
        .ok()
        .or_else(|| Some(Value::String(String::from_utf8_lossy(bytes).into_owned())))
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
