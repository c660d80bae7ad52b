//! Main API client implementation

use crate::config::{ClientConfig, Settings, SettingsSource};
use crate::endpoints::{CastsApi, LabelsApi, UsersApi};
use crate::error::{ApiError, ApiResult};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, instrument};

/// mbd Farcaster API client
///
/// Every operation is a single POST to `base_url + endpoint` with the
/// configured headers and a JSON body. There is no retry, caching or rate
/// limiting; errors reach the caller unchanged.
///
/// The client is cheap to clone and safe to share between tasks. It holds
/// no mutable state after construction.
#[derive(Clone)]
pub struct MbdClient {
    inner: Client,
    config: Arc<ClientConfig>,
}

impl MbdClient {
    /// Create a new client with configuration resolved from the environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client from a host settings lookup
    pub fn from_settings<S: SettingsSource + ?Sized>(source: &S) -> ApiResult<Self> {
        let settings = Settings::resolve(source)?;
        Self::with_config(ClientConfig::from_settings(&settings))
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ApiError::config(format!("invalid header name: {name}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| ApiError::config(format!("invalid value for header {name}")))?;
            default_headers.insert(name, value);
        }

        let inner = Client::builder()
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        if config.debug {
            debug!(
                base_url = %config.base_url,
                app_name = %config.app_name,
                app_url = %config.app_url,
                has_api_key = config.has_api_key(),
                "MBD client initialized"
            );
        }

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Re-resolve settings and replace the whole configuration
    ///
    /// Must not race with in-flight calls on the same instance; clones made
    /// earlier keep the configuration they were created with.
    pub fn initialize<S: SettingsSource + ?Sized>(&mut self, source: &S) -> ApiResult<()> {
        *self = Self::from_settings(source)?;
        Ok(())
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Whether debug logging is on
    #[must_use]
    pub fn is_debug(&self) -> bool {
        self.config.debug
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access cast feed and search endpoints
    #[must_use]
    pub fn casts(&self) -> CastsApi {
        CastsApi::new(self.clone())
    }

    /// Access labeling endpoints
    #[must_use]
    pub fn labels(&self) -> LabelsApi {
        LabelsApi::new(self.clone())
    }

    /// Access user feed and search endpoints
    #[must_use]
    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Low-level HTTP
    // -------------------------------------------------------------------------

    /// POST a JSON body to an endpoint and decode the JSON response
    ///
    /// `endpoint` is appended to the base URL verbatim, e.g.
    /// `/casts/feed/trending`.
    #[instrument(level = "debug", skip(self, body))]
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ApiResult<T> {
        let url = format!("{}{}", self.config.base_url, endpoint);

        if self.config.debug {
            let body = serde_json::to_string(body).unwrap_or_default();
            debug!(url = %url, body = %body, "Making request");
        }

        let result = self.execute(endpoint, &url, body).await;

        if self.config.debug {
            if let Err(ref e) = result {
                error!(endpoint = %endpoint, error = %e, "Error calling MBD API");
            }
        }

        result
    }

    async fn execute<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        url: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self.inner.post(url).json(body).send().await?;
        self.handle_response(endpoint, response).await
    }

    /// Handle HTTP response and deserialize
    async fn handle_response<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        response: Response,
    ) -> ApiResult<T> {
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await?;
            return Err(ApiError::api_response(status.as_u16(), message));
        }

        let bytes = response.bytes().await?;

        if self.config.debug {
            debug!(
                endpoint = %endpoint,
                payload = %String::from_utf8_lossy(&bytes),
                "Response received"
            );
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl std::fmt::Debug for MbdClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MbdClient")
            .field("base_url", &self.config.base_url)
            .field("app_name", &self.config.app_name)
            .field("has_api_key", &self.config.has_api_key())
            .field("debug", &self.config.debug)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_BASE_URL, MBD_API_KEY, MBD_DEBUG};
    use std::collections::HashMap;

    #[test]
    fn test_client_creation() {
        let client = MbdClient::with_config(ClientConfig::default());
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = ClientConfig::default().with_base_url("not-a-url");
        assert!(matches!(
            MbdClient::with_config(config),
            Err(ApiError::Config(_))
        ));
    }

    #[test]
    fn test_initialize_replaces_configuration() {
        let mut client = MbdClient::with_config(
            ClientConfig::default().with_base_url("http://127.0.0.1:9"),
        )
        .unwrap();
        assert!(!client.config().has_api_key());

        let settings: HashMap<String, String> = [
            (MBD_API_KEY.to_string(), "k".to_string()),
            (MBD_DEBUG.to_string(), "true".to_string()),
        ]
        .into_iter()
        .collect();
        client.initialize(&settings).unwrap();

        assert!(client.config().has_api_key());
        assert!(client.is_debug());
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_debug_output_hides_key() {
        let settings: HashMap<String, String> =
            [(MBD_API_KEY.to_string(), "top-secret".to_string())]
                .into_iter()
                .collect();
        let client = MbdClient::from_settings(&settings).unwrap();
        let rendered = format!("{client:?}");
        assert!(rendered.contains("has_api_key: true"));
        assert!(!rendered.contains("top-secret"));
    }
}
