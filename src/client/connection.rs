//! Connection parameters and credential handling for the SCIM backend.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use reqwest::RequestBuilder;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default transport timeout applied to every outbound call.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS);

/// How list requests are sent to the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListMethod {
    /// `POST {host}/{Endpoint}/.search` with a `SearchRequest` body (RFC 7644 §3.4.3)
    #[default]
    Search,
    /// `GET {host}/{Endpoint}` with the filter in the query string (RFC 7644 §3.4.2)
    Get,
}

/// Where the SCIM service lives and how to authenticate against it.
///
/// The host is not validated here; a malformed or unreachable host is
/// reported by the first list call. `requestTimeoutSecs` accepts fractional
/// seconds, and `0` disables the transport timeout.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionParams {
    pub host: String,
    #[serde(default, alias = "clientid")]
    pub client_id: String,
    #[serde(default, alias = "clientsecret")]
    pub client_secret: String,
    #[serde(default, alias = "listmethod")]
    pub list_method: ListMethod,
    #[serde(
        rename = "requestTimeoutSecs",
        alias = "requesttimeoutsecs",
        default = "default_request_timeout",
        with = "timeout_secs"
    )]
    pub request_timeout: Duration,
}

fn default_request_timeout() -> Duration {
    DEFAULT_REQUEST_TIMEOUT
}

/// A `Duration` written as a number of seconds.
mod timeout_secs {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(timeout: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(timeout.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs)
            .map_err(|e| D::Error::custom(format!("invalid requestTimeoutSecs {secs}: {e}")))
    }
}

impl ConnectionParams {
    pub fn new(
        host: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            list_method: ListMethod::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_list_method(mut self, list_method: ListMethod) -> Self {
        self.list_method = list_method;
        self
    }

    /// Transport timeout for every call; `Duration::ZERO` disables it.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// The transport timeout, or `None` when it is disabled.
    pub fn request_timeout(&self) -> Option<Duration> {
        (!self.request_timeout.is_zero()).then_some(self.request_timeout)
    }

    /// Host with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.host.trim_end_matches('/')
    }
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("host", &self.host)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("list_method", &self.list_method)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Precomputed `Authorization` header for client credentials.
#[derive(Clone)]
pub(crate) struct ClientCredentials {
    header: Option<HeaderValue>,
}

impl ClientCredentials {
    /// HTTP Basic credentials from the client id and secret; none when both are empty.
    pub(crate) fn from_params(params: &ConnectionParams) -> Self {
        if params.client_id.is_empty() && params.client_secret.is_empty() {
            return Self { header: None };
        }

        let encoded = BASE64.encode(format!("{}:{}", params.client_id, params.client_secret));
        let header = HeaderValue::from_str(&format!("Basic {encoded}"))
            .ok()
            .map(|mut value| {
                value.set_sensitive(true);
                value
            });
        Self { header }
    }

    pub(crate) fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.header {
            Some(value) => builder.header(AUTHORIZATION, value.clone()),
            None => builder,
        }
    }

    pub(crate) fn is_present(&self) -> bool {
        self.header.is_some()
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("header", &self.header.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
