//! Error types for the SCIM identity plugin.
//!
//! Each layer owns one error enum and wraps the layer below it as its
//! `source`, so the full cause chain survives up to the host boundary:
//!
//! ```text
//! PluginError ─► ScimClientError ─► RequestError ─► DecodeError ─► serde_json::Error
//!                                               └─► reqwest::Error
//! ```
//!
//! Callers classify failures with [`CauseChain::find_cause`] instead of
//! matching on messages.

use reqwest::StatusCode;
use std::error::Error as StdError;
use std::time::Duration;

/// Errors produced while turning an HTTP response into a typed value.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The response status did not match the status the caller expected.
    #[error("invalid response from {api}: unexpected status code {status}")]
    UnexpectedStatus { api: String, status: StatusCode },

    /// The body of an expected-status response was not valid JSON for the target type.
    #[error("invalid response from {api}")]
    Parse {
        api: String,
        #[source]
        source: serde_json::Error,
    },

    /// The body of an expected-status response could not be read.
    #[error("invalid response from {api}: failed to read body")]
    Body {
        api: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Errors from a single outbound SCIM request.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// DNS, connect, TLS, timeout or URL failures reported by the HTTP transport
    #[error("request to {api} failed")]
    Transport {
        api: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response arrived but could not be decoded
    #[error("failed to decode response")]
    Decode(#[from] DecodeError),

    /// The caller cancelled the request while it was in flight
    #[error("request to {api} was cancelled")]
    Cancelled { api: String },

    /// The caller-supplied deadline elapsed before the response was decoded
    #[error("request to {api} exceeded its deadline of {deadline:?}")]
    DeadlineExceeded { api: String, deadline: Duration },
}

/// Errors surfaced by [`ScimClient`](crate::client::ScimClient).
///
/// `ListUsers` and `ListGroups` are the two failure kinds callers of the
/// client distinguish; the underlying [`RequestError`] is the `source`.
#[derive(Debug, thiserror::Error)]
pub enum ScimClientError {
    /// Listing users failed
    #[error("failed to list users")]
    ListUsers(#[source] RequestError),

    /// Listing groups failed
    #[error("failed to list groups")]
    ListGroups(#[source] RequestError),

    /// The HTTP client could not be built from the connection parameters
    #[error("invalid client configuration: {message}")]
    InvalidConfig { message: String },
}

/// Errors raised while configuring the plugin.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The YAML configuration document could not be parsed
    #[error("failed to parse yaml configuration")]
    Yaml(#[from] serde_yaml::Error),

    /// `configure` was called on a plugin that already holds a configuration
    #[error("plugin is already configured")]
    AlreadyConfigured,

    /// The SCIM client could not be created
    #[error("failed to create plugin")]
    Client(#[source] ScimClientError),
}

/// Errors crossing the host boundary.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// Resolving the users of a group failed
    #[error("failed to get users for group")]
    GetUsersForGroup(#[source] ScimClientError),

    /// Resolving the groups of a user failed
    #[error("failed to get groups for user")]
    GetGroupsForUser(#[source] ScimClientError),

    /// A query arrived before `configure` succeeded
    #[error("plugin is not configured")]
    NotConfigured,

    /// `configure` failed
    #[error("failed to configure plugin")]
    Configuration(#[from] ConfigError),
}

impl DecodeError {
    /// Whether the response was rejected because of its status code.
    pub fn is_unexpected_status(&self) -> bool {
        matches!(self, Self::UnexpectedStatus { .. })
    }

    /// The unexpected status, if that is why decoding failed.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Name of the API whose response failed to decode.
    pub fn api(&self) -> &str {
        match self {
            Self::UnexpectedStatus { api, .. } | Self::Parse { api, .. } | Self::Body { api, .. } => {
                api
            }
        }
    }
}

impl RequestError {
    /// Whether the request was abandoned because of cancellation or an elapsed deadline.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. } | Self::DeadlineExceeded { .. })
    }
}

impl ScimClientError {
    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// The request error behind a list failure.
    pub fn request_error(&self) -> Option<&RequestError> {
        match self {
            Self::ListUsers(e) | Self::ListGroups(e) => Some(e),
            Self::InvalidConfig { .. } => None,
        }
    }
}

impl PluginError {
    /// Whether the failure originated on the Users list path.
    pub fn is_list_users_failure(&self) -> bool {
        matches!(
            self.find_cause::<ScimClientError>(),
            Some(ScimClientError::ListUsers(_))
        )
    }

    /// Whether the failure originated on the Groups list path.
    pub fn is_list_groups_failure(&self) -> bool {
        matches!(
            self.find_cause::<ScimClientError>(),
            Some(ScimClientError::ListGroups(_))
        )
    }
}

/// Typed lookup along an error's `source` chain.
pub trait CauseChain {
    /// Return the first error of type `C` in the chain, starting with `self`.
    fn find_cause<C: StdError + 'static>(&self) -> Option<&C>;

    /// Whether an error of type `C` appears anywhere in the chain.
    fn has_cause<C: StdError + 'static>(&self) -> bool {
        self.find_cause::<C>().is_some()
    }

    /// Messages of the whole chain, outermost first, joined with `": "`.
    fn display_chain(&self) -> String;
}

impl<E: StdError + 'static> CauseChain for E {
    fn find_cause<C: StdError + 'static>(&self) -> Option<&C> {
        let mut current: Option<&(dyn StdError + 'static)> = Some(self);
        while let Some(error) = current {
            if let Some(cause) = error.downcast_ref::<C>() {
                return Some(cause);
            }
            current = error.source();
        }
        None
    }

    fn display_chain(&self) -> String {
        let mut message = self.to_string();
        let mut current = self.source();
        while let Some(error) = current {
            message.push_str(": ");
            message.push_str(&error.to_string());
            current = error.source();
        }
        message
    }
}

// Result type aliases for convenience
pub type DecodeResult<T> = Result<T, DecodeError>;
pub type RequestResult<T> = Result<T, RequestError>;
pub type ScimClientResult<T> = Result<T, ScimClientError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type PluginResult<T> = Result<T, PluginError>;
