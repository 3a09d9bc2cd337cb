//! Plugin configuration document.
//!
//! The host hands the plugin one YAML document at configure time:
//!
//! ```yaml
//! connectCfg:
//!   host: https://tenant.example.com/scim
//!   clientId: my-client
//!   clientSecret: s3cret
//! requestParams:
//!   groupAttribute: externalId
//! ```
//!
//! Keys are camelCase; the all-lowercase spelling is accepted as well.

use crate::client::ConnectionParams;
use crate::error::ConfigResult;
use serde::{Deserialize, Serialize};

/// Filter attribute overrides for the two queries.
///
/// `None` keeps the default attribute. `Some("")` is a real override and is
/// sent as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParams {
    /// Attribute matched against the group id in `GetUsersForGroup`
    #[serde(default, alias = "groupattribute")]
    pub group_attribute: Option<String>,
    /// Attribute matched against the user id in `GetGroupsForUser`
    #[serde(default, alias = "userattribute")]
    pub user_attribute: Option<String>,
}

impl RequestParams {
    pub fn with_group_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.group_attribute = Some(attribute.into());
        self
    }

    pub fn with_user_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.user_attribute = Some(attribute.into());
        self
    }
}

/// Complete plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginConfig {
    #[serde(rename = "connectCfg", alias = "connectcfg")]
    pub connect_cfg: ConnectionParams,
    #[serde(rename = "requestParams", alias = "requestparams", default)]
    pub request_params: RequestParams,
}

impl PluginConfig {
    pub fn new(connect_cfg: ConnectionParams, request_params: RequestParams) -> Self {
        Self {
            connect_cfg,
            request_params,
        }
    }

    /// Parse a YAML configuration document.
    pub fn from_yaml(document: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(document)?)
    }
}
