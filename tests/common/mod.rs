//! Shared test utilities.
//!
//! - `fixtures` - SCIM payloads captured from a real provider
//! - `mock_backend` - wiremock providers serving those payloads
//! - Plugin and client constructors pointing at a mock backend

use scim_identity_plugin::client::{ConnectionParams, ListMethod, ScimClient};
use scim_identity_plugin::config::{PluginConfig, RequestParams};
use scim_identity_plugin::plugin::ScimPlugin;


pub const CLIENT_ID: &str = "test-client";
pub const CLIENT_SECRET: &str = "unreal";

/// Connection parameters for `host` with the test credentials.
pub fn connection(host: &str) -> ConnectionParams {
    ConnectionParams::new(host, CLIENT_ID, CLIENT_SECRET)
}

/// A client for `host` using `list_method`.
pub fn client(host: &str, list_method: ListMethod) -> ScimClient {
    ScimClient::new(&connection(host).with_list_method(list_method))
        .expect("client should build")
}

/// A configured plugin for `host` with the given attribute overrides.
pub fn plugin(
    host: &str,
    group_attribute: Option<&str>,
    user_attribute: Option<&str>,
) -> ScimPlugin {
    let request_params = RequestParams {
        group_attribute: group_attribute.map(str::to_string),
        user_attribute: user_attribute.map(str::to_string),
    };
    ScimPlugin::with_config(PluginConfig::new(connection(host), request_params))
        .expect("plugin should configure")
}

/// YAML configuration document for `host`.
pub fn yaml_config(host: &str) -> String {
    format!(
        "connectCfg:\n  host: {}\n  clientId: {}\n  clientSecret: {}\n",
        host, CLIENT_ID, CLIENT_SECRET
    )
}
