//! Configuring the plugin from the host's YAML document.

use crate::common::fixtures::GROUP_DISPLAY_NAME;
use crate::common::{self, mock_backend};
use scim_identity_plugin::plugin::{
    ConfigService, ConfigureRequest, GetGroupsForUserRequest, Group, IdentityManagementService,
    ScimPlugin,
};
use scim_identity_plugin::{ConfigError, ListMethod, PluginConfig, PluginError, RequestContext};

fn configure_request(yaml: impl Into<String>) -> ConfigureRequest {
    ConfigureRequest {
        yaml_configuration: yaml.into(),
    }
}

#[tokio::test]
async fn test_configure_then_query() {
    let server = mock_backend::groups_backend().await;
    let plugin = ScimPlugin::new();

    plugin
        .configure(configure_request(common::yaml_config(&server.uri())))
        .await
        .unwrap();

    let ctx = RequestContext::new("after-configure");
    let response = plugin
        .get_groups_for_user(&ctx, GetGroupsForUserRequest::new("None"))
        .await
        .unwrap();
    assert_eq!(response.groups, vec![Group::new(GROUP_DISPLAY_NAME)]);
}

#[tokio::test]
async fn test_query_before_configure() {
    let plugin = ScimPlugin::new();
    let ctx = RequestContext::new("before-configure");

    let error = plugin
        .get_groups_for_user(&ctx, GetGroupsForUserRequest::new("None"))
        .await
        .unwrap_err();
    assert!(matches!(error, PluginError::NotConfigured));
}

#[tokio::test]
async fn test_second_configure_is_rejected() {
    let plugin = ScimPlugin::new();
    plugin
        .configure(configure_request(common::yaml_config("https://first.example.com")))
        .await
        .unwrap();

    let error = plugin
        .configure(configure_request(common::yaml_config("https://second.example.com")))
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        PluginError::Configuration(ConfigError::AlreadyConfigured)
    ));
    assert_eq!(
        plugin.adapter().unwrap().client().base_url(),
        "https://first.example.com"
    );
}

#[tokio::test]
async fn test_bad_host_is_accepted_at_configure_time() {
    let plugin = ScimPlugin::new();
    plugin
        .configure(configure_request(common::yaml_config("badurl")))
        .await
        .unwrap();
    assert!(plugin.is_configured());
}

#[tokio::test]
async fn test_malformed_yaml_is_configuration_error() {
    let plugin = ScimPlugin::new();
    let error = plugin
        .configure(configure_request("connectCfg: \"just a string\""))
        .await
        .unwrap_err();

    assert!(matches!(error, PluginError::Configuration(ConfigError::Yaml(_))));
    assert!(!plugin.is_configured());
}

#[test]
fn test_overrides_are_tri_state() {
    let unset = PluginConfig::from_yaml("connectCfg:\n  host: https://h\n").unwrap();
    assert_eq!(unset.request_params.group_attribute, None);
    assert_eq!(unset.request_params.user_attribute, None);

    let empty = PluginConfig::from_yaml(
        "connectCfg:\n  host: https://h\nrequestParams:\n  groupAttribute: ''\n  userAttribute: externalId\n",
    )
    .unwrap();
    assert_eq!(empty.request_params.group_attribute.as_deref(), Some(""));
    assert_eq!(
        empty.request_params.user_attribute.as_deref(),
        Some("externalId")
    );
}

#[test]
fn test_list_method_from_yaml() {
    let config =
        PluginConfig::from_yaml("connectCfg:\n  host: https://h\n  listMethod: get\n").unwrap();
    assert_eq!(config.connect_cfg.list_method, ListMethod::Get);

    let error = PluginConfig::from_yaml("connectCfg:\n  host: https://h\n  listMethod: patch\n")
        .unwrap_err();
    assert!(matches!(error, ConfigError::Yaml(_)));
}
