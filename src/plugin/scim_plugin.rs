use super::adapter::ScimAdapter;
use super::service::{
    ConfigService, ConfigureRequest, ConfigureResponse, GetGroupsForUserRequest,
    GetGroupsForUserResponse, GetUsersForGroupRequest, GetUsersForGroupResponse,
    IdentityManagementService,
};
use crate::config::PluginConfig;
use crate::context::RequestContext;
use crate::error::{ConfigError, ConfigResult, PluginError, PluginResult};
use log::info;
use std::sync::OnceLock;

/// The plugin the host loads.
///
/// Starts unconfigured. The first successful `configure` installs the
/// adapter; later calls are rejected and queries read it without locking.
#[derive(Debug, Default)]
pub struct ScimPlugin {
    adapter: OnceLock<ScimAdapter>,
}

impl ScimPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a plugin that is already configured with `config`.
    pub fn with_config(config: PluginConfig) -> ConfigResult<Self> {
        let plugin = Self::new();
        plugin.install(ScimAdapter::new(config)?)?;
        Ok(plugin)
    }

    pub fn is_configured(&self) -> bool {
        self.adapter.get().is_some()
    }

    /// The configured adapter.
    pub fn adapter(&self) -> PluginResult<&ScimAdapter> {
        self.adapter.get().ok_or(PluginError::NotConfigured)
    }

    fn install(&self, adapter: ScimAdapter) -> ConfigResult<()> {
        self.adapter
            .set(adapter)
            .map_err(|_| ConfigError::AlreadyConfigured)
    }

    fn configure_from_yaml(&self, document: &str) -> ConfigResult<()> {
        if self.is_configured() {
            return Err(ConfigError::AlreadyConfigured);
        }

        let config = PluginConfig::from_yaml(document)?;
        let host = config.connect_cfg.host.clone();
        self.install(ScimAdapter::new(config)?)?;

        info!("SCIM identity plugin configured for host '{}'", host);
        Ok(())
    }
}

impl ConfigService for ScimPlugin {
    async fn configure(&self, request: ConfigureRequest) -> PluginResult<ConfigureResponse> {
        self.configure_from_yaml(&request.yaml_configuration)?;
        Ok(ConfigureResponse::default())
    }
}

impl IdentityManagementService for ScimPlugin {
    async fn get_users_for_group(
        &self,
        context: &RequestContext,
        request: GetUsersForGroupRequest,
    ) -> PluginResult<GetUsersForGroupResponse> {
        self.adapter()?
            .get_users_for_group(context, &request.group_id)
            .await
    }

    async fn get_groups_for_user(
        &self,
        context: &RequestContext,
        request: GetGroupsForUserRequest,
    ) -> PluginResult<GetGroupsForUserResponse> {
        self.adapter()?
            .get_groups_for_user(context, &request.user_id)
            .await
    }
}
