//! Translation between host queries and SCIM list calls.

use super::service::{GetGroupsForUserResponse, GetUsersForGroupResponse, Group, User};
use crate::client::ScimClient;
use crate::config::{PluginConfig, RequestParams};
use crate::context::RequestContext;
use crate::error::{ConfigError, ConfigResult, PluginError, PluginResult};
use crate::filter::{DEFAULT_GROUPS_FILTER_ATTRIBUTE, DEFAULT_USERS_FILTER_ATTRIBUTE, build_filter};
use log::debug;

/// SCIM client plus the attribute overrides that shape its filters.
#[derive(Debug, Clone)]
pub struct ScimAdapter {
    client: ScimClient,
    request_params: RequestParams,
}

impl ScimAdapter {
    /// Build the adapter for `config`.
    pub fn new(config: PluginConfig) -> ConfigResult<Self> {
        let client = ScimClient::new(&config.connect_cfg).map_err(ConfigError::Client)?;
        Ok(Self::from_parts(client, config.request_params))
    }

    pub fn from_parts(client: ScimClient, request_params: RequestParams) -> Self {
        Self {
            client,
            request_params,
        }
    }

    pub fn client(&self) -> &ScimClient {
        &self.client
    }

    pub fn request_params(&self) -> &RequestParams {
        &self.request_params
    }

    /// Users matching `group_id` on the group attribute.
    ///
    /// Inactive users are included. The result keeps the provider's order.
    pub async fn get_users_for_group(
        &self,
        ctx: &RequestContext,
        group_id: &str,
    ) -> PluginResult<GetUsersForGroupResponse> {
        let filter = build_filter(
            DEFAULT_USERS_FILTER_ATTRIBUTE,
            group_id,
            self.request_params.group_attribute.as_deref(),
        );

        let list = self
            .client
            .list_users(ctx, true, Some(&filter), None, None)
            .await
            .map_err(PluginError::GetUsersForGroup)?;

        debug!(
            "Resolved {} users for group '{}' (request: '{}')",
            list.resources.len(),
            group_id,
            ctx.request_id
        );

        let users = list
            .resources
            .iter()
            .map(|user| User::new(user.display_name_or_default()))
            .collect();
        Ok(GetUsersForGroupResponse { users })
    }

    /// Groups matching `user_id` on the user attribute.
    pub async fn get_groups_for_user(
        &self,
        ctx: &RequestContext,
        user_id: &str,
    ) -> PluginResult<GetGroupsForUserResponse> {
        let filter = build_filter(
            DEFAULT_GROUPS_FILTER_ATTRIBUTE,
            user_id,
            self.request_params.user_attribute.as_deref(),
        );

        let list = self
            .client
            .list_groups(ctx, true, Some(&filter), None, None)
            .await
            .map_err(PluginError::GetGroupsForUser)?;

        debug!(
            "Resolved {} groups for user '{}' (request: '{}')",
            list.resources.len(),
            user_id,
            ctx.request_id
        );

        let groups = list
            .resources
            .iter()
            .map(|group| Group::new(group.display_name_or_default()))
            .collect();
        Ok(GetGroupsForUserResponse { groups })
    }
}
