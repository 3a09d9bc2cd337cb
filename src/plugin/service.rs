//! Host-facing service contract.
//!
//! The host talks to the plugin through two services: one configures it, the
//! other answers membership queries. Messages use camelCase JSON field names.

use crate::context::RequestContext;
use crate::error::PluginResult;
use serde::{Deserialize, Serialize};
use std::future::Future;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigureRequest {
    /// The YAML configuration document
    pub yaml_configuration: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigureResponse {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetUsersForGroupRequest {
    pub group_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetUsersForGroupResponse {
    pub users: Vec<User>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetGroupsForUserRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetGroupsForUserResponse {
    pub groups: Vec<Group>,
}

/// A user as the host sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
}

/// A group as the host sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
}

impl GetUsersForGroupRequest {
    pub fn new(group_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
        }
    }
}

impl GetGroupsForUserRequest {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Configuration entry point of the plugin.
pub trait ConfigService: Send + Sync {
    /// Apply the YAML configuration carried by `request`.
    fn configure(
        &self,
        request: ConfigureRequest,
    ) -> impl Future<Output = PluginResult<ConfigureResponse>> + Send;
}

/// Membership queries answered by the plugin.
///
/// Both calls issue exactly one list request against the backend. An empty
/// result is a success, not an error.
pub trait IdentityManagementService: Send + Sync {
    /// Users whose membership matches `request.group_id`.
    fn get_users_for_group(
        &self,
        context: &RequestContext,
        request: GetUsersForGroupRequest,
    ) -> impl Future<Output = PluginResult<GetUsersForGroupResponse>> + Send;

    /// Groups that match `request.user_id`.
    fn get_groups_for_user(
        &self,
        context: &RequestContext,
        request: GetGroupsForUserRequest,
    ) -> impl Future<Output = PluginResult<GetGroupsForUserResponse>> + Send;
}
