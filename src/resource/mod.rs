//! SCIM resource model consumed by the client.
//!
//! # Key Components
//!
//! * [`ScimUser`] / [`ScimGroup`] - Typed core attributes plus a catch-all for extensions
//! * [`ListResponse`] - The list envelope wrapping a page of resources
//! * [`Meta`] - Common resource metadata

pub mod list_response;
pub mod types;

pub use list_response::{LIST_RESPONSE_SCHEMA, ListResponse};
pub use types::{GroupMember, GroupRef, Meta, ScimGroup, ScimUser};

/// Endpoint path of the Users resource type.
pub const USERS_ENDPOINT: &str = "Users";

/// Endpoint path of the Groups resource type.
pub const GROUPS_ENDPOINT: &str = "Groups";
