//! SCIM `ListResponse` envelope (RFC 7644 §3.4.2).

use crate::resource::types::null_as_default;
use serde::{Deserialize, Serialize};

/// Schema URI of a list response message.
pub const LIST_RESPONSE_SCHEMA: &str = "urn:ietf:params:scim:api:messages:2.0:ListResponse";

/// A page of resources returned by a list or search call.
///
/// Only `resources` is consumed by the plugin; the pagination counters are
/// decoded for completeness. A provider that omits `Resources` on an empty
/// result, or sends it as `null`, still decodes to an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct ListResponse<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub schemas: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_results: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_index: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items_per_page: u64,
    #[serde(
        rename = "Resources",
        default = "Vec::new",
        deserialize_with = "null_as_default"
    )]
    pub resources: Vec<T>,
}

impl<T> ListResponse<T> {
    /// Build a single-page response around `resources`.
    pub fn new(resources: Vec<T>) -> Self {
        let count = resources.len() as u64;
        Self {
            schemas: vec![LIST_RESPONSE_SCHEMA.to_string()],
            total_results: count,
            start_index: 1,
            items_per_page: count,
            resources,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
