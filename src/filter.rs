//! SCIM filter construction.
//!
//! Host queries are translated into a single attribute equality comparison.
//! The attribute is the per-kind default unless the deployment configured an
//! override; an override always wins, even when it is an empty string.
//!
//! # Examples
//!
//! ```rust
//! use scim_identity_plugin::filter::{build_filter, DEFAULT_FILTER_ATTRIBUTE};
//!
//! let filter = build_filter(DEFAULT_FILTER_ATTRIBUTE, "KeyAdmin", None);
//! assert_eq!(filter.attribute, "displayName");
//!
//! let filter = build_filter(DEFAULT_FILTER_ATTRIBUTE, "KeyAdmin", Some("externalId"));
//! assert_eq!(filter.attribute, "externalId");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribute matched against the request value when no override is configured.
pub const DEFAULT_FILTER_ATTRIBUTE: &str = "displayName";

/// Default attribute for the users-of-a-group query.
pub const DEFAULT_USERS_FILTER_ATTRIBUTE: &str = DEFAULT_FILTER_ATTRIBUTE;

/// Default attribute for the groups-of-a-user query.
pub const DEFAULT_GROUPS_FILTER_ATTRIBUTE: &str = DEFAULT_FILTER_ATTRIBUTE;

/// Comparison operators emitted by the filter builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterOperator {
    /// Equal comparison
    #[serde(rename = "eq")]
    Equal,
}

impl FilterOperator {
    /// The operator keyword in SCIM filter grammar.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Equal => "eq",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `attribute operator value` comparison.
///
/// The value is stored exactly as supplied; quoting and escaping for the
/// wire happen when the client encodes the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterComparison {
    pub attribute: String,
    pub operator: FilterOperator,
    pub value: String,
}

impl FilterComparison {
    /// Create an equality comparison.
    pub fn equal(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            operator: FilterOperator::Equal,
            value: value.into(),
        }
    }
}

/// Build the filter for a query.
///
/// `override_attribute` is tri-state: `None` selects `default_attribute`,
/// while any `Some`, including `Some("")`, replaces it without validation.
pub fn build_filter(
    default_attribute: &str,
    value: &str,
    override_attribute: Option<&str>,
) -> FilterComparison {
    let attribute = override_attribute.unwrap_or(default_attribute);
    FilterComparison::equal(attribute, value)
}
