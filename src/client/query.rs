//! Encoding of list parameters into SCIM query form.
//!
//! The same [`ListQuery`] renders either as URL query pairs for `GET` or as a
//! `SearchRequest` body for `POST .search`.

use crate::filter::FilterComparison;
use serde::{Deserialize, Serialize};

/// Schema URI of a search request message.
pub const SEARCH_REQUEST_SCHEMA: &str = "urn:ietf:params:scim:api:messages:2.0:SearchRequest";

/// Pagination window (RFC 7644 §3.4.2.4). `start_index` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    pub start_index: u64,
    pub count: u64,
}

/// Sort direction (RFC 7644 §3.4.2.3).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

/// Sort parameters (RFC 7644 §3.4.2.3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortParams {
    pub sort_by: String,
    pub sort_order: SortOrder,
}

impl SortParams {
    pub fn new(sort_by: impl Into<String>, sort_order: SortOrder) -> Self {
        Self {
            sort_by: sort_by.into(),
            sort_order,
        }
    }
}

/// Body of a `POST .search` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub schemas: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

/// Fully resolved parameters of one list call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListQuery {
    /// Rendered filter expression, if any
    pub filter: Option<String>,
    pub page: Option<PageParams>,
    pub sort: Option<SortParams>,
}

impl ListQuery {
    /// Resolve the caller's list parameters.
    ///
    /// When inactive resources are excluded the expression is narrowed with
    /// `active eq true`.
    pub fn new(
        include_inactive: bool,
        filter: Option<&FilterComparison>,
        page: Option<&PageParams>,
        sort: Option<&SortParams>,
    ) -> Self {
        let expression = filter.map(encode_filter);
        let filter = match (include_inactive, expression) {
            (true, expression) => expression,
            (false, Some(expression)) => Some(format!("({expression}) and active eq true")),
            (false, None) => Some("active eq true".to_string()),
        };

        Self {
            filter,
            page: page.copied(),
            sort: sort.cloned(),
        }
    }

    /// Query string pairs for `GET` list requests.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(filter) = &self.filter {
            pairs.push(("filter", filter.clone()));
        }
        if let Some(page) = &self.page {
            pairs.push(("startIndex", page.start_index.to_string()));
            pairs.push(("count", page.count.to_string()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sortBy", sort.sort_by.clone()));
            pairs.push(("sortOrder", sort.sort_order.as_str().to_string()));
        }
        pairs
    }

    /// Body for `POST .search` requests.
    pub fn search_request(&self) -> SearchRequest {
        SearchRequest {
            schemas: vec![SEARCH_REQUEST_SCHEMA.to_string()],
            filter: self.filter.clone(),
            start_index: self.page.map(|p| p.start_index),
            count: self.page.map(|p| p.count),
            sort_by: self.sort.as_ref().map(|s| s.sort_by.clone()),
            sort_order: self.sort.as_ref().map(|s| s.sort_order),
        }
    }
}

/// Render a comparison in SCIM filter grammar: `attribute op "value"`.
pub fn encode_filter(filter: &FilterComparison) -> String {
    format!(
        "{} {} \"{}\"",
        filter.attribute,
        filter.operator,
        escape_filter_value(&filter.value)
    )
}

/// Escape a string literal for a SCIM filter (RFC 7644 §3.4.2.2).
fn escape_filter_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
