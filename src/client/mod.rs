//! SCIM 2.0 list client (reqwest-based).
//!
//! [`ScimClient`] owns the connection parameters and issues one list call per
//! query against the provider's `Users` or `Groups` endpoint. Failures are
//! classified per path: every error from [`ScimClient::list_users`] is
//! [`ScimClientError::ListUsers`], every error from
//! [`ScimClient::list_groups`] is [`ScimClientError::ListGroups`], with the
//! transport or decode cause kept as the error source.
//!
//! # Examples
//!
//! ```rust,no_run
//! use scim_identity_plugin::client::{ConnectionParams, ScimClient};
//! use scim_identity_plugin::filter::FilterComparison;
//! use scim_identity_plugin::RequestContext;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let params = ConnectionParams::new("https://tenant.example.com/scim", "client", "secret");
//! let client = ScimClient::new(&params)?;
//!
//! let filter = FilterComparison::equal("displayName", "KeyAdmin");
//! let ctx = RequestContext::with_generated_id();
//! let groups = client.list_groups(&ctx, true, Some(&filter), None, None).await?;
//! println!("{} matching groups", groups.resources.len());
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod decode;
pub mod query;

pub use connection::{ConnectionParams, DEFAULT_REQUEST_TIMEOUT_SECS, ListMethod};
pub use decode::{decode_body, decode_response};
pub use query::{ListQuery, PageParams, SearchRequest, SortOrder, SortParams, encode_filter};

use crate::context::RequestContext;
use crate::error::{RequestError, RequestResult, ScimClientError, ScimClientResult};
use crate::filter::FilterComparison;
use crate::resource::{GROUPS_ENDPOINT, ListResponse, ScimGroup, ScimUser, USERS_ENDPOINT};
use connection::ClientCredentials;
use log::debug;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::future::Future;

/// Media type of SCIM request and response bodies.
pub const SCIM_CONTENT_TYPE: &str = "application/scim+json";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// SCIM list client bound to one provider.
///
/// Cloning is cheap and clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ScimClient {
    base_url: String,
    credentials: ClientCredentials,
    list_method: ListMethod,
    http_client: Client,
}

impl ScimClient {
    /// Create a client for `params`.
    ///
    /// No request is made; an unreachable host is only reported by the first
    /// list call.
    pub fn new(params: &ConnectionParams) -> ScimClientResult<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = params.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| {
                ScimClientError::invalid_config(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self::with_http_client(params, http_client))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_http_client(params: &ConnectionParams, http_client: Client) -> Self {
        Self {
            base_url: params.base_url().to_string(),
            credentials: ClientCredentials::from_params(params),
            list_method: params.list_method,
            http_client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn list_method(&self) -> ListMethod {
        self.list_method
    }

    /// List users matching `filter`.
    pub async fn list_users(
        &self,
        ctx: &RequestContext,
        include_inactive: bool,
        filter: Option<&FilterComparison>,
        page: Option<&PageParams>,
        sort: Option<&SortParams>,
    ) -> ScimClientResult<ListResponse<ScimUser>> {
        let query = ListQuery::new(include_inactive, filter, page, sort);
        self.list(ctx, USERS_ENDPOINT, &query)
            .await
            .map_err(ScimClientError::ListUsers)
    }

    /// List groups matching `filter`.
    pub async fn list_groups(
        &self,
        ctx: &RequestContext,
        include_inactive: bool,
        filter: Option<&FilterComparison>,
        page: Option<&PageParams>,
        sort: Option<&SortParams>,
    ) -> ScimClientResult<ListResponse<ScimGroup>> {
        let query = ListQuery::new(include_inactive, filter, page, sort);
        self.list(ctx, GROUPS_ENDPOINT, &query)
            .await
            .map_err(ScimClientError::ListGroups)
    }

    async fn list<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        endpoint: &str,
        query: &ListQuery,
    ) -> RequestResult<ListResponse<T>> {
        let api_name = format!("SCIM list {endpoint}");

        let builder = match self.list_method {
            ListMethod::Search => {
                let url = format!("{}/{}/.search", self.base_url, endpoint);
                debug!(
                    "SCIM POST {} (filter={:?}, request: '{}')",
                    url, query.filter, ctx.request_id
                );
                self.http_client
                    .post(url)
                    .header(CONTENT_TYPE, SCIM_CONTENT_TYPE)
                    .json(&query.search_request())
            }
            ListMethod::Get => {
                let url = format!("{}/{}", self.base_url, endpoint);
                debug!(
                    "SCIM GET {} (filter={:?}, request: '{}')",
                    url, query.filter, ctx.request_id
                );
                self.http_client.get(url).query(&query.query_pairs())
            }
        };
        let builder = self
            .credentials
            .apply(builder.header(ACCEPT, SCIM_CONTENT_TYPE));

        let exchange = async {
            let response = builder
                .send()
                .await
                .map_err(|source| RequestError::Transport {
                    api: api_name.clone(),
                    source,
                })?;
            let list = decode_response(&api_name, response, StatusCode::OK).await?;
            Ok::<ListResponse<T>, RequestError>(list)
        };

        guarded(ctx, &api_name, exchange).await
    }
}

/// Run `exchange` until it completes, the context is cancelled, or its deadline elapses.
///
/// Losing the race drops `exchange`, which aborts the in-flight HTTP call.
async fn guarded<T, F>(ctx: &RequestContext, api_name: &str, exchange: F) -> RequestResult<T>
where
    F: Future<Output = RequestResult<T>>,
{
    let bounded = async {
        match ctx.deadline() {
            Some(deadline) => match tokio::time::timeout(deadline, exchange).await {
                Ok(result) => result,
                Err(_) => Err(RequestError::DeadlineExceeded {
                    api: api_name.to_string(),
                    deadline,
                }),
            },
            None => exchange.await,
        }
    };

    tokio::select! {
        biased;
        _ = ctx.cancellation().cancelled() => Err(RequestError::Cancelled {
            api: api_name.to_string(),
        }),
        result = bounded => result,
    }
}
