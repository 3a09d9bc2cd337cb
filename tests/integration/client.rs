//! SCIM client behaviour on the wire: request shape, status handling,
//! decoding and cancellation.

use crate::common::fixtures::{self, USER_DISPLAY_NAME};
use crate::common::{self, CLIENT_ID, CLIENT_SECRET, mock_backend};
use reqwest::StatusCode;
use scim_identity_plugin::client::{
    ListMethod, PageParams, SCIM_CONTENT_TYPE, SortOrder, SortParams, decode_response,
};
use scim_identity_plugin::error::{CauseChain, DecodeError, RequestError, ScimClientError};
use scim_identity_plugin::filter::FilterComparison;
use scim_identity_plugin::resource::{ListResponse, ScimGroup};
use scim_identity_plugin::{ConnectionParams, RequestContext, ScimClient};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{basic_auth, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn key_admin() -> FilterComparison {
    FilterComparison::equal("displayName", "KeyAdmin")
}

#[tokio::test]
async fn test_search_request_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Groups/.search"))
        .and(basic_auth(CLIENT_ID, CLIENT_SECRET))
        .and(header("accept", SCIM_CONTENT_TYPE))
        .and(header("content-type", SCIM_CONTENT_TYPE))
        .and(body_partial_json(serde_json::json!({
            "schemas": ["urn:ietf:params:scim:api:messages:2.0:SearchRequest"],
            "filter": "displayName eq \"KeyAdmin\""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::list_groups_response()))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client(&server.uri(), ListMethod::Search);
    let ctx = RequestContext::new("search-shape");
    let groups = client
        .list_groups(&ctx, true, Some(&key_admin()), None, None)
        .await
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups.total_results, 1);
}

#[tokio::test]
async fn test_get_request_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Users"))
        .and(query_param(
            "filter",
            "(userName eq \"jdoe\") and active eq true",
        ))
        .and(query_param("startIndex", "1"))
        .and(query_param("count", "50"))
        .and(query_param("sortBy", "userName"))
        .and(query_param("sortOrder", "ascending"))
        .and(basic_auth(CLIENT_ID, CLIENT_SECRET))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::list_users_response()))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client(&server.uri(), ListMethod::Get);
    let ctx = RequestContext::new("get-shape");
    let page = PageParams {
        start_index: 1,
        count: 50,
    };
    let sort = SortParams::new("userName", SortOrder::Ascending);

    let users = client
        .list_users(
            &ctx,
            false,
            Some(&FilterComparison::equal("userName", "jdoe")),
            Some(&page),
            Some(&sort),
        )
        .await
        .unwrap();

    assert_eq!(
        users.resources[0].display_name.as_deref(),
        Some(USER_DISPLAY_NAME)
    );
}

#[tokio::test]
async fn test_no_credentials_no_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Groups/.search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::empty_response()))
        .mount(&server)
        .await;

    let client = ScimClient::new(&ConnectionParams::new(server.uri(), "", "")).unwrap();
    let ctx = RequestContext::new("anonymous");
    client
        .list_groups(&ctx, true, Some(&key_admin()), None, None)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_trailing_slash_in_host() {
    let server = mock_backend::groups_backend().await;
    let client = common::client(&format!("{}/", server.uri()), ListMethod::Search);
    let ctx = RequestContext::new("trailing-slash");

    let groups = client
        .list_groups(&ctx, true, Some(&key_admin()), None, None)
        .await
        .unwrap();
    assert_eq!(groups.len(), 1);
}

#[tokio::test]
async fn test_empty_result_is_success() {
    let server = mock_backend::groups_backend().await;
    let client = common::client(&server.uri(), ListMethod::Search);
    let ctx = RequestContext::new("empty");

    let groups = client
        .list_groups(
            &ctx,
            true,
            Some(&FilterComparison::equal("displayName", "Non-existent")),
            None,
            None,
        )
        .await
        .unwrap();

    assert!(groups.is_empty());
    assert_eq!(groups.total_results, 0);
}

#[tokio::test]
async fn test_unexpected_status_is_classified() {
    let server = mock_backend::status_backend(404, r#"{"detail": "tenant not found"}"#).await;
    let client = common::client(&server.uri(), ListMethod::Search);
    let ctx = RequestContext::new("not-found");

    let error = client
        .list_users(&ctx, true, Some(&key_admin()), None, None)
        .await
        .unwrap_err();

    assert!(matches!(error, ScimClientError::ListUsers(_)));
    let decode = error
        .find_cause::<DecodeError>()
        .expect("decode error in chain");
    assert!(decode.is_unexpected_status());
    assert_eq!(decode.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(decode.api(), "SCIM list Users");
}

#[tokio::test]
async fn test_created_status_is_not_ok() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_body_json(fixtures::list_groups_response()))
        .mount(&server)
        .await;

    let client = common::client(&server.uri(), ListMethod::Search);
    let ctx = RequestContext::new("created");

    let error = client
        .list_groups(&ctx, true, Some(&key_admin()), None, None)
        .await
        .unwrap_err();

    let decode = error.find_cause::<DecodeError>().unwrap();
    assert_eq!(decode.status(), Some(StatusCode::CREATED));
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = mock_backend::status_backend(200, "<html>maintenance</html>").await;
    let client = common::client(&server.uri(), ListMethod::Search);
    let ctx = RequestContext::new("malformed");

    let error = client
        .list_groups(&ctx, true, Some(&key_admin()), None, None)
        .await
        .unwrap_err();

    assert!(matches!(error, ScimClientError::ListGroups(_)));
    assert!(matches!(
        error.find_cause::<DecodeError>(),
        Some(DecodeError::Parse { .. })
    ));
    assert!(error.has_cause::<serde_json::Error>());
}

#[tokio::test]
async fn test_missing_resources_key_is_empty() {
    let server = mock_backend::status_backend(200, r#"{"totalResults": 0}"#).await;
    let client = common::client(&server.uri(), ListMethod::Search);
    let ctx = RequestContext::new("no-resources");

    let groups = client
        .list_groups(&ctx, true, Some(&key_admin()), None, None)
        .await
        .unwrap();
    assert!(groups.is_empty());
}

#[tokio::test]
async fn test_null_resources_is_empty() {
    let server =
        mock_backend::status_backend(200, r#"{"Resources": null, "totalResults": null}"#).await;
    let client = common::client(&server.uri(), ListMethod::Search);
    let ctx = RequestContext::new("null-resources");

    let groups = client
        .list_groups(&ctx, true, Some(&key_admin()), None, None)
        .await
        .unwrap();
    assert!(groups.is_empty());
    assert_eq!(groups.total_results, 0);
}

#[tokio::test]
async fn test_null_member_lists_are_tolerated() {
    let body = r#"{
        "Resources": [
            {"schemas": null, "displayName": "KeyAdmin", "members": null}
        ],
        "totalResults": 1
    }"#;
    let server = mock_backend::status_backend(200, body).await;
    let client = common::client(&server.uri(), ListMethod::Search);
    let ctx = RequestContext::new("null-members");

    let groups = client
        .list_groups(&ctx, true, Some(&key_admin()), None, None)
        .await
        .unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups.resources[0].display_name.as_deref(), Some("KeyAdmin"));
    assert!(groups.resources[0].members.is_empty());
}

#[tokio::test]
async fn test_cancellation_aborts_slow_request() {
    let server = mock_backend::slow_backend("Users", Duration::from_secs(10)).await;
    let client = common::client(&server.uri(), ListMethod::Search);

    let token = CancellationToken::new();
    let ctx = RequestContext::new("cancelled").with_cancellation(token.clone());

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
    });

    let error = client
        .list_users(&ctx, true, Some(&key_admin()), None, None)
        .await
        .unwrap_err();
    canceller.await.unwrap();

    assert!(matches!(error, ScimClientError::ListUsers(_)));
    let request_error = error.request_error().unwrap();
    assert!(matches!(request_error, RequestError::Cancelled { .. }));
    assert!(request_error.is_cancelled());
}

#[tokio::test]
async fn test_deadline_bounds_slow_request() {
    let server = mock_backend::slow_backend("Groups", Duration::from_secs(10)).await;
    let client = common::client(&server.uri(), ListMethod::Search);
    let ctx = RequestContext::new("deadline").with_deadline(Duration::from_millis(100));

    let error = client
        .list_groups(&ctx, true, Some(&key_admin()), None, None)
        .await
        .unwrap_err();

    assert!(matches!(
        error.find_cause::<RequestError>(),
        Some(RequestError::DeadlineExceeded { .. })
    ));
    assert!(matches!(error, ScimClientError::ListGroups(_)));
}

#[tokio::test]
async fn test_transport_timeout_is_transport_error() {
    let server = mock_backend::slow_backend("Users", Duration::from_secs(10)).await;
    let params = common::connection(&server.uri()).with_request_timeout(Duration::from_secs(1));
    let client = ScimClient::new(&params).unwrap();
    let ctx = RequestContext::new("transport-timeout");

    let error = client
        .list_users(&ctx, true, Some(&key_admin()), None, None)
        .await
        .unwrap_err();

    match error.find_cause::<RequestError>() {
        Some(RequestError::Transport { source, .. }) => assert!(source.is_timeout()),
        other => panic!("expected transport timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_sub_second_timeout_allows_fast_backend() {
    let server = mock_backend::groups_backend().await;
    let params =
        common::connection(&server.uri()).with_request_timeout(Duration::from_millis(500));
    let client = ScimClient::new(&params).unwrap();
    let ctx = RequestContext::new("sub-second-timeout");

    let groups = client
        .list_groups(&ctx, true, Some(&key_admin()), None, None)
        .await
        .unwrap();
    assert_eq!(groups.resources[0].display_name.as_deref(), Some("KeyAdmin"));
}

#[tokio::test]
async fn test_zero_timeout_means_no_timeout() {
    let server = mock_backend::slow_backend("Users", Duration::from_millis(200)).await;
    let params = common::connection(&server.uri()).with_request_timeout(Duration::ZERO);
    let client = ScimClient::new(&params).unwrap();
    let ctx = RequestContext::new("no-timeout");

    let users = client
        .list_users(&ctx, true, Some(&key_admin()), None, None)
        .await
        .unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_decode_response_directly() {
    let server = mock_backend::groups_backend().await;
    let response = reqwest::Client::new()
        .post(format!("{}/Groups/.search", server.uri()))
        .body("{}")
        .send()
        .await
        .unwrap();

    let groups: ListResponse<ScimGroup> = decode_response("SCIM list Groups", response, StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(groups.resources[0].display_name.as_deref(), Some("KeyAdmin"));
}

#[tokio::test]
async fn test_decode_response_never_parses_unexpected_status() {
    let server = mock_backend::status_backend(500, &fixtures::list_groups_response().to_string()).await;
    let response = reqwest::Client::new()
        .post(format!("{}/Groups/.search", server.uri()))
        .send()
        .await
        .unwrap();

    let error = decode_response::<ListResponse<ScimGroup>>("SCIM list Groups", response, StatusCode::OK)
        .await
        .unwrap_err();
    assert_eq!(error.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
}
