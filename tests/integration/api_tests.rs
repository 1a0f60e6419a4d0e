//! MediaWiki client tests: page fetch, links, login, edit and retries

use crate::common::*;
use serde_json::json;
use wikicli::{ApiError, EditOptions};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_get_page_returns_main_slot_content() {
    let server = MockServer::start().await;
    mount_page(&server, "Main Page", "Welcome to '''the wiki'''").await;

    let client = anonymous_client(&server);
    let content = client.get_page("Main Page").await.unwrap();

    assert_eq!(content.as_deref(), Some("Welcome to '''the wiki'''"));
}

#[tokio::test]
async fn test_get_page_sends_json_format_and_slots() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("action", "query"))
        .and(query_param("rvprop", "content"))
        .and(query_param("rvslots", "main"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body("Sandbox", "x")))
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    assert_eq!(
        client.get_page("Sandbox").await.unwrap().as_deref(),
        Some("x")
    );
}

#[tokio::test]
async fn test_get_page_legacy_content_field() {
    let server = MockServer::start().await;
    let body = json!({
        "query": {
            "pages": {
                "7": { "pageid": 7, "title": "Old", "revisions": [{ "*": "legacy text" }] }
            }
        }
    });
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    assert_eq!(
        client.get_page("Old").await.unwrap().as_deref(),
        Some("legacy text")
    );
}

#[tokio::test]
async fn test_get_missing_page_is_none() {
    let server = MockServer::start().await;
    mount_missing(&server, "No Such Page").await;

    let client = anonymous_client(&server);
    assert_eq!(client.get_page("No Such Page").await.unwrap(), None);
}

#[tokio::test]
async fn test_get_page_without_query_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "batchcomplete": "" })))
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let result = client.get_page("Anything").await;
    assert!(matches!(result, Err(ApiError::Malformed(_))));
}

#[tokio::test]
async fn test_get_page_api_error() {
    let server = MockServer::start().await;
    let body = json!({ "error": { "code": "readapidenied", "info": "You need read permission" } });
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    match client.get_page("Private").await {
        Err(ApiError::Remote { code, .. }) => assert_eq!(code, "readapidenied"),
        other => panic!("expected remote error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_links_follow_continuation() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("prop", "links"))
        .and(query_param("pllimit", "500"))
        .and(NoQueryParam("plcontinue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(links_body(
            "Hub",
            &["Alpha", "Beta"],
            Some("101|0|Gamma"),
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("prop", "links"))
        .and(query_param("plcontinue", "101|0|Gamma"))
        .respond_with(ResponseTemplate::new(200).set_body_json(links_body(
            "Hub",
            &["Gamma"],
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let links = client.get_links("Hub").await.unwrap();

    assert_eq!(links, vec!["Alpha", "Beta", "Gamma"]);
}

#[tokio::test]
async fn test_link_pager_yields_batches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(NoQueryParam("plcontinue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(links_body(
            "Hub",
            &["Alpha"],
            Some("next"),
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("plcontinue", "next"))
        .respond_with(ResponseTemplate::new(200).set_body_json(links_body("Hub", &["Beta"], None)))
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let mut pager = client.links("Hub");

    assert_eq!(pager.next_batch().await.unwrap(), Some(vec!["Alpha".to_string()]));
    assert_eq!(pager.next_batch().await.unwrap(), Some(vec!["Beta".to_string()]));
    assert_eq!(pager.next_batch().await.unwrap(), None);
}

#[tokio::test]
async fn test_links_of_missing_page_are_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("prop", "links"))
        .respond_with(ResponseTemplate::new(200).set_body_json(missing_body("Ghost")))
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    assert!(client.get_links("Ghost").await.unwrap().is_empty());
}

async fn mount_login(server: &MockServer, login_result: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("meta", "tokens"))
        .and(query_param("type", "login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "batchcomplete": "",
            "query": { "tokens": { "logintoken": "login-token+\\" } }
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(API_PATH))
        .and(body_string_contains("action=login"))
        .and(body_string_contains("lgname=Bot%40tests"))
        .and(body_string_contains("lgpassword=s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_result))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_csrf(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("meta", "tokens"))
        .and(query_param("type", "csrf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "batchcomplete": "",
            "query": { "tokens": { "csrftoken": "csrf-token+\\" } }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_login_success() {
    let server = MockServer::start().await;
    mount_login(
        &server,
        json!({ "login": { "result": "Success", "lguserid": 3, "lgusername": "Bot" } }),
    )
    .await;

    let client = bot_client(&server);
    assert!(!client.is_authenticated());

    client.login().await.unwrap();
    assert!(client.is_authenticated());
}

#[tokio::test]
async fn test_login_failure_reports_reason() {
    let server = MockServer::start().await;
    mount_login(
        &server,
        json!({ "login": { "result": "Failed", "reason": "Incorrect username or password entered." } }),
    )
    .await;

    let client = bot_client(&server);
    match client.login().await {
        Err(ApiError::Login(reason)) => assert!(reason.contains("Incorrect")),
        other => panic!("expected login error, got {:?}", other),
    }
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_login_without_credentials() {
    let server = MockServer::start().await;
    let client = anonymous_client(&server);

    assert!(matches!(
        client.login().await,
        Err(ApiError::AuthRequired(_))
    ));
}

#[tokio::test]
async fn test_edit_logs_in_and_posts_flags() {
    let server = MockServer::start().await;
    mount_login(&server, json!({ "login": { "result": "Success" } })).await;
    mount_csrf(&server).await;

    Mock::given(method("POST"))
        .and(path(API_PATH))
        .and(body_string_contains("action=edit"))
        .and(body_string_contains("title=Sandbox"))
        .and(body_string_contains("summary=testing"))
        .and(body_string_contains("minor=1"))
        .and(body_string_contains("bot=1"))
        .and(body_string_contains("format=json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "edit": { "result": "Success", "pageid": 5, "title": "Sandbox", "newrevid": 42 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = bot_client(&server);
    let options = EditOptions {
        summary: "testing".to_string(),
        minor: true,
        bot: true,
    };
    client
        .edit_page("Sandbox", "Hello ''world''", &options)
        .await
        .unwrap();

    assert!(client.is_authenticated());
}

#[tokio::test]
async fn test_edit_error_is_rejected() {
    let server = MockServer::start().await;
    mount_login(&server, json!({ "login": { "result": "Success" } })).await;
    mount_csrf(&server).await;

    Mock::given(method("POST"))
        .and(path(API_PATH))
        .and(body_string_contains("action=edit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": { "code": "protectedpage", "info": "This page has been protected" }
        })))
        .mount(&server)
        .await;

    let client = bot_client(&server);
    match client
        .edit_page("Main Page", "vandalism", &EditOptions::default())
        .await
    {
        Err(ApiError::EditRejected(info)) => assert!(info.contains("protected")),
        other => panic!("expected rejected edit, got {:?}", other),
    }
}

#[tokio::test]
async fn test_edit_without_credentials_fails_before_posting() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    let result = client
        .edit_page("Sandbox", "text", &EditOptions::default())
        .await;
    assert!(matches!(result, Err(ApiError::AuthRequired(_))));
}

#[tokio::test]
async fn test_server_error_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "Flaky", "eventually").await;

    let client = anonymous_client(&server);
    assert_eq!(
        client.get_page("Flaky").await.unwrap().as_deref(),
        Some("eventually")
    );
}

#[tokio::test]
async fn test_retries_are_bounded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    match client.get_page("Down").await {
        Err(ApiError::Status { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client(&server);
    match client.get_page("Forbidden").await {
        Err(ApiError::Status { status, .. }) => assert_eq!(status, 403),
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_page_url_for_mock_server() {
    let server = MockServer::start().await;
    let client = anonymous_client(&server);

    assert_eq!(
        client.page_url("Main Page").unwrap().as_str(),
        format!("{}/w/wiki/Main_Page", server.uri())
    );
}
