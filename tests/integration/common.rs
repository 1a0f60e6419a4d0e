use serde_json::{json, Value};
use wikicli::api::Credentials;
use wikicli::config::HttpConfig;
use wikicli::MediaWikiClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

pub const API_PATH: &str = "/w/api.php";

/// Matches requests whose query string lacks `name`
pub struct NoQueryParam(pub &'static str);

impl Match for NoQueryParam {
    fn matches(&self, request: &Request) -> bool {
        !request.url.query_pairs().any(|(key, _)| key == self.0)
    }
}

/// HTTP settings with short retry delays
pub fn fast_http() -> HttpConfig {
    HttpConfig {
        user_agent: "wikicli-tests/0.1".to_string(),
        timeout_secs: 5,
        max_retries: 2,
        retry_delay_ms: 10,
    }
}

pub fn api_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), API_PATH)
}

pub fn anonymous_client(server: &MockServer) -> MediaWikiClient {
    MediaWikiClient::new(&api_url(server), None, &fast_http()).expect("Failed to build client")
}

pub fn bot_client(server: &MockServer) -> MediaWikiClient {
    MediaWikiClient::new(
        &api_url(server),
        Some(Credentials::new("Bot@tests", "s3cret")),
        &fast_http(),
    )
    .expect("Failed to build client")
}

/// `prop=revisions` response for an existing page
pub fn page_body(title: &str, content: &str) -> Value {
    json!({
        "batchcomplete": "",
        "query": {
            "pages": {
                "101": {
                    "pageid": 101,
                    "ns": 0,
                    "title": title,
                    "revisions": [{
                        "slots": {
                            "main": {
                                "contentmodel": "wikitext",
                                "contentformat": "text/x-wiki",
                                "*": content
                            }
                        }
                    }]
                }
            }
        }
    })
}

/// `prop=revisions` response for a page that does not exist
pub fn missing_body(title: &str) -> Value {
    json!({
        "batchcomplete": "",
        "query": {
            "pages": {
                "-1": { "ns": 0, "title": title, "missing": "" }
            }
        }
    })
}

/// `prop=links` response; `next` becomes the `plcontinue` token
pub fn links_body(title: &str, links: &[&str], next: Option<&str>) -> Value {
    let links: Vec<Value> = links
        .iter()
        .map(|l| json!({ "ns": 0, "title": l }))
        .collect();

    let mut body = json!({
        "query": {
            "pages": {
                "101": { "pageid": 101, "ns": 0, "title": title, "links": links }
            }
        }
    });
    match next {
        Some(token) => {
            body["continue"] = json!({ "plcontinue": token, "continue": "||" });
        }
        None => {
            body["batchcomplete"] = json!("");
        }
    }
    body
}

/// Serves `content` for `title`
pub async fn mount_page(server: &MockServer, title: &str, content: &str) {
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("prop", "revisions"))
        .and(query_param("titles", title))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(title, content)))
        .mount(server)
        .await;
}

/// Reports `title` as missing
pub async fn mount_missing(server: &MockServer, title: &str) {
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("prop", "revisions"))
        .and(query_param("titles", title))
        .respond_with(ResponseTemplate::new(200).set_body_json(missing_body(title)))
        .mount(server)
        .await;
}

/// Serves a single, complete batch of links for `title`
pub async fn mount_links(server: &MockServer, title: &str, links: &[&str]) {
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("prop", "links"))
        .and(query_param("titles", title))
        .respond_with(ResponseTemplate::new(200).set_body_json(links_body(title, links, None)))
        .mount(server)
        .await;
}
