//! Response bodies of the MediaWiki action API (`format=json`, format version 1)

use serde::Deserialize;
use std::collections::HashMap;

/// Error object the API returns instead of a result
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub info: String,
}

/// `action=query` response
#[derive(Debug, Deserialize)]
pub struct QueryResponse<Q> {
    pub query: Option<Q>,

    #[serde(rename = "continue")]
    pub continuation: Option<Continuation>,

    pub error: Option<RemoteError>,
}

/// Continuation parameters for the next batch of a paginated query
#[derive(Debug, Deserialize)]
pub struct Continuation {
    pub plcontinue: Option<String>,
}

/// `query.pages`, keyed by page id (negative ids for missing pages)
#[derive(Debug, Deserialize)]
pub struct PagesQuery {
    #[serde(default)]
    pub pages: HashMap<String, PageEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PageEntry {
    pub title: Option<String>,

    /// Present (with an empty value) when the page does not exist
    pub missing: Option<serde_json::Value>,

    /// Present when the title is not a valid page name
    pub invalid: Option<serde_json::Value>,

    #[serde(default)]
    pub revisions: Vec<Revision>,

    #[serde(default)]
    pub links: Vec<LinkEntry>,
}

impl PageEntry {
    pub fn exists(&self) -> bool {
        self.missing.is_none() && self.invalid.is_none()
    }
}

#[derive(Debug, Deserialize)]
pub struct Revision {
    pub slots: Option<Slots>,

    /// Content of wikis too old to have slots
    #[serde(rename = "*")]
    pub content: Option<String>,
}

impl Revision {
    /// Content of the main slot, falling back to the legacy field
    pub fn main_content(self) -> Option<String> {
        self.slots
            .and_then(|slots| slots.main.content)
            .or(self.content)
    }
}

#[derive(Debug, Deserialize)]
pub struct Slots {
    pub main: SlotContent,
}

#[derive(Debug, Deserialize)]
pub struct SlotContent {
    #[serde(rename = "*", alias = "content")]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LinkEntry {
    pub title: String,
}

/// `meta=tokens` result
#[derive(Debug, Deserialize)]
pub struct TokensQuery {
    pub tokens: Tokens,
}

#[derive(Debug, Deserialize)]
pub struct Tokens {
    pub logintoken: Option<String>,
    pub csrftoken: Option<String>,
}

/// `action=login` response
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub login: Option<LoginResult>,
    pub error: Option<RemoteError>,
}

#[derive(Debug, Deserialize)]
pub struct LoginResult {
    pub result: String,
    pub reason: Option<String>,
    pub lgusername: Option<String>,
}

/// `action=edit` response
#[derive(Debug, Deserialize)]
pub struct EditResponse {
    pub edit: Option<EditResult>,
    pub error: Option<RemoteError>,
}

#[derive(Debug, Deserialize)]
pub struct EditResult {
    pub result: String,
    pub newrevid: Option<u64>,
}
