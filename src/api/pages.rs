//! Reading and editing page content

use crate::api::client::MediaWikiClient;
use crate::api::responses::{EditResponse, PagesQuery, QueryResponse};
use crate::api::ApiError;

/// Optional parameters of an edit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditOptions {
    /// Edit summary shown in the page history
    pub summary: String,

    /// Mark as a minor edit
    pub minor: bool,

    /// Mark as a bot edit
    pub bot: bool,
}

impl MediaWikiClient {
    /// Retrieves the wikitext of a page
    ///
    /// Returns `Ok(None)` if the page does not exist.
    pub async fn get_page(&self, title: &str) -> Result<Option<String>, ApiError> {
        let response: QueryResponse<PagesQuery> = self
            .get_json(&[
                ("action", "query"),
                ("prop", "revisions"),
                ("titles", title),
                ("rvprop", "content"),
                ("rvslots", "main"),
            ])
            .await?;

        if let Some(error) = response.error {
            return Err(ApiError::Remote {
                code: error.code,
                info: error.info,
            });
        }

        let query = response.query.ok_or_else(|| {
            ApiError::Malformed(format!("no 'query' in response for '{}'", title))
        })?;

        let Some(page) = query.pages.into_values().next() else {
            return Err(ApiError::Malformed(format!(
                "no pages in response for '{}'",
                title
            )));
        };

        if !page.exists() {
            tracing::debug!(
                "Page '{}' does not exist",
                page.title.as_deref().unwrap_or(title)
            );
            return Ok(None);
        }

        let content = page
            .revisions
            .into_iter()
            .next()
            .and_then(|revision| revision.main_content())
            .ok_or_else(|| ApiError::Malformed(format!("no revision content for '{}'", title)))?;

        Ok(Some(content))
    }

    /// Creates or replaces a page
    ///
    /// Logs in first if this client has not authenticated yet.
    ///
    /// # Errors
    ///
    /// * `ApiError::AuthRequired` / `ApiError::Login` - login was impossible
    /// * `ApiError::EditRejected` - the wiki refused the edit
    pub async fn edit_page(
        &self,
        title: &str,
        content: &str,
        options: &EditOptions,
    ) -> Result<(), ApiError> {
        self.ensure_logged_in().await?;

        let token = self.fetch_token("csrf").await?;

        let mut form = vec![
            ("action", "edit"),
            ("title", title),
            ("text", content),
            ("summary", options.summary.as_str()),
            ("token", token.as_str()),
        ];
        if options.minor {
            form.push(("minor", "1"));
        }
        if options.bot {
            form.push(("bot", "1"));
        }

        let response: EditResponse = self.post_json(&form).await?;

        if let Some(error) = response.error {
            tracing::error!("Edit failed: {}", error.info);
            return Err(ApiError::EditRejected(error.info));
        }

        match response.edit {
            Some(edit) if edit.result == "Success" => {
                tracing::debug!(
                    "Successfully edited page '{}' (revision {:?})",
                    title,
                    edit.newrevid
                );
                Ok(())
            }
            Some(edit) => Err(ApiError::EditRejected(edit.result)),
            None => Err(ApiError::Malformed(
                "edit response has no 'edit' object".to_string(),
            )),
        }
    }
}
