//! Bot-password login
//!
//! MediaWiki login is a two-step handshake: fetch a login token, then post it
//! together with the credentials. The session cookie set by the second
//! request authenticates every later request of the same client.

use crate::api::client::MediaWikiClient;
use crate::api::responses::{LoginResponse, QueryResponse, TokensQuery};
use crate::api::ApiError;
use std::sync::atomic::Ordering;

impl MediaWikiClient {
    /// Logs in with the configured credentials
    ///
    /// # Errors
    ///
    /// * `ApiError::AuthRequired` - no credentials are configured
    /// * `ApiError::Login` - the wiki rejected the login
    pub async fn login(&self) -> Result<(), ApiError> {
        let Some(credentials) = self.credentials.as_ref() else {
            tracing::warn!("No credentials provided, login skipped");
            return Err(ApiError::AuthRequired(
                "no username and password configured".to_string(),
            ));
        };

        let token = self.fetch_token("login").await?;

        let response: LoginResponse = self
            .post_json(&[
                ("action", "login"),
                ("lgname", credentials.username.as_str()),
                ("lgpassword", credentials.password.as_str()),
                ("lgtoken", token.as_str()),
            ])
            .await?;

        if let Some(error) = response.error {
            self.authenticated.store(false, Ordering::SeqCst);
            return Err(ApiError::Login(error.info));
        }

        let result = response
            .login
            .ok_or_else(|| ApiError::Malformed("login response has no 'login' object".to_string()))?;

        if result.result != "Success" {
            self.authenticated.store(false, Ordering::SeqCst);
            let reason = result.reason.unwrap_or(result.result);
            tracing::error!("Login failed: {}", reason);
            return Err(ApiError::Login(reason));
        }

        tracing::debug!(
            "Successfully logged in as {}",
            result.lgusername.as_deref().unwrap_or(&credentials.username)
        );
        self.authenticated.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Logs in unless a previous login already succeeded
    pub async fn ensure_logged_in(&self) -> Result<(), ApiError> {
        if self.is_authenticated() {
            return Ok(());
        }
        self.login().await
    }

    /// Fetches a token of the given type (`login`, `csrf`)
    pub(crate) async fn fetch_token(&self, kind: &str) -> Result<String, ApiError> {
        let response: QueryResponse<TokensQuery> = self
            .get_json(&[("action", "query"), ("meta", "tokens"), ("type", kind)])
            .await?;

        if let Some(error) = response.error {
            return Err(ApiError::Remote {
                code: error.code,
                info: error.info,
            });
        }

        let tokens = response
            .query
            .ok_or_else(|| ApiError::Malformed("token response has no 'query'".to_string()))?
            .tokens;

        let token = match kind {
            "login" => tokens.logintoken,
            _ => tokens.csrftoken,
        };

        token.ok_or_else(|| ApiError::Malformed(format!("no {} token in response", kind)))
    }
}
