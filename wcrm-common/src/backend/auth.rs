//! Auth endpoint surface (GoTrue conventions)
//!
//! Password sign-in/sign-up/sign-out, password-reset email, password
//! update, and current-user retrieval. Errors carry the backend's message
//! string so forms can render it inline.

use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::{Error, Result};

use super::client::BackendClient;

/// Authenticated user identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
}

/// Issued session tokens plus the user they belong to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub user: AuthUser,
}

/// Result of a sign-up attempt
#[derive(Debug, Clone)]
pub enum SignUpOutcome {
    /// Backend issued a session immediately (no email confirmation required)
    SignedIn(Session),
    /// Account created; the user must confirm by email before signing in
    ConfirmationRequired,
}

#[derive(Debug, Deserialize)]
struct MaybeSession {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    user: Option<AuthUser>,
}

/// Auth endpoints of the hosted backend
pub struct AuthApi<'a> {
    client: &'a BackendClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a BackendClient) -> Self {
        Self { client }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.client.base_url(), path)
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .http()
            .post(self.url(path))
            .header("apikey", self.client.anon_key())
    }

    /// Password sign-in; the error message is rendered inline on the form
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        let response = self
            .post("token")
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(auth_error(response).await);
        }

        let session: MaybeSession = response.json().await?;
        into_session(session)
    }

    /// Create an account; may or may not come back with a live session
    /// depending on the backend's email-confirmation policy
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome> {
        let response = self
            .post("signup")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(auth_error(response).await);
        }

        let body: MaybeSession = response.json().await?;
        if body.access_token.is_some() {
            Ok(SignUpOutcome::SignedIn(into_session(body)?))
        } else {
            Ok(SignUpOutcome::ConfirmationRequired)
        }
    }

    /// Revoke the user's tokens
    pub async fn sign_out(&self, access_token: &str) -> Result<()> {
        let response = self.post("logout").bearer_auth(access_token).send().await?;
        // 204 on success; an already-expired token is not worth surfacing
        if !response.status().is_success() && response.status().as_u16() != 401 {
            return Err(auth_error(response).await);
        }
        Ok(())
    }

    /// Send a password-reset email with a redirect back to the app
    pub async fn reset_password_for_email(&self, email: &str, redirect_to: &str) -> Result<()> {
        let response = self
            .post("recover")
            .query(&[("redirect_to", redirect_to)])
            .json(&json!({ "email": email }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(auth_error(response).await);
        }
        Ok(())
    }

    /// Set a new password for the user the token belongs to
    /// (the recovery link carries such a token)
    pub async fn update_password(&self, access_token: &str, new_password: &str) -> Result<AuthUser> {
        let response = self
            .client
            .http()
            .put(self.url("user"))
            .header("apikey", self.client.anon_key())
            .bearer_auth(access_token)
            .json(&json!({ "password": new_password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(auth_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// Identity behind an access token
    pub async fn get_user(&self, access_token: &str) -> Result<AuthUser> {
        let response = self
            .client
            .http()
            .get(self.url("user"))
            .header("apikey", self.client.anon_key())
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(auth_error(response).await);
        }
        Ok(response.json().await?)
    }
}

fn into_session(body: MaybeSession) -> Result<Session> {
    match (body.access_token, body.user) {
        (Some(access_token), Some(user)) => Ok(Session {
            access_token,
            refresh_token: body.refresh_token,
            expires_in: body.expires_in,
            user,
        }),
        _ => Err(Error::Auth("backend returned an incomplete session".into())),
    }
}

async fn auth_error(response: reqwest::Response) -> Error {
    match BackendClient::error_from_response(response).await {
        Error::Backend { message, .. } => Error::Auth(message),
        other => other,
    }
}
