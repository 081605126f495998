// src/integrations/auth/client.rs
//
// Hosted password-auth integration
//
// ARCHITECTURE:
// - REST client for a hosted auth service (token / logout / signup)
// - Holds the current session in memory
// - Announces every sign-in/sign-out as SessionChanged on the event bus
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Never resolves tiers or touches favorites; SessionService reacts to events
// - A failed call leaves the current session untouched

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;

use crate::config::CatalogConfig;
use crate::domain::Identity;
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, SessionChanged};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Identity of the signed-in user, None when signed out
    async fn current_session(&self) -> AppResult<Option<Identity>>;
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<()>;
    async fn sign_out(&self) -> AppResult<()>;
    /// Registers a new account; confirmation happens out of band
    async fn sign_up(&self, email: &str, password: &str, metadata: serde_json::Value) -> AppResult<()>;
}

#[derive(Debug, Clone)]
struct AuthSession {
    access_token: String,
    identity: Identity,
}

/// Token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: Identity,
}

/// Error bodies differ per endpoint; take whichever field is present
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    fn reason(self) -> Option<String> {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or(self.error)
            .filter(|s| !s.trim().is_empty())
    }
}

pub struct HostedAuthClient {
    base_url: String,
    api_key: Option<String>,
    http_client: Client,
    session: Mutex<Option<AuthSession>>,
    event_bus: Arc<EventBus>,
}

impl HostedAuthClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
        event_bus: Arc<EventBus>,
    ) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            http_client,
            session: Mutex::new(None),
            event_bus,
        })
    }

    /// None when no auth URL is configured
    pub fn from_config(config: &CatalogConfig, event_bus: Arc<EventBus>) -> AppResult<Option<Self>> {
        match &config.auth_url {
            Some(url) => Ok(Some(Self::new(
                url.clone(),
                config.auth_api_key.clone(),
                config.http_timeout(),
                event_bus,
            )?)),
            None => {
                log::info!("No auth service configured; sessions stay anonymous");
                Ok(None)
            }
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        let mut request = self
            .http_client
            .post(self.endpoint(path))
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json");

        if let Some(key) = &self.api_key {
            request = request.header("apikey", key.as_str());
        }

        request
    }

    async fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::RemoteUnavailable(format!("Auth request failed: {}", e)))?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let reason = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(ErrorBody::reason)
            .unwrap_or_else(|| format!("auth service returned status {}", status));

        if status.is_client_error() {
            Err(AppError::Unauthorized(reason))
        } else {
            Err(AppError::RemoteUnavailable(reason))
        }
    }

    fn replace_session(&self, next: Option<AuthSession>) {
        let identity = next.as_ref().map(|s| s.identity.clone());
        {
            let mut session = self.session.lock().unwrap_or_else(|e| e.into_inner());
            *session = next;
        }
        self.event_bus.emit(SessionChanged::new(identity));
    }

    fn access_token(&self) -> Option<String> {
        self.session
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|s| s.access_token.clone())
    }
}

#[async_trait]
impl AuthProvider for HostedAuthClient {
    async fn current_session(&self) -> AppResult<Option<Identity>> {
        let session = self.session.lock().unwrap_or_else(|e| e.into_inner());
        Ok(session.as_ref().map(|s| s.identity.clone()))
    }

    async fn sign_in(&self, email: &str, password: &str) -> AppResult<()> {
        let request = self
            .post("token?grant_type=password")
            .json(&json!({ "email": email, "password": password }));

        let token: TokenResponse = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(|e| AppError::RemoteUnavailable(format!("Malformed auth response: {}", e)))?;

        log::info!("Signed in as {}", token.user.id);
        self.replace_session(Some(AuthSession {
            access_token: token.access_token,
            identity: token.user,
        }));

        Ok(())
    }

    async fn sign_out(&self) -> AppResult<()> {
        let Some(token) = self.access_token() else {
            return Ok(());
        };

        let request = self.post("logout").bearer_auth(token);
        self.send(request).await?;

        log::info!("Signed out");
        self.replace_session(None);
        Ok(())
    }

    async fn sign_up(&self, email: &str, password: &str, metadata: serde_json::Value) -> AppResult<()> {
        let request = self.post("signup").json(&json!({
            "email": email,
            "password": password,
            "data": metadata,
        }));

        self.send(request).await?;
        log::info!("Sign-up submitted for {}", email);
        Ok(())
    }
}
