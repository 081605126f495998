// src/integrations/auth/anonymous.rs
//
// Auth provider used when no auth service is configured.
// Everybody stays signed out.

use async_trait::async_trait;

use crate::domain::Identity;
use crate::error::{AppError, AppResult};

use super::client::AuthProvider;

const NOT_CONFIGURED: &str = "Sign-in is not available: no auth service is configured";

pub struct AnonymousAuth;

#[async_trait]
impl AuthProvider for AnonymousAuth {
    async fn current_session(&self) -> AppResult<Option<Identity>> {
        Ok(None)
    }

    async fn sign_in(&self, _email: &str, _password: &str) -> AppResult<()> {
        Err(AppError::Unauthorized(NOT_CONFIGURED.to_string()))
    }

    async fn sign_out(&self) -> AppResult<()> {
        Ok(())
    }

    async fn sign_up(&self, _email: &str, _password: &str, _metadata: serde_json::Value) -> AppResult<()> {
        Err(AppError::Unauthorized(NOT_CONFIGURED.to_string()))
    }
}
