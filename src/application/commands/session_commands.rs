// src/application/commands/session_commands.rs
//
// Session Command Handlers
//
// Auth failures come back as unsuccessful outcomes, never as errors.

use crate::application::{dto::*, state::AppState};

pub async fn sign_in(state: &AppState, credentials: CredentialsDto) -> AuthResultDto {
    state
        .session_service
        .sign_in(&credentials.email, &credentials.password)
        .await
        .into()
}

pub async fn sign_out(state: &AppState) -> AuthResultDto {
    state.session_service.sign_out().await.into()
}

pub async fn sign_up(state: &AppState, dto: SignUpDto) -> AuthResultDto {
    state
        .session_service
        .sign_up(&dto.email, &dto.password, dto.metadata)
        .await
        .into()
}
