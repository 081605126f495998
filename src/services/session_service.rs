// src/services/session_service.rs
//
// Session Service - owns the current viewer
//
// CRITICAL RULES:
// - The viewer is recomputed on EVERY session change, never patched
// - A change the auth provider already announced is not rebuilt twice
// - Favorites are reloaded together with the viewer
// - Auth failures become outcome messages, never errors

use std::sync::{Arc, RwLock, Weak};

use serde::{Deserialize, Serialize};

use crate::domain::{Identity, Viewer};
use crate::events::{EventBus, SessionChanged};
use crate::integrations::AuthProvider;

use super::favorites_service::FavoritesService;
use super::tier_service::TierService;

/// Result of a sign-in/out/up attempt, ready to show to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthOutcome {
    pub success: bool,
    pub message: String,
}

impl AuthOutcome {
    fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }

    fn failed(action: &str, reason: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            message: format!("{} failed: {}", action, reason),
        }
    }
}

pub struct SessionService {
    auth: Arc<dyn AuthProvider>,
    tier_service: Arc<TierService>,
    favorites: Arc<FavoritesService>,
    viewer: RwLock<Viewer>,
}

impl SessionService {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        tier_service: Arc<TierService>,
        favorites: Arc<FavoritesService>,
    ) -> Self {
        Self {
            auth,
            tier_service,
            favorites,
            viewer: RwLock::new(Viewer::anonymous()),
        }
    }

    /// Recompute the viewer whenever the auth provider reports a change
    pub fn register_event_handlers(service: &Arc<Self>, bus: &EventBus) {
        let weak: Weak<Self> = Arc::downgrade(service);
        bus.subscribe::<SessionChanged, _>(move |event| {
            if let Some(service) = weak.upgrade() {
                service.handle_session_change(event.identity.clone());
            }
        });

        log::debug!("Session handlers registered");
    }

    pub fn viewer(&self) -> Viewer {
        self.viewer.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Rebuild viewer and favorites for `identity`
    pub fn handle_session_change(&self, identity: Option<Identity>) -> Viewer {
        let tier = self.tier_service.resolve_tier(identity.as_ref());
        let viewer = Viewer::new(identity, tier);

        self.favorites.load_for_viewer(&viewer);

        log::info!("Viewer is now {}", viewer.status_line());
        *self.viewer.write().unwrap_or_else(|e| e.into_inner()) = viewer.clone();
        viewer
    }

    /// Pick up whatever session the auth provider already holds
    pub async fn restore(&self) -> Viewer {
        let identity = self.read_session().await;
        self.handle_session_change(identity)
    }

    async fn read_session(&self) -> Option<Identity> {
        self.auth.current_session().await.unwrap_or_else(|e| {
            log::warn!("Could not read current session: {}", e);
            None
        })
    }

    /// Rebuild only if the SessionChanged handler has not already done so
    fn sync_viewer(&self, identity: Option<Identity>) -> Viewer {
        let current = self.viewer();
        if current.identity == identity {
            return current;
        }
        self.handle_session_change(identity)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AuthOutcome {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return AuthOutcome::failed("Sign-in", "Email and password are required.");
        }

        if let Err(e) = self.auth.sign_in(email, password).await {
            return AuthOutcome::failed("Sign-in", e.reason());
        }

        let identity = self.read_session().await;
        self.sync_viewer(identity);
        AuthOutcome::ok("Signed in successfully.")
    }

    pub async fn sign_out(&self) -> AuthOutcome {
        if let Err(e) = self.auth.sign_out().await {
            return AuthOutcome::failed("Sign-out", e.reason());
        }

        self.sync_viewer(None);
        AuthOutcome::ok("Signed out.")
    }

    pub async fn sign_up(&self, email: &str, password: &str, metadata: serde_json::Value) -> AuthOutcome {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return AuthOutcome::failed("Sign-up", "Email and password are required.");
        }

        match self.auth.sign_up(email, password, metadata).await {
            Ok(()) => AuthOutcome::ok("Check your email to confirm your account."),
            Err(e) => AuthOutcome::failed("Sign-up", e.reason()),
        }
    }
}
