// src/application/state.rs
//
// Application state: the single owner of every service.
//
// Construction order mirrors the dependency graph:
// infrastructure → repositories → services → event wiring → initial load.
// Nothing here is global; callers hold the AppState and pass it around.

use std::sync::Arc;

use crate::config::CatalogConfig;
use crate::db::{
    create_connection_pool, get_connection, initialize_database, verify_database_integrity,
    ConnectionPool,
};
use crate::domain::{Viewer, VisibilityRules};
use crate::error::AppResult;
use crate::events::{create_event_bus, EventBus};
use crate::infrastructure::{LocalMediaStorage, MediaStorage};
use crate::integrations::{AnonymousAuth, AuthProvider, HostedAuthClient, OEmbedClient, PlaybackProbe};
use crate::repositories::{
    KeyValueStore, MoveRepository, ProfileRepository, SqliteKeyValueStore, SqliteMoveRepository,
    SqliteProfileRepository,
};
use crate::services::{
    CatalogService, ClipService, FavoritesService, SessionService, TierService, UploadService,
};

/// External collaborators that are not backed by the catalog database
pub struct Collaborators {
    pub auth: Arc<dyn AuthProvider>,
    pub probe: Arc<dyn PlaybackProbe>,
    pub storage: Arc<dyn MediaStorage>,
}

/// All fields are Arc-wrapped for sharing across command handlers.
pub struct AppState {
    pub config: CatalogConfig,
    pub visibility: VisibilityRules,
    pub event_bus: Arc<EventBus>,
    pub catalog_service: Arc<CatalogService>,
    pub favorites_service: Arc<FavoritesService>,
    pub session_service: Arc<SessionService>,
    pub upload_service: Arc<UploadService>,
    pub clip_service: Arc<ClipService>,
}

impl AppState {
    /// Open the on-disk catalog and build the production collaborators
    pub async fn initialize(config: CatalogConfig) -> AppResult<Self> {
        // 1. INFRASTRUCTURE
        let pool = Arc::new(create_connection_pool(&config)?);
        {
            let conn = get_connection(&pool)?;
            initialize_database(&conn)?;
            verify_database_integrity(&conn)?;
        }
        let event_bus = Arc::new(create_event_bus());

        let auth: Arc<dyn AuthProvider> =
            match HostedAuthClient::from_config(&config, event_bus.clone())? {
                Some(client) => Arc::new(client),
                None => {
                    log::info!("No auth service configured; sign-in is disabled");
                    Arc::new(AnonymousAuth)
                }
            };

        let collaborators = Collaborators {
            auth,
            probe: Arc::new(OEmbedClient::from_config(&config)?),
            storage: Arc::new(LocalMediaStorage::from_config(&config)),
        };

        Self::assemble(config, pool, event_bus, collaborators).await
    }

    /// Wire services over an initialized pool, then load catalog and session
    pub async fn assemble(
        config: CatalogConfig,
        pool: Arc<ConnectionPool>,
        event_bus: Arc<EventBus>,
        collaborators: Collaborators,
    ) -> AppResult<Self> {
        // 2. REPOSITORIES
        let move_repo: Arc<dyn MoveRepository> =
            Arc::new(SqliteMoveRepository::detect(pool.clone())?);
        let profile_repo: Arc<dyn ProfileRepository> =
            Arc::new(SqliteProfileRepository::new(pool.clone()));
        let kv_store: Arc<dyn KeyValueStore> = Arc::new(SqliteKeyValueStore::new(pool));

        // 3. SERVICES
        let catalog_service = Arc::new(CatalogService::new(move_repo.clone(), event_bus.clone()));
        let favorites_service = Arc::new(FavoritesService::new(kv_store, event_bus.clone()));
        let tier_service = Arc::new(TierService::new(profile_repo, event_bus.clone()));
        let session_service = Arc::new(SessionService::new(
            collaborators.auth,
            tier_service,
            favorites_service.clone(),
        ));
        let clip_service = Arc::new(ClipService::new(collaborators.probe));
        let upload_service = Arc::new(UploadService::new(
            move_repo,
            collaborators.storage,
            clip_service.clone(),
            event_bus.clone(),
        ));

        // 4. EVENT HANDLER REGISTRATION (WIRING)
        SessionService::register_event_handlers(&session_service, &event_bus);

        // 5. INITIAL STATE
        catalog_service.refresh();
        session_service.restore().await;

        Ok(Self {
            visibility: VisibilityRules::with_basic_cap(config.basic_max_moves),
            config,
            event_bus,
            catalog_service,
            favorites_service,
            session_service,
            upload_service,
            clip_service,
        })
    }

    pub fn viewer(&self) -> Viewer {
        self.session_service.viewer()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::domain::{Identity, Tier};
    use crate::integrations::auth::MockAuthProvider;

    #[tokio::test]
    async fn test_assemble_loads_catalog_and_session() {
        let state = state_with(memory_pool(), signed_out()).await;

        assert_eq!(state.viewer(), Viewer::anonymous());
        assert_eq!(state.visibility.basic_max_moves, 12);
        let types: Vec<_> = state
            .event_bus
            .get_event_log()
            .into_iter()
            .map(|e| e.event_type)
            .collect();
        assert_eq!(types, vec!["CatalogLoaded", "TierResolved"]);
    }

    #[tokio::test]
    async fn test_restored_session_uses_profile_tier() {
        let pool = memory_pool();
        SqliteProfileRepository::new(pool.clone())
            .set_tier("u1", "premium")
            .unwrap();

        let mut auth = MockAuthProvider::new();
        auth.expect_current_session()
            .returning(|| Ok(Some(Identity::new("u1", Some("u1@x.io".to_string())))));

        let state = state_with(pool, auth).await;
        assert_eq!(state.viewer().tier, Tier::Pro);
        assert!(state.viewer().can_upload());
    }

    #[tokio::test]
    async fn test_initialize_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let config = CatalogConfig {
            data_dir: dir.path().join("data"),
            ..CatalogConfig::default()
        };

        let state = AppState::initialize(config).await.unwrap();
        assert!(dir.path().join("data/move-catalog.db").exists());
        assert!(dir.path().join("data/media").is_dir());
        assert!(!state.viewer().is_authenticated());
        assert!(state.catalog_service.load_error().is_none());
    }
}
