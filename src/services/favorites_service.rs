// src/services/favorites_service.rs
//
// Favorites Ledger
//
// CRITICAL RULES:
// - One set per storage key; switching viewer always reloads
// - Every toggle persists immediately
// - A failed persist leaves the in-memory set unchanged

use std::sync::{Arc, Mutex};

use crate::domain::{DomainError, FavoriteSet, Viewer};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, FavoriteToggled};
use crate::repositories::KeyValueStore;

struct Ledger {
    storage_key: String,
    favorites: FavoriteSet,
}

pub struct FavoritesService {
    store: Arc<dyn KeyValueStore>,
    event_bus: Arc<EventBus>,
    ledger: Mutex<Ledger>,
}

impl FavoritesService {
    /// Starts on the anonymous viewer's key, not yet loaded
    pub fn new(store: Arc<dyn KeyValueStore>, event_bus: Arc<EventBus>) -> Self {
        Self {
            store,
            event_bus,
            ledger: Mutex::new(Ledger {
                storage_key: Viewer::anonymous().favorites_key(),
                favorites: FavoriteSet::new(),
            }),
        }
    }

    fn ledger(&self) -> std::sync::MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Replace the in-memory set with the one stored for `viewer`.
    ///
    /// Read failures and malformed data both yield an empty set.
    pub fn load_for_viewer(&self, viewer: &Viewer) -> FavoriteSet {
        let storage_key = viewer.favorites_key();

        let raw = self.store.get(&storage_key).unwrap_or_else(|e| {
            log::warn!("Could not read favorites under {}: {}", storage_key, e);
            None
        });
        let favorites = FavoriteSet::from_persisted(raw.as_deref());

        log::debug!("Loaded {} favorites under {}", favorites.len(), storage_key);

        let mut ledger = self.ledger();
        ledger.storage_key = storage_key;
        ledger.favorites = favorites.clone();
        favorites
    }

    /// Flip one id and persist; returns the new favorite state
    pub fn toggle(&self, move_id: &str) -> AppResult<bool> {
        if move_id.trim().is_empty() {
            return Err(AppError::Domain(DomainError::InvariantViolation(
                "Only moves with an identifier can be favorited".to_string(),
            )));
        }

        let (storage_key, is_favorite) = {
            let mut ledger = self.ledger();
            let mut next = ledger.favorites.clone();
            let is_favorite = next.toggle(move_id);

            self.store
                .set(&ledger.storage_key, &next.to_persisted())
                .map_err(|e| AppError::Storage(e.reason()))?;

            ledger.favorites = next;
            (ledger.storage_key.clone(), is_favorite)
        };

        self.event_bus.emit(FavoriteToggled::new(
            storage_key,
            move_id.to_string(),
            is_favorite,
        ));

        Ok(is_favorite)
    }

    pub fn is_favorite(&self, move_id: &str) -> bool {
        self.ledger().favorites.contains(move_id)
    }

    /// Write the current set under the current key
    pub fn persist(&self) -> AppResult<()> {
        let ledger = self.ledger();
        self.store
            .set(&ledger.storage_key, &ledger.favorites.to_persisted())
            .map_err(|e| AppError::Storage(e.reason()))
    }

    pub fn snapshot(&self) -> FavoriteSet {
        self.ledger().favorites.clone()
    }

    pub fn storage_key(&self) -> String {
        self.ledger().storage_key.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, initialize_database};
    use crate::domain::Identity;
    use crate::repositories::{MockKeyValueStore, SqliteKeyValueStore};

    fn sqlite_store() -> Arc<SqliteKeyValueStore> {
        let pool = Arc::new(create_memory_pool().unwrap());
        initialize_database(&pool.get().unwrap()).unwrap();
        Arc::new(SqliteKeyValueStore::new(pool))
    }

    fn signed_in(id: &str) -> Viewer {
        Viewer::new(Some(Identity::new(id, None)), crate::domain::Tier::Normal)
    }

    #[test]
    fn test_toggle_twice_restores_state_and_store() {
        let store = sqlite_store();
        let service = FavoritesService::new(store.clone(), Arc::new(EventBus::new()));
        service.load_for_viewer(&Viewer::anonymous());

        assert!(service.toggle("m-1").unwrap());
        assert!(service.is_favorite("m-1"));
        assert_eq!(store.get("favorites_anon").unwrap().as_deref(), Some("[\"m-1\"]"));

        assert!(!service.toggle("m-1").unwrap());
        assert!(!service.is_favorite("m-1"));
        assert_eq!(store.get("favorites_anon").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_switching_viewer_never_leaks_favorites() {
        let store = sqlite_store();
        let service = FavoritesService::new(store, Arc::new(EventBus::new()));

        service.load_for_viewer(&signed_in("alice"));
        service.toggle("m-1").unwrap();

        service.load_for_viewer(&signed_in("bob"));
        assert!(!service.is_favorite("m-1"));
        assert_eq!(service.storage_key(), "favorites_bob");

        service.load_for_viewer(&signed_in("alice"));
        assert!(service.is_favorite("m-1"));
    }

    #[test]
    fn test_malformed_storage_reads_as_empty() {
        let store = sqlite_store();
        store.set("favorites_anon", "{not json").unwrap();
        let service = FavoritesService::new(store, Arc::new(EventBus::new()));

        assert!(service.load_for_viewer(&Viewer::anonymous()).is_empty());
    }

    #[test]
    fn test_failed_persist_leaves_set_unchanged() {
        let mut store = MockKeyValueStore::new();
        store.expect_get().returning(|_| Ok(Some("[\"m-1\"]".to_string())));
        store
            .expect_set()
            .returning(|_, _| Err(AppError::Storage("quota exceeded".to_string())));

        let service = FavoritesService::new(Arc::new(store), Arc::new(EventBus::new()));
        service.load_for_viewer(&Viewer::anonymous());

        let err = service.toggle("m-2").unwrap_err();
        assert_eq!(err.reason(), "quota exceeded");
        assert!(!service.is_favorite("m-2"));
        assert!(service.is_favorite("m-1"));
    }

    #[test]
    fn test_read_failure_yields_empty_set() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .returning(|_| Err(AppError::Pool("unavailable".to_string())));

        let service = FavoritesService::new(Arc::new(store), Arc::new(EventBus::new()));
        assert!(service.load_for_viewer(&Viewer::anonymous()).is_empty());
    }

    #[test]
    fn test_blank_id_rejected() {
        let service = FavoritesService::new(sqlite_store(), Arc::new(EventBus::new()));
        assert!(matches!(service.toggle(" "), Err(AppError::Domain(_))));
    }
}
