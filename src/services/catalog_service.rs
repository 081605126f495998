// src/services/catalog_service.rs
//
// Catalog Store
//
// Loads are sequenced with tickets: only the most recently issued load may
// commit. A response for an older ticket is discarded, so a slow early load
// can never overwrite a newer one.
//
// CRITICAL RULES:
// - The catalog is replaced wholesale, never patched
// - A failed load leaves an empty catalog plus a user-facing message
// - Records are normalized once, at commit time

use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::{Move, RawMoveRecord};
use crate::error::AppResult;
use crate::events::{CatalogLoadDiscarded, CatalogLoaded, EventBus};
use crate::repositories::MoveRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied { move_count: usize },
    Failed { message: String },
    Discarded { latest: LoadTicket },
}

#[derive(Debug, Default)]
pub struct CatalogStore {
    last_issued: u64,
    moves: Vec<Move>,
    load_error: Option<String>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.last_issued += 1;
        LoadTicket(self.last_issued)
    }

    pub fn is_latest(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.last_issued
    }

    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: AppResult<Vec<RawMoveRecord>>,
    ) -> LoadOutcome {
        if !self.is_latest(ticket) {
            return LoadOutcome::Discarded {
                latest: LoadTicket(self.last_issued),
            };
        }

        match result {
            Ok(records) => {
                self.moves = records.into_iter().map(Move::from_raw).collect();
                self.load_error = None;
                LoadOutcome::Applied {
                    move_count: self.moves.len(),
                }
            }
            Err(e) => {
                let message = e.reason();
                self.moves.clear();
                self.load_error = Some(message.clone());
                LoadOutcome::Failed { message }
            }
        }
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }
}

pub struct CatalogService {
    move_repo: Arc<dyn MoveRepository>,
    event_bus: Arc<EventBus>,
    store: Mutex<CatalogStore>,
}

impl CatalogService {
    pub fn new(move_repo: Arc<dyn MoveRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            move_repo,
            event_bus,
            store: Mutex::new(CatalogStore::new()),
        }
    }

    fn store(&self) -> MutexGuard<'_, CatalogStore> {
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Issue a ticket for a load whose fetch happens elsewhere
    pub fn begin_load(&self) -> LoadTicket {
        self.store().begin_load()
    }

    /// Commit a fetched result if `ticket` is still the latest
    pub fn complete_load(
        &self,
        ticket: LoadTicket,
        result: AppResult<Vec<RawMoveRecord>>,
    ) -> LoadOutcome {
        let outcome = self.store().complete_load(ticket, result);

        match &outcome {
            LoadOutcome::Applied { move_count } => {
                log::info!("Catalog load {} applied: {} moves", ticket.0, move_count);
                self.event_bus
                    .emit(CatalogLoaded::new(ticket.0, *move_count));
            }
            LoadOutcome::Failed { message } => {
                log::warn!("Catalog load {} failed: {}", ticket.0, message);
            }
            LoadOutcome::Discarded { latest } => {
                log::info!(
                    "Discarding stale catalog load {} (latest is {})",
                    ticket.0,
                    latest.0
                );
                self.event_bus
                    .emit(CatalogLoadDiscarded::new(ticket.0, latest.0));
            }
        }

        outcome
    }

    /// Fetch the full catalog and commit it
    pub fn refresh(&self) -> LoadOutcome {
        let ticket = self.begin_load();
        let result = self.move_repo.list_moves();
        self.complete_load(ticket, result)
    }

    /// Run `f` against the committed catalog
    pub fn with_moves<R>(&self, f: impl FnOnce(&[Move]) -> R) -> R {
        f(self.store().moves())
    }

    pub fn find_move(&self, id: &str) -> Option<Move> {
        self.with_moves(|moves| moves.iter().find(|m| m.id.as_deref() == Some(id)).cloned())
    }

    pub fn load_error(&self) -> Option<String> {
        self.store().load_error().map(str::to_string)
    }
}
