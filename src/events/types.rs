// src/events/types.rs
//
// All domain events in the catalog.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Identity, Tier};

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! impl_domain_event {
    ($name:ident) => {
        impl DomainEvent for $name {
            fn event_id(&self) -> Uuid {
                self.event_id
            }
            fn occurred_at(&self) -> DateTime<Utc> {
                self.occurred_at
            }
            fn event_type(&self) -> &'static str {
                stringify!($name)
            }
        }
    };
}

// ============================================================================
// SESSION EVENTS
// ============================================================================

/// Emitted by the auth provider whenever the signed-in identity changes.
/// `identity` is None after sign-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub identity: Option<Identity>,
}

impl SessionChanged {
    pub fn new(identity: Option<Identity>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            identity,
        }
    }
}

impl_domain_event!(SessionChanged);

/// Emitted once a viewer's tier has been resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierResolved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub identity_id: Option<String>,
    pub tier: Tier,
}

impl TierResolved {
    pub fn new(identity_id: Option<String>, tier: Tier) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            identity_id,
            tier,
        }
    }
}

impl_domain_event!(TierResolved);

// ============================================================================
// CATALOG EVENTS
// ============================================================================

/// Emitted when a catalog load is committed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogLoaded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub ticket: u64,
    pub move_count: usize,
}

impl CatalogLoaded {
    pub fn new(ticket: u64, move_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            ticket,
            move_count,
        }
    }
}

impl_domain_event!(CatalogLoaded);

/// Emitted when a load response arrives after a newer load was started
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogLoadDiscarded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub ticket: u64,
    pub latest_ticket: u64,
}

impl CatalogLoadDiscarded {
    pub fn new(ticket: u64, latest_ticket: u64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            ticket,
            latest_ticket,
        }
    }
}

impl_domain_event!(CatalogLoadDiscarded);

// ============================================================================
// FAVORITES EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteToggled {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub storage_key: String,
    pub move_id: String,
    pub is_favorite: bool,
}

impl FavoriteToggled {
    pub fn new(storage_key: String, move_id: String, is_favorite: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            storage_key,
            move_id,
            is_favorite,
        }
    }
}

impl_domain_event!(FavoriteToggled);

// ============================================================================
// CONTRIBUTION EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveUploaded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub move_id: String,
    pub name: String,
    pub uploader_id: Option<String>,
    pub media_url: String,
}

impl MoveUploaded {
    pub fn new(move_id: String, name: String, uploader_id: Option<String>, media_url: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            move_id,
            name,
            uploader_id,
            media_url,
        }
    }
}

impl_domain_event!(MoveUploaded);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub move_id: String,
}

impl MoveUpdated {
    pub fn new(move_id: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            move_id,
        }
    }
}

impl_domain_event!(MoveUpdated);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub move_id: String,
}

impl MoveDeleted {
    pub fn new(move_id: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            move_id,
        }
    }
}

impl_domain_event!(MoveDeleted);
