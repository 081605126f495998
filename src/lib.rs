// src/lib.rs
// Move Catalog - dance-move video catalog core
//
// Architecture:
// - Domain-centric: tier gating, visibility, favorites and clip rules are pure
// - Event-driven: services coordinate through a synchronous event bus
// - Explicit: no ambient globals; one AppState owns every service
// - Cosmetic gating: visibility rules are presentation, not access control

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod infrastructure;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    build_embed_clip,
    build_embed_clip_for,
    get_clip_length_from_embed,
    get_timestamp_url_from_embed,
    max_clip_seconds,
    normalize_tier,
    validate_new_move,
    visible_moves,
    // Clip Locator
    ClipError,
    ClipLocator,
    ClipResult,
    Difficulty,
    DomainError,
    EmbedClip,
    // Favorites
    FavoriteSet,
    // Visibility
    FilterCriteria,
    Identity,
    // Moves
    Move,
    MoveType,
    NewMove,
    RawMoveRecord,
    // Tier & Viewer
    Tier,
    Uploader,
    Viewer,
    VisibilityRules,
    BASIC_MAX_MOVES,
    POSITIONS,
};

// ============================================================================
// PUBLIC API - Error Types & Config
// ============================================================================

pub use config::CatalogConfig;
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    CatalogLoadDiscarded,
    CatalogLoaded,
    DomainEvent,
    EventBus,
    EventLogEntry,
    FavoriteToggled,
    MoveDeleted,
    MoveUpdated,
    MoveUploaded,
    SessionChanged,
    TierResolved,
};

// ============================================================================
// PUBLIC API - Database & Repositories
// ============================================================================

pub use db::{
    create_connection_pool, detect_move_capabilities, initialize_database, ConnectionPool,
    MoveSchemaCapabilities,
};

pub use repositories::{
    KeyValueStore,
    MoveRepository,
    ProfileRepository,
    SqliteKeyValueStore,
    SqliteMoveRepository,
    SqliteProfileRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    AuthOutcome,
    CatalogService,
    ClipService,
    EmbedEditDefaults,
    EmbedEditRequest,
    EmbedMoveRequest,
    FavoritesService,
    FileUploadRequest,
    LoadOutcome,
    LoadTicket,
    MoveDetails,
    SessionService,
    TierService,
    UploadOutcome,
    UploadService,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, Collaborators, ErrorResponse, ErrorType};

pub use application::commands;
pub use application::dto;

// ============================================================================
// PUBLIC API - Collaborators
// ============================================================================

pub use infrastructure::{LocalMediaStorage, MediaStorage};
pub use integrations::{AnonymousAuth, AuthProvider, HostedAuthClient, OEmbedClient, PlaybackProbe};
