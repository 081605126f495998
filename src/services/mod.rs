// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod catalog_service;
pub mod clip_service;
pub mod favorites_service;
pub mod session_service;
pub mod tier_service;
pub mod upload_service;


// Re-export all services and their types
pub use catalog_service::{CatalogService, CatalogStore, LoadOutcome, LoadTicket};

pub use clip_service::{ClipService, EmbedEditDefaults};

pub use favorites_service::FavoritesService;

pub use session_service::{AuthOutcome, SessionService};

pub use tier_service::TierService;

pub use upload_service::{
    EmbedEditRequest,
    EmbedMoveRequest,
    FileUploadRequest,
    MoveDetails,
    UploadOutcome,
    UploadService,
    UPLOAD_SUCCESS_MESSAGE,
};
