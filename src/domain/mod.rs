// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod clip;
pub mod favorites;
pub mod moves;
pub mod tier;
pub mod viewer;
pub mod visibility;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Tier
pub use tier::{normalize_tier, Tier};

// Viewer
pub use viewer::{Identity, Viewer};

// Moves
pub use moves::{
    validate_new_move, Difficulty, Move, MoveType, NewMove, RawMoveRecord, Uploader, POSITIONS,
};

// Favorites
pub use favorites::FavoriteSet;

// Visibility
pub use visibility::{visible_moves, FilterCriteria, VisibilityRules, BASIC_MAX_MOVES};

// Clip Locator
pub use clip::{
    build_embed_clip, build_embed_clip_for, get_clip_length_from_embed,
    get_timestamp_url_from_embed, max_clip_seconds, ClipError, ClipLocator, ClipResult, EmbedClip,
};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("{0}")]
    Clip(#[from] ClipError),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
