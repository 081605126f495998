// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Boundary between a UI shell and the services
// - Owns the single AppState; no ambient globals
// - Translates between DTOs and domain requests

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use state::{AppState, Collaborators};
