// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between UI and Services
// - Commands accept DTOs, return DTOs
// - Commands convert errors into ErrorResponse
// - Commands NEVER contain business logic

pub mod catalog_commands;
pub mod move_commands;
pub mod session_commands;

pub use catalog_commands::*;
pub use move_commands::*;
pub use session_commands::*;
