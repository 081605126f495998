// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - NO cross-repository calls
// - Explicit SQL only

pub mod local_storage_repository;
pub mod move_repository;
pub mod profile_repository;

pub use local_storage_repository::{KeyValueStore, SqliteKeyValueStore};
pub use move_repository::{MoveRepository, SqliteMoveRepository};
pub use profile_repository::{ProfileRepository, SqliteProfileRepository};

#[cfg(test)]
pub use local_storage_repository::MockKeyValueStore;
#[cfg(test)]
pub use move_repository::MockMoveRepository;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
