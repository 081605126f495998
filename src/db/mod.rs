// src/db/mod.rs
//
// Database module
//
// Provides:
// - Connection pooling
// - Schema migrations
// - Startup schema capability check

pub mod capabilities;
pub mod connection;
pub mod migrations;

pub use capabilities::{detect_move_capabilities, MoveSchemaCapabilities};

pub use connection::{
    create_connection_pool, create_file_pool, create_memory_pool, get_connection,
    ConnectionPool, PooledConn,
};

pub use migrations::{get_schema_version, initialize_database, verify_database_integrity};
