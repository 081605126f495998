// src/db/capabilities.rs
//
// Schema capability check for the moves table
//
// Older catalog databases lack some optional columns. Which columns
// exist is read ONCE at startup; writers then only touch known columns
// instead of retrying inserts after "unknown column" failures.

use std::collections::BTreeSet;

use rusqlite::Connection;

use crate::error::{AppError, AppResult};

/// Columns every catalog must have
pub const REQUIRED_MOVE_COLUMNS: &[&str] = &["name", "video_url", "created_at"];

/// Columns that may be missing on older catalogs
pub const OPTIONAL_MOVE_COLUMNS: &[&str] = &[
    "id",
    "type",
    "start_position",
    "end_position",
    "difficulty",
    "comment",
    "uploader_id",
    "uploader_email",
    "uploaded_by_email",
    "created_by_email",
    "owner_email",
    "is_private",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveSchemaCapabilities {
    columns: BTreeSet<String>,
}

impl MoveSchemaCapabilities {
    /// Capabilities of the current schema.sql
    pub fn full() -> Self {
        let columns = REQUIRED_MOVE_COLUMNS
            .iter()
            .chain(OPTIONAL_MOVE_COLUMNS.iter())
            .filter(|c| !matches!(**c, "uploaded_by_email" | "created_by_email" | "owner_email"))
            .map(|c| c.to_string())
            .collect();
        Self { columns }
    }

    pub fn has(&self, column: &str) -> bool {
        self.columns.contains(column)
    }

    /// Known columns present in the table, in a stable order
    pub fn known_columns(&self) -> Vec<&'static str> {
        REQUIRED_MOVE_COLUMNS
            .iter()
            .chain(OPTIONAL_MOVE_COLUMNS.iter())
            .copied()
            .filter(|c| self.has(c))
            .collect()
    }
}

/// Inspect the moves table and report which columns it carries
pub fn detect_move_capabilities(conn: &Connection) -> AppResult<MoveSchemaCapabilities> {
    let mut stmt = conn.prepare("PRAGMA table_info(moves)")?;
    let columns: BTreeSet<String> = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<Result<_, _>>()?;

    if columns.is_empty() {
        return Err(AppError::Other("Catalog table 'moves' does not exist".to_string()));
    }

    for required in REQUIRED_MOVE_COLUMNS {
        if !columns.contains(*required) {
            return Err(AppError::Other(format!(
                "Catalog table 'moves' is missing required column '{}'",
                required
            )));
        }
    }

    let missing: Vec<&str> = OPTIONAL_MOVE_COLUMNS
        .iter()
        .copied()
        .filter(|c| !columns.contains(*c))
        .collect();
    if !missing.is_empty() {
        log::info!("Catalog schema lacks optional columns: {}", missing.join(", "));
    }

    Ok(MoveSchemaCapabilities { columns })
}
