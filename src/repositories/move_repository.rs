// src/repositories/move_repository.rs
//
// Catalog persistence - moves table
//
// Reads and writes only the columns reported by the startup capability
// check, so older catalogs keep working without per-insert retries.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Row};
use uuid::Uuid;

use crate::db::{detect_move_capabilities, ConnectionPool, MoveSchemaCapabilities};
use crate::domain::moves::{NewMove, RawMoveRecord};
use crate::error::{AppError, AppResult};

/// Email columns in write-preference order
const EMAIL_COLUMNS: &[&str] = &[
    "uploader_email",
    "uploaded_by_email",
    "created_by_email",
    "owner_email",
];

#[cfg_attr(test, mockall::automock)]
pub trait MoveRepository: Send + Sync {
    /// All moves, newest-created first
    fn list_moves(&self) -> AppResult<Vec<RawMoveRecord>>;
    fn get_move(&self, id: &str) -> AppResult<Option<RawMoveRecord>>;
    /// Insert and return the new move's id
    fn insert_move(&self, new_move: &NewMove) -> AppResult<String>;
    fn update_move(&self, id: &str, new_move: &NewMove) -> AppResult<()>;
    fn delete_move(&self, id: &str) -> AppResult<()>;
}

pub struct SqliteMoveRepository {
    pool: Arc<ConnectionPool>,
    capabilities: MoveSchemaCapabilities,
}

impl SqliteMoveRepository {
    pub fn new(pool: Arc<ConnectionPool>, capabilities: MoveSchemaCapabilities) -> Self {
        Self { pool, capabilities }
    }

    /// Build a repository, running the capability check on the live table
    pub fn detect(pool: Arc<ConnectionPool>) -> AppResult<Self> {
        let capabilities = {
            let conn = pool.get()?;
            detect_move_capabilities(&conn)?
        };
        Ok(Self::new(pool, capabilities))
    }

    pub fn capabilities(&self) -> &MoveSchemaCapabilities {
        &self.capabilities
    }

    fn select_sql(&self, where_clause: &str) -> String {
        format!(
            "SELECT {} FROM moves {} ORDER BY created_at DESC, rowid DESC",
            self.capabilities.known_columns().join(", "),
            where_clause
        )
    }

    fn text(&self, row: &Row, column: &str) -> Result<Option<String>, rusqlite::Error> {
        if self.capabilities.has(column) {
            row.get(column)
        } else {
            Ok(None)
        }
    }

    /// Map database row to RawMoveRecord - returns rusqlite::Error for query_map compatibility
    fn row_to_record(&self, row: &Row) -> Result<RawMoveRecord, rusqlite::Error> {
        let created_at = self.text(row, "created_at")?.and_then(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| log::warn!("Ignoring unparseable created_at {:?}: {}", s, e))
                .ok()
        });

        let is_private = if self.capabilities.has("is_private") {
            row.get::<_, Option<i64>>("is_private")?.map(|v| v != 0)
        } else {
            None
        };

        Ok(RawMoveRecord {
            id: self.text(row, "id")?,
            name: self.text(row, "name")?,
            move_type: self.text(row, "type")?,
            start_position: self.text(row, "start_position")?,
            end_position: self.text(row, "end_position")?,
            difficulty: self.text(row, "difficulty")?,
            comment: self.text(row, "comment")?,
            video_url: self.text(row, "video_url")?,
            uploader_id: self.text(row, "uploader_id")?,
            uploader_email: self.text(row, "uploader_email")?,
            uploaded_by_email: self.text(row, "uploaded_by_email")?,
            created_by_email: self.text(row, "created_by_email")?,
            owner_email: self.text(row, "owner_email")?,
            is_private,
            created_at,
        })
    }

    /// Editable column/value pairs the current schema can hold
    fn editable_values(&self, new_move: &NewMove) -> Vec<(&'static str, Value)> {
        fn opt(v: Option<&str>) -> Value {
            v.map(|s| Value::Text(s.to_string())).unwrap_or(Value::Null)
        }

        let candidates: Vec<(&'static str, Value)> = vec![
            ("name", Value::Text(new_move.name.clone())),
            ("type", Value::Text(new_move.move_type.as_str().to_string())),
            ("start_position", opt(new_move.start_position.as_deref())),
            ("end_position", opt(new_move.end_position.as_deref())),
            ("difficulty", opt(new_move.difficulty.map(|d| d.as_str()))),
            ("comment", opt(new_move.comment.as_deref())),
            ("video_url", Value::Text(new_move.media_url.clone())),
            ("is_private", Value::Integer(i64::from(new_move.is_private))),
        ];

        candidates
            .into_iter()
            .filter(|(column, _)| self.capabilities.has(column))
            .collect()
    }

    fn uploader_values(&self, new_move: &NewMove) -> Vec<(&'static str, Value)> {
        let mut values = Vec::new();
        if self.capabilities.has("uploader_id") {
            if let Some(id) = &new_move.uploader_id {
                values.push(("uploader_id", Value::Text(id.clone())));
            }
        }
        if let Some(email) = &new_move.uploader_email {
            if let Some(column) = EMAIL_COLUMNS.iter().copied().find(|c| self.capabilities.has(c)) {
                values.push((column, Value::Text(email.clone())));
            }
        }
        values
    }
}

impl MoveRepository for SqliteMoveRepository {
    fn list_moves(&self) -> AppResult<Vec<RawMoveRecord>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&self.select_sql(""))?;

        let records = stmt
            .query_map([], |row| self.row_to_record(row))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn get_move(&self, id: &str) -> AppResult<Option<RawMoveRecord>> {
        if !self.capabilities.has("id") {
            return Ok(None);
        }

        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&self.select_sql("WHERE id = ?1"))?;

        match stmt.query_row(params![id], |row| self.row_to_record(row)) {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn insert_move(&self, new_move: &NewMove) -> AppResult<String> {
        let id = Uuid::new_v4().to_string();

        let mut values = self.editable_values(new_move);
        values.extend(self.uploader_values(new_move));
        if self.capabilities.has("id") {
            values.push(("id", Value::Text(id.clone())));
        }
        values.push(("created_at", Value::Text(Utc::now().to_rfc3339())));

        let columns: Vec<&str> = values.iter().map(|(c, _)| *c).collect();
        let placeholders: Vec<String> = (1..=values.len()).map(|i| format!("?{}", i)).collect();
        let sql = format!(
            "INSERT INTO moves ({}) VALUES ({})",
            columns.join(", "),
            placeholders.join(", ")
        );

        let conn = self.pool.get()?;
        conn.execute(&sql, params_from_iter(values.into_iter().map(|(_, v)| v)))?;

        log::debug!("Inserted move {} ({} columns)", id, columns.len());
        Ok(id)
    }

    fn update_move(&self, id: &str, new_move: &NewMove) -> AppResult<()> {
        if !self.capabilities.has("id") {
            return Err(AppError::NotFound);
        }

        let values = self.editable_values(new_move);
        let assignments: Vec<String> = values
            .iter()
            .enumerate()
            .map(|(i, (column, _))| format!("{} = ?{}", column, i + 1))
            .collect();
        let sql = format!(
            "UPDATE moves SET {} WHERE id = ?{}",
            assignments.join(", "),
            values.len() + 1
        );

        let mut params: Vec<Value> = values.into_iter().map(|(_, v)| v).collect();
        params.push(Value::Text(id.to_string()));

        let conn = self.pool.get()?;
        let rows_affected = conn.execute(&sql, params_from_iter(params))?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn delete_move(&self, id: &str) -> AppResult<()> {
        if !self.capabilities.has("id") {
            return Err(AppError::NotFound);
        }

        let conn = self.pool.get()?;
        let rows_affected = conn.execute("DELETE FROM moves WHERE id = ?1", params![id])?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
