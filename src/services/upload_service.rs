// src/services/upload_service.rs
//
// Contributions: file uploads, embed submissions, edits and deletes
//
// CRITICAL RULES:
// - Only an authenticated Pro viewer may contribute
// - Only the uploader (id or email match) may edit or delete
// - Validation happens before any storage or catalog write
// - A stored file whose catalog insert fails is removed again
// - Collaborator failures are surfaced with their own message

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::{
    validate_new_move, DomainError, Difficulty, Move, MoveType, NewMove, Viewer,
};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, MoveDeleted, MoveUpdated, MoveUploaded};
use crate::infrastructure::MediaStorage;
use crate::repositories::MoveRepository;

use super::clip_service::ClipService;

pub const UPLOAD_SUCCESS_MESSAGE: &str = "Upload successful!";

/// Descriptive fields shared by every contribution form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveDetails {
    pub name: String,
    pub move_type: MoveType,
    pub start_position: Option<String>,
    pub end_position: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub comment: Option<String>,
    pub is_private: bool,
}

#[derive(Debug, Clone)]
pub struct FileUploadRequest {
    pub details: MoveDetails,
    /// Name of the file as picked by the uploader
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub rights_confirmed: bool,
}

#[derive(Debug, Clone)]
pub struct EmbedMoveRequest {
    pub details: MoveDetails,
    pub video_url: String,
    pub start_seconds: Option<u32>,
    /// Raw form value; must be a whole number of seconds
    pub clip_length: String,
    pub rights_confirmed: bool,
}

/// New link and window for a move already stored as an embed clip
#[derive(Debug, Clone)]
pub struct EmbedEditRequest {
    pub details: MoveDetails,
    pub video_url: String,
    pub start_seconds: Option<u32>,
    pub clip_length: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadOutcome {
    pub move_id: String,
    pub media_url: String,
    pub message: String,
}

pub struct UploadService {
    move_repo: Arc<dyn MoveRepository>,
    storage: Arc<dyn MediaStorage>,
    clip_service: Arc<ClipService>,
    event_bus: Arc<EventBus>,
}

impl UploadService {
    pub fn new(
        move_repo: Arc<dyn MoveRepository>,
        storage: Arc<dyn MediaStorage>,
        clip_service: Arc<ClipService>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            move_repo,
            storage,
            clip_service,
            event_bus,
        }
    }

    /// Store a video file and add it to the catalog
    pub fn upload_file_move(
        &self,
        viewer: &Viewer,
        request: FileUploadRequest,
    ) -> AppResult<UploadOutcome> {
        require_contributor(viewer)?;

        if request.details.name.trim().is_empty()
            || request.file_name.trim().is_empty()
            || request.bytes.is_empty()
        {
            return Err(invalid("Title and file required."));
        }
        if !request.rights_confirmed {
            return Err(invalid("You must confirm upload rights."));
        }

        let stored_name = format!(
            "{}_{}",
            Utc::now().timestamp_millis(),
            request.file_name.trim()
        );

        self.storage
            .upload(&stored_name, &request.bytes)
            .map_err(|e| AppError::Storage(format!("Upload failed: {}", e.reason())))?;

        let media_url = self.storage.public_url(&stored_name);
        self.insert(viewer, request.details, media_url)
            .map_err(|e| {
                if let Err(cleanup) = self.storage.remove(&stored_name) {
                    log::warn!("Could not remove orphaned media {}: {}", stored_name, cleanup);
                }
                e
            })
    }

    /// Validate and probe a hosted-video clip, then add it to the catalog
    pub async fn submit_embed_move(
        &self,
        viewer: &Viewer,
        request: EmbedMoveRequest,
    ) -> AppResult<UploadOutcome> {
        require_contributor(viewer)?;

        if request.details.name.trim().is_empty() || request.video_url.trim().is_empty() {
            return Err(invalid("Title and video link required."));
        }
        if !request.rights_confirmed {
            return Err(invalid("You must confirm upload rights."));
        }

        let clip = self
            .clip_service
            .prepare_embed(
                request.details.move_type,
                &request.video_url,
                request.start_seconds,
                &request.clip_length,
            )
            .await?;

        self.insert(viewer, request.details, clip.embed_url())
    }

    /// Replace the descriptive fields of a move the viewer uploaded
    pub fn update_move(&self, viewer: &Viewer, existing: &Move, details: MoveDetails) -> AppResult<()> {
        let move_id = require_owner(viewer, existing)?;

        let media_url = existing.media_url.clone().unwrap_or_default();
        self.replace(viewer, move_id, details, media_url)
    }

    /// Replace the fields and the clip window of an embedded move
    pub async fn update_embed_move(
        &self,
        viewer: &Viewer,
        existing: &Move,
        request: EmbedEditRequest,
    ) -> AppResult<String> {
        let move_id = require_owner(viewer, existing)?;

        if request.details.name.trim().is_empty() || request.video_url.trim().is_empty() {
            return Err(invalid("Title and video link required."));
        }

        let clip = self
            .clip_service
            .prepare_embed(
                request.details.move_type,
                &request.video_url,
                request.start_seconds,
                &request.clip_length,
            )
            .await?;

        let media_url = clip.embed_url();
        self.replace(viewer, move_id, request.details, media_url.clone())?;
        Ok(media_url)
    }

    pub fn delete_move(&self, viewer: &Viewer, existing: &Move) -> AppResult<()> {
        let move_id = require_owner(viewer, existing)?;

        self.move_repo.delete_move(move_id)?;

        log::info!("Move {} deleted by {:?}", move_id, viewer.id());
        self.event_bus.emit(MoveDeleted::new(move_id.to_string()));
        Ok(())
    }

    fn replace(&self, viewer: &Viewer, move_id: &str, details: MoveDetails, media_url: String) -> AppResult<()> {
        let record = new_move(viewer, details, media_url);
        validate_new_move(&record)?;

        self.move_repo.update_move(move_id, &record)?;

        log::info!("Move {} updated by {:?}", move_id, viewer.id());
        self.event_bus.emit(MoveUpdated::new(move_id.to_string()));
        Ok(())
    }

    fn insert(&self, viewer: &Viewer, details: MoveDetails, media_url: String) -> AppResult<UploadOutcome> {
        let record = new_move(viewer, details, media_url);
        validate_new_move(&record)?;

        let move_id = self
            .move_repo
            .insert_move(&record)
            .map_err(|e| AppError::Storage(format!("DB insert failed: {}", e.reason())))?;

        log::info!("Move {} added by {:?}", move_id, viewer.id());
        self.event_bus.emit(MoveUploaded::new(
            move_id.clone(),
            record.name.clone(),
            record.uploader_id.clone(),
            record.media_url.clone(),
        ));

        Ok(UploadOutcome {
            move_id,
            media_url: record.media_url,
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
        })
    }
}

fn invalid(message: &str) -> AppError {
    AppError::Domain(DomainError::InvariantViolation(message.to_string()))
}

fn require_contributor(viewer: &Viewer) -> AppResult<()> {
    if !viewer.is_authenticated() {
        return Err(AppError::Unauthorized("You must login to upload.".to_string()));
    }
    if !viewer.can_upload() {
        return Err(AppError::Unauthorized("Uploads require Pro access.".to_string()));
    }
    Ok(())
}

fn require_owner<'a>(viewer: &Viewer, existing: &'a Move) -> AppResult<&'a str> {
    require_contributor(viewer)?;

    if !existing.is_uploaded_by(viewer.id(), viewer.email()) {
        return Err(AppError::Unauthorized(
            "Only the uploader can change this move.".to_string(),
        ));
    }

    existing.id.as_deref().ok_or(AppError::NotFound)
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn new_move(viewer: &Viewer, details: MoveDetails, media_url: String) -> NewMove {
    NewMove {
        name: details.name.trim().to_string(),
        move_type: details.move_type,
        start_position: trimmed(details.start_position),
        end_position: trimmed(details.end_position),
        difficulty: details.difficulty,
        comment: trimmed(details.comment),
        media_url,
        uploader_id: viewer.id().map(str::to_string),
        uploader_email: viewer.email().map(str::to_string),
        is_private: details.is_private,
    }
}
