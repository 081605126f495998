// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - DTOs NEVER leak domain invariants
// - DTOs are simple, serializable structs
// - Form DTOs are parsed leniently into domain requests

use serde::{Deserialize, Serialize};

use crate::domain::visibility::ALL_OPTION;
use crate::domain::{Difficulty, FavoriteSet, FilterCriteria, Move, MoveType, Viewer, POSITIONS};
use crate::services::{
    AuthOutcome, EmbedEditDefaults, EmbedEditRequest, EmbedMoveRequest, FileUploadRequest,
    MoveDetails, UploadOutcome,
};

pub const EMPTY_CATALOG_MESSAGE: &str = "No moves match your current filters/access level.";

const MISSING_VALUE: &str = "-";

// ============================================================================
// CATALOG DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveCardDto {
    pub id: Option<String>,
    pub name: String,
    /// "<type> | <start> → <end> | <difficulty>"
    pub summary: String,
    pub media_url: Option<String>,
    pub is_embed: bool,
    pub is_favorite: bool,
    /// Legacy moves without an id cannot be favorited
    pub can_favorite: bool,
    pub can_edit: bool,
    pub uploader_label: String,
    pub comment: Option<String>,
}

impl MoveCardDto {
    pub fn from_move(m: &Move, favorites: &FavoriteSet, viewer: &Viewer) -> Self {
        let summary = format!(
            "{} | {} → {} | {}",
            m.normalized_type.as_str(),
            m.start_position.as_deref().unwrap_or(MISSING_VALUE),
            m.end_position.as_deref().unwrap_or(MISSING_VALUE),
            m.difficulty.map(|d| d.as_str()).unwrap_or(MISSING_VALUE),
        );

        Self {
            id: m.id.clone(),
            name: m.name.clone(),
            summary,
            media_url: m.media_url.clone(),
            is_embed: m.is_embed(),
            is_favorite: m.id.as_deref().map(|id| favorites.contains(id)).unwrap_or(false),
            can_favorite: m.id.is_some(),
            can_edit: viewer.can_upload() && m.is_uploaded_by(viewer.id(), viewer.email()),
            uploader_label: m.uploader.label.clone(),
            comment: m.comment.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogViewDto {
    pub cards: Vec<MoveCardDto>,
    /// Set when nothing is visible and the catalog loaded fine
    pub empty_message: Option<String>,
    pub load_error: Option<String>,
    pub access_message: String,
    pub status_line: String,
    pub auth_hint: String,
    pub can_upload: bool,
    pub can_filter_own: bool,
}

impl CatalogViewDto {
    pub fn new(cards: Vec<MoveCardDto>, viewer: &Viewer, load_error: Option<String>) -> Self {
        let empty_message = if cards.is_empty() && load_error.is_none() {
            Some(EMPTY_CATALOG_MESSAGE.to_string())
        } else {
            None
        };

        let auth_hint = match viewer.email() {
            Some(email) => format!("Logged in as {}.", email),
            None if viewer.is_authenticated() => "Logged in.".to_string(),
            None => "Please sign in to unlock your tier.".to_string(),
        };

        Self {
            cards,
            empty_message,
            load_error,
            access_message: viewer.access_message().to_string(),
            status_line: viewer.status_line(),
            auth_hint,
            can_upload: viewer.can_upload(),
            can_filter_own: viewer.can_filter_own_moves(),
        }
    }
}

/// Raw selector values as read from the filter controls
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFilterDto {
    pub search: String,
    pub move_type: String,
    pub start_position: String,
    pub end_position: String,
    pub difficulty: String,
    pub mine_only: bool,
    pub favorites_only: bool,
}

impl From<CatalogFilterDto> for FilterCriteria {
    fn from(dto: CatalogFilterDto) -> Self {
        FilterCriteria::from_form(
            &dto.search,
            &dto.move_type,
            &dto.start_position,
            &dto.end_position,
            &dto.difficulty,
            dto.mine_only,
            dto.favorites_only,
        )
    }
}

/// Selector contents; each list starts with "All"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptionsDto {
    pub move_types: Vec<String>,
    pub positions: Vec<String>,
    pub difficulties: Vec<String>,
}

impl FilterOptionsDto {
    pub fn build() -> Self {
        fn with_all<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
            std::iter::once(ALL_OPTION)
                .chain(values)
                .map(str::to_string)
                .collect()
        }

        Self {
            move_types: with_all(MoveType::ALL.iter().map(|t| t.as_str())),
            positions: with_all(POSITIONS.iter().copied()),
            difficulties: with_all(Difficulty::ALL.iter().map(|d| d.as_str())),
        }
    }
}

// ============================================================================
// CONTRIBUTION DTOs
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveDetailsDto {
    pub name: String,
    pub move_type: String,
    pub start_position: String,
    pub end_position: String,
    pub difficulty: String,
    pub comment: String,
    pub is_private: bool,
}

fn optional(raw: &str) -> Option<String> {
    let value = raw.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl From<MoveDetailsDto> for MoveDetails {
    fn from(dto: MoveDetailsDto) -> Self {
        MoveDetails {
            name: dto.name.trim().to_string(),
            move_type: MoveType::normalize(Some(dto.move_type.as_str())),
            start_position: optional(&dto.start_position),
            end_position: optional(&dto.end_position),
            difficulty: Difficulty::parse(dto.difficulty.trim()),
            comment: optional(&dto.comment),
            is_private: dto.is_private,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadFileDto {
    #[serde(flatten)]
    pub details: MoveDetailsDto,
    pub file_name: String,
    pub bytes: Vec<u8>,
    #[serde(default)]
    pub rights_confirmed: bool,
}

impl From<UploadFileDto> for FileUploadRequest {
    fn from(dto: UploadFileDto) -> Self {
        FileUploadRequest {
            details: dto.details.into(),
            file_name: dto.file_name,
            bytes: dto.bytes,
            rights_confirmed: dto.rights_confirmed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedMoveDto {
    #[serde(flatten)]
    pub details: MoveDetailsDto,
    pub video_url: String,
    #[serde(default)]
    pub start_seconds: Option<u32>,
    #[serde(default)]
    pub clip_length: String,
    #[serde(default)]
    pub rights_confirmed: bool,
}

impl From<EmbedMoveDto> for EmbedMoveRequest {
    fn from(dto: EmbedMoveDto) -> Self {
        EmbedMoveRequest {
            details: dto.details.into(),
            video_url: dto.video_url,
            // An explicit start of 0 counts as absent
            start_seconds: dto.start_seconds.filter(|s| *s > 0),
            clip_length: dto.clip_length,
            rights_confirmed: dto.rights_confirmed,
        }
    }
}

/// Edit form for a move stored as an embed clip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedEditDto {
    #[serde(flatten)]
    pub details: MoveDetailsDto,
    pub video_url: String,
    #[serde(default)]
    pub start_seconds: Option<u32>,
    #[serde(default)]
    pub clip_length: String,
}

impl From<EmbedEditDto> for EmbedEditRequest {
    fn from(dto: EmbedEditDto) -> Self {
        EmbedEditRequest {
            details: dto.details.into(),
            video_url: dto.video_url,
            start_seconds: dto.start_seconds.filter(|s| *s > 0),
            clip_length: dto.clip_length,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResultDto {
    pub move_id: String,
    pub media_url: String,
    pub message: String,
}

impl From<UploadOutcome> for UploadResultDto {
    fn from(outcome: UploadOutcome) -> Self {
        Self {
            move_id: outcome.move_id,
            media_url: outcome.media_url,
            message: outcome.message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedDefaultsDto {
    pub video_url: String,
    pub clip_length: u32,
}

impl From<EmbedEditDefaults> for EmbedDefaultsDto {
    fn from(defaults: EmbedEditDefaults) -> Self {
        Self {
            video_url: defaults.video_url,
            clip_length: defaults.clip_length,
        }
    }
}

// ============================================================================
// SESSION DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsDto {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpDto {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResultDto {
    pub success: bool,
    pub message: String,
}

impl From<AuthOutcome> for AuthResultDto {
    fn from(outcome: AuthOutcome) -> Self {
        Self {
            success: outcome.success,
            message: outcome.message,
        }
    }
}
