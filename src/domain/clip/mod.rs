pub mod locator;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use locator::{
    build_embed_clip, build_embed_clip_for, build_embed_clip_with_max, extract_video_id,
    get_clip_length_from_embed, get_timestamp_url_from_embed, is_embed_url, max_clip_seconds,
    parse_clip_length, validate_clip_length, ClipLocator, EmbedClip, DEFAULT_MAX_CLIP_SECONDS,
    FALLBACK_CLIP_SECONDS, LONG_FORM_MAX_CLIP_SECONDS,
};

/// Clip validation failures; messages are shown to the uploader as-is
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ClipError {
    #[error("Please paste a valid YouTube link (youtu.be, watch, shorts or embed).")]
    InvalidLink,

    #[error("The link needs a start time (add ?t=90 or enter a start time).")]
    MissingStart,

    #[error("Clip length must be a whole number of seconds between 1 and {max}.")]
    InvalidClipLength { max: u32 },

    #[error("This video cannot be embedded right now. Check the link or try again later.")]
    PlaybackUnavailable,
}

pub type ClipResult<T> = Result<T, ClipError>;
