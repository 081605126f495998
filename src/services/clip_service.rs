// src/services/clip_service.rs
//
// Clip preparation for embed submissions
//
// Pure link/window validation first, then the remote availability probe.
// The probe only runs for links that already passed validation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{max_clip_seconds, ClipLocator, EmbedClip, MoveType};
use crate::domain::clip::parse_clip_length;
use crate::error::AppResult;
use crate::integrations::PlaybackProbe;

/// Form values for re-editing a stored embed clip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedEditDefaults {
    pub video_url: String,
    pub clip_length: u32,
}

pub struct ClipService {
    probe: Arc<dyn PlaybackProbe>,
    locator: ClipLocator,
}

impl ClipService {
    pub fn new(probe: Arc<dyn PlaybackProbe>) -> Self {
        Self {
            probe,
            locator: ClipLocator::default(),
        }
    }

    /// Validate a link and window for `move_type`, then confirm the video embeds
    pub async fn prepare_embed(
        &self,
        move_type: MoveType,
        raw_url: &str,
        explicit_start: Option<u32>,
        clip_length: &str,
    ) -> AppResult<EmbedClip> {
        let max_length = max_clip_seconds(move_type);
        let length = parse_clip_length(clip_length, max_length)?;
        let clip = self
            .locator
            .build_clip(raw_url, explicit_start, i64::from(length), max_length)?;

        // The provider only answers for watch-style links
        let probe_url = if self.locator.parse_embed(raw_url).is_some() {
            clip.watch_url()
        } else {
            raw_url.trim().to_string()
        };
        self.probe.check_playable(&probe_url).await?;

        log::debug!("Prepared clip {} ({}s)", clip.embed_url(), clip.length());
        Ok(clip)
    }

    /// Pre-fill values for editing a move whose media is an embed clip
    pub fn edit_defaults(&self, media_url: &str) -> Option<EmbedEditDefaults> {
        let video_url = self.locator.timestamp_url_from_embed(media_url)?;
        Some(EmbedEditDefaults {
            video_url,
            clip_length: self.locator.clip_length_from_embed(media_url),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ClipError;
    use crate::integrations::oembed::MockPlaybackProbe;

    fn service_with(probe: MockPlaybackProbe) -> ClipService {
        ClipService::new(Arc::new(probe))
    }

    #[tokio::test]
    async fn test_prepare_embed_probes_original_link() {
        let mut probe = MockPlaybackProbe::new();
        probe
            .expect_check_playable()
            .withf(|url| url == "https://youtu.be/abc123?t=90")
            .times(1)
            .returning(|_| Ok(()));

        let clip = service_with(probe)
            .prepare_embed(MoveType::Combo, "https://youtu.be/abc123?t=90", None, "10")
            .await
            .unwrap();

        assert_eq!(
            clip.embed_url(),
            "https://www.youtube.com/embed/abc123?rel=0&start=90&end=100"
        );
    }

    #[tokio::test]
    async fn test_invalid_clip_never_probes() {
        let mut probe = MockPlaybackProbe::new();
        probe.expect_check_playable().never();
        let service = service_with(probe);

        let err = service
            .prepare_embed(MoveType::Combo, "https://www.youtube.com/watch?v=abc123", None, "10")
            .await
            .unwrap_err();
        assert_eq!(err.as_clip_error(), Some(&ClipError::MissingStart));

        let err = service
            .prepare_embed(MoveType::Combo, "https://youtu.be/abc123", Some(5), "20")
            .await
            .unwrap_err();
        assert_eq!(err.as_clip_error(), Some(&ClipError::InvalidClipLength { max: 15 }));
    }

    #[tokio::test]
    async fn test_instructions_allow_long_clips() {
        let mut probe = MockPlaybackProbe::new();
        probe.expect_check_playable().returning(|_| Ok(()));

        let clip = service_with(probe)
            .prepare_embed(MoveType::Instructions, "https://youtu.be/abc123", Some(30), "45")
            .await
            .unwrap();
        assert_eq!(clip.length(), 45);
    }

    #[tokio::test]
    async fn test_unavailable_video_blocks() {
        let mut probe = MockPlaybackProbe::new();
        probe
            .expect_check_playable()
            .returning(|_| Err(ClipError::PlaybackUnavailable));

        let err = service_with(probe)
            .prepare_embed(MoveType::Move, "https://youtu.be/abc123?t=5", None, "8")
            .await
            .unwrap_err();
        assert_eq!(err.as_clip_error(), Some(&ClipError::PlaybackUnavailable));
    }

    #[tokio::test]
    async fn test_embed_link_is_probed_as_watch_url() {
        let mut probe = MockPlaybackProbe::new();
        probe
            .expect_check_playable()
            .withf(|url| url == "https://www.youtube.com/watch?v=abc123&t=30s")
            .times(1)
            .returning(|_| Ok(()));

        service_with(probe)
            .prepare_embed(
                MoveType::Move,
                "https://www.youtube.com/embed/abc123?rel=0&start=30&end=37",
                None,
                "7",
            )
            .await
            .unwrap();
    }

    #[test]
    fn test_edit_defaults_round_trip() {
        let service = service_with(MockPlaybackProbe::new());

        let defaults = service
            .edit_defaults("https://www.youtube.com/embed/abc123?rel=0&start=30&end=37")
            .unwrap();
        assert_eq!(defaults.video_url, "https://www.youtube.com/watch?v=abc123&t=30s");
        assert_eq!(defaults.clip_length, 7);

        assert!(service.edit_defaults("https://cdn.example.com/x.mp4").is_none());
    }
}
