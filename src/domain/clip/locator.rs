// src/domain/clip/locator.rs
//
// Clip Locator - time-windowed YouTube embed URLs
//
// CRITICAL RULES:
// - Pure: parsing and building only, no network
// - Timestamp embeds always need an explicit start (no default to zero)
// - Clip length is a whole number of seconds in 1..=max
// - Availability probing lives in integrations::oembed, not here

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::moves::MoveType;

use super::{ClipError, ClipResult};

/// Cap for regular content
pub const DEFAULT_MAX_CLIP_SECONDS: u32 = 15;

/// Cap for long-form content (instructional clips)
pub const LONG_FORM_MAX_CLIP_SECONDS: u32 = 60;

/// Clip length reported when an embed URL has no usable window
pub const FALLBACK_CLIP_SECONDS: u32 = 8;

const EMBED_BASE: &str = "https://www.youtube.com/embed/";
const WATCH_BASE: &str = "https://www.youtube.com/watch";

/// Maximum clip length allowed for a move type.
///
/// Product decision pending confirmation: earlier revisions used a flat
/// 10s or 15s cap.
pub fn max_clip_seconds(move_type: MoveType) -> u32 {
    match move_type {
        MoveType::Instructions => LONG_FORM_MAX_CLIP_SECONDS,
        _ => DEFAULT_MAX_CLIP_SECONDS,
    }
}

/// A start/end window into a hosted video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedClip {
    pub video_id: String,
    pub start: u32,
    pub end: u32,
}

impl EmbedClip {
    pub fn length(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn embed_url(&self) -> String {
        format!(
            "{}{}?rel=0&start={}&end={}",
            EMBED_BASE, self.video_id, self.start, self.end
        )
    }

    pub fn watch_url(&self) -> String {
        format!("{}?v={}&t={}s", WATCH_BASE, self.video_id, self.start)
    }
}

/// Parsing rules for links and timestamps
pub struct ClipLocator {
    video_id_pattern: Regex,
    duration_pattern: Regex,
}

impl Default for ClipLocator {
    fn default() -> Self {
        Self {
            video_id_pattern: Regex::new(r"^[A-Za-z0-9_-]+$").unwrap(),
            // 1h2m3s, 5m, 90s - every component optional, order fixed
            duration_pattern: Regex::new(r"(?i)^(?:(\d+)h)?(?:(\d+)m)?(?:(\d+)s)?$").unwrap(),
        }
    }
}

enum Host {
    ShortLink,
    YouTube,
}

fn classify_host(url: &Url) -> Option<Host> {
    let host = url.host_str()?.to_lowercase();
    let host = host
        .strip_prefix("www.")
        .or_else(|| host.strip_prefix("m."))
        .unwrap_or(&host)
        .to_string();

    match host.as_str() {
        "youtu.be" => Some(Host::ShortLink),
        "youtube.com" | "music.youtube.com" | "youtube-nocookie.com" => Some(Host::YouTube),
        _ => None,
    }
}

fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

impl ClipLocator {
    /// Extract the source video id from any supported link shape
    pub fn extract_video_id(&self, raw_url: &str) -> ClipResult<String> {
        let url = Url::parse(raw_url.trim()).map_err(|_| ClipError::InvalidLink)?;
        let host = classify_host(&url).ok_or(ClipError::InvalidLink)?;

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        let candidate = match host {
            Host::ShortLink => segments.first().map(|s| s.to_string()),
            Host::YouTube => match segments.as_slice() {
                ["watch"] => query_param(&url, "v"),
                ["shorts", id, ..] | ["embed", id, ..] => Some(id.to_string()),
                _ => None,
            },
        };

        candidate
            .filter(|id| self.video_id_pattern.is_match(id))
            .ok_or(ClipError::InvalidLink)
    }

    /// Parse a `t`/`start` value: bare seconds or an h/m/s token.
    ///
    /// Zero, negative and unparseable values are all treated as absent.
    pub fn parse_start_token(&self, token: &str) -> Option<u32> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }

        let seconds: u64 = if token.bytes().all(|b| b.is_ascii_digit()) {
            token.parse().ok()?
        } else {
            let caps = self.duration_pattern.captures(token)?;
            let part = |idx: usize| -> Option<u64> {
                match caps.get(idx) {
                    Some(m) => m.as_str().parse().ok(),
                    None => Some(0),
                }
            };
            part(1)?
                .checked_mul(3600)?
                .checked_add(part(2)?.checked_mul(60)?)?
                .checked_add(part(3)?)?
        };

        u32::try_from(seconds).ok().filter(|s| *s > 0)
    }

    /// Start time carried by the link itself (`t` preferred over `start`)
    pub fn start_from_url(&self, raw_url: &str) -> Option<u32> {
        let url = Url::parse(raw_url.trim()).ok()?;
        ["t", "start"]
            .into_iter()
            .filter_map(|name| query_param(&url, name))
            .find_map(|value| self.parse_start_token(&value))
    }

    pub fn build_clip(
        &self,
        raw_url: &str,
        explicit_start: Option<u32>,
        clip_length: i64,
        max_length: u32,
    ) -> ClipResult<EmbedClip> {
        let video_id = self.extract_video_id(raw_url)?;

        let start = explicit_start
            .filter(|s| *s > 0)
            .or_else(|| self.start_from_url(raw_url))
            .ok_or(ClipError::MissingStart)?;

        let length = validate_clip_length(clip_length, max_length)?;
        let end = start
            .checked_add(length)
            .ok_or(ClipError::InvalidClipLength { max: max_length })?;

        Ok(EmbedClip {
            video_id,
            start,
            end,
        })
    }

    /// Recover the window from a previously built embed URL
    pub fn parse_embed(&self, embed_url: &str) -> Option<EmbedClip> {
        let url = Url::parse(embed_url.trim()).ok()?;
        classify_host(&url)?;

        let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
        if segments.next()? != "embed" {
            return None;
        }
        let video_id = segments.next()?.to_string();
        if !self.video_id_pattern.is_match(&video_id) {
            return None;
        }

        let start = query_param(&url, "start").and_then(|v| v.parse::<u32>().ok())?;
        let end = query_param(&url, "end").and_then(|v| v.parse::<u32>().ok())?;

        Some(EmbedClip {
            video_id,
            start,
            end,
        })
    }

    /// Video id of an embed URL, even when its window is missing
    fn embed_video_id(&self, embed_url: &str) -> Option<String> {
        let url = Url::parse(embed_url.trim()).ok()?;
        classify_host(&url)?;
        let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
        match (segments.next(), segments.next()) {
            (Some("embed"), Some(id)) if self.video_id_pattern.is_match(id) => Some(id.to_string()),
            _ => None,
        }
    }

    pub fn timestamp_url_from_embed(&self, embed_url: &str) -> Option<String> {
        if let Some(clip) = self.parse_embed(embed_url) {
            return Some(clip.watch_url());
        }
        let video_id = self.embed_video_id(embed_url)?;
        Some(format!("{}?v={}", WATCH_BASE, video_id))
    }

    pub fn clip_length_from_embed(&self, embed_url: &str) -> u32 {
        match self.parse_embed(embed_url) {
            Some(clip) if clip.end > clip.start => clip.length().max(1),
            Some(_) => 1,
            None => FALLBACK_CLIP_SECONDS,
        }
    }
}

/// Whole-number clip length within `1..=max`
pub fn validate_clip_length(clip_length: i64, max_length: u32) -> ClipResult<u32> {
    if clip_length < 1 || clip_length > i64::from(max_length) {
        return Err(ClipError::InvalidClipLength { max: max_length });
    }
    u32::try_from(clip_length).map_err(|_| ClipError::InvalidClipLength { max: max_length })
}

/// Parse a clip length typed into a form field
pub fn parse_clip_length(raw: &str, max_length: u32) -> ClipResult<u32> {
    let value = raw.trim();
    let parsed = if let Ok(n) = value.parse::<i64>() {
        n
    } else {
        // "10.0" is a whole number, "7.5" is not
        match value.parse::<f64>() {
            Ok(f) if f.is_finite() && f.fract() == 0.0 => f as i64,
            _ => return Err(ClipError::InvalidClipLength { max: max_length }),
        }
    };
    validate_clip_length(parsed, max_length)
}

fn locator() -> &'static ClipLocator {
    static LOCATOR: OnceLock<ClipLocator> = OnceLock::new();
    LOCATOR.get_or_init(ClipLocator::default)
}

/// Build an embed URL with the default 15s cap
pub fn build_embed_clip(
    raw_url: &str,
    explicit_start: Option<u32>,
    clip_length: i64,
) -> ClipResult<String> {
    build_embed_clip_with_max(raw_url, explicit_start, clip_length, DEFAULT_MAX_CLIP_SECONDS)
}

pub fn build_embed_clip_with_max(
    raw_url: &str,
    explicit_start: Option<u32>,
    clip_length: i64,
    max_length: u32,
) -> ClipResult<String> {
    locator()
        .build_clip(raw_url, explicit_start, clip_length, max_length)
        .map(|clip| clip.embed_url())
}

/// Build an embed URL using the cap for the move's type
pub fn build_embed_clip_for(
    move_type: MoveType,
    raw_url: &str,
    explicit_start: Option<u32>,
    clip_length: i64,
) -> ClipResult<String> {
    build_embed_clip_with_max(raw_url, explicit_start, clip_length, max_clip_seconds(move_type))
}

pub fn extract_video_id(raw_url: &str) -> ClipResult<String> {
    locator().extract_video_id(raw_url)
}

/// Whether `url` is a hosted-video embed link on any accepted host
pub fn is_embed_url(url: &str) -> bool {
    locator().embed_video_id(url).is_some()
}

pub fn get_timestamp_url_from_embed(embed_url: &str) -> Option<String> {
    locator().timestamp_url_from_embed(embed_url)
}

pub fn get_clip_length_from_embed(embed_url: &str) -> u32 {
    locator().clip_length_from_embed(embed_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_link_with_t_param() {
        assert_eq!(
            build_embed_clip("https://youtu.be/abc123?t=90", None, 10).unwrap(),
            "https://www.youtube.com/embed/abc123?rel=0&start=90&end=100"
        );
    }

    #[test]
    fn test_watch_url_without_start_is_missing_start() {
        assert_eq!(
            build_embed_clip("https://www.youtube.com/watch?v=abc123", None, 10),
            Err(ClipError::MissingStart)
        );
    }

    #[test]
    fn test_zero_length_is_invalid() {
        assert_eq!(
            build_embed_clip("https://youtu.be/abc123", Some(5), 0),
            Err(ClipError::InvalidClipLength { max: 15 })
        );
        assert_eq!(
            build_embed_clip("https://youtu.be/abc123", Some(5), 16),
            Err(ClipError::InvalidClipLength { max: 15 })
        );
        assert!(build_embed_clip("https://youtu.be/abc123", Some(5), 15).is_ok());
    }

    #[test]
    fn test_all_link_shapes() {
        let loc = ClipLocator::default();
        for url in [
            "https://youtu.be/abc123",
            "https://www.youtube.com/watch?v=abc123&list=x",
            "https://m.youtube.com/watch?feature=share&v=abc123",
            "https://youtube.com/shorts/abc123",
            "https://www.youtube.com/embed/abc123?start=1",
        ] {
            assert_eq!(loc.extract_video_id(url).unwrap(), "abc123", "{}", url);
        }
    }

    #[test]
    fn test_unrecognized_links() {
        let loc = ClipLocator::default();
        for url in [
            "not a url",
            "https://vimeo.com/12345",
            "https://www.youtube.com/channel/xyz",
            "https://www.youtube.com/watch",
            "https://youtu.be/",
            "https://youtu.be/bad<id>",
        ] {
            assert_eq!(loc.extract_video_id(url), Err(ClipError::InvalidLink), "{}", url);
        }
    }

    #[test]
    fn test_start_tokens() {
        let loc = ClipLocator::default();
        assert_eq!(loc.parse_start_token("90"), Some(90));
        assert_eq!(loc.parse_start_token("90s"), Some(90));
        assert_eq!(loc.parse_start_token("5m"), Some(300));
        assert_eq!(loc.parse_start_token("1h2m3s"), Some(3723));
        assert_eq!(loc.parse_start_token("1H2M"), Some(3720));
        assert_eq!(loc.parse_start_token("0"), None);
        assert_eq!(loc.parse_start_token("0s"), None);
        assert_eq!(loc.parse_start_token("-5"), None);
        assert_eq!(loc.parse_start_token("abc"), None);
        assert_eq!(loc.parse_start_token("3s2m"), None);
    }

    #[test]
    fn test_start_param_and_explicit_precedence() {
        let url = "https://www.youtube.com/watch?v=abc123&start=1m30s";
        assert_eq!(
            build_embed_clip(url, None, 5).unwrap(),
            "https://www.youtube.com/embed/abc123?rel=0&start=90&end=95"
        );
        assert_eq!(
            build_embed_clip(url, Some(12), 5).unwrap(),
            "https://www.youtube.com/embed/abc123?rel=0&start=12&end=17"
        );
        // t=0 is treated as absent
        assert_eq!(
            build_embed_clip("https://youtu.be/abc123?t=0", None, 5),
            Err(ClipError::MissingStart)
        );
    }

    #[test]
    fn test_invalid_link_checked_before_start() {
        assert_eq!(
            build_embed_clip("https://example.com/?t=5", None, 5),
            Err(ClipError::InvalidLink)
        );
    }

    #[test]
    fn test_type_dependent_cap() {
        let url = "https://youtu.be/abc123?t=10";
        assert!(build_embed_clip_for(MoveType::Instructions, url, None, 60).is_ok());
        assert_eq!(
            build_embed_clip_for(MoveType::Combo, url, None, 60),
            Err(ClipError::InvalidClipLength { max: 15 })
        );
    }

    #[test]
    fn test_embed_roundtrip() {
        let embed = build_embed_clip("https://www.youtube.com/watch?v=abc123", Some(30), 7).unwrap();
        assert_eq!(get_clip_length_from_embed(&embed), 7);

        let watch = get_timestamp_url_from_embed(&embed).unwrap();
        assert_eq!(watch, "https://www.youtube.com/watch?v=abc123&t=30s");
        assert_eq!(ClipLocator::default().start_from_url(&watch), Some(30));
    }

    #[test]
    fn test_clip_length_fallbacks() {
        assert_eq!(get_clip_length_from_embed("https://www.youtube.com/embed/abc123"), 8);
        assert_eq!(get_clip_length_from_embed("garbage"), 8);
        assert_eq!(
            get_clip_length_from_embed("https://www.youtube.com/embed/abc123?start=20&end=20"),
            1
        );
        assert_eq!(
            get_timestamp_url_from_embed("https://www.youtube.com/embed/abc123").as_deref(),
            Some("https://www.youtube.com/watch?v=abc123")
        );
    }

    #[test]
    fn test_parse_clip_length_from_form() {
        assert_eq!(parse_clip_length("10", 15), Ok(10));
        assert_eq!(parse_clip_length("10.0", 15), Ok(10));
        assert_eq!(parse_clip_length("7.5", 15), Err(ClipError::InvalidClipLength { max: 15 }));
        assert_eq!(parse_clip_length("", 15), Err(ClipError::InvalidClipLength { max: 15 }));
        assert_eq!(parse_clip_length("-3", 15), Err(ClipError::InvalidClipLength { max: 15 }));
    }
}
