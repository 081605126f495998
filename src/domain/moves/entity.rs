use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::clip::is_embed_url;

/// Dance positions offered by the start/end selectors
pub const POSITIONS: &[&str] = &[
    "Open",
    "Closed",
    "Cross Body",
    "Side-by-Side",
    "Shadow",
    "Hammerlock",
    "Double Hand Hold",
    "Single Hand Hold",
    "Wrap",
    "Reverse Wrap",
    "Sweetheart",
    "Cradle",
    "Headloop",
    "Pretzel",
    "Cuddle",
];

/// Semantic type of a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MoveType {
    #[default]
    Move,
    PositionChange,
    Combo,
    Styling,
    Footwork,
    Instructions,
    PositionVariation,
}

impl MoveType {
    pub const ALL: [MoveType; 7] = [
        MoveType::Move,
        MoveType::PositionChange,
        MoveType::Combo,
        MoveType::Styling,
        MoveType::Footwork,
        MoveType::Instructions,
        MoveType::PositionVariation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoveType::Move => "Move",
            MoveType::PositionChange => "Position Change",
            MoveType::Combo => "Combo",
            MoveType::Styling => "Styling",
            MoveType::Footwork => "Footwork",
            MoveType::Instructions => "Instructions",
            MoveType::PositionVariation => "Position Variation",
        }
    }

    /// Strict lookup of a known label (case-insensitive)
    pub fn parse(raw: &str) -> Option<MoveType> {
        let value = raw.trim().to_lowercase();
        match value.as_str() {
            "move" => Some(MoveType::Move),
            "position change" | "entry" | "exit" | "transition" => Some(MoveType::PositionChange),
            "combo" => Some(MoveType::Combo),
            "styling" => Some(MoveType::Styling),
            "footwork" => Some(MoveType::Footwork),
            "instructions" => Some(MoveType::Instructions),
            "position variation" => Some(MoveType::PositionVariation),
            _ => None,
        }
    }

    /// Collapse any stored value into the enumeration.
    ///
    /// Legacy Entry/Exit/Transition become Position Change; anything
    /// unknown or missing is a plain Move.
    pub fn normalize(raw: Option<&str>) -> MoveType {
        raw.and_then(MoveType::parse).unwrap_or(MoveType::Move)
    }
}

impl std::fmt::Display for MoveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Difficulty level, ordered Beginner < ... < Professional
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Improver,
    Intermediate,
    Advanced,
    Professional,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Beginner,
        Difficulty::Improver,
        Difficulty::Intermediate,
        Difficulty::Advanced,
        Difficulty::Professional,
    ];

    /// The lowest level, the only one visible through the basic gate
    pub const LOWEST: Difficulty = Difficulty::Beginner;

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Improver => "Improver",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::Professional => "Professional",
        }
    }

    pub fn parse(raw: &str) -> Option<Difficulty> {
        let value = raw.trim().to_lowercase();
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().to_lowercase() == value)
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A move row exactly as the catalog backend hands it over.
///
/// Every column is optional: legacy rows lack ids, and uploader email
/// lives under several historical column names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMoveRecord {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,

    #[serde(default, alias = "title")]
    pub name: Option<String>,

    #[serde(default, rename = "type", alias = "move_type")]
    pub move_type: Option<String>,

    #[serde(default)]
    pub start_position: Option<String>,

    #[serde(default)]
    pub end_position: Option<String>,

    #[serde(default)]
    pub difficulty: Option<String>,

    #[serde(default)]
    pub comment: Option<String>,

    #[serde(default, alias = "url", alias = "media_url")]
    pub video_url: Option<String>,

    #[serde(default, deserialize_with = "string_or_number")]
    pub uploader_id: Option<String>,

    #[serde(default)]
    pub uploader_email: Option<String>,

    #[serde(default)]
    pub uploaded_by_email: Option<String>,

    #[serde(default)]
    pub created_by_email: Option<String>,

    #[serde(default)]
    pub owner_email: Option<String>,

    #[serde(default)]
    pub is_private: Option<bool>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Who uploaded a move, resolved once at load time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Uploader {
    pub id: Option<String>,
    pub email: Option<String>,

    /// Display label: the email, or "User <short-id>" when only an id exists
    pub label: String,
}

impl Uploader {
    fn resolve(raw: &RawMoveRecord) -> Self {
        let email = [
            &raw.uploader_email,
            &raw.uploaded_by_email,
            &raw.created_by_email,
            &raw.owner_email,
        ]
        .into_iter()
        .flatten()
        .map(|e| e.trim())
        .find(|e| !e.is_empty())
        .map(str::to_string);

        let id = raw.uploader_id.clone().filter(|id| !id.trim().is_empty());

        let label = match (&email, &id) {
            (Some(email), _) => email.clone(),
            (None, Some(id)) => format!("User {}", id.chars().take(8).collect::<String>()),
            (None, None) => "Unknown uploader".to_string(),
        };

        Self { id, email, label }
    }
}

/// Normalized catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    /// Absent for legacy rows; such moves can never be favorited
    pub id: Option<String>,

    pub name: String,

    /// Type as stored, kept for display/debugging
    pub raw_type: Option<String>,

    /// Derived at load time; the only type used for filtering
    pub normalized_type: MoveType,

    pub start_position: Option<String>,
    pub end_position: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub comment: Option<String>,

    /// Hosted file URL or a constructed embed URL
    pub media_url: Option<String>,

    pub uploader: Uploader,
    pub is_private: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Move {
    pub fn from_raw(raw: RawMoveRecord) -> Self {
        let uploader = Uploader::resolve(&raw);
        let normalized_type = MoveType::normalize(raw.move_type.as_deref());
        let difficulty = raw.difficulty.as_deref().and_then(Difficulty::parse);

        Self {
            id: raw.id,
            name: raw.name.unwrap_or_default(),
            raw_type: raw.move_type,
            normalized_type,
            start_position: raw.start_position.filter(|p| !p.is_empty()),
            end_position: raw.end_position.filter(|p| !p.is_empty()),
            difficulty,
            comment: raw.comment.filter(|c| !c.is_empty()),
            media_url: raw.video_url.filter(|u| !u.is_empty()),
            uploader,
            is_private: raw.is_private,
            created_at: raw.created_at,
        }
    }

    /// Whether the given identity uploaded this move (id or email match)
    pub fn is_uploaded_by(&self, viewer_id: Option<&str>, viewer_email: Option<&str>) -> bool {
        let id_match = matches!(
            (self.uploader.id.as_deref(), viewer_id),
            (Some(a), Some(b)) if a == b
        );
        let email_match = matches!(
            (self.uploader.email.as_deref(), viewer_email),
            (Some(a), Some(b)) if a.eq_ignore_ascii_case(b)
        );
        id_match || email_match
    }

    pub fn is_embed(&self) -> bool {
        self.media_url
            .as_deref()
            .map(is_embed_url)
            .unwrap_or(false)
    }
}

/// A move about to be written through the catalog collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMove {
    pub name: String,
    pub move_type: MoveType,
    pub start_position: Option<String>,
    pub end_position: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub comment: Option<String>,
    pub media_url: String,
    pub uploader_id: Option<String>,
    pub uploader_email: Option<String>,
    pub is_private: bool,
}
