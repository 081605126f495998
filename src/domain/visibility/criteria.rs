use serde::{Deserialize, Serialize};

use crate::domain::moves::{Difficulty, MoveType};

/// Selector label meaning "no constraint"
pub const ALL_OPTION: &str = "All";

/// Ephemeral filter state read from the UI controls.
///
/// `None` means the selector is unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search: String,
    pub move_type: Option<MoveType>,
    pub start_position: Option<String>,
    pub end_position: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub mine_only: bool,
    pub favorites_only: bool,
}

fn selector(raw: &str) -> Option<&str> {
    let value = raw.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(ALL_OPTION) {
        None
    } else {
        Some(value)
    }
}

impl FilterCriteria {
    /// Build criteria from raw selector strings
    pub fn from_form(
        search: &str,
        move_type: &str,
        start_position: &str,
        end_position: &str,
        difficulty: &str,
        mine_only: bool,
        favorites_only: bool,
    ) -> Self {
        Self {
            search: search.trim().to_string(),
            move_type: selector(move_type).and_then(MoveType::parse),
            start_position: selector(start_position).map(str::to_string),
            end_position: selector(end_position).map(str::to_string),
            difficulty: selector(difficulty).and_then(Difficulty::parse),
            mine_only,
            favorites_only,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_type(mut self, move_type: MoveType) -> Self {
        self.move_type = Some(move_type);
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_positions(mut self, start: Option<&str>, end: Option<&str>) -> Self {
        self.start_position = start.map(str::to_string);
        self.end_position = end.map(str::to_string);
        self
    }

    pub fn mine_only(mut self) -> Self {
        self.mine_only = true;
        self
    }

    pub fn favorites_only(mut self) -> Self {
        self.favorites_only = true;
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        *self == FilterCriteria::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_and_empty_mean_unconstrained() {
        let criteria = FilterCriteria::from_form("", "All", "", "all", "", false, false);
        assert!(criteria.is_unconstrained());
    }

    #[test]
    fn test_form_values_parse() {
        let criteria = FilterCriteria::from_form(
            "  turn ",
            "Transition",
            "Open",
            "Closed",
            "Advanced",
            true,
            false,
        );
        assert_eq!(criteria.search, "turn");
        assert_eq!(criteria.move_type, Some(MoveType::PositionChange));
        assert_eq!(criteria.start_position.as_deref(), Some("Open"));
        assert_eq!(criteria.difficulty, Some(Difficulty::Advanced));
        assert!(criteria.mine_only);
    }

    #[test]
    fn test_unknown_selector_values_are_ignored() {
        let criteria = FilterCriteria::from_form("", "Spin", "", "", "Expert", false, false);
        assert_eq!(criteria.move_type, None);
        assert_eq!(criteria.difficulty, None);
    }
}
