// src/domain/visibility/filter.rs
//
// Visibility Filter - which catalog moves a viewer may see right now
//
// CRITICAL RULES:
// - Pure: no I/O, no clock, no randomness
// - Order-preserving: output keeps catalog order (newest first)
// - Tier gate runs BEFORE any other filter, including the cap
// - Gating is cosmetic; nothing here is an access-control boundary

use crate::domain::favorites::FavoriteSet;
use crate::domain::moves::{Difficulty, Move};
use crate::domain::viewer::Viewer;

use super::criteria::FilterCriteria;

/// Cap applied to gated viewers
pub const BASIC_MAX_MOVES: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityRules {
    pub basic_max_moves: usize,
    pub basic_difficulty: Difficulty,
}

impl Default for VisibilityRules {
    fn default() -> Self {
        Self {
            basic_max_moves: BASIC_MAX_MOVES,
            basic_difficulty: Difficulty::LOWEST,
        }
    }
}

impl VisibilityRules {
    /// Rules with a lowered gated cap; never above BASIC_MAX_MOVES
    pub fn with_basic_cap(cap: usize) -> Self {
        Self {
            basic_max_moves: cap.min(BASIC_MAX_MOVES),
            ..Self::default()
        }
    }

    /// Step 1: restrict gated viewers to the first N lowest-difficulty moves
    pub fn tier_gate<'a>(&self, catalog: &'a [Move], viewer: &Viewer) -> Vec<&'a Move> {
        if viewer.is_gated() {
            catalog
                .iter()
                .filter(|m| m.difficulty == Some(self.basic_difficulty))
                .take(self.basic_max_moves)
                .collect()
        } else {
            catalog.iter().collect()
        }
    }

    pub fn visible_moves<'a>(
        &self,
        catalog: &'a [Move],
        viewer: &Viewer,
        favorites: &FavoriteSet,
        criteria: &FilterCriteria,
    ) -> Vec<&'a Move> {
        let search = criteria.search.to_lowercase();
        // The "mine only" toggle is forced off for anyone but an authenticated Pro
        let mine_only = criteria.mine_only && viewer.can_filter_own_moves();

        self.tier_gate(catalog, viewer)
            .into_iter()
            .filter(|m| matches_attributes(m, criteria, &search))
            .filter(|m| !mine_only || m.is_uploaded_by(viewer.id(), viewer.email()))
            .filter(|m| !criteria.favorites_only || is_favorite(m, favorites))
            .collect()
    }
}

fn matches_attributes(m: &Move, criteria: &FilterCriteria, search_lower: &str) -> bool {
    if !search_lower.is_empty() && !m.name.to_lowercase().contains(search_lower) {
        return false;
    }
    if let Some(t) = criteria.move_type {
        if m.normalized_type != t {
            return false;
        }
    }
    if let Some(start) = criteria.start_position.as_deref() {
        if m.start_position.as_deref() != Some(start) {
            return false;
        }
    }
    if let Some(end) = criteria.end_position.as_deref() {
        if m.end_position.as_deref() != Some(end) {
            return false;
        }
    }
    if let Some(d) = criteria.difficulty {
        if m.difficulty != Some(d) {
            return false;
        }
    }
    true
}

fn is_favorite(m: &Move, favorites: &FavoriteSet) -> bool {
    m.id.as_deref().map(|id| favorites.contains(id)).unwrap_or(false)
}

/// Visible subset of `catalog` under the default rules
pub fn visible_moves<'a>(
    catalog: &'a [Move],
    viewer: &Viewer,
    favorites: &FavoriteSet,
    criteria: &FilterCriteria,
) -> Vec<&'a Move> {
    VisibilityRules::default().visible_moves(catalog, viewer, favorites, criteria)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::moves::{MoveType, RawMoveRecord};
    use crate::domain::tier::Tier;
    use crate::domain::viewer::Identity;

    fn mv(id: &str, name: &str, difficulty: &str) -> Move {
        Move::from_raw(RawMoveRecord {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            difficulty: Some(difficulty.to_string()),
            ..Default::default()
        })
    }

    fn scenario_catalog() -> Vec<Move> {
        let mut catalog: Vec<Move> = (0..15)
            .map(|i| mv(&format!("b{}", i), &format!("Beginner {}", i), "Beginner"))
            .collect();
        catalog.extend((0..5).map(|i| mv(&format!("a{}", i), &format!("Advanced {}", i), "Advanced")));
        catalog
    }

    fn pro(id: &str, email: &str) -> Viewer {
        Viewer::new(Some(Identity::new(id, Some(email.to_string()))), Tier::Pro)
    }

    #[test]
    fn test_anonymous_viewer_sees_twelve_beginner_moves_in_order() {
        let catalog = scenario_catalog();
        let result = visible_moves(
            &catalog,
            &Viewer::anonymous(),
            &FavoriteSet::new(),
            &FilterCriteria::default(),
        );

        assert_eq!(result.len(), 12);
        assert!(result.iter().all(|m| m.difficulty == Some(Difficulty::Beginner)));
        let ids: Vec<_> = result.iter().map(|m| m.id.clone().unwrap()).collect();
        let expected: Vec<_> = (0..12).map(|i| format!("b{}", i)).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_basic_cap_can_only_be_lowered() {
        assert_eq!(VisibilityRules::with_basic_cap(50).basic_max_moves, BASIC_MAX_MOVES);
        assert_eq!(VisibilityRules::with_basic_cap(5).basic_max_moves, 5);

        let catalog = scenario_catalog();
        let visible = VisibilityRules::with_basic_cap(50).visible_moves(
            &catalog,
            &Viewer::anonymous(),
            &FavoriteSet::new(),
            &FilterCriteria::default(),
        );
        assert_eq!(visible.len(), 12);
    }

    #[test]
    fn test_gate_applies_before_search() {
        let catalog = scenario_catalog();
        // "Beginner 14" sits beyond the cap, so the gate hides it even when searched
        let criteria = FilterCriteria::default().with_search("beginner 14");
        let result = visible_moves(&catalog, &Viewer::anonymous(), &FavoriteSet::new(), &criteria);
        assert!(result.is_empty());
    }

    #[test]
    fn test_gated_viewer_never_sees_other_difficulties() {
        let catalog = scenario_catalog();
        let criteria = FilterCriteria::default().with_difficulty(Difficulty::Advanced);
        let basic = Viewer::new(Some(Identity::new("u", None)), Tier::Basic);
        assert!(visible_moves(&catalog, &basic, &FavoriteSet::new(), &criteria).is_empty());
    }

    #[test]
    fn test_pro_without_filters_sees_everything_in_order() {
        let catalog = scenario_catalog();
        let result = visible_moves(
            &catalog,
            &pro("p", "p@x.io"),
            &FavoriteSet::new(),
            &FilterCriteria::default(),
        );
        assert_eq!(result.len(), catalog.len());
        assert!(result.iter().zip(catalog.iter()).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_attribute_filters_combine() {
        let mut catalog = scenario_catalog();
        catalog.push(Move::from_raw(RawMoveRecord {
            id: Some("x".into()),
            name: Some("Cradle Exit".into()),
            move_type: Some("Exit".into()),
            start_position: Some("Cradle".into()),
            end_position: Some("Open".into()),
            difficulty: Some("Intermediate".into()),
            ..Default::default()
        }));
        let normal = Viewer::new(Some(Identity::new("n", None)), Tier::Normal);

        let criteria = FilterCriteria::default()
            .with_search("CRADLE")
            .with_type(MoveType::PositionChange)
            .with_positions(Some("Cradle"), Some("Open"))
            .with_difficulty(Difficulty::Intermediate);
        let result = visible_moves(&catalog, &normal, &FavoriteSet::new(), &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id.as_deref(), Some("x"));

        let criteria = criteria.with_positions(Some("Closed"), None);
        assert!(visible_moves(&catalog, &normal, &FavoriteSet::new(), &criteria).is_empty());
    }

    #[test]
    fn test_mine_only_matches_id_or_email_for_pro() {
        let catalog = vec![
            Move::from_raw(RawMoveRecord {
                id: Some("1".into()),
                name: Some("Mine by id".into()),
                uploader_id: Some("p".into()),
                ..Default::default()
            }),
            Move::from_raw(RawMoveRecord {
                id: Some("2".into()),
                name: Some("Mine by email".into()),
                created_by_email: Some("p@x.io".into()),
                ..Default::default()
            }),
            Move::from_raw(RawMoveRecord {
                id: Some("3".into()),
                name: Some("Someone else".into()),
                uploader_id: Some("q".into()),
                ..Default::default()
            }),
        ];

        let criteria = FilterCriteria::default().mine_only();
        let result = visible_moves(&catalog, &pro("p", "p@x.io"), &FavoriteSet::new(), &criteria);
        let ids: Vec<_> = result.iter().filter_map(|m| m.id.as_deref()).collect();
        assert_eq!(ids, vec!["1", "2"]);

        // Forced off for a Normal viewer: no ownership constraint
        let normal = Viewer::new(Some(Identity::new("p", None)), Tier::Normal);
        assert_eq!(visible_moves(&catalog, &normal, &FavoriteSet::new(), &criteria).len(), 3);
    }

    #[test]
    fn test_favorites_only() {
        let catalog = scenario_catalog();
        let mut favorites = FavoriteSet::new();
        favorites.toggle("a3");
        favorites.toggle("b1");

        let criteria = FilterCriteria::default().favorites_only();
        let result = visible_moves(&catalog, &pro("p", "p@x.io"), &favorites, &criteria);
        let ids: Vec<_> = result.iter().filter_map(|m| m.id.as_deref()).collect();
        assert_eq!(ids, vec!["b1", "a3"]);
    }

    #[test]
    fn test_moves_without_id_never_match_favorites() {
        let catalog = vec![Move::from_raw(RawMoveRecord {
            name: Some("Legacy".into()),
            difficulty: Some("Beginner".into()),
            ..Default::default()
        })];
        let criteria = FilterCriteria::default().favorites_only();
        assert!(visible_moves(&catalog, &pro("p", "p@x.io"), &FavoriteSet::new(), &criteria).is_empty());
    }

    #[test]
    fn test_empty_catalog_is_empty_result() {
        let result = visible_moves(&[], &Viewer::anonymous(), &FavoriteSet::new(), &FilterCriteria::default());
        assert!(result.is_empty());
    }
}
