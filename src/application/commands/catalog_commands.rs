// src/application/commands/catalog_commands.rs
//
// Catalog Command Handlers
//
// RULES:
// - Accept DTOs
// - Call services and pure domain filters
// - Return DTOs

use crate::application::{
    dto::*,
    error_handling::{ErrorResponse, ToErrorResponse},
    state::AppState,
};
use crate::domain::FilterCriteria;
use crate::services::LoadOutcome;

/// Cards visible to the current viewer under `filter`
pub fn get_catalog_view(state: &AppState, filter: CatalogFilterDto) -> CatalogViewDto {
    let viewer = state.viewer();
    let favorites = state.favorites_service.snapshot();
    let criteria = FilterCriteria::from(filter);

    let cards = state.catalog_service.with_moves(|moves| {
        state
            .visibility
            .visible_moves(moves, &viewer, &favorites, &criteria)
            .into_iter()
            .map(|m| MoveCardDto::from_move(m, &favorites, &viewer))
            .collect()
    });

    CatalogViewDto::new(cards, &viewer, state.catalog_service.load_error())
}

/// Reload the catalog; returns the number of moves now held
pub fn refresh_catalog(state: &AppState) -> Result<usize, ErrorResponse> {
    match state.catalog_service.refresh() {
        LoadOutcome::Applied { move_count } => Ok(move_count),
        LoadOutcome::Failed { message } => Err(ErrorResponse::lookup(message)),
        LoadOutcome::Discarded { .. } => Ok(state.catalog_service.with_moves(|m| m.len())),
    }
}

pub fn get_filter_options() -> FilterOptionsDto {
    FilterOptionsDto::build()
}

/// Flip a favorite; returns the new state
pub fn toggle_favorite(state: &AppState, move_id: String) -> Result<bool, ErrorResponse> {
    state.favorites_service.toggle(&move_id).to_error_response()
}
