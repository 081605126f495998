// src/application/commands/move_commands.rs
//
// Contribution Command Handlers
//
// RULES:
// - Always act as the current viewer
// - Reload the catalog after every successful write

use crate::application::{
    dto::*,
    error_handling::{ErrorResponse, ToErrorResponse},
    state::AppState,
};
use crate::domain::Move;

fn existing_move(state: &AppState, move_id: &str) -> Result<Move, ErrorResponse> {
    state
        .catalog_service
        .find_move(move_id)
        .ok_or_else(|| ErrorResponse::not_found("Move"))
}

fn reload(state: &AppState) {
    // A failed reload surfaces through the catalog view's load error
    state.catalog_service.refresh();
}

pub fn upload_file_move(
    state: &AppState,
    dto: UploadFileDto,
) -> Result<UploadResultDto, ErrorResponse> {
    let outcome = state
        .upload_service
        .upload_file_move(&state.viewer(), dto.into())
        .to_error_response()?;

    reload(state);
    Ok(outcome.into())
}

pub async fn submit_embed_move(
    state: &AppState,
    dto: EmbedMoveDto,
) -> Result<UploadResultDto, ErrorResponse> {
    let outcome = state
        .upload_service
        .submit_embed_move(&state.viewer(), dto.into())
        .await
        .to_error_response()?;

    reload(state);
    Ok(outcome.into())
}

pub fn update_move(
    state: &AppState,
    move_id: String,
    details: MoveDetailsDto,
) -> Result<(), ErrorResponse> {
    let existing = existing_move(state, &move_id)?;
    state
        .upload_service
        .update_move(&state.viewer(), &existing, details.into())
        .to_error_response()?;

    reload(state);
    Ok(())
}

/// Re-cut an embedded move; returns the new embed URL
pub async fn update_embed_move(
    state: &AppState,
    move_id: String,
    dto: EmbedEditDto,
) -> Result<String, ErrorResponse> {
    let existing = existing_move(state, &move_id)?;
    let media_url = state
        .upload_service
        .update_embed_move(&state.viewer(), &existing, dto.into())
        .await
        .to_error_response()?;

    reload(state);
    Ok(media_url)
}

pub fn delete_move(state: &AppState, move_id: String) -> Result<(), ErrorResponse> {
    let existing = existing_move(state, &move_id)?;
    state
        .upload_service
        .delete_move(&state.viewer(), &existing)
        .to_error_response()?;

    reload(state);
    Ok(())
}

/// Form defaults for re-editing a move stored as an embed clip
pub fn get_embed_defaults(
    state: &AppState,
    move_id: String,
) -> Result<Option<EmbedDefaultsDto>, ErrorResponse> {
    let existing = existing_move(state, &move_id)?;
    Ok(existing
        .media_url
        .as_deref()
        .and_then(|url| state.clip_service.edit_defaults(url))
        .map(EmbedDefaultsDto::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::get_catalog_view;
    use crate::application::state::test_support::*;
    use crate::application::ErrorType;
    use crate::domain::Identity;
    use crate::integrations::auth::MockAuthProvider;
    use serde_json::json;

    fn pro_auth() -> MockAuthProvider {
        let mut auth = MockAuthProvider::new();
        auth.expect_current_session().returning(|| {
            Ok(Some(
                Identity::new("p1", Some("pro@x.io".to_string()))
                    .with_user_metadata(json!({ "plan": "premium" })),
            ))
        });
        auth
    }

    fn details(name: &str) -> MoveDetailsDto {
        MoveDetailsDto {
            name: name.to_string(),
            move_type: "Combo".to_string(),
            difficulty: "Beginner".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_upload_edit_delete_cycle() {
        let state = state_with(memory_pool(), pro_auth()).await;

        let result = upload_file_move(
            &state,
            UploadFileDto {
                details: details("Spin"),
                file_name: "spin.mp4".to_string(),
                bytes: vec![1, 2, 3],
                rights_confirmed: true,
            },
        )
        .unwrap();
        assert_eq!(result.message, "Upload successful!");
        assert!(result.media_url.starts_with("https://cdn.example.com/"));
        assert!(result.media_url.ends_with("_spin.mp4"));

        let view = get_catalog_view(&state, CatalogFilterDto::default());
        assert_eq!(view.cards.len(), 1);
        assert!(view.cards[0].can_edit);
        assert_eq!(view.cards[0].uploader_label, "pro@x.io");

        update_move(&state, result.move_id.clone(), details("Double Spin")).unwrap();
        let view = get_catalog_view(&state, CatalogFilterDto::default());
        assert_eq!(view.cards[0].name, "Double Spin");
        assert_eq!(view.cards[0].media_url.as_deref(), Some(result.media_url.as_str()));

        delete_move(&state, result.move_id.clone()).unwrap();
        assert!(get_catalog_view(&state, CatalogFilterDto::default()).cards.is_empty());

        let err = delete_move(&state, result.move_id).unwrap_err();
        assert_eq!(err.error_type, ErrorType::NotFound);
    }

    #[tokio::test]
    async fn test_embed_submission_and_edit_defaults() {
        let state = state_with(memory_pool(), pro_auth()).await;

        let result = submit_embed_move(
            &state,
            EmbedMoveDto {
                details: details("Cradle Combo"),
                video_url: "https://youtu.be/abc123?t=90".to_string(),
                start_seconds: None,
                clip_length: "10".to_string(),
                rights_confirmed: true,
            },
        )
        .await
        .unwrap();
        assert_eq!(
            result.media_url,
            "https://www.youtube.com/embed/abc123?rel=0&start=90&end=100"
        );

        let defaults = get_embed_defaults(&state, result.move_id).unwrap().unwrap();
        assert_eq!(defaults.clip_length, 10);
        assert!(defaults.video_url.contains("abc123"));
    }

    #[tokio::test]
    async fn test_embed_edit_moves_the_window() {
        let state = state_with(memory_pool(), pro_auth()).await;

        let created = submit_embed_move(
            &state,
            EmbedMoveDto {
                details: details("Cradle Combo"),
                video_url: "https://youtu.be/abc123?t=30".to_string(),
                start_seconds: None,
                clip_length: "7".to_string(),
                rights_confirmed: true,
            },
        )
        .await
        .unwrap();
        assert!(created.media_url.ends_with("start=30&end=37"));

        let defaults = get_embed_defaults(&state, created.move_id.clone()).unwrap().unwrap();
        let media_url = update_embed_move(
            &state,
            created.move_id.clone(),
            EmbedEditDto {
                details: details("Cradle Combo II"),
                video_url: defaults.video_url,
                start_seconds: Some(40),
                clip_length: "5".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(media_url, "https://www.youtube.com/embed/abc123?rel=0&start=40&end=45");

        let view = get_catalog_view(&state, CatalogFilterDto::default());
        assert_eq!(view.cards.len(), 1);
        assert_eq!(view.cards[0].name, "Cradle Combo II");
        assert!(view.cards[0]
            .media_url
            .as_deref()
            .is_some_and(|url| url.ends_with("start=40&end=45")));

        let defaults = get_embed_defaults(&state, created.move_id).unwrap().unwrap();
        assert_eq!(defaults.clip_length, 5);
    }

    #[tokio::test]
    async fn test_embed_validation_message() {
        let state = state_with(memory_pool(), pro_auth()).await;

        let err = submit_embed_move(
            &state,
            EmbedMoveDto {
                details: details("No Start"),
                video_url: "https://www.youtube.com/watch?v=abc123".to_string(),
                start_seconds: None,
                clip_length: "10".to_string(),
                rights_confirmed: true,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.error_type, ErrorType::Validation);
    }

    #[tokio::test]
    async fn test_signed_out_upload_is_rejected() {
        let state = state_with(memory_pool(), signed_out()).await;

        let err = upload_file_move(
            &state,
            UploadFileDto {
                details: details("Spin"),
                file_name: "spin.mp4".to_string(),
                bytes: vec![1],
                rights_confirmed: true,
            },
        )
        .unwrap_err();
        assert_eq!(err.error_type, ErrorType::Unauthorized);
        assert_eq!(err.message, "You must login to upload.");
    }
}
