use super::entity::NewMove;
use crate::domain::{DomainError, DomainResult};

/// Validates a move before it is handed to the catalog collaborator
pub fn validate_new_move(new_move: &NewMove) -> DomainResult<()> {
    if new_move.name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Move name cannot be empty".to_string(),
        ));
    }

    if new_move.media_url.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Move needs a media reference".to_string(),
        ));
    }

    Ok(())
}

/// Invariants for catalog moves:
///
/// 1. Type is always one of the fixed MoveType values once loaded
/// 2. Name cannot be empty on write
/// 3. Every written move carries a media reference
/// 4. Moves are never mutated in place after load

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::moves::MoveType;

    fn sample() -> NewMove {
        NewMove {
            name: "Sweetheart Exit".to_string(),
            move_type: MoveType::PositionChange,
            start_position: Some("Sweetheart".to_string()),
            end_position: Some("Open".to_string()),
            difficulty: None,
            comment: None,
            media_url: "https://cdn/a.mp4".to_string(),
            uploader_id: Some("u".to_string()),
            uploader_email: None,
            is_private: false,
        }
    }

    #[test]
    fn test_valid_move() {
        assert!(validate_new_move(&sample()).is_ok());
    }

    #[test]
    fn test_blank_name_fails() {
        let mut mv = sample();
        mv.name = "  ".to_string();
        assert!(validate_new_move(&mv).is_err());
    }

    #[test]
    fn test_missing_media_fails() {
        let mut mv = sample();
        mv.media_url = String::new();
        assert!(validate_new_move(&mv).is_err());
    }
}
