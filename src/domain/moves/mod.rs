pub mod entity;
pub mod invariants;

pub use entity::{Difficulty, Move, MoveType, NewMove, RawMoveRecord, Uploader, POSITIONS};
pub use invariants::validate_new_move;
