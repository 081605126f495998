pub mod criteria;
pub mod filter;

pub use criteria::{FilterCriteria, ALL_OPTION};
pub use filter::{visible_moves, VisibilityRules, BASIC_MAX_MOVES};
