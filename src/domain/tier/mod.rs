pub mod entity;

pub use entity::{normalize_tier, Tier};
