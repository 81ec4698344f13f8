//! JOIN operator implementations.

mod nested;
mod outer;

pub use nested::{cross_join, inner_join};
pub use outer::{left_outer_join, unmatched_left};
