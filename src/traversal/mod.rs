//! Read-only queries over a diagram: witness extraction and model counting.

mod count_sat;
mod one_sat;

pub use count_sat::{count_sat, count_sat_or_support};
pub use one_sat::one_sat;
