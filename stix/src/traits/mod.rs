mod check;
mod is_empty;

pub use check::{Check, Compare};
pub use is_empty::IsEmpty;
