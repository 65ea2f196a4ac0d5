pub mod ordering;

pub use ordering::{compare_null_safe, pattern_precedence};
