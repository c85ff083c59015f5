//! Standalone tools shipped alongside the planning flow
//!
//! Neither tool participates in the planning pipeline: the calculator is a
//! restricted arithmetic evaluator, the search tool a thin web-search
//! wrapper with the same missing-key fallback behavior as the price
//! adapters.

pub mod calculator;
pub mod search;

pub use calculator::{calculate, safe_eval};
pub use search::SearchTool;
