//! UI utilities for terminal interaction
//!
//! This module provides the context selection prompt and the removal summary.

mod report;
mod select;

pub use report::{render_plan, summarize};
pub use select::{ContextSelector, InteractiveSelector, NamedSelector, Selection};
