//! Credit report normalization: pure mapping from the three differently
//! shaped bureau payloads into row-oriented structures for display and for
//! seeding the grouping logic.

pub mod handlers;
pub mod models;
pub mod transform;
