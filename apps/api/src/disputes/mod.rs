//! Dispute items: the per-session working set of accounts a user has flagged
//! for dispute, with durable snapshot persistence.

pub mod models;
pub mod registry;
pub mod snapshot;
