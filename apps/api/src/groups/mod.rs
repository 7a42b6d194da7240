//! Account grouping: the canonical per-client partition of bureau-reported
//! accounts into named buckets, plus its persistence and HTTP surface.

pub mod handlers;
pub mod models;
pub mod repository;
pub mod store;
