//! Provider directory validation pipeline.
//!
//! Ingested provider records are scored field by field against the NPI
//! registry, aggregated into an overall confidence, classified into a
//! status, and routed to a review queue when automated validation could
//! not confirm correctness.

pub mod app;
pub mod common;
pub mod config;
pub mod domain;
pub mod email;
pub mod ingest;
pub mod observability;
pub mod pipeline;
pub mod registry;
pub mod storage;
