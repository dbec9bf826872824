//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` and wraps the
//! concrete external dependencies (HTTP client, filesystem notifications,
//! drop-folder I/O). Each sub-module groups adapters by infrastructure
//! concern.
//!
//! Adapter categories:
//! - `api`: VPS trading-bot REST API client
//! - `fs`: MT5 drop-folder layout, atomic writes, change notifications

pub mod api;
pub mod fs;
