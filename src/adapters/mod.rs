//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (HTTP clients, SQLite, in-process state) and
//! hosts the driving HTTP surface. Each sub-module groups adapters by
//! infrastructure concern.
//!
//! Adapter categories:
//! - `sheets`: Remote spreadsheet values API backend
//! - `memory`: Ephemeral in-process backend (session-scoped)
//! - `sqlite`: Local relational backend with row-level writes
//! - `fallback`: Prioritized chain composing the backends above
//! - `metrics`: Prometheus metrics registry
//! - `web`: Axum dashboard API, probes, and metrics exposition

pub mod fallback;
pub mod memory;
pub mod metrics;
pub mod sheets;
pub mod sqlite;
pub mod web;
