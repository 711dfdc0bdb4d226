//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces to implement
//! the tracker's core workflows. Each use case is a self-contained
//! business operation.
//!
//! Use cases:
//! - `RecordStore`: Upsert / delete / list over the storage port
//! - `AccessGate`: Shared-secret gate in front of the write operations

pub mod access_gate;
pub mod record_store;

pub use access_gate::AccessGate;
pub use record_store::{RecordStore, StoreError, UpsertOutcome};
