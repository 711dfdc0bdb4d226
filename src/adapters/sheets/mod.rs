//! Spreadsheet Backend - Remote Values API Adapter
//!
//! Talks to a spreadsheet-style values REST API: bearer auth from the
//! environment, a retrying reqwest client, a grid codec, and the
//! `StorageAdapter` implementation with worksheet probing and a
//! short-TTL read cache.

pub mod adapter;
pub mod auth;
pub mod client;
pub mod values;

pub use adapter::{RemoteTableAdapter, WORKSHEET_CANDIDATES};
pub use auth::SheetsAuth;
pub use client::{SheetsClient, SheetsClientConfig};
