//! # Stockroom Architecture
//!
//! Stockroom is a **UI-agnostic inventory catalog library**. The `stockroom`
//! binary is one client of it; a desktop form or a web handler would sit on the
//! same API.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts, formats output                │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the live Inventory and the DataStore                │
//! │  - Normalizes inputs (user text → RecordSelector)           │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per operation, returns CmdResult              │
//! │  - Built on Inventory (store), sort (engine), report        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DataStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Indexes
//!
//! Users address records by their 1-based position in the live store, or by
//! product number or name. Views are snapshots; single-record operations
//! resolve their target again right before mutating. See [`index`].
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr, never exits the
//! process and never prompts. Decisions that need a human (merging a duplicate
//! name, confirming a delete) are made by the caller and passed in.
//! Diagnostics go through `tracing`; the binary decides where they end up.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per operation
//! - [`inventory`]: The live catalog and its invariants
//! - [`sort`]: Stable ordering by a chosen key
//! - [`report`]: Export envelope and summary
//! - [`store`]: Persistence gateway and implementations
//! - [`model`]: `Record`, drafts, patches and sort keys
//! - [`index`]: Store indexes, snapshots and selectors
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod inventory;
pub mod model;
pub mod report;
pub mod sort;
pub mod store;
