//! # Storage Layer
//!
//! This module defines the persistence gateway for the catalog. The
//! [`DataStore`] trait lets the application work against different backends.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production storage on disk
//!   - The catalog lives in a single JSON file (2-space indented)
//!   - Writes go to a hidden temp file next to the target and are renamed
//!     over it, so an interrupted save never leaves a half-written catalog
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - Keeps the serialized text per path
//!   - Fast, isolated test execution
//!
//! ## Payloads
//!
//! A file holds one of two shapes, see [`Payload`]. Loading hands back the
//! parsed JSON untouched; deciding whether it is usable is the caller's job
//! (see [`crate::inventory::from_json`]).
//!
//! A file that does not exist yet is not an error: loading it creates it with
//! an empty list so later loads see the same thing.

use crate::error::Result;
use crate::model::Record;
use crate::report::ExportEnvelope;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

pub mod fs;
pub mod memory;

/// Contents of the empty catalog file.
pub const EMPTY_CATALOG: &str = "[]";

/// What gets written to a catalog file.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Payload<'a> {
    Records(&'a [Record]),
    Envelope(&'a ExportEnvelope),
}

/// Abstract interface for catalog persistence.
pub trait DataStore {
    /// The catalog file used when no explicit path is given.
    fn data_file(&self) -> &Path;

    /// Write `payload` to `path`, replacing whatever was there.
    fn save(&mut self, path: &Path, payload: &Payload<'_>) -> Result<()>;

    /// Read and parse `path`, creating it as an empty list if missing.
    fn load(&mut self, path: &Path) -> Result<Value>;
}

pub(crate) fn render(payload: &Payload<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(payload)?)
}
