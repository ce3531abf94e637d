//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for catalog operations, whichever UI is driving them.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the live [`Inventory`] and the storage backend
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (e.g., turning user-typed selectors into [`RecordSelector`]s)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs` and [`crate::inventory`]
//! - **Prompting**: A merge or delete confirmation is decided by the caller and
//!   passed in
//! - **Presentation concerns**: Returns data structures, not strings
//!
//! ## Generic Over DataStore
//!
//! `StockApi<S: DataStore>` is generic over the storage backend:
//! - Production: `StockApi<FileStore>`
//! - Testing: `StockApi<InMemoryStore>`

use crate::commands::{self, config::ConfigAction, CmdResult, StockPaths};
use crate::error::Result;
use crate::index::{display_at, RecordSelector};
use crate::inventory::{Inventory, MergeDecision};
use crate::model::{Record, RecordDraft, RecordPatch, SortKey};
use crate::store::DataStore;
use chrono::Local;
use std::path::Path;

/// The main API facade for catalog operations.
pub struct StockApi<S: DataStore> {
    inventory: Inventory,
    store: S,
    paths: StockPaths,
}

impl<S: DataStore> StockApi<S> {
    /// Starts with an empty catalog; call [`StockApi::load`] to read the data file.
    pub fn new(store: S, paths: StockPaths) -> Self {
        Self {
            inventory: Inventory::new(),
            store,
            paths,
        }
    }

    pub fn add(&mut self, draft: &RecordDraft, on_duplicate: MergeDecision) -> Result<CmdResult> {
        commands::add::run(&mut self.inventory, draft, on_duplicate)
    }

    pub fn update_selected(&mut self, input: &str, patch: &RecordPatch) -> Result<CmdResult> {
        let selector = self.selector(input);
        commands::update::run(&mut self.inventory, &selector, patch)
    }

    pub fn delete_selected(&mut self, input: &str) -> Result<CmdResult> {
        let selector = self.selector(input);
        commands::delete::run(&mut self.inventory, &selector)
    }

    pub fn sort_by(&mut self, key: SortKey) -> Result<CmdResult> {
        Ok(commands::sort::run(&mut self.inventory, key))
    }

    pub fn filter_by_substring(&self, keyword: &str) -> Result<CmdResult> {
        Ok(commands::search::run(&self.inventory, keyword))
    }

    pub fn filter_by_category(&self, category: &str) -> Result<CmdResult> {
        Ok(commands::category::filter(&self.inventory, category))
    }

    pub fn categories(&self) -> Result<CmdResult> {
        Ok(commands::category::list(&self.inventory))
    }

    pub fn list(&self) -> Result<CmdResult> {
        Ok(commands::list::run(&self.inventory))
    }

    /// The first record with this name, in `affected_records`; empty if none.
    pub fn find_by_name(&self, name: &str) -> Result<CmdResult> {
        let found = self
            .inventory
            .find_by_name(name)
            .and_then(|position| display_at(self.inventory.records(), position));
        Ok(CmdResult::default().with_affected_records(found.into_iter().collect()))
    }

    /// Writes the catalog to the configured data file.
    pub fn save(&mut self) -> Result<CmdResult> {
        let path = self.store.data_file().to_path_buf();
        commands::save::run(&self.inventory, &mut self.store, &path)
    }

    /// Replaces the catalog with the data file's contents.
    pub fn load(&mut self) -> Result<CmdResult> {
        let path = self.store.data_file().to_path_buf();
        commands::load::run(&mut self.inventory, &mut self.store, &path)
    }

    pub fn export_to(&mut self, path: &Path) -> Result<CmdResult> {
        let now = Local::now().naive_local();
        commands::export::run(&self.inventory, &mut self.store, path, now)
    }

    pub fn clear_all(&mut self) -> Result<CmdResult> {
        Ok(commands::clear::run(&mut self.inventory))
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn records(&self) -> &[Record] {
        self.inventory.records()
    }

    /// Interprets user input against the live catalog.
    pub fn selector(&self, input: &str) -> RecordSelector {
        RecordSelector::parse(input, self.inventory.records())
    }

    pub fn data_file(&self) -> &Path {
        self.store.data_file()
    }

    pub fn paths(&self) -> &StockPaths {
        &self.paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, StockError};
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use std::env;

    fn paths() -> StockPaths {
        StockPaths {
            config_dir: env::temp_dir().join("stockroom_api_test_config"),
        }
    }

    fn api() -> StockApi<InMemoryStore> {
        StockApi::new(InMemoryStore::new(), paths())
    }

    fn draft(pn: &str, name: &str, category: &str, qty: &str) -> RecordDraft {
        RecordDraft::new(pn, name, category, qty)
    }

    #[test]
    fn add_then_merge_scenario() {
        let mut api = api();
        api.add(&draft("P1", "Wax A", "Coating & Wax", "5"), MergeDecision::Merge)
            .unwrap();
        let result = api
            .add(&draft("P7", "Wax A", "", "3"), MergeDecision::Merge)
            .unwrap();

        assert!(result.modified);
        assert_eq!(api.records(), &[Record::new("P1", "Wax A", "Coating & Wax", 8)]);
    }

    #[test]
    fn duplicate_product_number_scenario() {
        let mut api = api();
        api.add(&draft("P1", "Wax A", "", "5"), MergeDecision::Merge)
            .unwrap();
        let err = api
            .add(&draft("P1", "Pad B", "", "2"), MergeDecision::Merge)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(api.records().len(), 1);
    }

    #[test]
    fn sort_by_name_is_case_insensitive() {
        let mut api = api();
        api.add(&draft("P1", "Zeta", "", "1"), MergeDecision::Merge)
            .unwrap();
        api.add(&draft("P2", "alpha", "", "1"), MergeDecision::Merge)
            .unwrap();
        api.add(&draft("P3", "Beta", "", "1"), MergeDecision::Merge)
            .unwrap();

        let result = api.sort_by(SortKey::Name).unwrap();
        let names: Vec<&str> = result
            .listed_records
            .iter()
            .map(|d| d.record.name.as_str())
            .collect();
        assert_eq!(names, vec!["alpha", "Beta", "Zeta"]);
    }

    #[test]
    fn substring_filter_scenario() {
        let mut api = api();
        api.add(&draft("P1-A", "Wax", "", "1"), MergeDecision::Merge)
            .unwrap();
        api.add(&draft("Q2", "Cloth", "", "1"), MergeDecision::Merge)
            .unwrap();

        let result = api.filter_by_substring("p1").unwrap();
        assert_eq!(result.listed_records.len(), 1);
        assert_eq!(result.listed_records[0].record.product_number, "P1-A");
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut api = api();
        api.add(&draft("P2", "Pad B", "Pads", "2"), MergeDecision::Merge)
            .unwrap();
        api.add(&draft("P1", "Wax A", "", "0"), MergeDecision::Merge)
            .unwrap();
        let before = api.records().to_vec();

        api.save().unwrap();
        api.clear_all().unwrap();
        assert!(api.records().is_empty());
        api.load().unwrap();

        assert_eq!(api.records(), before.as_slice());
    }

    #[test]
    fn load_of_malformed_file_keeps_catalog() {
        let fixture = StoreFixture::new().with_raw("[{\"name\": ");
        let mut api = StockApi::new(fixture.store, paths());
        api.add(&draft("P1", "Wax A", "", "1"), MergeDecision::Merge)
            .unwrap();

        let err = api.load().unwrap_err();
        assert!(matches!(err, StockError::Serialization(_)));
        assert_eq!(api.records().len(), 1);
    }

    #[test]
    fn selectors_accept_index_product_number_or_name() {
        let fixture = StoreFixture::new().with_records(&[
            Record::new("P1", "Wax A", "", 1),
            Record::new("P2", "Pad B", "", 2),
            Record::new("P3", "Cloth", "", 3),
        ]);
        let mut api = StockApi::new(fixture.store, paths());
        api.load().unwrap();

        api.delete_selected("2").unwrap();
        api.delete_selected("P3").unwrap();
        let patch = RecordPatch {
            quantity: Some("9".into()),
            ..Default::default()
        };
        api.update_selected("wax a", &patch).unwrap();

        assert_eq!(api.records(), &[Record::new("P1", "Wax A", "", 9)]);
        assert!(api.delete_selected("Cloth").is_err());
    }

    #[test]
    fn find_by_name_reports_store_index() {
        let fixture = StoreFixture::new().with_records(&[
            Record::new("P1", "Wax A", "", 1),
            Record::new("P2", "Pad B", "", 2),
        ]);
        let mut api = StockApi::new(fixture.store, paths());
        api.load().unwrap();

        let found = api.find_by_name(" pad b").unwrap();
        assert_eq!(found.affected_records[0].index.number(), 2);
        assert!(api.find_by_name("Polish").unwrap().affected_records.is_empty());
    }

    #[test]
    fn export_writes_envelope_to_given_path() {
        let mut api = api();
        api.add(&draft("P1", "Wax A", "", "4"), MergeDecision::Merge)
            .unwrap();
        api.export_to(Path::new("report.json")).unwrap();

        let text = api.store.contents(Path::new("report.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(value["summary"]["total_items"], 1);
        assert!(value["Inventory updated as of"].is_string());
    }
}
