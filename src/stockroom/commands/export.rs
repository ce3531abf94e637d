use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::inventory::Inventory;
use crate::report::compose_report;
use crate::store::{DataStore, Payload};
use chrono::NaiveDateTime;
use std::path::Path;

pub fn run<S: DataStore>(
    inventory: &Inventory,
    store: &mut S,
    path: &Path,
    timestamp: NaiveDateTime,
) -> Result<CmdResult> {
    let envelope = compose_report(inventory.records(), timestamp)?;
    store.save(path, &Payload::Envelope(&envelope))?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Inventory exported to: {}",
        path.display()
    )));
    result.add_message(CmdMessage::info(format!(
        "Export time: {}",
        envelope.updated_as_of
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::load;
    use crate::model::Record;
    use crate::store::memory::InMemoryStore;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap()
    }

    #[test]
    fn writes_envelope() {
        let inventory = Inventory::from_records(vec![
            Record::new("P1", "Wax A", "Coating & Wax", 5),
            Record::new("P2", "Pad B", "", 2),
        ]);
        let mut store = InMemoryStore::new();
        let path = PathBuf::from("reports/out.json");

        let result = run(&inventory, &mut store, &path, timestamp()).unwrap();
        assert_eq!(result.messages[1].content, "Export time: 2024-03-09 14:05:00");

        let value: serde_json::Value =
            serde_json::from_str(store.contents(&path).unwrap()).unwrap();
        assert_eq!(value["Inventory updated as of"], "2024-03-09 14:05:00");
        assert_eq!(value["summary"]["total_quantity"], 7);
        assert_eq!(value["summary"]["by_category_counts"]["Uncategorized"], 1);
        assert_eq!(value["inventory"][1]["quantity"], "2");
    }

    #[test]
    fn exported_file_loads_back() {
        let records = vec![Record::new("P1", "Wax A", "Pads", 5)];
        let inventory = Inventory::from_records(records.clone());
        let mut store = InMemoryStore::new();
        let path = PathBuf::from("out.json");
        run(&inventory, &mut store, &path, timestamp()).unwrap();

        let mut reloaded = Inventory::new();
        load::run(&mut reloaded, &mut store, &path).unwrap();
        assert_eq!(reloaded.records(), records.as_slice());
    }
}
