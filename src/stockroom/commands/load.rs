use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::inventory::{from_json, Inventory};
use crate::store::DataStore;
use std::path::Path;

pub fn run<S: DataStore>(inventory: &mut Inventory, store: &mut S, path: &Path) -> Result<CmdResult> {
    let value = store.load(path)?;
    let loaded = from_json(value)?;
    inventory.replace_all(loaded.records);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Inventory loaded from: {}. {} item(s).",
        path.display(),
        inventory.len()
    )));
    if loaded.skipped > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} invalid item(s) were skipped during load.",
            loaded.skipped
        )));
    }
    for pn in inventory.duplicate_product_numbers() {
        result.add_message(CmdMessage::warning(format!(
            "Product number '{}' appears on more than one item.",
            pn
        )));
    }
    Ok(result)
}
