use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::inventory::Inventory;
use crate::store::{DataStore, Payload};
use std::path::Path;

pub fn run<S: DataStore>(inventory: &Inventory, store: &mut S, path: &Path) -> Result<CmdResult> {
    store.save(path, &Payload::Records(inventory.records()))?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Inventory saved to: {} ({} item(s)).",
        path.display(),
        inventory.len()
    )));
    Ok(result)
}
