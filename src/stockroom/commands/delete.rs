use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::{DisplayRecord, RecordSelector, StoreIndex};
use crate::inventory::Inventory;

pub fn run(inventory: &mut Inventory, selector: &RecordSelector) -> Result<CmdResult> {
    let position = selector.resolve(inventory.records())?;
    let index = StoreIndex::from_position(position);
    let removed = inventory.delete(position)?;

    let mut result = CmdResult::default().modified();
    result.add_message(CmdMessage::success(format!(
        "Item deleted ({}): {}",
        index, removed.name
    )));
    result.affected_records.push(DisplayRecord {
        record: removed,
        index,
    });
    Ok(result)
}
