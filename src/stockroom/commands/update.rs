use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::{display_at, RecordSelector, StoreIndex};
use crate::inventory::Inventory;
use crate::model::RecordPatch;

pub fn run(
    inventory: &mut Inventory,
    selector: &RecordSelector,
    patch: &RecordPatch,
) -> Result<CmdResult> {
    let position = selector.resolve(inventory.records())?;

    if patch.is_empty() {
        let mut res = CmdResult::default();
        res.add_message(CmdMessage::info("Nothing to update."));
        return Ok(res);
    }

    let name = inventory.update(position, patch)?.name.clone();
    let mut result = CmdResult::default()
        .with_affected_records(display_at(inventory.records(), position).into_iter().collect())
        .modified();
    result.add_message(CmdMessage::success(format!(
        "Item updated ({}): {}",
        StoreIndex::from_position(position),
        name
    )));
    Ok(result)
}
