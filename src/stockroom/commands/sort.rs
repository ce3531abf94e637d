use crate::commands::{CmdMessage, CmdResult};
use crate::inventory::Inventory;
use crate::model::SortKey;

pub fn run(inventory: &mut Inventory, key: SortKey) -> CmdResult {
    let stats = inventory.order_by(key);

    let mut result = CmdResult::default().with_listed_records(inventory.snapshot());
    if stats.swaps > 0 {
        result.modified = true;
        result.add_message(CmdMessage::success(format!(
            "Sorted {} item(s) by {}.",
            inventory.len(),
            key
        )));
    } else {
        result.add_message(CmdMessage::info(format!("Already sorted by {}.", key)));
    }
    result
}
