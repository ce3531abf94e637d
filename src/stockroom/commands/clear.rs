use crate::commands::{CmdMessage, CmdResult};
use crate::inventory::Inventory;

pub fn run(inventory: &mut Inventory) -> CmdResult {
    if inventory.is_empty() {
        let mut res = CmdResult::default();
        res.add_message(CmdMessage::info("Inventory is already empty."));
        return res;
    }

    let removed = inventory.clear();
    let mut result = CmdResult::default().modified();
    result.add_message(CmdMessage::success(format!(
        "Cleared {} item(s) from inventory.",
        removed
    )));
    result
}
