use crate::commands::{CmdMessage, CmdResult};
use crate::inventory::Inventory;

pub fn run(inventory: &Inventory, keyword: &str) -> CmdResult {
    let matches = inventory.filter_substring(keyword);
    let keyword = keyword.trim();

    let mut result = CmdResult::default();
    if !keyword.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "Found {} item(s) matching '{}'.",
            matches.len(),
            keyword
        )));
    }
    result.with_listed_records(matches)
}
