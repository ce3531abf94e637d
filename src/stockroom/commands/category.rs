use crate::commands::{CmdMessage, CmdResult};
use crate::inventory::Inventory;

/// Shows the records in one category.
pub fn filter(inventory: &Inventory, category: &str) -> CmdResult {
    let matches = inventory.filter_category(category);
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "Showing {} item(s) in category '{}'.",
        matches.len(),
        category.trim()
    )));
    result.with_listed_records(matches)
}

/// Lists the categories a user can pick from.
pub fn list(inventory: &Inventory) -> CmdResult {
    CmdResult::default().with_categories(inventory.categories())
}
