use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::{display_at, StoreIndex};
use crate::inventory::{AddOutcome, Inventory, MergeDecision};
use crate::model::RecordDraft;

pub fn run(
    inventory: &mut Inventory,
    draft: &RecordDraft,
    on_duplicate: MergeDecision,
) -> Result<CmdResult> {
    let outcome = inventory.add(draft, on_duplicate)?;

    let position = match outcome {
        AddOutcome::Cancelled => {
            let mut res = CmdResult::default();
            res.add_message(CmdMessage::info("Add operation cancelled."));
            return Ok(res);
        }
        AddOutcome::Added(position) | AddOutcome::Merged { position, .. } => position,
    };

    let affected = display_at(inventory.records(), position);
    let mut result = CmdResult::default()
        .with_affected_records(affected.into_iter().collect())
        .modified();

    let name = draft.name.trim();
    match outcome {
        AddOutcome::Merged { quantity, .. } => result.add_message(CmdMessage::success(format!(
            "Added {} to existing '{}' (now {})",
            draft.quantity.trim(),
            name,
            quantity
        ))),
        _ => result.add_message(CmdMessage::success(format!(
            "Item added ({}): {}",
            StoreIndex::from_position(position),
            name
        ))),
    }
    Ok(result)
}
