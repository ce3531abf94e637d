use crate::commands::CmdResult;
use crate::inventory::Inventory;

pub fn run(inventory: &Inventory) -> CmdResult {
    CmdResult::default().with_listed_records(inventory.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    #[test]
    fn lists_in_store_order() {
        let inventory = Inventory::from_records(vec![
            Record::new("P2", "b", "", 1),
            Record::new("P1", "a", "", 1),
        ]);
        let result = run(&inventory);
        assert_eq!(result.listed_records.len(), 2);
        assert_eq!(result.listed_records[0].record.product_number, "P2");
        assert_eq!(result.listed_records[1].index.number(), 2);
    }
}
