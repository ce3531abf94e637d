use colored::Colorize;
use stockroom::commands::{CmdMessage, MessageLevel};
use stockroom::config::StockConfig;
use stockroom::index::DisplayRecord;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NAME_WIDTH: usize = 32;
const CATEGORY_WIDTH: usize = 16;
const PRODUCT_WIDTH: usize = 14;
const HEADERS: [&str; 5] = ["#", "Product", "Name", "Category", "Qty"];

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_records(records: &[DisplayRecord]) {
    if records.is_empty() {
        println!("No items found.");
        return;
    }
    for line in render_table(records) {
        println!("{}", line);
    }
}

pub(super) fn print_categories(categories: &[String]) {
    for category in categories {
        println!("  {}", category);
    }
}

pub(super) fn print_config(config: &StockConfig) {
    for key in StockConfig::KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}

/// Plain-text rows: a header, then one row per record, columns padded by display width.
fn render_table(records: &[DisplayRecord]) -> Vec<String> {
    let rows: Vec<[String; 5]> = records
        .iter()
        .map(|dr| {
            [
                format!("{}.", dr.index),
                truncate_to_width(&dr.record.product_number, PRODUCT_WIDTH),
                truncate_to_width(&dr.record.name, NAME_WIDTH),
                truncate_to_width(&dr.record.category, CATEGORY_WIDTH),
                dr.record.quantity.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.width());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let header = HEADERS.map(String::from);
    std::iter::once(&header)
        .chain(rows.iter())
        .map(|row| {
            let cells: Vec<String> = row
                .iter()
                .zip(widths)
                .enumerate()
                .map(|(col, (cell, width))| {
                    let pad = " ".repeat(width.saturating_sub(cell.width()));
                    // index and quantity are right-aligned
                    if col == 0 || col == 4 {
                        format!("{}{}", pad, cell)
                    } else {
                        format!("{}{}", cell, pad)
                    }
                })
                .collect();
            cells.join("  ").trim_end().to_string()
        })
        .collect()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom::index::index_records;
    use stockroom::model::Record;

    #[test]
    fn columns_line_up_by_display_width() {
        let records = vec![
            Record::new("P1", "Wax A", "Pads", 5),
            Record::new("P-200", "Ceramic 鍍膜", "Coating & Wax", 120),
        ];
        let lines = render_table(&index_records(&records, |_| true));

        assert_eq!(lines.len(), 3);
        let qty_end: Vec<usize> = lines.iter().map(|l| l.width()).collect();
        assert!(qty_end.iter().all(|w| *w == qty_end[0]));
        assert!(lines[1].starts_with("1.  P1"));
    }

    #[test]
    fn long_names_are_truncated() {
        let long = "x".repeat(50);
        let out = truncate_to_width(&long, 10);
        assert_eq!(out.width(), 10);
        assert!(out.ends_with('…'));
        assert_eq!(truncate_to_width("short", 10), "short");
    }
}
