use super::ui;
use crate::core::ConversionRecord;
use crate::core::history::load_history;
use anyhow::Result;
use comfy_table::Cell;
use std::path::Path;

pub const EMPTY_HISTORY: &str = "Conversion history is empty.";

/// One-line summary shown after a conversion.
pub fn format_result(record: &ConversionRecord) -> String {
    let converted = format!("{:.2} {}", record.result(), record.target_code());
    format!(
        "Result: {} {} = {} {}",
        record.amount(),
        record.source_code(),
        ui::style_text(&converted, ui::StyleType::Result),
        ui::style_text(&format!("(rate: {:.4})", record.rate()), ui::StyleType::Subtle),
    )
}

pub fn display_as_table(records: &[ConversionRecord]) -> String {
    if records.is_empty() {
        return EMPTY_HISTORY.to_string();
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("#"),
        ui::header_cell("Time"),
        ui::header_cell("Amount"),
        ui::header_cell("From"),
        ui::header_cell("Result"),
        ui::header_cell("To"),
        ui::header_cell("Rate"),
    ]);

    for (i, record) in records.iter().enumerate() {
        table.add_row(vec![
            ui::number_cell((i + 1).to_string()),
            Cell::new(record.timestamp()),
            ui::number_cell(record.amount().to_string()),
            Cell::new(record.source_code()),
            ui::number_cell(format!("{:.2}", record.result())),
            Cell::new(record.target_code()),
            ui::number_cell(format!("{:.4}", record.rate())),
        ]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text("Conversion history", ui::StyleType::Title),
        table
    )
}

pub fn run(history_path: &Path) -> Result<()> {
    let records = load_history(history_path)?;
    println!("{}", display_as_table(&records));
    Ok(())
}
