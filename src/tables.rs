use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::Itertools;

use crate::record::{ComparisonRecord, RecordStatus};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

fn money_cell(value: Option<f64>) -> Cell {
    match value {
        Some(value) => Cell::new(format!("{value:+.2} $"))
            .set_alignment(CellAlignment::Right)
            .fg(if value < 0.0 { Color::Red } else { Color::Green }),
        None => Cell::new("n/a").set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
    }
}

fn rate_cell(value: Option<f64>) -> Cell {
    match value {
        Some(value) => Cell::new(format!("{value:.2}")).set_alignment(CellAlignment::Right),
        None => Cell::new("n/a").set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
    }
}

/// One summary row per account. Error records show their message and no
/// figures at all.
#[must_use]
pub fn build_batch_table(records: &[ComparisonRecord]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Account", "Status", "Annual savings", "%"]);
    for record in records {
        match &record.status {
            RecordStatus::Error(message) => {
                table.add_row(vec![
                    Cell::new(record.account.to_string()),
                    Cell::new("error").fg(Color::Red),
                    Cell::new(message.as_str()).fg(Color::Red),
                    Cell::new(""),
                ]);
            }
            status => {
                table.add_row(vec![
                    Cell::new(record.account.to_string()),
                    match status {
                        RecordStatus::Loading => Cell::new("loading").fg(Color::DarkYellow),
                        _ => Cell::new("ready").fg(Color::Green),
                    },
                    money_cell(record.savings.total_annual_savings),
                    match record.savings.total_annual_savings_percent {
                        Some(percent) => {
                            Cell::new(format!("{percent:.1}%")).set_alignment(CellAlignment::Right)
                        }
                        None => Cell::new("n/a").add_attribute(Attribute::Dim),
                    },
                ]);
            }
        }
    }
    table
}

/// The per-component detail for one `Ready` record: current vs proposed rate
/// and the component's savings figure.
#[must_use]
pub fn build_record_table(record: &ComparisonRecord) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Component", "Current", "Proposed", "Savings"]);

    let rows = [
        (
            "Peak rate",
            record.extracted.peak_rate,
            record.comparison.peak_rate,
            record.savings.peak_savings,
        ),
        (
            "Off-peak rate",
            record.extracted.off_peak_rate,
            record.comparison.off_peak_rate,
            record.savings.off_peak_savings,
        ),
        (
            "Shoulder rate",
            record.extracted.shoulder_rate,
            record.comparison.shoulder_rate,
            record.savings.shoulder_savings,
        ),
        (
            "Unit rate",
            record.extracted.unit_rate,
            record.comparison.unit_rate,
            record.savings.usage_savings,
        ),
        (
            "Daily supply",
            record.extracted.daily_supply,
            record.comparison.daily_supply,
            record.savings.supply_savings,
        ),
        (
            "Metering (annual)",
            record.extracted.metering_annual,
            record.comparison.metering_annual,
            record.savings.metering_savings,
        ),
        (
            "Demand rate",
            record.extracted.demand_rate,
            record.comparison.demand_rate,
            record.savings.demand_savings,
        ),
    ];
    for (label, current, proposed, savings) in rows {
        if current.is_none() && proposed.is_none() {
            continue;
        }
        table.add_row(vec![Cell::new(label), rate_cell(current), rate_cell(proposed), money_cell(savings)]);
    }

    table.add_row(vec![
        Cell::new("Total (annual)").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        money_cell(record.savings.total_annual_savings),
    ]);
    table
}

/// Lines for the `inspect` command: every resolved canonical field, with
/// "n/a" marking a source miss.
#[must_use]
pub fn describe_extracted(record: &ComparisonRecord) -> String {
    let extracted = &record.extracted;
    let fields = [
        ("peak_rate", extracted.peak_rate),
        ("off_peak_rate", extracted.off_peak_rate),
        ("shoulder_rate", extracted.shoulder_rate),
        ("monthly_usage", extracted.monthly_usage),
        ("peak_usage", extracted.peak_usage),
        ("off_peak_usage", extracted.off_peak_usage),
        ("shoulder_usage", extracted.shoulder_usage),
        ("demand_rate", extracted.demand_rate),
        ("demand_quantity", extracted.demand_quantity),
        ("daily_supply", extracted.daily_supply),
        ("metering_daily", extracted.metering_daily),
        ("metering_annual", extracted.metering_annual),
        ("unit_rate", extracted.unit_rate),
        ("usage_quantity", extracted.usage_quantity),
        ("estimated_annual_usage", extracted.estimated_annual_usage),
    ];
    fields
        .iter()
        .map(|(name, value)| match value {
            Some(value) => format!("{name} = {value}"),
            None => format!("{name} = n/a"),
        })
        .join("\n")
}
