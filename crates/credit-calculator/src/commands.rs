//! Non-interactive subcommands.

use anyhow::{bail, Context, Result};
use credit_calculator_engine::format::{format_cost, format_number, format_plain};
use credit_calculator_engine::prelude::*;
use credit_calculator_engine::{trigger_export, ExportTarget, FileTarget, WriterTarget};
use std::io::{self, Write};
use std::path::PathBuf;

/// Parses `<id>=<volume>[:<frequency>]`. Volume and frequency are as
/// forgiving as the interactive inputs: garbage volumes count as zero and
/// unknown frequencies as one-time.
pub fn parse_entry_arg(raw: &str) -> Result<UsageEntry> {
    let Some((id, rest)) = raw.split_once('=') else {
        bail!(
            "Invalid entry '{}': expected <id>=<volume>[:<frequency>]",
            raw
        );
    };

    let id = id.trim();
    if id.is_empty() {
        bail!("Invalid entry '{}': missing item id", raw);
    }

    let (volume, frequency) = rest
        .split_once(':')
        .unwrap_or((rest, Frequency::default().key()));

    Ok(UsageEntry::from_input(id, volume, frequency))
}

pub fn print_catalog<W: Write>(calculator: &Calculator, out: &mut W) -> Result<()> {
    let config = calculator.config();
    let unit_label = config.report().unit_label();

    for section in config.catalog().sections() {
        writeln!(out, "{}", section.title())?;
        for item in section.items() {
            writeln!(
                out,
                "  {:<22} {:<30} {:>9} {} per {}",
                item.id(),
                item.name(),
                format_plain(item.unit_multiplier()),
                unit_label,
                item.unit()
            )?;
        }
        writeln!(out)?;
    }

    let pricing = config.pricing();
    writeln!(
        out,
        "Pricing: {} per {} {}",
        format_cost(pricing.cost_per_package(), pricing.currency_symbol()),
        format_number(pricing.units_per_package()),
        unit_label
    )?;
    Ok(())
}

/// Stdout unless an output path is given.
pub fn report_target(output: Option<PathBuf>) -> Box<dyn ExportTarget> {
    match output {
        Some(path) => Box::new(FileTarget::new(path)),
        None => Box::new(WriterTarget::new(io::stdout().lock(), "stdout")),
    }
}

pub fn run_report(
    calculator: &Calculator,
    raw_entries: &[String],
    format: ReportFormat,
    target: &mut dyn ExportTarget,
) -> Result<()> {
    let entries = raw_entries
        .iter()
        .map(|raw| parse_entry_arg(raw))
        .collect::<Result<Vec<_>>>()?;

    for entry in &entries {
        if calculator.item(entry.item_id()).is_none() {
            tracing::warn!(item_id = entry.item_id(), "unknown catalog item, ignoring entry");
        }
    }

    let snapshot = build_snapshot(calculator, &entries);
    tracing::debug!(
        lines = snapshot.lines().len(),
        annual = snapshot.totals().total_annual_units(),
        "built report snapshot"
    );

    let document = render_document(&snapshot, format);
    trigger_export(&document, target)
        .with_context(|| format!("Failed to export report to {}", target.describe()))
}
