//! Point-in-time report snapshots.

use crate::calculator::{per_item, Calculator};
use crate::data_structures::{AggregateTotals, CalculationResult, Frequency, UsageEntry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One contributing entry, resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLine {
    item_id: String,
    name: String,
    description: String,
    volume: f64,
    unit: String,
    frequency: Frequency,
    multiplier: f64,
    total_units: f64,
    result: CalculationResult,
}

impl ReportLine {
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Annualized credits for this entry.
    pub fn total_units(&self) -> f64 {
        self.total_units
    }

    pub fn result(&self) -> &CalculationResult {
        &self.result
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSnapshot {
    title: String,
    generated_at: DateTime<Utc>,
    unit_label: String,
    currency_symbol: String,
    footer: Vec<String>,
    lines: Vec<ReportLine>,
    totals: AggregateTotals,
}

impl ReportSnapshot {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn unit_label(&self) -> &str {
        &self.unit_label
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn footer(&self) -> &[String] {
        &self.footer
    }

    /// Contributing entries in catalog order.
    pub fn lines(&self) -> &[ReportLine] {
        &self.lines
    }

    pub fn totals(&self) -> &AggregateTotals {
        &self.totals
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Captures every entry with a positive volume, stamped with the current time.
pub fn build_snapshot(calculator: &Calculator, entries: &[UsageEntry]) -> ReportSnapshot {
    build_snapshot_at(calculator, entries, Utc::now())
}

pub fn build_snapshot_at(
    calculator: &Calculator,
    entries: &[UsageEntry],
    generated_at: DateTime<Utc>,
) -> ReportSnapshot {
    let catalog = calculator.config().catalog();

    let mut contributing: Vec<(usize, &UsageEntry)> = entries
        .iter()
        .filter(|entry| entry.has_volume())
        .filter_map(|entry| {
            catalog
                .position(entry.item_id())
                .map(|position| (position, entry))
        })
        .collect();
    // stable: entries for the same item keep their input order
    contributing.sort_by_key(|(position, _)| *position);

    let lines: Vec<ReportLine> = contributing
        .into_iter()
        .filter_map(|(_, entry)| {
            let item = catalog.get(entry.item_id())?;
            let result = calculator.calculate(entry)?;
            Some(ReportLine {
                item_id: item.id().to_string(),
                name: item.name().to_string(),
                description: item.description().to_string(),
                volume: entry.volume(),
                unit: item.unit().to_string(),
                frequency: entry.frequency(),
                multiplier: item.unit_multiplier(),
                total_units: per_item(entry.volume(), item.unit_multiplier(), entry.frequency()),
                result,
            })
        })
        .collect();

    let results: Vec<CalculationResult> = lines.iter().map(|line| line.result.clone()).collect();
    let totals = calculator.aggregate_results(&results);

    let config = calculator.config();
    ReportSnapshot {
        title: config.report().title().to_string(),
        generated_at,
        unit_label: config.report().unit_label().to_string(),
        currency_symbol: config.pricing().currency_symbol().to_string(),
        footer: config.report().footer().to_vec(),
        lines,
        totals,
    }
}
