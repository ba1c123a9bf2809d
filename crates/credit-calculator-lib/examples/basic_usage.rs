use credit_calculator_engine::format::{format_cost, format_number};
use credit_calculator_engine::prelude::*;
use std::env;

fn main() {
    let calculator = Calculator::default();

    // Entries as `id=volume[:frequency]`, e.g. `batch-pipeline=3:monthly`
    let args: Vec<String> = env::args().skip(1).collect();
    let entries: Vec<UsageEntry> = if args.is_empty() {
        println!("No entries given, using a sample workload.");
        vec![
            UsageEntry::new("batch-pipeline", 3.0, Frequency::Monthly),
            UsageEntry::new("profile-unification", 1.0, Frequency::Onetime),
            UsageEntry::new("batch-activation", 2.0, Frequency::Daily),
        ]
    } else {
        args.iter()
            .filter_map(|arg| {
                let (id, rest) = arg.split_once('=')?;
                let (volume, frequency) = rest.split_once(':').unwrap_or((rest, "onetime"));
                Some(UsageEntry::from_input(id, volume, frequency))
            })
            .collect()
    };

    println!();
    println!("=== Per-item credits ===");
    for entry in &entries {
        match calculator.item(entry.item_id()) {
            Some(item) => println!(
                "{:<32} {:>10} {:<8} -> {} credits",
                item.name(),
                format_number(entry.volume()),
                entry.frequency().label(),
                format_number(calculator.entry_units(entry))
            ),
            None => println!("{:<32} unknown item, skipped", entry.item_id()),
        }
    }

    let totals = calculator.aggregate(&entries);
    let symbol = calculator.config().pricing().currency_symbol();

    println!();
    println!("=== Totals ===");
    println!("Annual credits:  {}", format_number(totals.total_annual_units()));
    println!("Monthly credits: {}", format_number(totals.total_monthly_units()));
    println!("Daily credits:   {}", format_number(totals.total_daily_units()));
    println!("Estimated cost:  {}", format_cost(totals.estimated_cost(), symbol));

    println!();
    let snapshot = build_snapshot(&calculator, &entries);
    print!("{}", render_document(&snapshot, ReportFormat::Text));
}
