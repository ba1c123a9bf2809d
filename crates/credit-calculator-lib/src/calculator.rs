use crate::config::CalculatorConfig;
use crate::data_structures::{
    AggregateTotals, CalculationResult, CatalogItem, Frequency, UsageEntry,
};

/// Credits consumed by `volume` at the given frequency over a year.
///
/// Missing, NaN, infinite, zero and negative volumes all count as zero, as
/// does a product too large to represent.
pub fn per_item(volume: f64, unit_multiplier: f64, frequency: Frequency) -> f64 {
    if !volume.is_finite() || volume <= 0.0 {
        return 0.0;
    }
    let units = volume * unit_multiplier * frequency.annualization_factor();
    if units.is_finite() {
        units
    } else {
        0.0
    }
}

/// Same as [`per_item`], taking the raw frequency selector key.
pub fn per_item_with_key(volume: f64, unit_multiplier: f64, frequency_key: &str) -> f64 {
    per_item(volume, unit_multiplier, Frequency::from_key(frequency_key))
}

/// Splits one entry into annual, monthly and daily buckets.
///
/// Monthly and daily figures are fractions of the annualized amount
/// (`/12`, `/365`, `/30`), not calendar-exact rates. Weekly usage is spread
/// like daily usage and one-time usage only lands in the annual bucket.
pub fn distribute(
    item_id: &str,
    volume: f64,
    unit_multiplier: f64,
    frequency: Frequency,
) -> CalculationResult {
    let annual = per_item(volume, unit_multiplier, frequency);
    let per_occurrence = per_item(volume, unit_multiplier, Frequency::Onetime);

    let (monthly, daily) = match frequency {
        Frequency::Onetime => (0.0, 0.0),
        Frequency::Daily | Frequency::Weekly => (annual / 12.0, annual / 365.0),
        Frequency::Monthly => (per_occurrence, annual / 30.0),
    };

    CalculationResult::new(item_id, per_occurrence, annual, monthly, daily)
}

/// Stateless calculation engine bound to an immutable configuration.
#[derive(Debug, Clone)]
pub struct Calculator {
    config: CalculatorConfig,
}

impl Calculator {
    pub fn new(config: CalculatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn item(&self, item_id: &str) -> Option<&CatalogItem> {
        self.config.catalog().get(item_id)
    }

    /// Bucket contributions of one entry, or `None` when its item is not in
    /// the catalog.
    pub fn calculate(&self, entry: &UsageEntry) -> Option<CalculationResult> {
        let item = self.item(entry.item_id())?;
        Some(distribute(
            item.id(),
            entry.volume(),
            item.unit_multiplier(),
            entry.frequency(),
        ))
    }

    /// Annualized credits for one entry, zero for unknown items.
    pub fn entry_units(&self, entry: &UsageEntry) -> f64 {
        self.item(entry.item_id())
            .map(|item| per_item(entry.volume(), item.unit_multiplier(), entry.frequency()))
            .unwrap_or(0.0)
    }

    /// Results for every known entry, in input order.
    pub fn results(&self, entries: &[UsageEntry]) -> Vec<CalculationResult> {
        entries
            .iter()
            .filter_map(|entry| {
                let result = self.calculate(entry);
                if result.is_none() {
                    tracing::debug!(item_id = entry.item_id(), "skipping entry for unknown item");
                }
                result
            })
            .collect()
    }

    pub fn aggregate(&self, entries: &[UsageEntry]) -> AggregateTotals {
        self.aggregate_results(&self.results(entries))
    }

    /// Sums results in catalog order so the totals do not depend on the
    /// order the entries were given in.
    pub fn aggregate_results(&self, results: &[CalculationResult]) -> AggregateTotals {
        let catalog = self.config.catalog();
        let mut ordered: Vec<&CalculationResult> = results.iter().collect();
        // duplicates of one item are ordered by value, unknown ids go last
        ordered.sort_by(|a, b| {
            let position = |r: &CalculationResult| catalog.position(r.item_id()).unwrap_or(usize::MAX);
            position(a)
                .cmp(&position(b))
                .then_with(|| a.item_id().cmp(b.item_id()))
                .then_with(|| a.annual_units().total_cmp(&b.annual_units()))
                .then_with(|| a.monthly_units().total_cmp(&b.monthly_units()))
                .then_with(|| a.daily_units().total_cmp(&b.daily_units()))
        });

        let mut totals = AggregateTotals::new();
        for result in ordered {
            totals.add_result(result);
        }
        totals.set_estimated_cost(
            self.config
                .pricing()
                .estimate_cost(totals.total_annual_units()),
        );
        totals
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(CalculatorConfig::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_invalid_volume_yields_zero() {
        for volume in [0.0, -1.0, -0.0001, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            for frequency in Frequency::ALL {
                assert_eq!(per_item(volume, 2000.0, frequency), 0.0);
            }
        }
    }

    #[test]
    fn test_overflowing_product_yields_zero() {
        assert_eq!(per_item(1e305, 100_000.0, Frequency::Daily), 0.0);
        let result = distribute("x", 1e305, 100_000.0, Frequency::Monthly);
        assert_eq!(result.annual_units(), 0.0);
        assert_eq!(result.monthly_units(), 0.0);
    }

    #[test]
    fn test_per_item_by_frequency() {
        assert_eq!(per_item(3.0, 2000.0, Frequency::Onetime), 6_000.0);
        assert_eq!(per_item(3.0, 2000.0, Frequency::Daily), 2_190_000.0);
        assert_eq!(per_item(3.0, 2000.0, Frequency::Weekly), 312_000.0);
        assert_eq!(per_item(3.0, 2000.0, Frequency::Monthly), 72_000.0);
    }

    #[test]
    fn test_unknown_key_behaves_as_onetime() {
        assert_eq!(
            per_item_with_key(4.5, 70.0, "fortnightly"),
            per_item(4.5, 70.0, Frequency::Onetime)
        );
        assert_eq!(per_item_with_key(2.0, 10.0, "daily"), 7_300.0);
    }

    #[test]
    fn test_monthly_distribution() {
        let result = distribute("batch-pipeline", 3.0, 2000.0, Frequency::Monthly);
        assert_eq!(result.units_per_occurrence(), 6_000.0);
        assert_eq!(result.annual_units(), 72_000.0);
        assert_eq!(result.monthly_units(), 6_000.0);
        assert_eq!(result.daily_units(), 2_400.0);
    }

    #[test]
    fn test_onetime_distribution_only_annual() {
        let result = distribute("profile-unification", 1.0, 100_000.0, Frequency::Onetime);
        assert_eq!(result.annual_units(), 100_000.0);
        assert_eq!(result.monthly_units(), 0.0);
        assert_eq!(result.daily_units(), 0.0);
    }

    #[test]
    fn test_weekly_spread_like_daily() {
        let result = distribute("x", 1.0, 5.0, Frequency::Weekly);
        assert_eq!(result.annual_units(), 260.0);
        assert_close(result.monthly_units(), 260.0 / 12.0);
        assert_close(result.daily_units(), 260.0 / 365.0);
    }

    #[test]
    fn test_distribution_of_invalid_volume_is_empty() {
        let result = distribute("x", -3.0, 5.0, Frequency::Monthly);
        assert_eq!(result.units_per_occurrence(), 0.0);
        assert_eq!(result.annual_units(), 0.0);
        assert_eq!(result.monthly_units(), 0.0);
        assert_eq!(result.daily_units(), 0.0);
    }

    #[test]
    fn test_aggregate_empty() {
        let calculator = Calculator::default();
        let totals = calculator.aggregate(&[]);
        assert!(totals.is_zero());
        assert_eq!(totals.estimated_cost(), 0.0);
    }

    #[test]
    fn test_aggregate_daily_and_weekly() {
        let calculator = Calculator::default();
        // batch-activation: 2 x 10 daily, accelerated-queries: 2.5 x 2 weekly
        let entries = vec![
            UsageEntry::new("batch-activation", 2.0, Frequency::Daily),
            UsageEntry::new("accelerated-queries", 2.5, Frequency::Weekly),
        ];

        let totals = calculator.aggregate(&entries);
        assert_eq!(totals.total_annual_units(), 7_560.0);
        assert_close(totals.total_monthly_units(), 630.0);
        assert_close(totals.total_daily_units(), 7_560.0 / 365.0);
        assert!((totals.total_daily_units() - 20.712).abs() < 0.001);
        assert_close(totals.estimated_cost(), 75.6);
    }

    #[test]
    fn test_aggregate_is_order_independent() {
        let calculator = Calculator::default();
        let entries = vec![
            UsageEntry::new("batch-pipeline", 3.0, Frequency::Monthly),
            UsageEntry::new("profile-unification", 1.0, Frequency::Onetime),
            UsageEntry::new("batch-activation", 2.0, Frequency::Daily),
            UsageEntry::new("data-queries", 4.0, Frequency::Weekly),
        ];
        let mut reversed = entries.clone();
        reversed.reverse();

        let forward = calculator.aggregate(&entries);
        let backward = calculator.aggregate(&reversed);
        assert_close(forward.total_annual_units(), backward.total_annual_units());
        assert_close(forward.total_monthly_units(), backward.total_monthly_units());
        assert_close(forward.total_daily_units(), backward.total_daily_units());
        assert_close(forward.estimated_cost(), backward.estimated_cost());
    }

    #[test]
    fn test_fractional_totals_identical_in_any_order() {
        let calculator = Calculator::default();
        let entries = vec![
            UsageEntry::new("profile-unification", 0.7, Frequency::Monthly),
            UsageEntry::new("streaming-pipeline", 1.3, Frequency::Daily),
            UsageEntry::new("batch-pipeline", 0.7, Frequency::Weekly),
            UsageEntry::new("streaming-pipeline", 0.3, Frequency::Weekly),
            UsageEntry::new("ai-inferences", 1.7, Frequency::Daily),
        ];
        let expected = calculator.aggregate(&entries);

        // every rotation and its reverse
        for shift in 0..entries.len() {
            let mut rotated = entries.clone();
            rotated.rotate_left(shift);
            assert_eq!(calculator.aggregate(&rotated), expected);
            rotated.reverse();
            assert_eq!(calculator.aggregate(&rotated), expected);
        }
    }

    #[test]
    fn test_aggregate_results_ignores_input_order() {
        let calculator = Calculator::default();
        let a = distribute("profile-unification", 0.7, 100_000.0, Frequency::Monthly);
        let b = distribute("streaming-pipeline", 1.3, 5000.0, Frequency::Daily);
        let c = distribute("batch-pipeline", 0.7, 2000.0, Frequency::Weekly);

        let forward = calculator.aggregate_results(&[a.clone(), b.clone(), c.clone()]);
        let backward = calculator.aggregate_results(&[c, b, a]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_aggregate_skips_unknown_items() {
        let calculator = Calculator::default();
        let entries = vec![
            UsageEntry::new("batch-pipeline", 3.0, Frequency::Monthly),
            UsageEntry::new("mystery-service", 100.0, Frequency::Daily),
        ];

        assert_eq!(calculator.results(&entries).len(), 1);
        let totals = calculator.aggregate(&entries);
        assert_eq!(totals.total_annual_units(), 72_000.0);
        assert_eq!(totals.total_monthly_units(), 6_000.0);
        assert_eq!(totals.total_daily_units(), 2_400.0);
        assert_close(totals.estimated_cost(), 720.0);
    }

    #[test]
    fn test_entry_units() {
        let calculator = Calculator::default();
        let entry = UsageEntry::from_input("batch-pipeline", "3", "monthly");
        assert_eq!(calculator.entry_units(&entry), 72_000.0);
        assert_eq!(
            calculator.entry_units(&UsageEntry::new("nope", 3.0, Frequency::Monthly)),
            0.0
        );
    }
}
