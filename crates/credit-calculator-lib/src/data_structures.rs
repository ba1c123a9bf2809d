use serde::{Deserialize, Serialize};
use std::fmt;

/// How often a usage volume recurs over a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Onetime,
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [
        Frequency::Onetime,
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Monthly,
    ];

    /// Number of occurrences per year.
    pub fn annualization_factor(&self) -> f64 {
        match self {
            Frequency::Onetime => 1.0,
            Frequency::Daily => 365.0,
            Frequency::Weekly => 52.0,
            Frequency::Monthly => 12.0,
        }
    }

    /// Parses a selector key. Unknown keys fall back to `Onetime`.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "daily" => Frequency::Daily,
            "weekly" => Frequency::Weekly,
            "monthly" => Frequency::Monthly,
            _ => Frequency::Onetime,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Frequency::Onetime => "onetime",
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Onetime => "One-time",
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Frequency::Onetime => Frequency::Daily,
            Frequency::Daily => Frequency::Weekly,
            Frequency::Weekly => Frequency::Monthly,
            Frequency::Monthly => Frequency::Onetime,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One billable usage category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(alias = "multiplier")]
    unit_multiplier: f64,
    unit: String,
}

impl CatalogItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        unit_multiplier: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            unit_multiplier,
            unit: unit.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Credits consumed per one measured unit.
    pub fn unit_multiplier(&self) -> f64 {
        self.unit_multiplier
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// The measured quantity without its scale prefix, e.g. `rows` for `1M rows`.
    pub fn volume_hint(&self) -> &str {
        self.unit
            .split_once(' ')
            .map(|(_, rest)| rest)
            .unwrap_or(&self.unit)
    }
}

/// A named group of catalog items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSection {
    id: String,
    title: String,
    items: Vec<CatalogItem>,
}

impl CatalogSection {
    pub fn new(id: impl Into<String>, title: impl Into<String>, items: Vec<CatalogItem>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            items,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }
}

/// A user-supplied volume and frequency for one catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageEntry {
    item_id: String,
    volume: f64,
    frequency: Frequency,
}

impl UsageEntry {
    pub fn new(item_id: impl Into<String>, volume: f64, frequency: Frequency) -> Self {
        Self {
            item_id: item_id.into(),
            volume,
            frequency,
        }
    }

    /// Builds an entry from raw form input, normalizing the volume text and
    /// the frequency key.
    pub fn from_input(item_id: impl Into<String>, raw_volume: &str, frequency_key: &str) -> Self {
        Self::new(
            item_id,
            parse_volume(raw_volume),
            Frequency::from_key(frequency_key),
        )
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// A finite, positive volume. Anything else contributes nothing.
    pub fn has_volume(&self) -> bool {
        self.volume.is_finite() && self.volume > 0.0
    }
}

/// Reads the leading decimal number of `raw`, ignoring anything after it.
/// Text without a numeric prefix reads as zero.
pub fn parse_volume(raw: &str) -> f64 {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        let mut end = start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        end
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+') | Some(b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    match text[..end].parse::<f64>() {
        Ok(volume) if volume.is_finite() => volume,
        _ => 0.0,
    }
}

/// Bucket contributions of a single entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    item_id: String,
    units_per_occurrence: f64,
    annual_units: f64,
    monthly_units: f64,
    daily_units: f64,
}

impl CalculationResult {
    pub fn new(
        item_id: impl Into<String>,
        units_per_occurrence: f64,
        annual_units: f64,
        monthly_units: f64,
        daily_units: f64,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            units_per_occurrence,
            annual_units,
            monthly_units,
            daily_units,
        }
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn units_per_occurrence(&self) -> f64 {
        self.units_per_occurrence
    }

    pub fn annual_units(&self) -> f64 {
        self.annual_units
    }

    pub fn monthly_units(&self) -> f64 {
        self.monthly_units
    }

    pub fn daily_units(&self) -> f64 {
        self.daily_units
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateTotals {
    total_annual_units: f64,
    total_monthly_units: f64,
    total_daily_units: f64,
    estimated_cost: f64,
}

impl AggregateTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_result(&mut self, result: &CalculationResult) {
        self.total_annual_units += result.annual_units;
        self.total_monthly_units += result.monthly_units;
        self.total_daily_units += result.daily_units;
    }

    pub fn set_estimated_cost(&mut self, estimated_cost: f64) {
        self.estimated_cost = estimated_cost;
    }

    pub fn total_annual_units(&self) -> f64 {
        self.total_annual_units
    }

    pub fn total_monthly_units(&self) -> f64 {
        self.total_monthly_units
    }

    pub fn total_daily_units(&self) -> f64 {
        self.total_daily_units
    }

    pub fn estimated_cost(&self) -> f64 {
        self.estimated_cost
    }

    pub fn is_zero(&self) -> bool {
        self.total_annual_units == 0.0
            && self.total_monthly_units == 0.0
            && self.total_daily_units == 0.0
    }
}
