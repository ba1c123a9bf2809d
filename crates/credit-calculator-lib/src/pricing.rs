use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_UNITS_PER_PACKAGE: f64 = 100_000.0;
pub const DEFAULT_COST_PER_PACKAGE: f64 = 1_000.0;

/// Credits are bought in fixed-size packages at a fixed price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pricing {
    #[serde(alias = "credits_per_package")]
    units_per_package: f64,
    cost_per_package: f64,
    currency_symbol: String,
}

impl Pricing {
    pub fn new(
        units_per_package: f64,
        cost_per_package: f64,
        currency_symbol: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let pricing = Self {
            units_per_package,
            cost_per_package,
            currency_symbol: currency_symbol.into(),
        };
        pricing.validate()?;
        Ok(pricing)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.units_per_package.is_finite() && self.units_per_package > 0.0) {
            return Err(ConfigError::InvalidPricing(format!(
                "units_per_package must be positive, got {}",
                self.units_per_package
            )));
        }
        if !(self.cost_per_package.is_finite() && self.cost_per_package >= 0.0) {
            return Err(ConfigError::InvalidPricing(format!(
                "cost_per_package must not be negative, got {}",
                self.cost_per_package
            )));
        }
        Ok(())
    }

    pub fn units_per_package(&self) -> f64 {
        self.units_per_package
    }

    pub fn cost_per_package(&self) -> f64 {
        self.cost_per_package
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// Fractional number of packages needed to cover `units`.
    pub fn packages_for(&self, units: f64) -> f64 {
        units / self.units_per_package
    }

    pub fn estimate_cost(&self, annual_units: f64) -> f64 {
        self.packages_for(annual_units) * self.cost_per_package
    }
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            units_per_package: DEFAULT_UNITS_PER_PACKAGE,
            cost_per_package: DEFAULT_COST_PER_PACKAGE,
            currency_symbol: "$".to_string(),
        }
    }
}
