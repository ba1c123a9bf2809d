//! Calculator configuration: catalog, pricing and report settings.
//!
//! Built once at startup and never mutated afterwards.

use crate::catalog::{default_tips, Catalog, OptimizationTip};
use crate::data_structures::CatalogSection;
use crate::error::ConfigError;
use crate::pricing::Pricing;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    title: String,
    unit_label: String,
    footer: Vec<String>,
}

impl ReportSettings {
    pub fn new(title: impl Into<String>, unit_label: impl Into<String>, footer: Vec<String>) -> Self {
        Self {
            title: title.into(),
            unit_label: unit_label.into(),
            footer,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Plural name of the consumption unit, e.g. `credits`.
    pub fn unit_label(&self) -> &str {
        &self.unit_label
    }

    pub fn footer(&self) -> &[String] {
        &self.footer
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: "Salesforce Data Cloud Credit Calculation Report".to_string(),
            unit_label: "credits".to_string(),
            footer: vec![
                "This report was generated by the Salesforce Data Cloud Credit Calculator".to_string(),
                "For more information, visit your Salesforce Data Cloud documentation".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorConfig {
    catalog: Catalog,
    pricing: Pricing,
    report: ReportSettings,
    tips: Vec<OptimizationTip>,
}

/// On-disk shape of the config file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    sections: Option<Vec<CatalogSection>>,
    pricing: Option<Pricing>,
    report: Option<ReportSettings>,
    tips: Option<Vec<OptimizationTip>>,
}

impl CalculatorConfig {
    pub fn new(
        catalog: Catalog,
        pricing: Pricing,
        report: ReportSettings,
        tips: Vec<OptimizationTip>,
    ) -> Result<Self, ConfigError> {
        pricing.validate()?;
        Ok(Self {
            catalog,
            pricing,
            report,
            tips,
        })
    }

    pub fn builtin() -> Self {
        Self {
            catalog: Catalog::builtin(),
            pricing: Pricing::default(),
            report: ReportSettings::default(),
            tips: default_tips(),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            items = config.catalog.len(),
            "loaded calculator config"
        );
        Ok(config)
    }

    /// Parses a JSON config. Absent sections keep their built-in values.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_json::from_str(content)?;

        let catalog = match file.sections {
            Some(sections) => Catalog::new(sections)?,
            None => Catalog::builtin(),
        };

        Self::new(
            catalog,
            file.pricing.unwrap_or_default(),
            file.report.unwrap_or_default(),
            file.tips.unwrap_or_else(default_tips),
        )
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn pricing(&self) -> &Pricing {
        &self.pricing
    }

    pub fn report(&self) -> &ReportSettings {
        &self.report
    }

    pub fn tips(&self) -> &[OptimizationTip] {
        &self.tips
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self::builtin()
    }
}
