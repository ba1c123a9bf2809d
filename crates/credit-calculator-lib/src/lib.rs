pub mod calculator;
pub mod catalog;
pub mod config;
pub mod data_structures;
pub mod error;
pub mod export;
pub mod format;
pub mod pricing;
pub mod render;
pub mod report;

pub use calculator::{distribute, per_item, per_item_with_key, Calculator};
pub use catalog::{default_tips, Catalog, OptimizationTip};
pub use config::{CalculatorConfig, ReportSettings};
pub use data_structures::{
    parse_volume, AggregateTotals, CalculationResult, CatalogItem, CatalogSection, Frequency,
    UsageEntry,
};
pub use error::{ConfigError, ExportError};
pub use export::{trigger_export, ExportTarget, FileTarget, WriterTarget};
pub use pricing::Pricing;
pub use render::{render_document, Document, HtmlRenderer, Renderer, ReportFormat, TextRenderer};
pub use report::{build_snapshot, build_snapshot_at, ReportLine, ReportSnapshot};

pub use chrono::{DateTime, Utc};

pub mod prelude {
    pub use crate::calculator::Calculator;
    pub use crate::config::CalculatorConfig;
    pub use crate::data_structures::{AggregateTotals, Frequency, UsageEntry};
    pub use crate::render::{render_document, ReportFormat};
    pub use crate::report::{build_snapshot, ReportSnapshot};
}
