//! The fixed table of billable usage categories.

use crate::data_structures::{CatalogItem, CatalogSection};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ordered, validated set of catalog sections. Item ids are unique across
/// all sections.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    sections: Vec<CatalogSection>,
    positions: HashMap<String, (usize, usize)>,
}

impl Catalog {
    pub fn new(sections: Vec<CatalogSection>) -> Result<Self, ConfigError> {
        let mut positions = HashMap::new();

        for (section_idx, section) in sections.iter().enumerate() {
            for (item_idx, item) in section.items().iter().enumerate() {
                if item.id().trim().is_empty() {
                    return Err(ConfigError::EmptyItemId {
                        section: section.id().to_string(),
                    });
                }

                let multiplier = item.unit_multiplier();
                if !(multiplier.is_finite() && multiplier > 0.0) {
                    return Err(ConfigError::InvalidMultiplier {
                        id: item.id().to_string(),
                        value: multiplier,
                    });
                }

                if positions
                    .insert(item.id().to_string(), (section_idx, item_idx))
                    .is_some()
                {
                    return Err(ConfigError::DuplicateItemId(item.id().to_string()));
                }
            }
        }

        Ok(Self {
            sections,
            positions,
        })
    }

    pub fn builtin() -> Self {
        let data_services = CatalogSection::new(
            "data-services",
            "Data Services",
            vec![
                CatalogItem::new(
                    "batch-pipeline",
                    "Batch Data Pipeline",
                    "Ingesting data through Data Streams to Data Cloud",
                    2000.0,
                    "1M rows",
                ),
                CatalogItem::new(
                    "streaming-pipeline",
                    "Streaming Data Pipeline",
                    "Real-time data ingestion from web, mobile, APIs",
                    5000.0,
                    "1M rows",
                ),
                CatalogItem::new(
                    "batch-transforms",
                    "Batch Data Transforms",
                    "Data transformation during batch processing",
                    400.0,
                    "1M rows",
                ),
                CatalogItem::new(
                    "streaming-transforms",
                    "Streaming Data Transforms",
                    "Real-time data transformation",
                    5000.0,
                    "1M rows",
                ),
                CatalogItem::new(
                    "profile-unification",
                    "Batch Profile Unification",
                    "Identity resolution and profile merging",
                    100_000.0,
                    "1M profiles",
                ),
                CatalogItem::new(
                    "data-federation",
                    "Data Federation (Zero-Copy)",
                    "Querying external data without copying",
                    70.0,
                    "1M rows accessed",
                ),
                CatalogItem::new(
                    "data-queries",
                    "Data Queries",
                    "Standard data queries and reports",
                    2.0,
                    "1M rows processed",
                ),
                CatalogItem::new(
                    "accelerated-queries",
                    "Accelerated Data Queries",
                    "High-performance data queries",
                    2.0,
                    "1M rows processed",
                ),
                CatalogItem::new(
                    "batch-insights",
                    "Batch Calculated Insights",
                    "Batch calculation of derived metrics",
                    15.0,
                    "1M rows processed",
                ),
                CatalogItem::new(
                    "streaming-insights",
                    "Streaming Calculated Insights",
                    "Real-time calculated insights",
                    800.0,
                    "1M rows processed",
                ),
                CatalogItem::new(
                    "realtime-events",
                    "Sub-Second Real-Time Events",
                    "High-frequency real-time event processing",
                    70_000.0,
                    "1M events",
                ),
                CatalogItem::new(
                    "unstructured-data",
                    "Unstructured Data",
                    "Processing PDFs, images, documents",
                    60.0,
                    "1MB processed",
                ),
                CatalogItem::new(
                    "profile-api",
                    "Real-Time Profile API",
                    "Real-time profile API requests",
                    900.0,
                    "1M API calls",
                ),
                CatalogItem::new(
                    "ai-inferences",
                    "Inferences (AI/ML)",
                    "Einstein predictions and AI processing",
                    3500.0,
                    "1M inferences",
                ),
            ],
        );

        let segmentation = CatalogSection::new(
            "segmentation-activation",
            "Segmentation & Activation",
            vec![
                CatalogItem::new(
                    "segment-processing",
                    "Segment Processing",
                    "Creating and updating audience segments",
                    20.0,
                    "1M rows processed",
                ),
                CatalogItem::new(
                    "batch-activation",
                    "Batch Activation",
                    "Batch activation to target systems",
                    10.0,
                    "1M rows activated",
                ),
                CatalogItem::new(
                    "streaming-activation",
                    "Streaming Activation",
                    "Real-time activation and personalization",
                    1600.0,
                    "1M rows activated",
                ),
            ],
        );

        let sections = vec![data_services, segmentation];
        let positions = sections
            .iter()
            .enumerate()
            .flat_map(|(section_idx, section)| {
                section
                    .items()
                    .iter()
                    .enumerate()
                    .map(move |(item_idx, item)| (item.id().to_string(), (section_idx, item_idx)))
            })
            .collect();

        Self {
            sections,
            positions,
        }
    }

    pub fn sections(&self) -> &[CatalogSection] {
        &self.sections
    }

    /// All items in catalog order: section order, then item order.
    pub fn items(&self) -> impl Iterator<Item = &CatalogItem> {
        self.sections.iter().flat_map(|section| section.items().iter())
    }

    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.positions
            .get(id)
            .map(|&(section_idx, item_idx)| &self.sections[section_idx].items()[item_idx])
    }

    /// Index of the item in catalog order.
    pub fn position(&self, id: &str) -> Option<usize> {
        let &(section_idx, item_idx) = self.positions.get(id)?;
        let preceding: usize = self.sections[..section_idx]
            .iter()
            .map(|section| section.items().len())
            .sum();
        Some(preceding + item_idx)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationTip {
    category: String,
    tip: String,
}

impl OptimizationTip {
    pub fn new(category: impl Into<String>, tip: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            tip: tip.into(),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn tip(&self) -> &str {
        &self.tip
    }
}

pub fn default_tips() -> Vec<OptimizationTip> {
    vec![
        OptimizationTip::new(
            "Data Ingestion",
            "Use batch processing over streaming when real-time isn't required - it's 2.5x cheaper.",
        ),
        OptimizationTip::new(
            "Profile Unification",
            "Profile unification is the most expensive operation - only unify necessary data.",
        ),
        OptimizationTip::new(
            "Data Quality",
            "Clean and deduplicate data before ingestion to avoid unnecessary processing.",
        ),
        OptimizationTip::new(
            "Query Optimization",
            "Use data federation (zero-copy) for occasional queries instead of full ingestion.",
        ),
        OptimizationTip::new(
            "Scheduling",
            "Schedule calculated insights and segments based on business needs.",
        ),
        OptimizationTip::new(
            "Development",
            "Test with small samples before processing full datasets.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let builtin = Catalog::builtin();
        let rebuilt = Catalog::new(builtin.sections().to_vec()).unwrap();
        assert_eq!(rebuilt, builtin);
        assert_eq!(builtin.len(), 17);
        assert_eq!(builtin.sections().len(), 2);
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::builtin();
        let item = catalog.get("batch-pipeline").unwrap();
        assert_eq!(item.unit_multiplier(), 2000.0);
        assert_eq!(item.unit(), "1M rows");

        assert_eq!(
            catalog.get("profile-unification").unwrap().unit_multiplier(),
            100_000.0
        );
        assert!(catalog.get("no-such-item").is_none());
    }

    #[test]
    fn test_builtin_descriptions() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.get("batch-pipeline").unwrap().description(),
            "Ingesting data through Data Streams to Data Cloud"
        );
        assert_eq!(
            catalog.get("ai-inferences").unwrap().description(),
            "Einstein predictions and AI processing"
        );
    }

    #[test]
    fn test_items_follow_catalog_order() {
        let catalog = Catalog::builtin();
        let ids: Vec<&str> = catalog.items().map(|item| item.id()).collect();
        assert_eq!(ids.first(), Some(&"batch-pipeline"));
        assert_eq!(ids.last(), Some(&"streaming-activation"));

        for (idx, id) in ids.iter().enumerate() {
            assert_eq!(catalog.position(id), Some(idx));
        }
    }

    #[test]
    fn test_duplicate_ids_rejected_across_sections() {
        let sections = vec![
            CatalogSection::new("a", "A", vec![CatalogItem::new("x", "X", "", 1.0, "1M rows")]),
            CatalogSection::new("b", "B", vec![CatalogItem::new("x", "X2", "", 2.0, "1M rows")]),
        ];
        let err = Catalog::new(sections).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateItemId(id) if id == "x"));
    }

    #[test]
    fn test_invalid_multipliers_rejected() {
        for value in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let sections = vec![CatalogSection::new(
                "a",
                "A",
                vec![CatalogItem::new("x", "X", "", value, "1M rows")],
            )];
            assert!(matches!(
                Catalog::new(sections),
                Err(ConfigError::InvalidMultiplier { .. })
            ));
        }
    }

    #[test]
    fn test_empty_id_rejected() {
        let sections = vec![CatalogSection::new(
            "a",
            "A",
            vec![CatalogItem::new("  ", "X", "", 1.0, "1M rows")],
        )];
        assert!(matches!(
            Catalog::new(sections),
            Err(ConfigError::EmptyItemId { .. })
        ));
    }

    #[test]
    fn test_default_tips() {
        let tips = default_tips();
        assert_eq!(tips.len(), 6);
        assert_eq!(tips[1].category(), "Profile Unification");
    }
}
