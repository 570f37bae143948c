//! Worker select strategies.
//!
//! These values only describe which strategy a category uses; the
//! selection itself is performed by the overlord's task runner. Maps are
//! `BTreeMap`/`BTreeSet` so that configs compare and hash structurally.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Strategy used when a config doesn't name one.
pub const DEFAULT_STRATEGY: WorkerSelectStrategy = WorkerSelectStrategy::EqualDistribution {
    affinity_config: None,
    worker_category_spec: None,
};

/// Which strategy selects a worker for a pending task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WorkerSelectStrategy {
    #[serde(rename_all = "camelCase")]
    FillCapacity {
        #[serde(default)]
        affinity_config: Option<AffinityConfig>,
    },
    #[serde(rename_all = "camelCase")]
    FillCapacityWithAffinity {
        #[serde(default)]
        affinity_config: Option<AffinityConfig>,
    },
    #[serde(rename_all = "camelCase")]
    FillCapacityWithCategorySpec {
        #[serde(default)]
        worker_category_spec: Option<WorkerCategorySpec>,
    },
    #[serde(rename_all = "camelCase")]
    EqualDistribution {
        #[serde(default)]
        affinity_config: Option<AffinityConfig>,
        #[serde(default)]
        worker_category_spec: Option<WorkerCategorySpec>,
    },
    #[serde(rename_all = "camelCase")]
    EqualDistributionWithAffinity {
        #[serde(default)]
        affinity_config: Option<AffinityConfig>,
    },
    #[serde(rename_all = "camelCase")]
    EqualDistributionWithCategorySpec {
        #[serde(default)]
        worker_category_spec: Option<WorkerCategorySpec>,
    },
    /// User-supplied selection function, evaluated by the task runner.
    Javascript { function: String },
}

impl WorkerSelectStrategy {
    /// The `type` discriminator used on the wire.
    pub fn type_name(&self) -> &'static str {
        match self {
            WorkerSelectStrategy::FillCapacity { .. } => "fillCapacity",
            WorkerSelectStrategy::FillCapacityWithAffinity { .. } => "fillCapacityWithAffinity",
            WorkerSelectStrategy::FillCapacityWithCategorySpec { .. } => {
                "fillCapacityWithCategorySpec"
            }
            WorkerSelectStrategy::EqualDistribution { .. } => "equalDistribution",
            WorkerSelectStrategy::EqualDistributionWithAffinity { .. } => {
                "equalDistributionWithAffinity"
            }
            WorkerSelectStrategy::EqualDistributionWithCategorySpec { .. } => {
                "equalDistributionWithCategorySpec"
            }
            WorkerSelectStrategy::Javascript { .. } => "javascript",
        }
    }

    pub fn affinity_config(&self) -> Option<&AffinityConfig> {
        match self {
            WorkerSelectStrategy::FillCapacity { affinity_config }
            | WorkerSelectStrategy::FillCapacityWithAffinity { affinity_config }
            | WorkerSelectStrategy::EqualDistribution { affinity_config, .. }
            | WorkerSelectStrategy::EqualDistributionWithAffinity { affinity_config } => {
                affinity_config.as_ref()
            }
            _ => None,
        }
    }

    pub fn worker_category_spec(&self) -> Option<&WorkerCategorySpec> {
        match self {
            WorkerSelectStrategy::FillCapacityWithCategorySpec { worker_category_spec }
            | WorkerSelectStrategy::EqualDistribution { worker_category_spec, .. }
            | WorkerSelectStrategy::EqualDistributionWithCategorySpec { worker_category_spec } => {
                worker_category_spec.as_ref()
            }
            _ => None,
        }
    }
}

impl Default for WorkerSelectStrategy {
    fn default() -> Self {
        DEFAULT_STRATEGY
    }
}

/// Pins datasources to specific worker hosts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffinityConfig {
    /// Datasource → worker hosts (`host:port`).
    #[serde(default)]
    pub affinity: BTreeMap<String, BTreeSet<String>>,
    /// Strong affinity: never fall back to hosts outside the set.
    #[serde(default)]
    pub strong: bool,
}

/// Routes task types to worker categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerCategorySpec {
    /// Task type → category routing.
    #[serde(default)]
    pub category_map: BTreeMap<String, CategoryConfig>,
    #[serde(default)]
    pub strong: bool,
}

impl WorkerCategorySpec {
    /// Category a task of `task_type` on `datasource` is routed to, if any.
    pub fn category_for(&self, task_type: &str, datasource: &str) -> Option<&str> {
        let config = self.category_map.get(task_type)?;
        config
            .category_affinity
            .get(datasource)
            .or(config.default_category.as_ref())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryConfig {
    #[serde(default)]
    pub default_category: Option<String>,
    /// Datasource → category.
    #[serde(default)]
    pub category_affinity: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_strategy_is_equal_distribution() {
        let strategy = WorkerSelectStrategy::default();
        assert_eq!(strategy, DEFAULT_STRATEGY);
        assert_eq!(strategy.type_name(), "equalDistribution");
        assert!(strategy.affinity_config().is_none());
        assert!(strategy.worker_category_spec().is_none());
    }

    #[test]
    fn parse_fill_capacity_with_affinity() {
        let json = r#"{
            "type": "fillCapacityWithAffinity",
            "affinityConfig": {
                "affinity": { "wikipedia": ["worker-1:8091", "worker-2:8091"] },
                "strong": true
            }
        }"#;
        let strategy: WorkerSelectStrategy = serde_json::from_str(json).unwrap();
        assert_eq!(strategy.type_name(), "fillCapacityWithAffinity");

        let affinity = strategy.affinity_config().unwrap();
        assert!(affinity.strong);
        assert_eq!(affinity.affinity["wikipedia"].len(), 2);
    }

    #[test]
    fn parse_category_spec_and_route() {
        let json = r#"{
            "type": "equalDistributionWithCategorySpec",
            "workerCategorySpec": {
                "categoryMap": {
                    "index_kafka": {
                        "defaultCategory": "c1",
                        "categoryAffinity": { "ds1": "c2" }
                    }
                },
                "strong": false
            }
        }"#;
        let strategy: WorkerSelectStrategy = serde_json::from_str(json).unwrap();
        let spec = strategy.worker_category_spec().unwrap();

        assert_eq!(spec.category_for("index_kafka", "ds1"), Some("c2"));
        assert_eq!(spec.category_for("index_kafka", "other"), Some("c1"));
        assert_eq!(spec.category_for("compact", "ds1"), None);
    }

    #[test]
    fn missing_optional_fields_are_none() {
        let strategy: WorkerSelectStrategy =
            serde_json::from_str(r#"{"type": "equalDistribution"}"#).unwrap();
        assert_eq!(strategy, DEFAULT_STRATEGY);
    }

    #[test]
    fn javascript_strategy_keeps_function_source() {
        let strategy: WorkerSelectStrategy = serde_json::from_str(
            r#"{"type": "javascript", "function": "function (config, workers, task) { return null; }"}"#,
        )
        .unwrap();
        assert_eq!(strategy.type_name(), "javascript");
        assert!(strategy.affinity_config().is_none());
    }

    #[test]
    fn unknown_type_is_rejected() {
        let result: Result<WorkerSelectStrategy, _> =
            serde_json::from_str(r#"{"type": "roundRobin"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn serialize_uses_type_tag() {
        let json = serde_json::to_value(DEFAULT_STRATEGY).unwrap();
        assert_eq!(json["type"], "equalDistribution");
        assert!(json["affinityConfig"].is_null());
    }
}
