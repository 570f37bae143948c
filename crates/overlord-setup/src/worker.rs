//! Worker-side configuration shared with the overlord.

use serde::{Deserialize, Serialize};

/// Category assigned to workers that don't declare one.
///
/// Default autoscalers are tagged with the same value so that they manage
/// the default worker pool.
pub const DEFAULT_CATEGORY: &str = "_default_worker_category";

/// The part of a worker's runtime config the overlord cares about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkerConfig {
    /// Category this worker belongs to.
    pub category: String,
    /// Number of task slots on the worker.
    pub capacity: u32,
    pub version: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            category: DEFAULT_CATEGORY.to_string(),
            capacity: 1,
            version: "0".to_string(),
        }
    }
}
