//! Autoscaler descriptions.
//!
//! Each autoscaler manages the workers of one category. The provisioning
//! itself happens in the overlord's provisioning strategy; this module only
//! carries what it needs to be configured.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::worker::DEFAULT_CATEGORY;

/// Category of the default autoscaler. Same value as the default worker
/// category so that default workers and autoscalers line up.
pub const DEFAULT_AUTOSCALER_CATEGORY: &str = DEFAULT_CATEGORY;

/// No-op autoscaler for the default category, used by
/// [`DefaultWorkerBehaviorConfig::default_config`](crate::DefaultWorkerBehaviorConfig::default_config).
pub static DEFAULT_AUTOSCALER: LazyLock<AutoScaler> =
    LazyLock::new(|| AutoScaler::noop(DEFAULT_AUTOSCALER_CATEGORY));

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// An autoscaler tagged with the worker category it manages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AutoScaler {
    /// Never adds or removes workers.
    Noop {
        #[serde(default = "default_category")]
        category: String,
    },
    /// Provisions EC2 instances.
    #[serde(rename_all = "camelCase")]
    Ec2 {
        min_num_workers: u32,
        max_num_workers: u32,
        env_config: Ec2EnvConfig,
        #[serde(default = "default_category")]
        category: String,
    },
}

impl AutoScaler {
    /// A no-op autoscaler for `category`.
    pub fn noop(category: impl Into<String>) -> Self {
        AutoScaler::Noop {
            category: category.into(),
        }
    }

    pub fn category(&self) -> &str {
        match self {
            AutoScaler::Noop { category } | AutoScaler::Ec2 { category, .. } => category,
        }
    }

    pub fn min_num_workers(&self) -> u32 {
        match self {
            AutoScaler::Noop { .. } => 0,
            AutoScaler::Ec2 { min_num_workers, .. } => *min_num_workers,
        }
    }

    pub fn max_num_workers(&self) -> u32 {
        match self {
            AutoScaler::Noop { .. } => 0,
            AutoScaler::Ec2 { max_num_workers, .. } => *max_num_workers,
        }
    }

    /// The `type` discriminator used on the wire.
    pub fn type_name(&self) -> &'static str {
        match self {
            AutoScaler::Noop { .. } => "noop",
            AutoScaler::Ec2 { .. } => "ec2",
        }
    }
}

/// Where and how EC2 workers are launched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ec2EnvConfig {
    pub availability_zone: String,
    pub node_data: Ec2NodeData,
    /// Base64 user data passed to new instances.
    #[serde(default)]
    pub user_data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ec2NodeData {
    pub ami_id: String,
    pub instance_type: String,
    pub min_instances: u32,
    pub max_instances: u32,
    #[serde(default)]
    pub security_group_ids: Vec<String>,
    #[serde(default)]
    pub key_name: Option<String>,
    #[serde(default)]
    pub subnet_id: Option<String>,
    #[serde(default)]
    pub associate_public_ip_address: Option<bool>,
}
