//! overlord-setup — worker behavior configuration for the overlord.
//!
//! Describes, per worker category, which strategy selects a worker for a
//! pending task and which autoscalers manage the workers of that category.
//! Strategies and autoscalers are only stored and forwarded here; the
//! selection and scaling logic lives elsewhere.
//!
//! # Resolution
//!
//! ```text
//! autoScaler present        -> autoScalers = [autoScaler]   (autoScalers input ignored)
//! autoScaler absent         -> autoScalers = autoScalers    (passed through unchanged)
//! both absent               -> SetupError::InvalidConfiguration
//! ```
//!
//! Decoding from JSON/TOML goes through the same resolver as
//! [`DefaultWorkerBehaviorConfig::new`], and only the plural `autoScalers`
//! field is written back out.

pub mod autoscaler;
pub mod behavior;
pub mod error;
pub mod loader;
pub mod strategy;
pub mod worker;

pub use autoscaler::{AutoScaler, DEFAULT_AUTOSCALER, DEFAULT_AUTOSCALER_CATEGORY, Ec2EnvConfig, Ec2NodeData};
pub use behavior::{DefaultWorkerBehaviorConfig, WorkerBehaviorConfig, resolve_auto_scalers};
pub use error::{SetupError, SetupResult};
pub use strategy::{AffinityConfig, CategoryConfig, DEFAULT_STRATEGY, WorkerCategorySpec, WorkerSelectStrategy};
pub use worker::{DEFAULT_CATEGORY, WorkerConfig};
