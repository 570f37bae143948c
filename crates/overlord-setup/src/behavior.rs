//! Worker behavior configuration.
//!
//! [`DefaultWorkerBehaviorConfig`] accepts either the legacy singular
//! `autoScaler` field or the plural `autoScalers` list and normalizes both
//! into one ordered list. The normalization lives in
//! [`resolve_auto_scalers`] and is used by construction and decoding alike.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::autoscaler::{AutoScaler, DEFAULT_AUTOSCALER};
use crate::error::{SetupError, SetupResult};
use crate::strategy::{DEFAULT_STRATEGY, WorkerSelectStrategy};

/// Anything that tells the overlord how to pick a worker for a task.
pub trait WorkerBehaviorConfig: Send + Sync {
    fn select_strategy(&self) -> Option<&WorkerSelectStrategy>;
}

/// Collapse the singular and plural autoscaler inputs into one list.
///
/// A present `auto_scaler` wins and `auto_scalers` is ignored. Otherwise
/// `auto_scalers` is returned unchanged, including when it is empty.
pub fn resolve_auto_scalers(
    auto_scaler: Option<AutoScaler>,
    auto_scalers: Option<Vec<AutoScaler>>,
) -> SetupResult<Vec<AutoScaler>> {
    match (auto_scaler, auto_scalers) {
        (Some(single), discarded) => {
            if let Some(list) = discarded {
                warn!(
                    category = %single.category(),
                    discarded = list.len(),
                    "both autoScaler and autoScalers set, using autoScaler"
                );
            }
            debug!(category = %single.category(), "using legacy autoScaler field");
            Ok(vec![single])
        }
        (None, Some(list)) => {
            // An empty list is kept as-is for compatibility with stored configs.
            if list.is_empty() {
                warn!("autoScalers is empty, no category will be scaled");
            }
            Ok(list)
        }
        (None, None) => Err(SetupError::InvalidConfiguration(
            "Either autoScaler or autoScalers property needs to be provided".to_string(),
        )),
    }
}

/// Select strategy plus the autoscalers for each worker category.
///
/// Immutable once built. Equality and hashing are structural, so two
/// configs built from the singular and plural inputs compare equal when
/// they normalize to the same list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawWorkerBehaviorConfig")]
pub struct DefaultWorkerBehaviorConfig {
    select_strategy: Option<WorkerSelectStrategy>,
    auto_scalers: Vec<AutoScaler>,
}

/// Input shape: accepts the legacy `autoScaler` field, which is never
/// written back out.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawWorkerBehaviorConfig {
    #[serde(default)]
    select_strategy: Option<WorkerSelectStrategy>,
    #[serde(default)]
    auto_scaler: Option<AutoScaler>,
    #[serde(default)]
    auto_scalers: Option<Vec<AutoScaler>>,
}

impl TryFrom<RawWorkerBehaviorConfig> for DefaultWorkerBehaviorConfig {
    type Error = SetupError;

    fn try_from(raw: RawWorkerBehaviorConfig) -> SetupResult<Self> {
        Self::new(raw.select_strategy, raw.auto_scaler, raw.auto_scalers)
    }
}

impl DefaultWorkerBehaviorConfig {
    /// Build a config, failing with [`SetupError::InvalidConfiguration`]
    /// when neither `auto_scaler` nor `auto_scalers` is given.
    pub fn new(
        select_strategy: Option<WorkerSelectStrategy>,
        auto_scaler: Option<AutoScaler>,
        auto_scalers: Option<Vec<AutoScaler>>,
    ) -> SetupResult<Self> {
        let auto_scalers = resolve_auto_scalers(auto_scaler, auto_scalers)?;
        Ok(Self {
            select_strategy,
            auto_scalers,
        })
    }

    /// The default strategy with a single no-op autoscaler for the default
    /// worker category.
    pub fn default_config() -> Self {
        Self {
            select_strategy: Some(DEFAULT_STRATEGY),
            auto_scalers: vec![DEFAULT_AUTOSCALER.clone()],
        }
    }

    pub fn select_strategy(&self) -> Option<&WorkerSelectStrategy> {
        self.select_strategy.as_ref()
    }

    /// Normalized autoscaler list, in input order.
    pub fn auto_scalers(&self) -> &[AutoScaler] {
        &self.auto_scalers
    }

    /// Distinct categories that have at least one autoscaler.
    pub fn categories(&self) -> BTreeSet<&str> {
        self.auto_scalers.iter().map(AutoScaler::category).collect()
    }

    /// Autoscalers managing `category`, in stored order.
    pub fn auto_scalers_for<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a AutoScaler> + 'a {
        self.auto_scalers
            .iter()
            .filter(move |scaler| scaler.category() == category)
    }

    pub fn into_parts(self) -> (Option<WorkerSelectStrategy>, Vec<AutoScaler>) {
        (self.select_strategy, self.auto_scalers)
    }
}

impl WorkerBehaviorConfig for DefaultWorkerBehaviorConfig {
    fn select_strategy(&self) -> Option<&WorkerSelectStrategy> {
        self.select_strategy.as_ref()
    }
}

impl fmt::Display for DefaultWorkerBehaviorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WorkerConfiguration{{selectStrategy=")?;
        match &self.select_strategy {
            Some(strategy) => write!(f, "{}", strategy.type_name())?,
            None => write!(f, "null")?,
        }
        write!(f, ", autoScalers=[")?;
        for (i, scaler) in self.auto_scalers.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}({})", scaler.type_name(), scaler.category())?;
        }
        write!(f, "]}}")
    }
}
