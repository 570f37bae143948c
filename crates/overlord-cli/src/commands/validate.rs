use std::path::Path;

use anyhow::Context;
use overlord_setup::{DEFAULT_CATEGORY, DefaultWorkerBehaviorConfig, loader};
use tracing::error;

/// Task to route through the config's category spec after validation.
pub struct RouteQuery<'a> {
    pub task_type: &'a str,
    pub datasource: &'a str,
}

pub fn validate(path: &str, format: &str, route: Option<RouteQuery<'_>>) -> anyhow::Result<()> {
    let config = match loader::from_file(Path::new(path)) {
        Ok(config) => config,
        Err(e) => {
            if e.is_rejection() {
                error!(path, error = %e, "worker behavior config rejected");
            }
            return Err(e).with_context(|| format!("invalid worker behavior config: {path}"));
        }
    };

    println!("{}", render(&config, format)?);
    if let Some(query) = route {
        println!("{}", format_route(&config, &query));
    }
    Ok(())
}

pub fn defaults(format: &str) -> anyhow::Result<()> {
    let config = DefaultWorkerBehaviorConfig::default_config();
    println!("{}", render(&config, format)?);
    Ok(())
}

fn render(config: &DefaultWorkerBehaviorConfig, format: &str) -> anyhow::Result<String> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(config)?),
        _ => Ok(format_summary(config)),
    }
}

fn format_summary(config: &DefaultWorkerBehaviorConfig) -> String {
    let mut out = String::new();
    let strategy = config
        .select_strategy()
        .map_or("(none)", |strategy| strategy.type_name());
    out.push_str(&format!("select strategy: {strategy}\n"));

    if config.auto_scalers().is_empty() {
        out.push_str("autoscalers: none (no category will be scaled)\n");
        return out;
    }

    out.push_str("autoscalers:\n");
    for category in config.categories() {
        for scaler in config.auto_scalers_for(category) {
            out.push_str(&format!(
                "  {category}: {} (workers {}..={})\n",
                scaler.type_name(),
                scaler.min_num_workers(),
                scaler.max_num_workers(),
            ));
        }
    }
    out
}

/// Category a task lands in, and the autoscalers serving that category.
/// Tasks not covered by a category spec go to the default category.
fn format_route(config: &DefaultWorkerBehaviorConfig, query: &RouteQuery<'_>) -> String {
    let category = config
        .select_strategy()
        .and_then(|strategy| strategy.worker_category_spec())
        .and_then(|spec| spec.category_for(query.task_type, query.datasource))
        .unwrap_or(DEFAULT_CATEGORY);

    let scalers: Vec<&str> = config
        .auto_scalers_for(category)
        .map(|scaler| scaler.type_name())
        .collect();
    let scalers = if scalers.is_empty() {
        "none".to_string()
    } else {
        scalers.join(", ")
    };

    format!(
        "route {}/{}: category {category}, autoscalers: {scalers}",
        query.task_type, query.datasource
    )
}
