//! `recordflow check`: validate a config file without starting the server.

use std::path::Path;

use serde::Serialize;

use recordflow_core::registry::PairRegistry;
use recordflow_infra::config::load_config;
use recordflow_types::pair::IntegrationPair;

/// Secret-free view of a pair for display.
#[derive(Debug, Serialize)]
pub struct PairSummary {
    pub app_id: String,
    pub update_app_id: String,
    /// `workflow_key <- field_code`
    pub inputs: Vec<String>,
    /// `field_code <- workflow_key`
    pub outputs: Vec<String>,
}

impl From<&IntegrationPair> for PairSummary {
    fn from(pair: &IntegrationPair) -> Self {
        Self {
            app_id: pair.app_id.to_string(),
            update_app_id: pair.target_app_id().to_string(),
            inputs: pair
                .field_map_in
                .iter()
                .map(|(key, code)| format!("{key} <- {code}"))
                .collect(),
            outputs: pair
                .field_map_out
                .iter()
                .map(|(code, key)| format!("{code} <- {key}"))
                .collect(),
        }
    }
}

/// Load the config, build the registry and print what would be served.
pub async fn check_config(path: &Path, json: bool) -> anyhow::Result<()> {
    let config = load_config(path).await?;
    let base_url = config.records.base_url.clone();
    let endpoint = config.workflow.endpoint.clone();
    let registry = PairRegistry::from_pairs(config.pairs)?;
    let summaries: Vec<PairSummary> = registry.pairs().into_iter().map(PairSummary::from).collect();

    if json {
        let report = serde_json::json!({
            "config": path.display().to_string(),
            "records_base_url": base_url,
            "workflow_endpoint": endpoint,
            "retry": config.retry,
            "pairs": summaries,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {} is valid",
        console::style("✓").green(),
        console::style(path.display()).cyan()
    );
    println!("  records API:     {base_url}");
    println!("  workflow engine: {endpoint}");
    println!(
        "  retry:           {} attempts, {} ms apart, {} ms timeout",
        config.retry.max_attempts, config.retry.delay_ms, config.retry.timeout_ms
    );
    println!();
    for summary in &summaries {
        println!(
            "  app {} {} app {}",
            console::style(&summary.app_id).bold(),
            console::style("→").dim(),
            summary.update_app_id
        );
        for input in &summary.inputs {
            println!("    in   {input}");
        }
        for output in &summary.outputs {
            println!("    out  {output}");
        }
    }
    if summaries.is_empty() {
        println!("  {}", console::style("no pairs configured").yellow());
    }
    println!();

    Ok(())
}
