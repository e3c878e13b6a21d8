// ABOUTME: Command implementations for the sweeper CLI
// ABOUTME: Handles execution of the delete, copy and list commands

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use super::config::Config;
use crate::engine::{ProgressLog, TracingLog};
use crate::ops;

/// Delete every object under `reference`
pub async fn delete(reference: String, parallel: Option<usize>, config: &Config) -> Result<()> {
    let parallelism = parallel.unwrap_or(config.parallelism);
    info!("Deleting {} (parallelism: {})", reference, parallelism);

    let log: Arc<dyn ProgressLog> = Arc::new(TracingLog);
    ops::delete(&reference, parallelism, &config.storage, log)
        .await
        .map_err(|e| anyhow::anyhow!("Delete of {} failed: {}", reference, e))?;

    info!("Delete completed");
    Ok(())
}

/// Copy every object under `source` to `destination`
pub async fn copy(
    source: String,
    destination: String,
    parallel: Option<usize>,
    config: &Config,
) -> Result<()> {
    let parallelism = parallel.unwrap_or(config.parallelism);
    info!(
        "Copying {} to {} (parallelism: {})",
        source, destination, parallelism
    );

    let log: Arc<dyn ProgressLog> = Arc::new(TracingLog);
    ops::copy(&source, &destination, parallelism, &config.storage, log)
        .await
        .map_err(|e| anyhow::anyhow!("Copy from {} to {} failed: {}", source, destination, e))?;

    info!("Copy completed");
    Ok(())
}

/// Print the objects under `reference`
pub async fn list(reference: String, json: bool, config: &Config) -> Result<()> {
    let objects = ops::list(&reference, &config.storage)
        .await
        .map_err(|e| anyhow::anyhow!("Listing of {} failed: {}", reference, e))?;

    if json {
        let json_content = serde_json::to_string_pretty(&objects)
            .map_err(|e| anyhow::anyhow!("Failed to serialize listing to JSON: {}", e))?;
        println!("{}", json_content);
    } else {
        for object in &objects {
            println!("{}", object);
        }
    }

    info!("Listed {} objects", objects.len());
    Ok(())
}
