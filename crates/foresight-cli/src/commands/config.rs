//! Configuration display command

use std::path::Path;

use anyhow::{Context, Result};
use foresight_core::config::default_config_path;
use foresight_core::LearningConfig;

pub fn cmd_config(config_path: Option<&Path>) -> Result<()> {
    let (config, source) =
        LearningConfig::load(config_path).context("Failed to load learning config")?;

    println!();
    println!("⚙️  Learning Configuration");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Source: {}", source);
    if config_path.is_none() {
        if let Some(path) = default_config_path() {
            println!("   Override path: {}", path.display());
        }
    }

    println!();
    println!("   [patterns]");
    println!("   trend_threshold            {}", config.trend_threshold);
    println!("   min_correlation_count      {}", config.min_correlation_count);
    println!("   min_critical_count         {}", config.min_critical_count);
    println!("   slow_task_threshold_ms     {}", config.slow_task_threshold_ms);
    println!("   min_slow_observations      {}", config.min_slow_observations);
    println!("   savings_ratio              {}", config.savings_ratio);
    println!();
    println!("   [insights]");
    println!("   anomaly_threshold          {}", config.anomaly_threshold);
    println!("   anomaly_critical_threshold {}", config.anomaly_critical_threshold);
    println!("   opportunity_probability    {}", config.opportunity_probability);
    println!("   trend_probability          {}", config.trend_probability);
    println!("   anomaly_probability        {}", config.anomaly_probability);
    println!();
    println!("   [accuracy]");
    println!("   high_confidence_threshold  {}", config.high_confidence_threshold);
    println!();

    Ok(())
}
