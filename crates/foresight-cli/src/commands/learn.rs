//! Learning run command

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use foresight_core::{Impact, Insight, LearningConfig, LearningEngine, LearningModel};
use tracing::info;

use super::{percent, truncate};
use crate::history::{self, SkippedFile};

/// Result of a learning run started from the CLI
pub struct LearnOutcome {
    pub model: LearningModel,
    pub skipped: Vec<SkippedFile>,
}

/// Load config and history, then run the engine
pub fn run_learning(config_path: Option<&Path>, history_dir: &Path) -> Result<LearnOutcome> {
    let (config, source) =
        LearningConfig::load(config_path).context("Failed to load learning config")?;
    info!(source = %source, "Loaded learning config");

    let history = history::read_history(history_dir)?;
    info!(
        files = history.files_read,
        skipped = history.skipped.len(),
        records = history.records.len(),
        "Read snapshot history"
    );

    let mut engine = LearningEngine::with_config(config);
    engine.run_records(history.records);
    let model = engine
        .into_model()
        .context("Learning run produced no model")?;

    Ok(LearnOutcome {
        model,
        skipped: history.skipped,
    })
}

pub fn cmd_learn(
    config_path: Option<&Path>,
    history_dir: &Path,
    output: Option<&Path>,
    json: bool,
) -> Result<()> {
    let outcome = run_learning(config_path, history_dir)?;

    if let Some(path) = output {
        write_model(&outcome.model, path)?;
        info!(path = %path.display(), "Wrote learning model");
    }

    if json {
        println!("{}", outcome.model.to_json()?);
    } else {
        print_summary(&outcome);
    }

    Ok(())
}

/// Write the model as pretty JSON
pub fn write_model(model: &LearningModel, path: &Path) -> Result<()> {
    let content = model.to_json()?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

fn impact_icon(impact: Impact) -> &'static str {
    match impact {
        Impact::Critical => "🔴",
        Impact::High => "🟠",
        Impact::Medium => "🟡",
        Impact::Low => "🟢",
    }
}

fn print_insight(insight: &Insight) {
    println!(
        "   {} {} ({} impact, {} confidence, {})",
        impact_icon(insight.impact),
        insight.title,
        insight.impact.as_str(),
        percent(insight.confidence.min(1.0)),
        insight.timeframe.as_str()
    );
    println!("      {}", truncate(&insight.description, 100));
    if let Some(first) = insight.recommendations.first() {
        println!("      → {}", first);
    }
}

fn print_summary(outcome: &LearnOutcome) {
    let model = &outcome.model;
    let summary = model.summary();

    println!();
    println!("🔮 Foresight Learning Run");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Model: {} (v{})", model.model_id, model.version);
    println!("   Snapshots analyzed: {}", model.snapshots_analyzed);

    if !model.warnings.is_empty() || !outcome.skipped.is_empty() {
        println!();
        println!(
            "⚠️  Skipped {} snapshot(s) and {} file(s):",
            model.warnings.len(),
            outcome.skipped.len()
        );
        for file in &outcome.skipped {
            println!("   {}: {}", file.path.display(), file.reason);
        }
        for warning in &model.warnings {
            println!("   {}", warning);
        }
    }

    if summary.is_quiet() {
        println!();
        println!("✅ Nothing to report. More history may reveal patterns.");
        println!();
        return;
    }

    if !summary.risk_alerts.is_empty() {
        println!();
        println!("🚨 Risk Alerts ({})", summary.risk_alerts.len());
        for insight in &summary.risk_alerts {
            print_insight(insight);
        }
    }

    if !summary.opportunities.is_empty() {
        println!();
        println!("💡 Opportunities ({})", summary.opportunities.len());
        for insight in &summary.opportunities {
            print_insight(insight);
        }
    }

    if !summary.outlook.is_empty() {
        println!();
        println!("📈 Trends & Anomalies ({})", summary.outlook.len());
        for insight in &summary.outlook {
            print_insight(insight);
        }
    }

    if !summary.patterns.is_empty() {
        println!();
        println!("🧩 Patterns ({})", summary.patterns.len());
        for pattern in &summary.patterns {
            println!(
                "   {:<40} {:>8.2}  {}",
                truncate(&pattern.pattern_id, 40),
                pattern.confidence,
                pattern.pattern_type.as_str()
            );
        }
    }

    let score = model.accuracy_score();
    println!();
    println!(
        "🎯 Self-reported accuracy: {} ({} of {} predictions above the confidence threshold)",
        percent(score.accuracy),
        score.correct_predictions,
        score.total_predictions
    );
    println!();
}
