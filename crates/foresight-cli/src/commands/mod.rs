//! CLI command implementations
//!
//! - `learn` - Learning run over a snapshot history directory
//! - `trend` - Trend fit for an ad-hoc series
//! - `config` - Effective configuration display

pub mod config;
pub mod learn;
pub mod trend;

// Re-export command functions for main.rs
pub use config::*;
pub use learn::*;
pub use trend::*;

/// Truncate a string to `max` characters, appending "..." when cut
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Format a 0..1 ratio as a percentage
pub fn percent(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}
