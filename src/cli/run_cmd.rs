//! `harvester run` — the full harvest workflow.

use crate::cli::output;
use crate::config::Config;
use crate::harvest;
use anyhow::Result;
use std::path::Path;

/// Run the run command.
pub async fn run(config_path: &Path, dry_run: bool) -> Result<()> {
    let config = Config::load(config_path)?;
    let summary = harvest::run(&config, dry_run).await?;

    if !output::is_quiet() {
        println!("Harvest complete.");
        println!("  courses: {}", summary.courses);
        println!("  items:   {}", summary.items);
        println!(
            "  relay:   {} sent, {} skipped, {} failed",
            summary.relay.sent, summary.relay.skipped, summary.relay.failed
        );
    }

    Ok(())
}
