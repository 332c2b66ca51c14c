//! `harvester courses` — log in and list enrolled courses without
//! scraping or relaying. Useful for checking credentials and the
//! exclusion list before a real run.

use crate::config::Config;
use crate::harvest;
use crate::portal::client::PortalClient;
use crate::portal::courses::short_code;
use anyhow::Result;
use std::path::Path;

/// Run the courses command.
pub async fn run(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    let client = PortalClient::new(config.harvest.timeout_ms)?;
    let courses = harvest::enumerate_courses(&client, &config).await?;

    if courses.is_empty() {
        println!("No courses found.");
        return Ok(());
    }

    for course in &courses {
        let code = short_code(&course.name).unwrap_or_else(|_| "??".to_string());
        println!("{code:<10} {}  ({})", course.name, course.url);
    }

    Ok(())
}
