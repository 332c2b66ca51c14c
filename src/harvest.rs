// Copyright 2026 Harvester Contributors
// SPDX-License-Identifier: Apache-2.0

//! The linear harvest workflow:
//! authenticate → enumerate courses → scrape checklists → relay.

use crate::config::{Config, MissingPolicy};
use crate::error::HarvestError;
use crate::portal::client::PortalClient;
use crate::portal::courses::{self, Course};
use crate::portal::{auth, checklist};
use crate::relay::{Relay, RelaySummary};
use tracing::{info, warn};

/// Sidebar link that leads to the course list after login.
const MY_COURSES_LABEL: &str = "My courses";

/// Counts reported at the end of a run.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunSummary {
    pub courses: usize,
    pub items: usize,
    pub relay: RelaySummary,
}

/// Log in and fetch the enumerated course list. Shared by the full run
/// and the `courses` diagnostic subcommand.
pub async fn enumerate_courses(
    client: &PortalClient,
    config: &Config,
) -> Result<Vec<Course>, HarvestError> {
    let landing = auth::login(client, &config.uopeople).await?;

    info!("getting the list of courses");
    let courses_url = courses::find_link_by_text(&landing.body, &landing.url, MY_COURSES_LABEL)
        .ok_or_else(|| {
            HarvestError::Navigation(format!("no {MY_COURSES_LABEL:?} link after login"))
        })?;

    let courses_page = client.get(&courses_url).await?;
    Ok(courses::parse_courses(
        &courses_page.body,
        &courses_page.url,
        &config.harvest.excluded_courses,
    ))
}

/// Run the whole workflow. `dry_run` forces skip-sending regardless of
/// config. Fatal errors abort; per-course problems obey `on_missing`.
pub async fn run(config: &Config, dry_run: bool) -> Result<RunSummary, HarvestError> {
    if config.ifttt.skip_sending || dry_run {
        warn!("skip_sending is enabled: tasks WILL NOT be sent to the webhook");
    }

    let client = PortalClient::new(config.harvest.timeout_ms)?;
    let courses = enumerate_courses(&client, config).await?;
    info!("found {} courses", courses.len());

    info!("getting course assignments");
    let mut assignments: Vec<String> = Vec::new();
    for course in &courses {
        match scrape_one(&client, course).await {
            Ok(items) => assignments.extend(items),
            Err(e) if e.is_skippable() && config.harvest.on_missing == MissingPolicy::Skip => {
                warn!("skipping course {:?}: {e}", course.name);
            }
            Err(e) => return Err(e),
        }
    }
    info!("collected {} assignment items", assignments.len());

    info!("relaying tasks to the webhook");
    let relay = Relay::new(&config.ifttt, dry_run, config.harvest.timeout_ms)?;
    let summary = relay.send_all(&assignments).await;

    info!("done");
    Ok(RunSummary {
        courses: courses.len(),
        items: assignments.len(),
        relay: summary,
    })
}

async fn scrape_one(client: &PortalClient, course: &Course) -> Result<Vec<String>, HarvestError> {
    let code = courses::short_code(&course.name)?;
    info!("working on {code}");
    checklist::scrape_course(client, course, &code).await
}
