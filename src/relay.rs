//! IFTTT Maker webhook relay.
//!
//! Items are sent strictly in order, one POST each, body
//! `{"value1": "<item>"}`. A non-200 answer fails that item alone;
//! the rest still go out. No retries and no dedup — the run is meant
//! to be re-run by hand when something goes wrong.

use crate::config::WebhookConfig;
use crate::error::HarvestError;
use std::time::Duration;
use tracing::{error, info};

/// Outcome counts for the relay phase.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RelaySummary {
    pub sent: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Webhook sender, carrying the resolved trigger endpoint.
pub struct Relay {
    client: reqwest::Client,
    endpoint: String,
    dry_run: bool,
}

/// Build the Maker trigger URL for an event/key pair.
pub fn trigger_endpoint(base_url: &str, event: &str, key: &str) -> String {
    format!(
        "{}/trigger/{event}/with/key/{key}",
        base_url.trim_end_matches('/')
    )
}

impl Relay {
    /// Create a relay from webhook config. `dry_run` forces skip-sending
    /// even when the config leaves it off.
    pub fn new(cfg: &WebhookConfig, dry_run: bool, timeout_ms: u64) -> Result<Self, HarvestError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self {
            client,
            endpoint: trigger_endpoint(
                &cfg.maker_base_url,
                &cfg.maker_channel_event,
                &cfg.maker_channel_key,
            ),
            dry_run: dry_run || cfg.skip_sending,
        })
    }

    /// Send one item. 200 means sent; anything else is a per-item failure.
    async fn send_one(&self, item: &str) -> Result<(), HarvestError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "value1": item }))
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status == 200 {
            Ok(())
        } else {
            Err(HarvestError::Relay {
                status,
                item: item.to_string(),
            })
        }
    }

    /// Relay every item in order, tolerating per-item failures.
    pub async fn send_all(&self, items: &[String]) -> RelaySummary {
        let mut summary = RelaySummary::default();

        for item in items {
            if self.dry_run {
                info!("would have sent: {item:?} (sending skipped)");
                summary.skipped += 1;
                continue;
            }

            match self.send_one(item).await {
                Ok(()) => {
                    info!("sent: {item:?}");
                    summary.sent += 1;
                }
                Err(e) => {
                    error!("error sending {item:?}: {e}");
                    summary.failed += 1;
                }
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_the_maker_trigger_url() {
        assert_eq!(
            trigger_endpoint("https://maker.ifttt.com", "course_task", "abc123"),
            "https://maker.ifttt.com/trigger/course_task/with/key/abc123"
        );
        // trailing slash on the base must not double up
        assert_eq!(
            trigger_endpoint("http://localhost:9999/", "e", "k"),
            "http://localhost:9999/trigger/e/with/key/k"
        );
    }

    #[test]
    fn config_skip_sending_forces_dry_run() {
        let cfg = WebhookConfig {
            maker_channel_event: "e".into(),
            maker_channel_key: "k".into(),
            skip_sending: true,
            maker_base_url: "https://maker.ifttt.com".into(),
        };
        let relay = Relay::new(&cfg, false, 5_000).unwrap();
        assert!(relay.dry_run);
    }
}
