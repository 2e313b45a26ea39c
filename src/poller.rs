use crate::config::RuntimeConfig;
use crate::error::PollError;
use crate::post::{publish, random_location, PostPayload, PostQuery};
use crate::quote::fetch_random_quote;
use crate::util::sanitize::{for_display, sanitize_body, sanitize_title};
use anyhow::Result;
use reqwest::{Client, StatusCode};
use std::future::Future;
use tracing::{debug, error, info, warn};

/// What one successful cycle sent and how the destination answered.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub payload: PostPayload,
    pub query: PostQuery,
    pub status: StatusCode,
}

pub struct Poller {
    client: Client,
    cfg: RuntimeConfig,
}

impl Poller {
    pub fn new(cfg: RuntimeConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent("quote-poster/0.1")
            .gzip(true)
            .connect_timeout(cfg.connect_timeout)
            .timeout(cfg.request_timeout)
            .build()?;
        Ok(Poller { client, cfg })
    }

    /// Fetch one quote, clean it up, pin it to a random point and publish it.
    pub async fn run_cycle(&self) -> Result<CycleReport, PollError> {
        let quote =
            fetch_random_quote(&self.client, &self.cfg.source_url, self.cfg.max_body_bytes).await?;

        let title = sanitize_title(&quote.title, &quote.link);
        let body = sanitize_body(&quote.content);
        let location = random_location(&mut rand::rng());

        info!(
            title = %for_display(&title),
            body = %for_display(&body),
            "sending post"
        );

        let query = PostQuery::from(location);
        let payload = PostPayload::new(title, body, location);
        let status = publish(&self.client, &self.cfg.destination_url, &query, &payload).await?;

        // The destination's reply is reported, never treated as a failure.
        if status.is_success() {
            info!(
                %status,
                latitude = location.latitude,
                longitude = location.longitude,
                "post published"
            );
        } else {
            warn!(
                %status,
                latitude = location.latitude,
                longitude = location.longitude,
                "destination answered with an error status"
            );
        }
        Ok(CycleReport {
            payload,
            query,
            status,
        })
    }

    /// Run cycles until `shutdown` resolves, sleeping the configured interval
    /// between them. A failed cycle ends the loop when `exit_on_error` is set
    /// (the default); otherwise it is logged and the next cycle runs as usual.
    pub async fn run<F>(&self, shutdown: F) -> Result<(), PollError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut cycle: u64 = 0;

        loop {
            cycle += 1;
            tokio::select! {
                _ = &mut shutdown => {
                    info!(cycle, "shutdown requested mid-cycle");
                    return Ok(());
                }
                res = self.run_cycle() => match res {
                    Ok(report) => debug!(cycle, status = %report.status, "cycle complete"),
                    Err(err) if self.cfg.exit_on_error => {
                        error!(cycle, error = %err, "cycle failed, stopping");
                        return Err(err);
                    }
                    Err(err) => {
                        warn!(cycle, error = %err, "cycle failed, will retry next cycle")
                    }
                }
            }

            debug!(secs = self.cfg.interval.as_secs(), "sleeping until next cycle");
            tokio::select! {
                _ = &mut shutdown => {
                    info!(cycle, "shutdown requested");
                    return Ok(());
                }
                _ = tokio::time::sleep(self.cfg.interval) => {}
            }
        }
    }
}
