use {
    anyhow::Result,
    log::{debug, info, warn},
    reqwest::Client,
    tokio::time::{interval, MissedTickBehavior},
};

pub mod config;
pub mod message;
pub mod publisher;
pub mod sensors;

pub use {
    config::Config,
    message::Message,
    publisher::publish,
    sensors::{fetch_readings, SensorBatch},
};

/// Outcome of a single scan cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    pub fetched: bool,
    pub sent: usize,
    pub failed: usize,
}

pub struct Relay {
    config: Config,
    client: Client,
}

impl Relay {
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Relay { config, client })
    }

    /// Fetches the sensors once and forwards every valid reading. Never fails; errors are logged.
    pub async fn scan(&self) -> ScanSummary {
        let mut summary = ScanSummary::default();

        let batch = match fetch_readings(&self.client, &self.config.sensors_url()).await {
            Ok(batch) => batch,
            Err(e) => {
                warn!("Scan skipped: {:#}", e);
                return summary;
            }
        };
        summary.fetched = true;

        let url = self.config.publish_url();
        for message in batch.messages() {
            match publish(&self.client, &url, &message).await {
                Ok(()) => {
                    debug!("Published {:?} to {}", message.payload, message.topic);
                    summary.sent += 1;
                }
                Err(e) => {
                    warn!("Failed to publish {:?}: {:#}", message.payload, e);
                    summary.failed += 1;
                }
            }
        }

        summary
    }

    /// Scans immediately, then once per interval, forever. A scan that overruns the
    /// interval delays the next one instead of overlapping it.
    pub async fn run(&self) -> Result<()> {
        let mut interval = interval(self.config.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            let summary = self.scan().await;
            if summary.fetched {
                info!("Scan complete: {} sent, {} failed", summary.sent, summary.failed);
            }
        }
    }
}

pub async fn relay() -> Result<()> {
    pretty_env_logger::init();
    color_backtrace::install();

    let config = Config::from_env()?;
    info!(
        "Relaying {} to {} every {:?}",
        config.sensors_url(),
        config.publish_url(),
        config.interval
    );

    Relay::new(config)?.run().await
}
