use {
    anyhow::{anyhow, Context, Result},
    std::{env, time::Duration},
};

pub const SENSORS_HOST: &str = "SENSORS_HOST";
pub const MQTT_SENDER_HOST: &str = "MQTT_SENDER_HOST";
pub const HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";

/// Time between two scans.
pub const INTERVAL: Duration = Duration::from_secs(45);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct Config {
    /// `host:port` of the sensor service.
    pub sensors_host: String,
    /// `host:port` of the publisher service.
    pub sender_host: String,
    pub interval: Duration,
    /// Applied to every outbound request.
    pub timeout: Duration,
}

impl Config {
    pub fn new(sensors_host: impl Into<String>, sender_host: impl Into<String>) -> Self {
        Config {
            sensors_host: sensors_host.into(),
            sender_host: sender_host.into(),
            interval: INTERVAL,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let sensors_host = lookup(SENSORS_HOST)
            .ok_or_else(|| anyhow!("Failed to find {} environment variable", SENSORS_HOST))?;
        let sender_host = lookup(MQTT_SENDER_HOST)
            .ok_or_else(|| anyhow!("Failed to find {} environment variable", MQTT_SENDER_HOST))?;

        let mut config = Config::new(sensors_host, sender_host);

        if let Some(secs) = lookup(HTTP_TIMEOUT_SECS) {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("Invalid {} value {:?}", HTTP_TIMEOUT_SECS, secs))?;
            if secs == 0 {
                return Err(anyhow!("{} must be greater than zero", HTTP_TIMEOUT_SECS));
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn sensors_url(&self) -> String {
        format!("http://{}/", self.sensors_host)
    }

    pub fn publish_url(&self) -> String {
        format!("http://{}/publish", self.sender_host)
    }
}
