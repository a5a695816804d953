use {
    crate::message::Message,
    anyhow::{anyhow, Context, Result},
    log::debug,
    reqwest::{Client, StatusCode},
    serde::{Deserialize, Deserializer},
};

mod dht22;
mod ds18b20;

pub use {dht22::Dht22, ds18b20::Ds18b20};

/// Status line the sensor service reports for a successful read.
const STATUS_OK: &str = "200 OK";
/// Bare reason phrase, as written by services that only send `StatusText(200)`.
const STATUS_REASON_OK: &str = "OK";

pub trait Reading {
    fn status(&self) -> &str;

    /// Messages to forward for this reading, assuming it is valid.
    fn format(&self) -> Vec<Message>;

    fn is_ok(&self) -> bool {
        let status = self.status();
        status == STATUS_OK || status == STATUS_REASON_OK
    }

    fn messages(&self) -> Vec<Message> {
        if self.is_ok() {
            self.format()
        } else {
            debug!("Dropping reading with status {:?}", self.status());
            Vec::new()
        }
    }
}

/// One response of the sensor service.
#[derive(Debug, Default, Deserialize)]
pub struct SensorBatch {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dht22: Vec<Dht22>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ds18b20: Vec<Ds18b20>,
}

/// A sensor family with no probes attached is reported as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl SensorBatch {
    pub fn messages(&self) -> Vec<Message> {
        let dht22 = self.dht22.iter().flat_map(|reading| reading.messages());
        let ds18b20 = self.ds18b20.iter().flat_map(|reading| reading.messages());

        dht22.chain(ds18b20).collect()
    }
}

pub async fn fetch_readings(client: &Client, url: &str) -> Result<SensorBatch> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("cannot fetch URL {:?}", url))?;

    if response.status() != StatusCode::OK {
        return Err(anyhow!("unexpected http GET status: {}", response.status()));
    }

    let body = response
        .bytes()
        .await
        .with_context(|| format!("cannot read body of {:?}", url))?;

    serde_json::from_slice(&body).context("cannot decode JSON")
}
