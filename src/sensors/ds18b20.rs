use {
    crate::{
        message::{Message, HOME_SENSORS_TEMPERATURE, TABLE},
        sensors::Reading,
    },
    serde::Deserialize,
};

/// One-wire temperature probe; `dec` is the configured resolution, e.g. `12bit`.
#[derive(Debug, Clone, Deserialize)]
pub struct Ds18b20 {
    pub pin: i32,
    pub temperature: f32,
    pub dec: String,
    pub status: String,
}

impl Reading for Ds18b20 {
    fn status(&self) -> &str {
        &self.status
    }

    fn format(&self) -> Vec<Message> {
        vec![Message::new(
            HOME_SENSORS_TEMPERATURE,
            format!(
                "{},pin={},dec={} value={:.2}",
                TABLE, self.pin, self.dec, self.temperature
            ),
        )]
    }
}
