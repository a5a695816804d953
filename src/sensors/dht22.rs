use {
    crate::{
        message::{Message, HOME_SENSORS_HUMIDITY, HOME_SENSORS_TEMPERATURE, TABLE},
        sensors::Reading,
    },
    serde::Deserialize,
};

/// Combined humidity and temperature sensor.
#[derive(Debug, Clone, Deserialize)]
pub struct Dht22 {
    pub pin: i32,
    pub temperature: f32,
    pub humidity: f32,
    pub status: String,
}

impl Reading for Dht22 {
    fn status(&self) -> &str {
        &self.status
    }

    fn format(&self) -> Vec<Message> {
        vec![
            Message::new(
                HOME_SENSORS_TEMPERATURE,
                format!("{},pin={} value={:.2}", TABLE, self.pin, self.temperature),
            ),
            Message::new(
                HOME_SENSORS_HUMIDITY,
                format!("{},pin={} value={:.2}", TABLE, self.pin, self.humidity),
            ),
        ]
    }
}
