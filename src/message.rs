use serde::{Deserialize, Serialize};

pub const HOME_SENSORS_HUMIDITY: &str = "home/sensors/humidity";
pub const HOME_SENSORS_TEMPERATURE: &str = "home/sensors/temperature";

/// Measurement series every payload is written to.
pub const TABLE: &str = "climate";

/// Exactly once delivery, as requested from the broker behind the publisher.
pub const QOS: u8 = 2;

/// Envelope accepted by the publisher service's `/publish` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub topic: String,
    pub qos: u8,
    pub retained: bool,
    pub payload: String,
}

impl Message {
    pub fn new(topic: &str, payload: String) -> Self {
        Message {
            topic: topic.to_string(),
            qos: QOS,
            retained: false,
            payload,
        }
    }
}
