#[tokio::main]
async fn main() -> anyhow::Result<()> {
    sensor_relay::relay().await
}
