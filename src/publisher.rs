use {
    crate::message::Message,
    anyhow::{anyhow, Context, Result},
    reqwest::{header::CONTENT_TYPE, Client, StatusCode},
};

const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

/// Hands one message to the publisher service. Success is a bare `204 No Content`.
pub async fn publish(client: &Client, url: &str, message: &Message) -> Result<()> {
    let body = serde_json::to_vec(message)
        .with_context(|| format!("cannot encode message for {:?}", url))?;

    let response = client
        .post(url)
        .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
        .body(body)
        .send()
        .await
        .with_context(|| format!("cannot fetch URL {:?}", url))?;

    if response.status() != StatusCode::NO_CONTENT {
        return Err(anyhow!("unexpected http POST status: {}", response.status()));
    }

    Ok(())
}
