use super::model::Quote;
use crate::error::PollError;
use futures_util::StreamExt;
use reqwest::Client;
use tracing::debug;
use url::Url;

/// GET `source`, decode the body as a JSON array of quotes and hand back the
/// first one. The source orders its results randomly, so the first element
/// is the random pick.
pub async fn fetch_random_quote(
    client: &Client,
    source: &Url,
    max_body_bytes: usize,
) -> Result<Quote, PollError> {
    let resp = client
        .get(source.clone())
        .send()
        .await
        .map_err(|e| PollError::network(source, e))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(PollError::Status {
            url: source.to_string(),
            status,
        });
    }

    let buf = read_capped(resp, source, max_body_bytes).await?;
    debug!(bytes = buf.len(), "quote source body received");

    let quotes: Vec<Quote> = serde_json::from_slice(&buf).map_err(|e| PollError::Decode {
        url: source.to_string(),
        source: e,
    })?;

    quotes.into_iter().next().ok_or_else(|| PollError::Empty {
        url: source.to_string(),
    })
}

async fn read_capped(
    resp: reqwest::Response,
    source: &Url,
    max: usize,
) -> Result<Vec<u8>, PollError> {
    let mut stream = resp.bytes_stream();
    let mut buf: Vec<u8> = Vec::new();
    while let Some(chunk) = stream.next().await {
        let c = chunk.map_err(|e| PollError::network(source, e))?;
        if buf.len() + c.len() > max {
            return Err(PollError::BodyTooLarge {
                url: source.to_string(),
                limit: max,
            });
        }
        buf.extend_from_slice(&c);
    }
    Ok(buf)
}
