use super::model::{PostPayload, PostQuery};
use crate::error::PollError;
use reqwest::{Client, StatusCode};
use url::Url;

/// POST `payload` to `destination` with the location repeated in the query
/// string. Whatever status the destination answers with is handed back to
/// the caller; only transport failures are errors.
pub async fn publish(
    client: &Client,
    destination: &Url,
    query: &PostQuery,
    payload: &PostPayload,
) -> Result<StatusCode, PollError> {
    let resp = client
        .post(destination.clone())
        .query(query)
        .json(payload)
        .send()
        .await
        .map_err(|e| PollError::network(destination, e))?;

    Ok(resp.status())
}
