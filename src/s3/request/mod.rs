use crate::storage::StorageError;
use bytes::Bytes;
use reqwest::{
    Client, Method, Response,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use std::collections::BTreeMap;
use url::Url;

fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap, StorageError> {
    headers
        .iter()
        .map(|(k, v)| {
            let name = k
                .parse::<HeaderName>()
                .map_err(|e| StorageError::InvalidRequest(format!("header {k}: {e}")))?;
            let value = v
                .parse::<HeaderValue>()
                .map_err(|e| StorageError::InvalidRequest(format!("header {k}: {e}")))?;
            Ok((name, value))
        })
        .collect()
}

/// # Errors
///
/// Will return `Err` if can not make the request
pub async fn request(
    client: &Client,
    url: Url,
    method: Method,
    headers: &BTreeMap<String, String>,
    body: Option<Bytes>,
) -> Result<Response, StorageError> {
    let headers = header_map(headers)?;

    log::debug!("{method} {url}");

    let request = client.request(method, url).headers(headers);
    let request = match body {
        Some(body) => request.body(body),
        None => request,
    };

    Ok(request.send().await?)
}
