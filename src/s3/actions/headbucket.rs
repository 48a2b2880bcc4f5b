use crate::{
    s3::actions::{Action, EMPTY_PAYLOAD_SHA256, response_error},
    s3::{S3, request},
    storage::StorageError,
};
use reqwest::{Method, StatusCode};
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct HeadBucket<'a> {
    bucket: &'a str,
}

impl<'a> HeadBucket<'a> {
    #[must_use]
    pub const fn new(bucket: &'a str) -> Self {
        Self { bucket }
    }

    /// A bucket owned by someone else answers 403, it still exists.
    ///
    /// # Errors
    ///
    /// Will return `Err` if can not make the request
    pub async fn request(&self, s3: &S3) -> Result<bool, StorageError> {
        let (url, headers) = self.sign(s3, EMPTY_PAYLOAD_SHA256, None, None)?;
        let response = request::request(s3.http(), url, self.http_method(), &headers, None).await?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::FORBIDDEN => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(response_error(response).await),
        }
    }
}

impl Action for HeadBucket<'_> {
    fn http_method(&self) -> Method {
        Method::HEAD
    }

    fn headers(&self) -> Option<BTreeMap<&str, &str>> {
        None
    }

    fn query_pairs(&self) -> Option<BTreeMap<&str, &str>> {
        None
    }

    fn path(&self) -> Vec<&str> {
        vec![self.bucket]
    }
}
