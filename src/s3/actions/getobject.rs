use crate::{
    s3::actions::{Action, EMPTY_PAYLOAD_SHA256, object_path, response_error},
    s3::{S3, request},
    storage::{ObjectBody, StorageError},
};
use futures::TryStreamExt;
use reqwest::Method;
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct GetObject<'a> {
    bucket: &'a str,
    key: &'a str,
}

impl<'a> GetObject<'a> {
    #[must_use]
    pub const fn new(bucket: &'a str, key: &'a str) -> Self {
        Self { bucket, key }
    }

    /// The body is not read here, it streams from the returned handle.
    ///
    /// # Errors
    ///
    /// Will return `Err` if can not make the request
    pub async fn request(&self, s3: &S3) -> Result<ObjectBody, StorageError> {
        let (url, headers) = self.sign(s3, EMPTY_PAYLOAD_SHA256, None, None)?;
        let response = request::request(s3.http(), url, self.http_method(), &headers, None).await?;

        if response.status().is_success() {
            Ok(ObjectBody::from_stream(
                response.bytes_stream().map_err(StorageError::from),
            ))
        } else {
            Err(response_error(response).await)
        }
    }
}

// https://docs.aws.amazon.com/AmazonS3/latest/API/API_GetObject.html
impl Action for GetObject<'_> {
    fn http_method(&self) -> Method {
        Method::GET
    }

    fn headers(&self) -> Option<BTreeMap<&str, &str>> {
        None
    }

    fn query_pairs(&self) -> Option<BTreeMap<&str, &str>> {
        None
    }

    fn path(&self) -> Vec<&str> {
        object_path(self.bucket, self.key)
    }
}
