use crate::{
    s3::actions::{Action, EMPTY_PAYLOAD_SHA256, response_error},
    s3::{S3, request},
    storage::StorageError,
};
use reqwest::Method;
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct DeleteBucket<'a> {
    bucket: &'a str,
}

impl<'a> DeleteBucket<'a> {
    #[must_use]
    pub const fn new(bucket: &'a str) -> Self {
        Self { bucket }
    }

    /// # Errors
    ///
    /// Will return `Err` if can not make the request
    pub async fn request(&self, s3: &S3) -> Result<(), StorageError> {
        let (url, headers) = self.sign(s3, EMPTY_PAYLOAD_SHA256, None, None)?;
        let response = request::request(s3.http(), url, self.http_method(), &headers, None).await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(response_error(response).await)
        }
    }
}

// https://docs.aws.amazon.com/AmazonS3/latest/API/API_DeleteBucket.html
impl Action for DeleteBucket<'_> {
    fn http_method(&self) -> Method {
        Method::DELETE
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
