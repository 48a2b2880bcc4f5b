use crate::{
    s3::actions::{Action, EMPTY_PAYLOAD_SHA256, object_path, response_error},
    s3::{S3, request, responses::ErrorResponse},
    storage::StorageError,
};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use quick_xml::de::from_str;
use reqwest::Method;
use std::collections::BTreeMap;

// the source key keeps its '/' separators
const COPY_SOURCE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

#[derive(Debug)]
pub struct CopyObject<'a> {
    bucket: &'a str,
    key: &'a str,
    copy_source: String,
}

impl<'a> CopyObject<'a> {
    #[must_use]
    pub fn new(src_bucket: &str, src_key: &str, bucket: &'a str, key: &'a str) -> Self {
        Self {
            bucket,
            key,
            copy_source: format!(
                "{src_bucket}/{}",
                utf8_percent_encode(src_key, COPY_SOURCE)
            ),
        }
    }

    /// A copy can fail after the service already answered 200, the error is
    /// then in the body.
    ///
    /// # Errors
    ///
    /// Will return `Err` if can not make the request
    pub async fn request(&self, s3: &S3) -> Result<(), StorageError> {
        let (url, headers) = self.sign(s3, EMPTY_PAYLOAD_SHA256, None, None)?;
        let response = request::request(s3.http(), url, self.http_method(), &headers, None).await?;

        if !response.status().is_success() {
            return Err(response_error(response).await);
        }

        let status = response.status().as_u16();
        let body = response.text().await?;
        match from_str::<ErrorResponse>(&body) {
            Ok(e) => Err(StorageError::Service {
                status,
                code: e.code,
                message: e.message,
            }),
            Err(_) => Ok(()),
        }
    }
}

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_CopyObject.html>
impl Action for CopyObject<'_> {
    fn http_method(&self) -> Method {
        Method::PUT
    }

    fn headers(&self) -> Option<BTreeMap<&str, &str>> {
        let mut map: BTreeMap<&str, &str> = BTreeMap::new();
        map.insert("x-amz-copy-source", &self.copy_source);
        Some(map)
    }

    fn query_pairs(&self) -> Option<BTreeMap<&str, &str>> {
        None
    }

    fn path(&self) -> Vec<&str> {
        object_path(self.bucket, self.key)
    }
}
