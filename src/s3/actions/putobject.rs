use crate::{
    s3::actions::{Action, object_path, response_error},
    s3::{S3, limits::MAX_PUT_OBJECT_SIZE_BYTES, request, tools},
    storage::StorageError,
};
use bytes::Bytes;
use reqwest::Method;
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct PutObject<'a> {
    bucket: &'a str,
    key: &'a str,
    content_type: &'a str,
}

impl<'a> PutObject<'a> {
    #[must_use]
    pub const fn new(bucket: &'a str, key: &'a str, content_type: &'a str) -> Self {
        Self {
            bucket,
            key,
            content_type,
        }
    }

    /// Single PUT, the payload is hashed up front for the signature and
    /// `Content-MD5`.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the payload is too big or can not make the request
    pub async fn request(&self, s3: &S3, data: Bytes) -> Result<Option<String>, StorageError> {
        if data.len() as u64 > MAX_PUT_OBJECT_SIZE_BYTES {
            return Err(StorageError::InvalidRequest(format!(
                "object size {} exceeds the single PUT limit of {MAX_PUT_OBJECT_SIZE_BYTES} bytes",
                data.len()
            )));
        }

        let sha = tools::sha256_hex(&data);
        let md5 = tools::base64_md5(&data);

        let (url, headers) = self.sign(s3, &sha, Some(&md5), Some(data.len()))?;
        let response =
            request::request(s3.http(), url, self.http_method(), &headers, Some(data)).await?;

        if response.status().is_success() {
            Ok(response
                .headers()
                .get("ETag")
                .and_then(|etag| etag.to_str().ok())
                .map(ToString::to_string))
        } else {
            Err(response_error(response).await)
        }
    }
}

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_PutObject.html>
impl Action for PutObject<'_> {
    fn http_method(&self) -> Method {
        Method::PUT
    }

    fn headers(&self) -> Option<BTreeMap<&str, &str>> {
        let mut map: BTreeMap<&str, &str> = BTreeMap::new();
        map.insert("content-type", self.content_type);
        Some(map)
    }

    fn query_pairs(&self) -> Option<BTreeMap<&str, &str>> {
        None
    }

    fn path(&self) -> Vec<&str> {
        object_path(self.bucket, self.key)
    }
}
