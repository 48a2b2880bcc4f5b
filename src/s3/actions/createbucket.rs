use crate::{
    s3::actions::{Action, response_error},
    s3::{S3, request, tools},
    storage::StorageError,
};
use bytes::Bytes;
use reqwest::Method;
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct CreateBucket<'a> {
    bucket: &'a str,
    location: Option<&'a str>,
}

impl<'a> CreateBucket<'a> {
    /// `location` overrides the region of the client
    #[must_use]
    pub const fn new(bucket: &'a str, location: Option<&'a str>) -> Self {
        Self { bucket, location }
    }

    // us-east-1 is the default location and must not be sent as a constraint
    fn configuration(&self, s3: &S3) -> String {
        let location = self.location.unwrap_or_else(|| s3.region().name());
        if location == "us-east-1" {
            return String::new();
        }

        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<CreateBucketConfiguration xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
    <LocationConstraint>{location}</LocationConstraint>
</CreateBucketConfiguration>"#
        )
    }

    /// # Errors
    ///
    /// Will return `Err` if can not make the request
    pub async fn request(&self, s3: &S3) -> Result<Option<String>, StorageError> {
        let xml = self.configuration(s3);

        let (url, headers) = self.sign(s3, &tools::sha256_hex(&xml), None, Some(xml.len()))?;
        let response = request::request(
            s3.http(),
            url,
            self.http_method(),
            &headers,
            Some(Bytes::from(xml)),
        )
        .await?;

        if response.status().is_success() {
            Ok(response
                .headers()
                .get("location")
                .and_then(|location| location.to_str().ok())
                .map(ToString::to_string))
        } else {
            Err(response_error(response).await)
        }
    }
}

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_CreateBucket.html>
impl Action for CreateBucket<'_> {
    fn http_method(&self) -> Method {
        Method::PUT
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
