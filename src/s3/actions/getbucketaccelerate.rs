use crate::{
    s3::actions::{Action, EMPTY_PAYLOAD_SHA256, response_error},
    s3::{S3, request, responses::AccelerateConfiguration},
    storage::StorageError,
};
use quick_xml::de::from_str;
use reqwest::Method;
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct GetBucketAccelerate<'a> {
    bucket: &'a str,
}

impl<'a> GetBucketAccelerate<'a> {
    #[must_use]
    pub const fn new(bucket: &'a str) -> Self {
        Self { bucket }
    }

    /// # Errors
    ///
    /// Will return `Err` if can not make the request or parse the response
    pub async fn request(&self, s3: &S3) -> Result<AccelerateConfiguration, StorageError> {
        let (url, headers) = self.sign(s3, EMPTY_PAYLOAD_SHA256, None, None)?;
        let response = request::request(s3.http(), url, self.http_method(), &headers, None).await?;

        if response.status().is_success() {
            let body = response.text().await?;
            from_str::<AccelerateConfiguration>(&body)
                .map_err(|e| StorageError::InvalidResponse(e.to_string()))
        } else {
            Err(response_error(response).await)
        }
    }
}

impl Action for GetBucketAccelerate<'_> {
    fn http_method(&self) -> Method {
        Method::GET
    }

    fn headers(&self) -> Option<BTreeMap<&str, &str>> {
        None
    }

    fn query_pairs(&self) -> Option<BTreeMap<&str, &str>> {
        let mut map: BTreeMap<&str, &str> = BTreeMap::new();
        map.insert("accelerate", "");
        Some(map)
    }

    fn path(&self) -> Vec<&str> {
        vec![self.bucket]
    }
}
