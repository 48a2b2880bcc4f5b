use crate::{
    s3::actions::{Action, response_error},
    s3::{S3, request, tools},
    storage::StorageError,
};
use bytes::Bytes;
use reqwest::Method;
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct PutBucketAccelerate<'a> {
    bucket: &'a str,
    enabled: bool,
}

impl<'a> PutBucketAccelerate<'a> {
    #[must_use]
    pub const fn new(bucket: &'a str, enabled: bool) -> Self {
        Self { bucket, enabled }
    }

    const fn status(&self) -> &'static str {
        if self.enabled { "Enabled" } else { "Suspended" }
    }

    fn configuration(&self) -> String {
        format!(
            r#"<AccelerateConfiguration xmlns="http://s3.amazonaws.com/doc/2006-03-01/"><Status>{}</Status></AccelerateConfiguration>"#,
            self.status()
        )
    }

    /// # Errors
    ///
    /// Will return `Err` if can not make the request
    pub async fn request(&self, s3: &S3) -> Result<(), StorageError> {
        let xml = self.configuration();

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
            Ok(())
        } else {
            Err(response_error(response).await)
        }
    }
}

impl Action for PutBucketAccelerate<'_> {
    fn http_method(&self) -> Method {
        Method::PUT
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method() {
        let action = PutBucketAccelerate::new("bucket", true);
        assert_eq!(Method::PUT, action.http_method());
    }

    #[test]
    fn test_configuration() {
        assert!(
            PutBucketAccelerate::new("bucket", true)
                .configuration()
                .contains("<Status>Enabled</Status>")
        );
        assert!(
            PutBucketAccelerate::new("bucket", false)
                .configuration()
                .contains("<Status>Suspended</Status>")
        );
    }
}
