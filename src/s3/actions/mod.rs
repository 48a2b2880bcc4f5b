//! Actions
//! <https://docs.aws.amazon.com/AmazonS3/latest/API/API_Operations.html>

use crate::s3::S3;
use crate::s3::responses::ErrorResponse;
use crate::s3::signature::Signature;
use crate::storage::StorageError;
use quick_xml::de::from_str;
use reqwest::{Method, Response};
use std::collections::BTreeMap;
use url::Url;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_HeadBucket.html>
mod headbucket;
pub use self::headbucket::HeadBucket;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_CreateBucket.html>
mod createbucket;
pub use self::createbucket::CreateBucket;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_DeleteBucket.html>
mod deletebucket;
pub use self::deletebucket::DeleteBucket;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_HeadObject.html>
mod headobject;
pub use self::headobject::HeadObject;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_PutObject.html>
mod putobject;
pub use self::putobject::PutObject;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_GetObject.html>
mod getobject;
pub use self::getobject::GetObject;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_CopyObject.html>
mod copyobject;
pub use self::copyobject::CopyObject;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_DeleteObject.html>
mod deleteobject;
pub use self::deleteobject::DeleteObject;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_PutBucketAccelerateConfiguration.html>
mod putbucketaccelerate;
pub use self::putbucketaccelerate::PutBucketAccelerate;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_GetBucketAccelerateConfiguration.html>
mod getbucketaccelerate;
pub use self::getbucketaccelerate::GetBucketAccelerate;

pub const EMPTY_PAYLOAD_SHA256: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

pub trait Action {
    // headers to send in the request
    fn headers(&self) -> Option<BTreeMap<&str, &str>>;

    // method to use GET/PUT...
    fn http_method(&self) -> Method;

    // URL query pairs
    fn query_pairs(&self) -> Option<BTreeMap<&str, &str>>;

    // URL path, bucket first
    fn path(&self) -> Vec<&str>;

    /// # Errors
    ///
    /// Will return `Err` if the signature can not be created
    fn sign(
        &self,
        s3: &S3,
        hash_payload: &str,
        md5: Option<&str>,
        content_length: Option<usize>,
    ) -> Result<(Url, BTreeMap<String, String>), StorageError> {
        let mut url = s3.endpoint()?;

        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                StorageError::InvalidRequest(format!("cannot be base: {}", s3.region().endpoint()))
            })?;
            segments.pop_if_empty();
            for p in self.path() {
                segments.push(p);
            }
        }

        if let Some(pairs) = &self.query_pairs() {
            for (k, v) in pairs {
                url.query_pairs_mut().append_pair(k, v);
            }
        }

        let mut signature = Signature::new(s3, "s3", self.http_method());
        let headers = signature.sign(&url, hash_payload, md5, content_length, self.headers());
        Ok((url, headers))
    }
}

/// Object keys are sent one path segment per `/`
pub(crate) fn object_path<'a>(bucket: &'a str, key: &'a str) -> Vec<&'a str> {
    let mut path = vec![bucket];
    path.extend(key.split('/'));
    path
}

/// Turn a failed response into a [`StorageError::Service`], HEAD requests
/// carry no body so the status reason stands in for the code.
pub async fn response_error(response: Response) -> StorageError {
    let status = response.status();

    if let Some(rid) = response.headers().get("x-amz-request-id") {
        log::debug!("Request ID: {}", rid.to_str().unwrap_or_default());
    }

    let body = response.text().await.unwrap_or_default();

    match from_str::<ErrorResponse>(&body) {
        Ok(e) => StorageError::Service {
            status: status.as_u16(),
            code: e.code,
            message: e.message,
        },
        Err(_) => StorageError::Service {
            status: status.as_u16(),
            code: status
                .canonical_reason()
                .unwrap_or("Unknown")
                .replace(' ', ""),
            message: body,
        },
    }
}
