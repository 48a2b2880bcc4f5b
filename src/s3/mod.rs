pub mod actions;
pub mod client;
pub mod credentials;
pub mod limits;
pub mod region;
pub mod request;
pub mod responses;
pub mod signature;
pub mod tools;
pub use self::{credentials::Credentials, region::Region, signature::Signature};

use crate::storage::StorageError;
use url::Url;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug)]
pub struct S3 {
    // AWS Credentials
    credentials: Credentials,
    // AWS Region
    region: Region,
    // shared connection pool
    client: reqwest::Client,
}

// Amazon S3 API Reference
// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_Operations.html>
impl S3 {
    #[must_use]
    pub fn new(credentials: Credentials, region: Region) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()
            .unwrap_or_default();

        Self {
            credentials,
            region,
            client,
        }
    }

    #[must_use]
    pub const fn region(&self) -> &Region {
        &self.region
    }

    /// Base URL, path-style: buckets and keys are appended as path segments.
    /// Custom endpoints may carry their own scheme, `https` otherwise.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the endpoint is not a valid URL
    pub fn endpoint(&self) -> Result<Url, StorageError> {
        let endpoint = self.region.endpoint();
        let endpoint = if endpoint.contains("://") {
            endpoint
        } else {
            format!("https://{endpoint}")
        };

        Url::parse(&endpoint).map_err(|e| {
            StorageError::InvalidRequest(format!("invalid endpoint {endpoint}: {e}"))
        })
    }

    pub(crate) const fn http(&self) -> &reqwest::Client {
        &self.client
    }
}
