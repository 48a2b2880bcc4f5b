use serde::Deserialize;

/// Error document returned by the service
#[derive(Deserialize, Debug)]
pub struct ErrorResponse {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message", default)]
    pub message: String,
    #[serde(rename = "Resource")]
    pub resource: Option<String>,
    #[serde(rename = "RequestId")]
    pub request_id: Option<String>,
}

/// `GetBucketAccelerateConfiguration` result, `Status` is missing when
/// acceleration was never configured
#[derive(Deserialize, Debug, Default)]
pub struct AccelerateConfiguration {
    #[serde(rename = "Status")]
    pub status: Option<String>,
}
