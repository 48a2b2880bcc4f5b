//! Bucket naming rules
//! <https://docs.aws.amazon.com/AmazonS3/latest/userguide/bucketnamingrules.html>

use crate::error::Error;
use crate::s3::limits::{MAX_BUCKET_NAME_LENGTH, MIN_BUCKET_NAME_LENGTH};
use regex::Regex;

/// Validate S3 bucket name
/// - Length: 3-63 characters
/// - Pattern: [a-z0-9][\.\-a-z0-9]{1,61}[a-z0-9]
/// - no adjacent periods, no period next to a dash
/// - not formatted as an IP address
///
/// # Errors
///
/// Will return `Err` if the name breaks one of the rules
pub fn validate_bucket_name(bucket: &str) -> Result<(), Error> {
    let invalid = |reason: &str| {
        Err(Error::Configuration(format!(
            "invalid bucket name [{bucket}], {reason}"
        )))
    };

    if bucket.len() < MIN_BUCKET_NAME_LENGTH || bucket.len() > MAX_BUCKET_NAME_LENGTH {
        return invalid("must be 3-63 characters long");
    }

    let bucket_regex = Regex::new(r"^[a-z0-9][\.\-a-z0-9]{1,61}[a-z0-9]$")
        .map_err(|e| Error::Configuration(e.to_string()))?;
    if !bucket_regex.is_match(bucket) {
        return invalid(
            "must use lowercase letters, numbers, periods and dashes, and begin and end with a letter or number",
        );
    }

    if bucket.contains("..") || bucket.contains(".-") || bucket.contains("-.") {
        return invalid("periods must not be adjacent to another period or a dash");
    }

    let ip_regex =
        Regex::new(r"^\d+\.\d+\.\d+\.\d+$").map_err(|e| Error::Configuration(e.to_string()))?;
    if ip_regex.is_match(bucket) {
        return invalid("must not be formatted as an IP address");
    }

    Ok(())
}
