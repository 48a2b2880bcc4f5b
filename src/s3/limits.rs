//! AWS S3 service limits
//!
//! # References
//! - [S3 Quotas](https://docs.aws.amazon.com/AmazonS3/latest/userguide/qfacts.html)
//! - [Bucket naming rules](https://docs.aws.amazon.com/AmazonS3/latest/userguide/bucketnamingrules.html)

/// Maximum size of an object uploaded with a single PUT (5 GB as of 2024)
///
/// AWS limit: 5 GiB (5,368,709,120 bytes). Larger objects need a multipart
/// upload, which this crate does not do.
///
/// **Last verified**: 2024-01-01
pub const MAX_PUT_OBJECT_SIZE_BYTES: u64 = 5_368_709_120; // 5 GB

/// Bucket names must be between 3 and 63 characters long.
pub const MIN_BUCKET_NAME_LENGTH: usize = 3;
pub const MAX_BUCKET_NAME_LENGTH: usize = 63;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_values_match_constants() {
        assert_eq!(MAX_PUT_OBJECT_SIZE_BYTES, 5_368_709_120, "5 GB");
        assert_eq!(MIN_BUCKET_NAME_LENGTH, 3);
        assert_eq!(MAX_BUCKET_NAME_LENGTH, 63);
    }
}
