use crate::error::Error;
use crate::s3::Region;
use crate::sender::{
    action::{ActionKind, parse_actions},
    bucket_name::validate_bucket_name,
    params::{DESTINATION_BUCKET_NAME, DESTINATION_FILE_NAME, DESTINATION_OBJECT_KEY, FILE},
};
use serde::Deserialize;
use std::collections::BTreeSet;

pub const DEFAULT_CLIENT_REGION: &str = "eu-west-1";

fn default_client_region() -> String {
    DEFAULT_CLIENT_REGION.to_string()
}

/// Static part of a sender, checked once when the sender is built.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderConfig {
    #[serde(default)]
    pub name: String,

    /// Comma or whitespace separated action list
    pub actions: String,

    pub bucket_name: String,

    #[serde(default)]
    pub destination_bucket_name: Option<String>,

    #[serde(default = "default_client_region")]
    pub client_region: String,

    /// Location of buckets created with global bucket access
    #[serde(default)]
    pub bucket_region: Option<String>,

    #[serde(default)]
    pub accelerate_mode_enabled: bool,

    #[serde(default)]
    pub force_global_bucket_access_enabled: bool,

    /// Create missing buckets for upload and copy
    #[serde(default)]
    pub bucket_creation_enabled: bool,

    /// createBucket returns an existing bucket instead of failing
    #[serde(default)]
    pub tolerate_existing_bucket: bool,

    /// Session key of downloaded content, the object key when unset
    #[serde(default)]
    pub store_result_in_session_key: Option<String>,

    /// Names of the parameters invocations will supply
    #[serde(default)]
    pub parameters: BTreeSet<String>,
}

impl SenderConfig {
    #[must_use]
    pub fn new(actions: &str, bucket_name: &str) -> Self {
        Self {
            name: String::new(),
            actions: actions.to_string(),
            bucket_name: bucket_name.to_string(),
            destination_bucket_name: None,
            client_region: default_client_region(),
            bucket_region: None,
            accelerate_mode_enabled: false,
            force_global_bucket_access_enabled: false,
            bucket_creation_enabled: false,
            tolerate_existing_bucket: false,
            store_result_in_session_key: None,
            parameters: BTreeSet::new(),
        }
    }

    /// Declare a parameter invocations will supply.
    #[must_use]
    pub fn with_parameter(mut self, name: &str) -> Self {
        self.parameters.insert(name.to_string());
        self
    }

    #[must_use]
    pub fn declares(&self, name: &str) -> bool {
        self.parameters.contains(name)
    }

    /// Region new buckets are created in, `None` leaves it to the client.
    #[must_use]
    pub fn create_bucket_region(&self) -> Option<&str> {
        if self.force_global_bucket_access_enabled {
            self.bucket_region.as_deref()
        } else {
            None
        }
    }

    /// Check everything that can be checked without a remote call and return
    /// the parsed action list.
    ///
    /// # Errors
    ///
    /// Will return `Err` with [`Error::Configuration`] on the first rule broken
    pub fn validate(&self) -> Result<Vec<ActionKind>, Error> {
        let actions = parse_actions(&self.actions)?;

        validate_region("clientRegion", &self.client_region)?;

        validate_bucket_name(&self.bucket_name)?;
        if let Some(destination) = &self.destination_bucket_name {
            validate_bucket_name(destination)?;
        }

        let uploads = actions.iter().filter(|a| **a == ActionKind::Upload).count();
        if uploads > 1 {
            return Err(Error::Configuration(
                "upload can only be used once per action list, its stream is consumed".to_string(),
            ));
        }
        if uploads == 1 && !self.declares(FILE) {
            return Err(Error::Configuration(format!(
                "upload requires parameter [{FILE}] to be present"
            )));
        }

        if actions.contains(&ActionKind::Copy) {
            if self.destination_bucket_name.is_none() && !self.declares(DESTINATION_BUCKET_NAME) {
                return Err(Error::Configuration(format!(
                    "copy requires attribute destinationBucketName or parameter [{DESTINATION_BUCKET_NAME}] to be present"
                )));
            }
            if !self.declares(DESTINATION_FILE_NAME) && !self.declares(DESTINATION_OBJECT_KEY) {
                return Err(Error::Configuration(format!(
                    "copy requires parameter [{DESTINATION_FILE_NAME}] or [{DESTINATION_OBJECT_KEY}] to be present"
                )));
            }
        }

        if let Some(bucket_region) = &self.bucket_region {
            validate_region("bucketRegion", bucket_region)?;
        } else if self.force_global_bucket_access_enabled
            && actions.contains(&ActionKind::CreateBucket)
        {
            return Err(Error::Configuration(
                "bucketRegion is required to create buckets with global bucket access enabled"
                    .to_string(),
            ));
        }

        Ok(actions)
    }
}

// exact membership, region names are sent as they are
fn validate_region(attribute: &str, region: &str) -> Result<(), Error> {
    let names = Region::names();
    if names.contains(&region) {
        Ok(())
    } else {
        Err(Error::Configuration(format!(
            "invalid {attribute} [{region}], valid regions are: [{}]",
            names.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_yaml() {
        let yaml = r"
actions: createBucket,upload
bucketName: my-bucket
parameters: [file]
";
        let config: SenderConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.client_region, "eu-west-1");
        assert!(!config.bucket_creation_enabled);
        assert!(!config.tolerate_existing_bucket);
        assert!(config.declares(FILE));
        assert_eq!(
            config.validate().unwrap(),
            vec![ActionKind::CreateBucket, ActionKind::Upload]
        );
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r"
name: archive
actions: copy
bucketName: source-bucket
destinationBucketName: archive-bucket
clientRegion: us-east-1
bucketRegion: eu-central-1
accelerateModeEnabled: true
forceGlobalBucketAccessEnabled: true
bucketCreationEnabled: true
tolerateExistingBucket: true
storeResultInSessionKey: result
parameters: [destinationFileName]
";
        let config: SenderConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.name, "archive");
        assert!(config.accelerate_mode_enabled);
        assert_eq!(config.destination_bucket_name.as_deref(), Some("archive-bucket"));
        assert_eq!(config.create_bucket_region(), Some("eu-central-1"));
        assert_eq!(config.store_result_in_session_key.as_deref(), Some("result"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_action() {
        let err = SenderConfig::new("createBucket,rename", "bucket")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains(
            "[rename], valid actions are: [copy, createBucket, delete, deleteBucket, download, upload]"
        ));
    }

    #[test]
    fn test_invalid_client_region() {
        let mut config = SenderConfig::new("delete", "bucket");
        config.client_region = "eu-west-9".to_string();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("invalid clientRegion [eu-west-9]"));
        assert!(err.contains(&Region::names().join(", ")));
    }

    #[test]
    fn test_region_case_sensitive() {
        let mut config = SenderConfig::new("delete", "bucket");
        config.client_region = "EU-WEST-1".to_string();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("invalid clientRegion [EU-WEST-1]"));
        assert!(err.contains(&Region::names().join(", ")));

        let mut config = SenderConfig::new("createBucket", "bucket");
        config.force_global_bucket_access_enabled = true;
        config.bucket_region = Some("AP-SOUTH-1".to_string());
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("invalid bucketRegion [AP-SOUTH-1]"));
    }

    #[test]
    fn test_invalid_bucket_names() {
        assert!(SenderConfig::new("delete", "Bucket").validate().is_err());

        let mut config = SenderConfig::new("copy", "bucket")
            .with_parameter(DESTINATION_FILE_NAME);
        config.destination_bucket_name = Some("a".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_upload_requires_file() {
        let config = SenderConfig::new("upload", "bucket");
        assert!(matches!(config.validate(), Err(Error::Configuration(_))));

        let config = config.with_parameter(FILE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_upload_once() {
        let config = SenderConfig::new("upload,upload", "bucket").with_parameter(FILE);
        assert!(matches!(config.validate(), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_copy_requirements() {
        let config = SenderConfig::new("copy", "bucket");
        assert!(config.validate().is_err());

        let config = config.with_parameter(DESTINATION_BUCKET_NAME);
        assert!(config.validate().is_err());

        let config = config.with_parameter(DESTINATION_OBJECT_KEY);
        assert!(config.validate().is_ok());

        let mut config = SenderConfig::new("copy", "bucket").with_parameter(DESTINATION_FILE_NAME);
        config.destination_bucket_name = Some("other-bucket".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_global_bucket_access() {
        let mut config = SenderConfig::new("createBucket", "bucket");
        config.force_global_bucket_access_enabled = true;
        assert!(config.validate().is_err());

        config.bucket_region = Some("nowhere".to_string());
        assert!(config.validate().is_err());

        config.bucket_region = Some("ap-south-1".to_string());
        assert!(config.validate().is_ok());
        assert_eq!(config.create_bucket_region(), Some("ap-south-1"));

        config.force_global_bucket_access_enabled = false;
        assert_eq!(config.create_bucket_region(), None);
    }
}
