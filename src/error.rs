use crate::sender::action::ActionKind;
use crate::storage::StorageError;
use std::fmt;
use thiserror::Error;

/// Bucket, or object within a bucket, an error is about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub bucket: String,
    pub key: Option<String>,
}

impl Target {
    #[must_use]
    pub fn bucket(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            key: None,
        }
    }

    #[must_use]
    pub fn object(bucket: &str, key: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            key: Some(key.to_string()),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "object [{}] in bucket [{}]", key, self.bucket),
            None => write!(f, "bucket [{}]", self.bucket),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// Bad action list, region, bucket name or missing parameter. Always
    /// raised before any remote call.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("{action}: {target} does not exist")]
    NotFound { action: ActionKind, target: Target },

    #[error("{action}: {target} already exists")]
    AlreadyExists { action: ActionKind, target: Target },

    #[error("{action}: bucket [{bucket}] does not exist and bucket creation is disabled")]
    BucketCreationDisabled { action: ActionKind, bucket: String },

    #[error("{action} failed on {target}: {source}")]
    RemoteOperationFailed {
        action: ActionKind,
        target: Target,
        #[source]
        source: StorageError,
    },
}

impl Error {
    /// The underlying client gave up waiting
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        match self {
            Self::RemoteOperationFailed { source, .. } => source.is_timeout(),
            _ => false,
        }
    }

    /// Action that failed, `None` for configuration errors
    #[must_use]
    pub const fn action(&self) -> Option<ActionKind> {
        match self {
            Self::Configuration(_) => None,
            Self::NotFound { action, .. }
            | Self::AlreadyExists { action, .. }
            | Self::BucketCreationDisabled { action, .. }
            | Self::RemoteOperationFailed { action, .. } => Some(*action),
        }
    }
}
