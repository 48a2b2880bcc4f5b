//! Existence guards run before an action touches the store.
//!
//! Every check is a fresh remote call, nothing is cached between actions.

use crate::error::{Error, Target};
use crate::sender::action::ActionKind;
use crate::storage::StorageClient;

#[derive(Clone, Copy)]
pub struct Preconditions<'a> {
    client: &'a dyn StorageClient,
    action: ActionKind,
}

impl<'a> Preconditions<'a> {
    #[must_use]
    pub const fn new(client: &'a dyn StorageClient, action: ActionKind) -> Self {
        Self { client, action }
    }

    /// # Errors
    ///
    /// Will return `Err` if the check itself fails
    pub async fn bucket_exists(&self, bucket: &str) -> Result<bool, Error> {
        self.client
            .bucket_exists(bucket)
            .await
            .map_err(|source| Error::RemoteOperationFailed {
                action: self.action,
                target: Target::bucket(bucket),
                source,
            })
    }

    /// # Errors
    ///
    /// Will return `Err` if the check itself fails
    pub async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool, Error> {
        self.client
            .object_exists(bucket, key)
            .await
            .map_err(|source| Error::RemoteOperationFailed {
                action: self.action,
                target: Target::object(bucket, key),
                source,
            })
    }

    /// # Errors
    ///
    /// Will return [`Error::NotFound`] if the bucket is missing
    pub async fn require_bucket(&self, bucket: &str) -> Result<(), Error> {
        if self.bucket_exists(bucket).await? {
            Ok(())
        } else {
            Err(Error::NotFound {
                action: self.action,
                target: Target::bucket(bucket),
            })
        }
    }

    /// Bucket first, then the object.
    ///
    /// # Errors
    ///
    /// Will return [`Error::NotFound`] if the bucket or the object is missing
    pub async fn require_object(&self, bucket: &str, key: &str) -> Result<(), Error> {
        self.require_bucket(bucket).await?;

        if self.object_exists(bucket, key).await? {
            Ok(())
        } else {
            Err(Error::NotFound {
                action: self.action,
                target: Target::object(bucket, key),
            })
        }
    }

    /// A missing bucket means a missing object, without asking for it.
    ///
    /// # Errors
    ///
    /// Will return [`Error::AlreadyExists`] if the object is present
    pub async fn require_no_object(&self, bucket: &str, key: &str) -> Result<(), Error> {
        if self.bucket_exists(bucket).await? && self.object_exists(bucket, key).await? {
            Err(Error::AlreadyExists {
                action: self.action,
                target: Target::object(bucket, key),
            })
        } else {
            Ok(())
        }
    }
}
