use crate::error::{Error, Target};
use crate::sender::{
    action::ActionKind, config::SenderConfig, params::Session, preconditions::Preconditions,
    request::ActionRequest,
};
use crate::storage::{StorageClient, StorageError};

/// Runs one action against the store: guards first, then a single call.
///
/// The request is only ever borrowed mutably, it holds the upload stream which
/// is `Send` but not `Sync`.
pub struct Executor<'a> {
    client: &'a dyn StorageClient,
    config: &'a SenderConfig,
}

impl<'a> Executor<'a> {
    #[must_use]
    pub const fn new(client: &'a dyn StorageClient, config: &'a SenderConfig) -> Self {
        Self { client, config }
    }

    /// Returns the bucket name, the object key or the session key of the
    /// downloaded content, depending on the action.
    ///
    /// # Errors
    ///
    /// Will return `Err` if a guard fails or the store rejects the call
    pub async fn execute(
        &self,
        action: ActionKind,
        request: &mut ActionRequest,
        session: &mut Session,
    ) -> Result<String, Error> {
        match action {
            ActionKind::CreateBucket => self.create_bucket(&request.bucket).await,
            ActionKind::DeleteBucket => self.delete_bucket(&request.bucket).await,
            ActionKind::Upload => self.upload(request).await,
            ActionKind::Download => self.download(request, session).await,
            ActionKind::Copy => self.copy(request).await,
            ActionKind::Delete => self.delete(request).await,
        }
    }

    async fn create_bucket(&self, bucket: &str) -> Result<String, Error> {
        let action = ActionKind::CreateBucket;
        let checks = Preconditions::new(self.client, action);

        if checks.bucket_exists(bucket).await? {
            if self.config.tolerate_existing_bucket {
                log::info!("bucket [{bucket}] already exists");
                return Ok(bucket.to_string());
            }
            return Err(Error::AlreadyExists {
                action,
                target: Target::bucket(bucket),
            });
        }

        self.create(action, bucket).await?;
        Ok(bucket.to_string())
    }

    // create plus the acceleration follow-up, which never rolls the bucket back
    async fn create(&self, action: ActionKind, bucket: &str) -> Result<(), Error> {
        self.client
            .create_bucket(bucket, self.config.create_bucket_region())
            .await
            .map_err(remote(action, Target::bucket(bucket)))?;
        log::info!("bucket [{bucket}] created");

        if self.config.accelerate_mode_enabled {
            let status = self
                .client
                .enable_acceleration(bucket)
                .await
                .map_err(remote(action, Target::bucket(bucket)))?;
            log::debug!("bucket [{bucket}] accelerate status: {status}");
        }

        Ok(())
    }

    // destination bucket of upload and copy, true when it was already there
    async fn ensure_bucket(&self, action: ActionKind, bucket: &str) -> Result<bool, Error> {
        let checks = Preconditions::new(self.client, action);
        if checks.bucket_exists(bucket).await? {
            return Ok(true);
        }

        if !self.config.bucket_creation_enabled {
            return Err(Error::BucketCreationDisabled {
                action,
                bucket: bucket.to_string(),
            });
        }

        self.create(action, bucket).await?;
        Ok(false)
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<String, Error> {
        let action = ActionKind::DeleteBucket;
        Preconditions::new(self.client, action)
            .require_bucket(bucket)
            .await?;

        self.client
            .delete_bucket(bucket)
            .await
            .map_err(remote(action, Target::bucket(bucket)))?;
        Ok(bucket.to_string())
    }

    async fn upload(&self, request: &mut ActionRequest) -> Result<String, Error> {
        let action = ActionKind::Upload;
        let key = request.key(action)?.to_string();
        let bucket = request.bucket.as_str();

        // a bucket created just now holds no object
        if self.ensure_bucket(action, bucket).await?
            && Preconditions::new(self.client, action)
                .object_exists(bucket, &key)
                .await?
        {
            return Err(Error::AlreadyExists {
                action,
                target: Target::object(bucket, &key),
            });
        }

        let body = request.stream.take().ok_or_else(|| {
            Error::Configuration("upload stream was already consumed".to_string())
        })?;

        self.client
            .put_object(bucket, &key, body, &request.content_type)
            .await
            .map_err(remote(action, Target::object(bucket, &key)))?;
        Ok(key)
    }

    async fn download(
        &self,
        request: &mut ActionRequest,
        session: &mut Session,
    ) -> Result<String, Error> {
        let action = ActionKind::Download;
        let key = request.key(action)?;
        let bucket = request.bucket.as_str();

        Preconditions::new(self.client, action)
            .require_object(bucket, key)
            .await?;

        let body = self
            .client
            .get_object(bucket, key)
            .await
            .map_err(remote(action, Target::object(bucket, key)))?;

        let session_key = self
            .config
            .store_result_in_session_key
            .as_deref()
            .unwrap_or(key);
        session.insert(session_key, body);
        Ok(session_key.to_string())
    }

    async fn copy(&self, request: &mut ActionRequest) -> Result<String, Error> {
        let action = ActionKind::Copy;
        let key = request.key(action)?;
        let bucket = request.bucket.as_str();
        let (Some(destination_bucket), Some(destination_key)) = (
            request.destination_bucket.as_deref(),
            request.destination_key.as_deref(),
        ) else {
            return Err(Error::Configuration(
                "copy requires a destination bucket and key".to_string(),
            ));
        };

        let checks = Preconditions::new(self.client, action);
        checks
            .require_no_object(destination_bucket, destination_key)
            .await?;
        checks.require_object(bucket, key).await?;
        self.ensure_bucket(action, destination_bucket).await?;

        self.client
            .copy_object(bucket, key, destination_bucket, destination_key)
            .await
            .map_err(remote(
                action,
                Target::object(destination_bucket, destination_key),
            ))?;
        Ok(destination_key.to_string())
    }

    async fn delete(&self, request: &mut ActionRequest) -> Result<String, Error> {
        let action = ActionKind::Delete;
        let key = request.key(action)?;
        let bucket = request.bucket.as_str();

        Preconditions::new(self.client, action)
            .require_object(bucket, key)
            .await?;

        self.client
            .delete_object(bucket, key)
            .await
            .map_err(remote(action, Target::object(bucket, key)))?;
        Ok(key.to_string())
    }
}

fn remote(action: ActionKind, target: Target) -> impl FnOnce(StorageError) -> Error {
    move |source| Error::RemoteOperationFailed {
        action,
        target,
        source,
    }
}
