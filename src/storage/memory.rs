//! In-memory object store
//!
//! Mirrors the S3 semantics the sender relies on: buckets must exist before
//! objects are written, non-empty buckets cannot be deleted and a missing
//! key answers `NoSuchKey`.

use crate::storage::{ObjectBody, StorageClient, StorageError};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Bytes,
    pub content_type: String,
}

#[derive(Debug, Default)]
struct Bucket {
    region: Option<String>,
    accelerated: bool,
    objects: BTreeMap<String, StoredObject>,
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    buckets: Mutex<BTreeMap<String, Bucket>>,
}

fn no_such_bucket(bucket: &str) -> StorageError {
    StorageError::Service {
        status: 404,
        code: "NoSuchBucket".to_string(),
        message: format!("The specified bucket does not exist: {bucket}"),
    }
}

fn no_such_key(key: &str) -> StorageError {
    StorageError::Service {
        status: 404,
        code: "NoSuchKey".to_string(),
        message: format!("The specified key does not exist: {key}"),
    }
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, Bucket>>, StorageError> {
        self.buckets
            .lock()
            .map_err(|e| StorageError::Transport(format!("memory store poisoned: {e}")))
    }

    /// Copy of a stored object, for inspection.
    #[must_use]
    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.lock()
            .ok()?
            .get(bucket)
            .and_then(|b| b.objects.get(key).cloned())
    }

    /// Names of all buckets, sorted.
    #[must_use]
    pub fn buckets(&self) -> Vec<String> {
        self.lock()
            .map(|buckets| buckets.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Region the bucket was created in, `None` for the client default.
    #[must_use]
    pub fn bucket_region(&self, bucket: &str) -> Option<String> {
        self.lock().ok()?.get(bucket).and_then(|b| b.region.clone())
    }

    #[must_use]
    pub fn is_accelerated(&self, bucket: &str) -> bool {
        self.lock()
            .ok()
            .and_then(|buckets| buckets.get(bucket).map(|b| b.accelerated))
            .unwrap_or(false)
    }
}

#[async_trait]
impl StorageClient for MemoryStorage {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, StorageError> {
        Ok(self.lock()?.contains_key(bucket))
    }

    async fn create_bucket(&self, bucket: &str, region: Option<&str>) -> Result<(), StorageError> {
        let mut buckets = self.lock()?;
        if buckets.contains_key(bucket) {
            return Err(StorageError::Service {
                status: 409,
                code: "BucketAlreadyOwnedByYou".to_string(),
                message: format!("Your previous request to create the named bucket succeeded and you already own it: {bucket}"),
            });
        }
        buckets.insert(
            bucket.to_string(),
            Bucket {
                region: region.map(ToString::to_string),
                ..Bucket::default()
            },
        );
        Ok(())
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<(), StorageError> {
        let mut buckets = self.lock()?;
        match buckets.get(bucket) {
            None => Err(no_such_bucket(bucket)),
            Some(b) if !b.objects.is_empty() => Err(StorageError::Service {
                status: 409,
                code: "BucketNotEmpty".to_string(),
                message: format!("The bucket you tried to delete is not empty: {bucket}"),
            }),
            Some(_) => {
                buckets.remove(bucket);
                Ok(())
            }
        }
    }

    async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool, StorageError> {
        Ok(self
            .lock()?
            .get(bucket)
            .is_some_and(|b| b.objects.contains_key(key)))
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: ObjectBody,
        content_type: &str,
    ) -> Result<(), StorageError> {
        // read the body before taking the lock
        let data = body.collect().await?;
        let mut buckets = self.lock()?;
        let b = buckets.get_mut(bucket).ok_or_else(|| no_such_bucket(bucket))?;
        b.objects.insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<ObjectBody, StorageError> {
        let buckets = self.lock()?;
        let b = buckets.get(bucket).ok_or_else(|| no_such_bucket(bucket))?;
        let object = b.objects.get(key).ok_or_else(|| no_such_key(key))?;
        Ok(ObjectBody::from_bytes(object.data.clone()))
    }

    async fn copy_object(
        &self,
        src_bucket: &str,
        src_key: &str,
        dst_bucket: &str,
        dst_key: &str,
    ) -> Result<(), StorageError> {
        let mut buckets = self.lock()?;
        let object = buckets
            .get(src_bucket)
            .ok_or_else(|| no_such_bucket(src_bucket))?
            .objects
            .get(src_key)
            .cloned()
            .ok_or_else(|| no_such_key(src_key))?;
        buckets
            .get_mut(dst_bucket)
            .ok_or_else(|| no_such_bucket(dst_bucket))?
            .objects
            .insert(dst_key.to_string(), object);
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
        // S3 answers 204 for a missing key as well
        let mut buckets = self.lock()?;
        let b = buckets.get_mut(bucket).ok_or_else(|| no_such_bucket(bucket))?;
        b.objects.remove(key);
        Ok(())
    }

    async fn enable_acceleration(&self, bucket: &str) -> Result<String, StorageError> {
        let mut buckets = self.lock()?;
        let b = buckets.get_mut(bucket).ok_or_else(|| no_such_bucket(bucket))?;
        b.accelerated = true;
        Ok("Enabled".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bucket_lifecycle() {
        let store = MemoryStorage::new();
        assert!(!store.bucket_exists("b").await.unwrap());
        store.create_bucket("b", Some("eu-west-1")).await.unwrap();
        assert!(store.bucket_exists("b").await.unwrap());
        assert_eq!(store.bucket_region("b"), Some("eu-west-1".to_string()));

        let err = store.create_bucket("b", None).await.unwrap_err();
        assert_eq!(err.code(), Some("BucketAlreadyOwnedByYou"));

        store.delete_bucket("b").await.unwrap();
        assert!(store.buckets().is_empty());
    }

    #[tokio::test]
    async fn test_delete_bucket_not_empty() {
        let store = MemoryStorage::new();
        store.create_bucket("b", None).await.unwrap();
        store
            .put_object("b", "k", ObjectBody::from_bytes("x"), "text/plain")
            .await
            .unwrap();
        let err = store.delete_bucket("b").await.unwrap_err();
        assert_eq!(err.code(), Some("BucketNotEmpty"));
    }

    #[tokio::test]
    async fn test_objects() {
        let store = MemoryStorage::new();
        let err = store
            .put_object("b", "k", ObjectBody::from_bytes("x"), "text/plain")
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some("NoSuchBucket"));

        store.create_bucket("b", None).await.unwrap();
        store.create_bucket("c", None).await.unwrap();
        store
            .put_object("b", "k", ObjectBody::from_bytes("data"), "text/plain")
            .await
            .unwrap();
        assert!(store.object_exists("b", "k").await.unwrap());
        assert!(!store.object_exists("c", "k").await.unwrap());

        store.copy_object("b", "k", "c", "k2").await.unwrap();
        let copied = store.object("c", "k2").unwrap();
        assert_eq!(copied.data, Bytes::from("data"));
        assert_eq!(copied.content_type, "text/plain");

        let body = store.get_object("c", "k2").await.unwrap();
        assert_eq!(body.collect().await.unwrap(), Bytes::from("data"));

        store.delete_object("b", "k").await.unwrap();
        assert!(!store.object_exists("b", "k").await.unwrap());
        let err = store.get_object("b", "k").await.unwrap_err();
        assert_eq!(err.code(), Some("NoSuchKey"));
    }

    #[tokio::test]
    async fn test_acceleration() {
        let store = MemoryStorage::new();
        assert!(store.enable_acceleration("b").await.is_err());
        store.create_bucket("b", None).await.unwrap();
        assert!(!store.is_accelerated("b"));
        assert_eq!(store.enable_acceleration("b").await.unwrap(), "Enabled");
        assert!(store.is_accelerated("b"));
    }
}
