//! Common test helpers for integration tests
//!
//! - `RecordingStorage`: in-memory store that counts calls and injects failures
//! - `MinioContainer`: real S3 API for the ignored e2e tests

#![allow(dead_code, clippy::indexing_slicing)]

mod helpers;

pub use helpers::minio::{MINIO_ROOT_PASSWORD, MINIO_ROOT_USER, MinioContainer};

use async_trait::async_trait;
use s3sender::storage::memory::MemoryStorage;
use s3sender::{ObjectBody, StorageClient, StorageError};
use std::collections::BTreeMap;
use std::sync::Mutex;

pub const BUCKET_EXISTS: &str = "bucket_exists";
pub const CREATE_BUCKET: &str = "create_bucket";
pub const DELETE_BUCKET: &str = "delete_bucket";
pub const OBJECT_EXISTS: &str = "object_exists";
pub const PUT_OBJECT: &str = "put_object";
pub const GET_OBJECT: &str = "get_object";
pub const COPY_OBJECT: &str = "copy_object";
pub const DELETE_OBJECT: &str = "delete_object";
pub const ENABLE_ACCELERATION: &str = "enable_acceleration";

/// Calls that change the store
pub const MUTATIONS: [&str; 6] = [
    CREATE_BUCKET,
    DELETE_BUCKET,
    PUT_OBJECT,
    COPY_OBJECT,
    DELETE_OBJECT,
    ENABLE_ACCELERATION,
];

#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Timeout,
    Service(u16, &'static str),
}

impl Failure {
    fn error(self) -> StorageError {
        match self {
            Self::Timeout => StorageError::Timeout("operation timed out".to_string()),
            Self::Service(status, code) => StorageError::Service {
                status,
                code: code.to_string(),
                message: format!("injected {code}"),
            },
        }
    }
}

/// `MemoryStorage` that records every call and can fail chosen operations
#[derive(Debug, Default)]
pub struct RecordingStorage {
    pub inner: MemoryStorage,
    calls: Mutex<BTreeMap<&'static str, usize>>,
    failures: Mutex<BTreeMap<&'static str, Failure>>,
}

impl RecordingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on(&self, operation: &'static str, failure: Failure) {
        self.failures.lock().unwrap().insert(operation, failure);
    }

    pub fn calls(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(operation)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    pub fn mutating_calls(&self) -> usize {
        MUTATIONS.iter().map(|op| self.calls(op)).sum()
    }

    pub fn reset(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, operation: &'static str) -> Result<(), StorageError> {
        *self.calls.lock().unwrap().entry(operation).or_default() += 1;
        match self.failures.lock().unwrap().get(operation) {
            Some(failure) => Err(failure.error()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl StorageClient for RecordingStorage {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, StorageError> {
        self.record(BUCKET_EXISTS)?;
        self.inner.bucket_exists(bucket).await
    }

    async fn create_bucket(&self, bucket: &str, region: Option<&str>) -> Result<(), StorageError> {
        self.record(CREATE_BUCKET)?;
        self.inner.create_bucket(bucket, region).await
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<(), StorageError> {
        self.record(DELETE_BUCKET)?;
        self.inner.delete_bucket(bucket).await
    }

    async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool, StorageError> {
        self.record(OBJECT_EXISTS)?;
        self.inner.object_exists(bucket, key).await
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: ObjectBody,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.record(PUT_OBJECT)?;
        self.inner.put_object(bucket, key, body, content_type).await
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<ObjectBody, StorageError> {
        self.record(GET_OBJECT)?;
        self.inner.get_object(bucket, key).await
    }

    async fn copy_object(
        &self,
        src_bucket: &str,
        src_key: &str,
        dst_bucket: &str,
        dst_key: &str,
    ) -> Result<(), StorageError> {
        self.record(COPY_OBJECT)?;
        self.inner
            .copy_object(src_bucket, src_key, dst_bucket, dst_key)
            .await
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
        self.record(DELETE_OBJECT)?;
        self.inner.delete_object(bucket, key).await
    }

    async fn enable_acceleration(&self, bucket: &str) -> Result<String, StorageError> {
        self.record(ENABLE_ACCELERATION)?;
        self.inner.enable_acceleration(bucket).await
    }
}
