//! Storage client abstraction
//!
//! The sender never talks to a backend directly, it goes through
//! [`StorageClient`]. Two implementations ship with the crate: the S3 REST
//! client in [`crate::s3`] and [`memory::MemoryStorage`].

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use std::fmt;
use thiserror::Error;
use tokio::io::AsyncRead;
use tokio_util::codec::{BytesCodec, FramedRead};

pub mod memory;

/// Content type used for uploads when none is supplied.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The service answered with an error document or status.
    #[error("HTTP Status Code: {status}, Code: {code}, Message: {message}")]
    Service {
        status: u16,
        code: String,
        message: String,
    },

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Service error code, `NoSuchKey`, `BucketNotEmpty`, ...
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Service { code, .. } => Some(code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for StorageError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

/// An open, caller-owned handle on object content.
///
/// Uploads consume one, downloads produce one. The content is only pulled
/// when the handle is read.
pub struct ObjectBody {
    stream: BoxStream<'static, Result<Bytes, StorageError>>,
}

impl ObjectBody {
    pub fn from_bytes<B: Into<Bytes>>(bytes: B) -> Self {
        let bytes = bytes.into();
        Self {
            stream: stream::once(async move { Ok(bytes) }).boxed(),
        }
    }

    pub fn from_stream<S>(stream: S) -> Self
    where
        S: futures::Stream<Item = Result<Bytes, StorageError>> + Send + 'static,
    {
        Self {
            stream: stream.boxed(),
        }
    }

    /// Wrap any async reader (file, stdin, socket).
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncRead + Send + 'static,
    {
        let stream = FramedRead::new(reader, BytesCodec::new())
            .map_ok(BytesMut::freeze)
            .map_err(StorageError::from);
        Self::from_stream(stream)
    }

    /// Read the whole content into memory.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the underlying stream fails
    pub async fn collect(self) -> Result<Bytes, StorageError> {
        let chunks: Vec<Bytes> = self.stream.try_collect().await?;
        if chunks.len() == 1 {
            return Ok(chunks.into_iter().next().unwrap_or_default());
        }
        let mut buf = BytesMut::new();
        for chunk in chunks {
            buf.extend_from_slice(&chunk);
        }
        Ok(buf.freeze())
    }

    /// Read the whole content into memory, stop reading as soon as it grows
    /// past `max` bytes.
    ///
    /// # Errors
    ///
    /// Will return `Err` with [`StorageError::InvalidRequest`] if the content
    /// is larger than `max`, or if the underlying stream fails
    pub async fn collect_limited(mut self, max: u64) -> Result<Bytes, StorageError> {
        let mut buf = BytesMut::new();
        let mut total: u64 = 0;

        while let Some(chunk) = self.stream.try_next().await? {
            total += chunk.len() as u64;
            if total > max {
                return Err(StorageError::InvalidRequest(format!(
                    "object size exceeds the limit of {max} bytes"
                )));
            }
            buf.extend_from_slice(&chunk);
        }

        Ok(buf.freeze())
    }

    #[must_use]
    pub fn into_stream(self) -> BoxStream<'static, Result<Bytes, StorageError>> {
        self.stream
    }
}

impl fmt::Debug for ObjectBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectBody").finish_non_exhaustive()
    }
}

/// Operations the sender needs from an object store.
///
/// Implementations must be safe to share between concurrent invocations.
#[async_trait]
pub trait StorageClient: Send + Sync {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, StorageError>;

    /// Create `bucket`, in `region` when given, otherwise in the client region.
    async fn create_bucket(&self, bucket: &str, region: Option<&str>) -> Result<(), StorageError>;

    async fn delete_bucket(&self, bucket: &str) -> Result<(), StorageError>;

    async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool, StorageError>;

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: ObjectBody,
        content_type: &str,
    ) -> Result<(), StorageError>;

    async fn get_object(&self, bucket: &str, key: &str) -> Result<ObjectBody, StorageError>;

    async fn copy_object(
        &self,
        src_bucket: &str,
        src_key: &str,
        dst_bucket: &str,
        dst_key: &str,
    ) -> Result<(), StorageError>;

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StorageError>;

    /// Turn on transfer acceleration for `bucket` and return the status the
    /// service reports afterwards.
    async fn enable_acceleration(&self, bucket: &str) -> Result<String, StorageError>;
}
