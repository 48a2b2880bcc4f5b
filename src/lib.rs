//! Validated bucket and object actions against S3 compatible storage.
//!
//! A [`Sender`] runs an ordered list of actions (`createBucket`,
//! `deleteBucket`, `upload`, `download`, `copy`, `delete`) against one bucket.
//! Every action checks existence first and fails with a typed [`Error`]
//! instead of overwriting or deleting what is not there.

pub mod cli;
pub mod error;
pub mod s3;
pub mod sender;
pub mod storage;

pub use self::error::{Error, Target};
pub use self::sender::{ActionKind, Parameters, Sender, SenderConfig, Session};
pub use self::storage::{ObjectBody, StorageClient, StorageError};
