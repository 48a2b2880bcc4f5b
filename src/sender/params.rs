//! Per invocation inputs and outputs

use crate::storage::ObjectBody;
use std::collections::HashMap;

pub const FILE: &str = "file";
pub const FILE_NAME: &str = "fileName";
pub const OBJECT_KEY: &str = "objectKey";
pub const DESTINATION_BUCKET_NAME: &str = "destinationBucketName";
pub const DESTINATION_FILE_NAME: &str = "destinationFileName";
pub const DESTINATION_OBJECT_KEY: &str = "destinationObjectKey";
pub const CONTENT_TYPE: &str = "contentType";

/// Named inputs of one invocation.
pub trait ParameterSource: Send {
    /// Default value used when no named override is present.
    fn message(&self) -> Option<&str>;

    /// Text value of a named parameter.
    fn value(&self, name: &str) -> Option<&str>;

    /// Hand over a stream parameter, it can only be taken once.
    fn take_stream(&mut self, name: &str) -> Option<ObjectBody>;
}

#[derive(Debug)]
pub enum ParameterValue {
    Text(String),
    Stream(ObjectBody),
}

#[derive(Debug, Default)]
pub struct Parameters {
    message: Option<String>,
    values: HashMap<String, ParameterValue>,
}

impl Parameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.values
            .insert(name.to_string(), ParameterValue::Text(value.into()));
        self
    }

    #[must_use]
    pub fn with_stream(mut self, name: &str, body: ObjectBody) -> Self {
        self.values
            .insert(name.to_string(), ParameterValue::Stream(body));
        self
    }
}

impl ParameterSource for Parameters {
    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn value(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ParameterValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    fn take_stream(&mut self, name: &str) -> Option<ObjectBody> {
        match self.values.remove(name) {
            Some(ParameterValue::Stream(body)) => Some(body),
            Some(other) => {
                self.values.insert(name.to_string(), other);
                None
            }
            None => None,
        }
    }
}

/// Results an invocation hands back to its caller besides the return value,
/// downloads leave their content handle here.
#[derive(Debug, Default)]
pub struct Session {
    values: HashMap<String, ObjectBody>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a handle, replacing any previous one under the same key.
    pub fn insert(&mut self, key: &str, body: ObjectBody) {
        if self.values.insert(key.to_string(), body).is_some() {
            log::debug!("session key [{key}] replaced");
        }
    }

    /// Take ownership of a stored handle.
    pub fn take(&mut self, key: &str) -> Option<ObjectBody> {
        self.values.remove(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
