use crate::error::Error;
use crate::sender::{
    action::ActionKind,
    bucket_name::validate_bucket_name,
    config::SenderConfig,
    params::{
        CONTENT_TYPE, DESTINATION_BUCKET_NAME, DESTINATION_FILE_NAME, DESTINATION_OBJECT_KEY, FILE,
        FILE_NAME, OBJECT_KEY, ParameterSource,
    },
};
use crate::storage::{DEFAULT_CONTENT_TYPE, ObjectBody};

/// Everything one invocation needs, resolved before the first remote call.
#[derive(Debug)]
pub struct ActionRequest {
    pub bucket: String,
    pub key: Option<String>,
    pub destination_bucket: Option<String>,
    pub destination_key: Option<String>,
    pub content_type: String,
    pub stream: Option<ObjectBody>,
}

// empty values count as absent
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl ActionRequest {
    /// # Errors
    ///
    /// Will return `Err` with [`Error::Configuration`] when a listed action is
    /// missing one of its inputs
    pub fn resolve(
        config: &SenderConfig,
        actions: &[ActionKind],
        source: &mut dyn ParameterSource,
    ) -> Result<Self, Error> {
        let key = non_empty(source.value(FILE_NAME))
            .or_else(|| non_empty(source.value(OBJECT_KEY)))
            .or_else(|| non_empty(source.message()))
            .map(ToString::to_string);

        if key.is_none()
            && let Some(action) = actions.iter().find(|a| a.needs_object_key())
        {
            return Err(Error::Configuration(format!(
                "{action} requires an object key, set parameter [{FILE_NAME}] or [{OBJECT_KEY}] or pass a message"
            )));
        }

        let destination_bucket = match non_empty(source.value(DESTINATION_BUCKET_NAME)) {
            Some(bucket) => {
                validate_bucket_name(bucket)?;
                Some(bucket.to_string())
            }
            None => config.destination_bucket_name.clone(),
        };

        let destination_key = non_empty(source.value(DESTINATION_FILE_NAME))
            .or_else(|| non_empty(source.value(DESTINATION_OBJECT_KEY)))
            .map(ToString::to_string);

        if actions.contains(&ActionKind::Copy) {
            if destination_bucket.is_none() {
                return Err(Error::Configuration(
                    "copy requires a destination bucket".to_string(),
                ));
            }
            if destination_key.is_none() {
                return Err(Error::Configuration(format!(
                    "copy requires parameter [{DESTINATION_FILE_NAME}] or [{DESTINATION_OBJECT_KEY}]"
                )));
            }
        }

        let content_type = non_empty(source.value(CONTENT_TYPE))
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let stream = if actions.contains(&ActionKind::Upload) {
            Some(source.take_stream(FILE).ok_or_else(|| {
                Error::Configuration(format!("upload requires a stream in parameter [{FILE}]"))
            })?)
        } else {
            None
        };

        Ok(Self {
            bucket: config.bucket_name.clone(),
            key,
            destination_bucket,
            destination_key,
            content_type,
            stream,
        })
    }

    /// Object key, checked to be present by [`Self::resolve`] for the actions
    /// that need one.
    pub(crate) fn key(&self, action: ActionKind) -> Result<&str, Error> {
        self.key
            .as_deref()
            .ok_or_else(|| Error::Configuration(format!("{action} requires an object key")))
    }
}
