//! Validated bucket and object actions
//!
//! A [`Sender`] is built once from a [`SenderConfig`] and a shared storage
//! client. Each [`Sender::send`] resolves the invocation parameters, then
//! runs the configured actions in order and stops at the first failure.

pub mod action;
pub mod bucket_name;
pub mod config;
pub mod execute;
pub mod params;
pub mod preconditions;
pub mod request;

pub use self::{
    action::ActionKind,
    config::SenderConfig,
    params::{ParameterSource, ParameterValue, Parameters, Session},
    request::ActionRequest,
};

use crate::error::Error;
use crate::sender::execute::Executor;
use crate::storage::StorageClient;
use std::sync::Arc;

pub struct Sender {
    config: SenderConfig,
    actions: Vec<ActionKind>,
    client: Arc<dyn StorageClient>,
}

impl Sender {
    /// Validates the configuration, nothing is sent to the store.
    ///
    /// # Errors
    ///
    /// Will return `Err` with [`Error::Configuration`] if the configuration is
    /// invalid
    pub fn new(config: SenderConfig, client: Arc<dyn StorageClient>) -> Result<Self, Error> {
        let actions = config.validate()?;

        log::info!(
            "sender [{}] configured for bucket [{}] with actions [{}]",
            config.name,
            config.bucket_name,
            actions
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<String>>()
                .join(", ")
        );

        Ok(Self {
            config,
            actions,
            client,
        })
    }

    #[must_use]
    pub fn actions(&self) -> &[ActionKind] {
        &self.actions
    }

    #[must_use]
    pub const fn config(&self) -> &SenderConfig {
        &self.config
    }

    /// Run every action in declared order and return the result of the last
    /// one. The first failure aborts the rest, completed actions are kept.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the parameters are incomplete or an action fails
    pub async fn send(
        &self,
        source: &mut dyn ParameterSource,
        session: &mut Session,
    ) -> Result<String, Error> {
        let mut request = ActionRequest::resolve(&self.config, &self.actions, source)?;
        let executor = Executor::new(self.client.as_ref(), &self.config);

        let mut result = String::new();
        for action in &self.actions {
            result = executor
                .execute(*action, &mut request, session)
                .await
                .inspect_err(|e| log::warn!("{e}"))?;
            log::debug!("{action} completed: {result}");
        }

        Ok(result)
    }
}
