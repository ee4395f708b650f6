// SPDX-License-Identifier: Apache-2.0

//! Sequencing of multiple condition handlers over the same object.

use async_trait::async_trait;
use tracing::debug;

use crate::conditions::ConditionedObject;
use crate::error::{Result, SignalmanError};
use crate::handlers::ConditionHandler;

pub struct CompositeHandlerConfig<O> {
    pub name: String,
    /// Handlers in execution order. Each sees the mutations of the ones
    /// before it.
    pub handlers: Vec<Box<dyn ConditionHandler<O>>>,
}

/// Runs its handlers strictly in order against the same object; the first
/// error aborts the chain.
pub struct CompositeHandler<O> {
    name: String,
    handlers: Vec<Box<dyn ConditionHandler<O>>>,
}

impl<O> std::fmt::Debug for CompositeHandler<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeHandler")
            .field("name", &self.name)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl<O> CompositeHandler<O> {
    pub fn new(config: CompositeHandlerConfig<O>) -> Result<Self> {
        if config.name.is_empty() {
            return Err(SignalmanError::InvalidConfig(
                "composite handler name must not be empty".to_string(),
            ));
        }
        if config.handlers.is_empty() {
            return Err(SignalmanError::InvalidConfig(
                "composite handler needs at least one handler".to_string(),
            ));
        }

        Ok(CompositeHandler {
            name: config.name,
            handlers: config.handlers,
        })
    }
}

#[async_trait]
impl<O: ConditionedObject> ConditionHandler<O> for CompositeHandler<O> {
    async fn ensure_created(&self, object: &mut O) -> Result<()> {
        for handler in &self.handlers {
            handler.ensure_created(object).await?;
            debug!(
                composite = %self.name,
                handler = %handler.name(),
                conditions = ?object.conditions(),
                "handler finished"
            );
        }
        Ok(())
    }

    async fn ensure_deleted(&self, object: &mut O) -> Result<()> {
        for handler in &self.handlers {
            handler.ensure_deleted(object).await?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
