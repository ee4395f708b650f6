// SPDX-License-Identifier: Apache-2.0

//! Ready: summarizes a configured set of the object's own conditions into
//! the top-level Ready condition.

use std::sync::Arc;

use async_trait::async_trait;

use crate::conditions::{summarize, AggregateOptions, ConditionCheck, ConditionedObject};
use crate::error::{Result, SignalmanError};
use crate::handlers::harness::{DeriveCondition, Harness};
use crate::handlers::ConditionHandler;
use crate::store::StatusWriter;
use crate::types::ConditionType;

pub struct ReadyHandlerConfig<S> {
    pub store: Arc<S>,
    pub name: String,
    pub update_status: bool,
    /// Condition types rolled up into Ready.
    pub types: Vec<ConditionType>,
    /// Predicates excluding benign conditions from the roll-up.
    pub ignore: Vec<ConditionCheck>,
}

pub struct ReadyHandler<S> {
    store: Arc<S>,
    harness: Harness,
    types: Vec<ConditionType>,
    ignore: Vec<ConditionCheck>,
}

impl<S> std::fmt::Debug for ReadyHandler<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadyHandler")
            .field("harness", &self.harness)
            .field("types", &self.types)
            .field("ignore", &self.ignore.len())
            .finish()
    }
}

impl<S> ReadyHandler<S> {
    pub fn new(config: ReadyHandlerConfig<S>) -> Result<Self> {
        if config.types.is_empty() {
            return Err(SignalmanError::InvalidConfig(
                "ready handler needs at least one condition type to summarize".to_string(),
            ));
        }

        Ok(ReadyHandler {
            store: config.store,
            harness: Harness::new(&config.name, ConditionType::Ready, config.update_status)?,
            types: config.types,
            ignore: config.ignore,
        })
    }
}

#[async_trait]
impl<S: Send + Sync, O: ConditionedObject> DeriveCondition<O> for ReadyHandler<S> {
    async fn derive(&self, object: &mut O) -> Result<()> {
        summarize(
            object,
            ConditionType::Ready,
            &self.types,
            &self.ignore,
            &AggregateOptions::default(),
        );
        Ok(())
    }
}

#[async_trait]
impl<S, O> ConditionHandler<O> for ReadyHandler<S>
where
    S: StatusWriter<O>,
    O: ConditionedObject,
{
    async fn ensure_created(&self, object: &mut O) -> Result<()> {
        self.harness
            .ensure_created(object, self.store.as_ref(), self)
            .await
    }

    fn name(&self) -> &str {
        &self.harness.name
    }
}
