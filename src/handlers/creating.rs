// SPDX-License-Identifier: Apache-2.0

//! Creating: tracks the initial provisioning of an object from first
//! reconciliation until its deployed version matches the desired one.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::conditions::{is_true, is_unknown, mark_false, mark_true, reasons, ConditionedObject};
use crate::constants::{annotations, labels};
use crate::error::Result;
use crate::handlers::harness::{DeriveCondition, Harness};
use crate::handlers::{format_duration, ConditionHandler, HandlerConfig};
use crate::store::StatusWriter;
use crate::types::{ConditionSeverity, ConditionType};

pub struct CreatingHandler<S> {
    store: Arc<S>,
    harness: Harness,
}

impl<S> CreatingHandler<S> {
    pub fn new(config: HandlerConfig<S>) -> Result<Self> {
        Ok(CreatingHandler {
            store: config.store,
            harness: Harness::new(&config.name, ConditionType::Creating, config.update_status)?,
        })
    }
}

fn was_deployed_before<O: ConditionedObject>(object: &O) -> bool {
    object.annotation(annotations::LAST_DEPLOYED_VERSION).is_some()
        || object.annotation(annotations::UPGRADING_TO_NODE_POOLS) == Some("true")
}

#[async_trait]
impl<S: Send + Sync, O: ConditionedObject> DeriveCondition<O> for CreatingHandler<S> {
    async fn derive(&self, object: &mut O) -> Result<()> {
        if is_unknown(object, ConditionType::Creating) {
            // First observation. An object that already carries deployment
            // markers predates condition tracking.
            if was_deployed_before(object) {
                mark_false(
                    object,
                    ConditionType::Creating,
                    reasons::EXISTING_OBJECT,
                    ConditionSeverity::Info,
                    "Object was already created",
                );
            } else {
                mark_true(object, ConditionType::Creating);
            }
            return Ok(());
        }

        // False is terminal: creation happens once.
        if !is_true(object, ConditionType::Creating) {
            return Ok(());
        }

        let deployed = object
            .annotation(annotations::LAST_DEPLOYED_VERSION)
            .map(str::to_string);
        let desired = object.label(labels::RELEASE_VERSION).map(str::to_string);

        if deployed.is_some() && deployed == desired {
            let elapsed = object
                .creation_timestamp()
                .map(|t| Utc::now() - t)
                .unwrap_or_else(chrono::Duration::zero);
            mark_false(
                object,
                ConditionType::Creating,
                reasons::CREATION_COMPLETED,
                ConditionSeverity::Info,
                format!("Creation has been completed in {}", format_duration(elapsed)),
            );
        }

        Ok(())
    }
}

#[async_trait]
impl<S, O> ConditionHandler<O> for CreatingHandler<S>
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
