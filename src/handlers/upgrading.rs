// SPDX-License-Identifier: Apache-2.0

//! Upgrading: tracks version rollouts by comparing the last deployed
//! version annotation against the desired release version label.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::conditions::{
    get, is_true, mark_false, mark_true, reasons, ConditionedObject,
};
use crate::constants::{annotations, labels};
use crate::error::Result;
use crate::handlers::harness::{DeriveCondition, Harness};
use crate::handlers::{format_duration, ConditionHandler, HandlerConfig};
use crate::store::StatusWriter;
use crate::types::{ConditionSeverity, ConditionStatus, ConditionType};

pub struct UpgradingHandler<S> {
    store: Arc<S>,
    harness: Harness,
}

impl<S> UpgradingHandler<S> {
    pub fn new(config: HandlerConfig<S>) -> Result<Self> {
        Ok(UpgradingHandler {
            store: config.store,
            harness: Harness::new(&config.name, ConditionType::Upgrading, config.update_status)?,
        })
    }
}

#[async_trait]
impl<S: Send + Sync, O: ConditionedObject> DeriveCondition<O> for UpgradingHandler<S> {
    async fn derive(&self, object: &mut O) -> Result<()> {
        // An object that is still being created cannot be upgrading.
        if is_true(object, ConditionType::Creating) {
            mark_false(
                object,
                ConditionType::Upgrading,
                reasons::UPGRADE_NOT_STARTED,
                ConditionSeverity::Info,
                "Upgrade has not been started",
            );
            return Ok(());
        }

        // The node pools migration is a one-off upgrade with its own marker.
        if object.annotation(annotations::UPGRADING_TO_NODE_POOLS) == Some("true") {
            mark_true(object, ConditionType::Upgrading);
            return Ok(());
        }

        let Some(deployed) = object
            .annotation(annotations::LAST_DEPLOYED_VERSION)
            .map(str::to_string)
        else {
            mark_false(
                object,
                ConditionType::Upgrading,
                reasons::UPGRADE_NOT_STARTED,
                ConditionSeverity::Info,
                "Upgrade has not been started",
            );
            return Ok(());
        };

        // A missing desired version counts as a pending rollout.
        let versions_match = object.label(labels::RELEASE_VERSION) == Some(deployed.as_str());

        let (current_status, transition_time) = match get(object, ConditionType::Upgrading) {
            Some(c) => (c.status, c.last_transition_time),
            None => (ConditionStatus::Unknown, None),
        };

        match current_status {
            ConditionStatus::Unknown => {
                if versions_match {
                    mark_false(
                        object,
                        ConditionType::Upgrading,
                        reasons::UPGRADE_NOT_STARTED,
                        ConditionSeverity::Info,
                        "Upgrade has not been started",
                    );
                } else {
                    mark_true(object, ConditionType::Upgrading);
                }
            }
            ConditionStatus::True if versions_match => {
                let message = match transition_time {
                    Some(started) => format!(
                        "Upgrade has been completed in {}",
                        format_duration(Utc::now() - started)
                    ),
                    None => {
                        "Upgrade has been completed, but upgrade duration cannot be determined"
                            .to_string()
                    }
                };
                mark_false(
                    object,
                    ConditionType::Upgrading,
                    reasons::UPGRADE_COMPLETED,
                    ConditionSeverity::Info,
                    message,
                );
            }
            ConditionStatus::False if !versions_match => {
                mark_true(object, ConditionType::Upgrading);
            }
            // Still upgrading, or still idle.
            _ => {}
        }

        Ok(())
    }
}

#[async_trait]
impl<S, O> ConditionHandler<O> for UpgradingHandler<S>
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
