// SPDX-License-Identifier: Apache-2.0

//! ReplicasReady: derived purely from the node pool's own replica counts,
//! no store reads involved.

use std::sync::Arc;

use async_trait::async_trait;

use crate::conditions::{mark_false, mark_true, reasons};
use crate::error::Result;
use crate::handlers::harness::{DeriveCondition, Harness};
use crate::handlers::{ConditionHandler, HandlerConfig};
use crate::store::StatusWriter;
use crate::types::{ConditionSeverity, ConditionType, MachinePool};

pub struct ReplicasReadyHandler<S> {
    store: Arc<S>,
    harness: Harness,
}

impl<S> ReplicasReadyHandler<S> {
    pub fn new(config: HandlerConfig<S>) -> Result<Self> {
        Ok(ReplicasReadyHandler {
            store: config.store,
            harness: Harness::new(
                &config.name,
                ConditionType::ReplicasReady,
                config.update_status,
            )?,
        })
    }
}

#[async_trait]
impl<S: Send + Sync> DeriveCondition<MachinePool> for ReplicasReadyHandler<S> {
    async fn derive(&self, pool: &mut MachinePool) -> Result<()> {
        let desired = pool.desired_replicas();
        let (observed, ready, node_refs) = pool
            .status
            .as_ref()
            .map(|s| (s.replicas, s.ready_replicas, s.node_refs.len() as i32))
            .unwrap_or((0, 0, 0));

        if desired > observed {
            mark_false(
                pool,
                ConditionType::ReplicasReady,
                reasons::WAITING_FOR_REPLICAS_READY,
                ConditionSeverity::Warning,
                format!("Desired number of replicas is {desired}, but found {observed}"),
            );
            return Ok(());
        }

        if observed != ready || node_refs != ready {
            mark_false(
                pool,
                ConditionType::ReplicasReady,
                reasons::WAITING_FOR_REPLICAS_READY,
                ConditionSeverity::Warning,
                format!(
                    "{ready}/{observed} replicas are ready, {node_refs}/{observed} node references set"
                ),
            );
            return Ok(());
        }

        mark_true(pool, ConditionType::ReplicasReady);
        Ok(())
    }
}

#[async_trait]
impl<S> ConditionHandler<MachinePool> for ReplicasReadyHandler<S>
where
    S: StatusWriter<MachinePool>,
{
    async fn ensure_created(&self, pool: &mut MachinePool) -> Result<()> {
        self.harness
            .ensure_created(pool, self.store.as_ref(), self)
            .await
    }

    fn name(&self) -> &str {
        &self.harness.name
    }
}
