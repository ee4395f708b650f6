// SPDX-License-Identifier: Apache-2.0

//! ControlPlaneReady: mirrors the Ready condition of the cluster's control
//! plane object and keeps the legacy status flags in sync.

use std::sync::Arc;

use async_trait::async_trait;

use crate::conditions::{is_true, mark_false, mirror, reasons, FallbackCondition};
use crate::error::Result;
use crate::handlers::harness::{DeriveCondition, Harness};
use crate::handlers::{ConditionHandler, HandlerConfig};
use crate::store::{ExternalObjectSource, StatusWriter};
use crate::types::{Cluster, ConditionSeverity, ConditionType};

pub struct ControlPlaneReadyHandler<S> {
    store: Arc<S>,
    harness: Harness,
}

impl<S> ControlPlaneReadyHandler<S> {
    pub fn new(config: HandlerConfig<S>) -> Result<Self> {
        Ok(ControlPlaneReadyHandler {
            store: config.store,
            harness: Harness::new(
                &config.name,
                ConditionType::ControlPlaneReady,
                config.update_status,
            )?,
        })
    }
}

#[async_trait]
impl<S> DeriveCondition<Cluster> for ControlPlaneReadyHandler<S>
where
    S: ExternalObjectSource,
{
    async fn derive(&self, cluster: &mut Cluster) -> Result<()> {
        use crate::conditions::ConditionedObject;

        let Some(reference) = cluster.spec.control_plane_ref.clone() else {
            let message = format!(
                "Cluster object '{}/{}' does not have control plane reference set",
                cluster.namespace(),
                cluster.name()
            );
            mark_false(
                cluster,
                ConditionType::ControlPlaneReady,
                reasons::CONTROL_PLANE_REFERENCE_NOT_SET,
                ConditionSeverity::Warning,
                message,
            );
            return Ok(());
        };

        let namespace = cluster.namespace();
        let target_namespace = reference.namespace.as_deref().unwrap_or(&namespace);
        let Some(external) = self.store.get_external(&namespace, &reference).await? else {
            let message = format!(
                "Control plane object '{}/{}' of kind {} is not found for Cluster object '{}/{}'",
                target_namespace,
                reference.name,
                reference.kind,
                namespace,
                cluster.name()
            );
            mark_false(
                cluster,
                ConditionType::ControlPlaneReady,
                reasons::CONTROL_PLANE_OBJECT_NOT_FOUND,
                ConditionSeverity::Warning,
                message,
            );
            return Ok(());
        };

        let fallback = FallbackCondition::new(
            reasons::WAITING_FOR_CONTROL_PLANE_FALLBACK,
            ConditionSeverity::Warning,
            format!(
                "Waiting for control plane object '{}/{}' of kind {} to have Ready condition set",
                target_namespace, reference.name, reference.kind
            ),
        );
        mirror(
            cluster,
            ConditionType::ControlPlaneReady,
            Some(&external),
            &fallback,
        );

        let ready = is_true(cluster, ConditionType::ControlPlaneReady);
        let status = cluster.status.get_or_insert_with(Default::default);
        status.control_plane_ready = ready;
        // Initialized latches on the first ready observation and never clears.
        if ready {
            status.control_plane_initialized = true;
        }
        Ok(())
    }
}

#[async_trait]
impl<S> ConditionHandler<Cluster> for ControlPlaneReadyHandler<S>
where
    S: ExternalObjectSource + StatusWriter<Cluster>,
{
    async fn ensure_created(&self, cluster: &mut Cluster) -> Result<()> {
        self.harness
            .ensure_created(cluster, self.store.as_ref(), self)
            .await
    }

    fn name(&self) -> &str {
        &self.harness.name
    }
}
