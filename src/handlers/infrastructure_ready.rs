// SPDX-License-Identifier: Apache-2.0

//! InfrastructureReady: mirrors the Ready condition of the referenced
//! provider-infrastructure object onto the owner.

use async_trait::async_trait;

use crate::conditions::{
    is_true, mark_false, mirror, reasons, remove, ConditionedObject, FallbackCondition,
};
use crate::error::Result;
use crate::handlers::harness::{DeriveCondition, Harness};
use crate::handlers::{ConditionHandler, HandlerConfig};
use crate::store::{ExternalObjectSource, StatusWriter};
use crate::types::{Cluster, ConditionSeverity, ConditionType, MachinePool, ObjectReference};

/// Condition type written by provider operators before the upstream
/// InfrastructureReady condition existed. Stripped on sight.
const DEPRECATED_PROVIDER_INFRASTRUCTURE_READY: &str = "ProviderInfrastructureReady";

/// Capability layer over the two owner shapes: clusters and node pools
/// keep their infrastructure reference and their legacy ready flag in
/// different places, the derivation rule below handles both through this
/// trait.
pub trait InfrastructureReferenced: ConditionedObject {
    fn infrastructure_ref(&self) -> Option<&ObjectReference>;
    fn set_infrastructure_ready_flag(&mut self, ready: bool);
}

impl InfrastructureReferenced for Cluster {
    fn infrastructure_ref(&self) -> Option<&ObjectReference> {
        self.spec.infrastructure_ref.as_ref()
    }

    fn set_infrastructure_ready_flag(&mut self, ready: bool) {
        self.status
            .get_or_insert_with(Default::default)
            .infrastructure_ready = ready;
    }
}

impl InfrastructureReferenced for MachinePool {
    fn infrastructure_ref(&self) -> Option<&ObjectReference> {
        self.spec.template.spec.infrastructure_ref.as_ref()
    }

    fn set_infrastructure_ready_flag(&mut self, ready: bool) {
        self.status
            .get_or_insert_with(Default::default)
            .infrastructure_ready = ready;
    }
}

pub struct InfrastructureReadyHandler<S> {
    store: std::sync::Arc<S>,
    harness: Harness,
}

impl<S> InfrastructureReadyHandler<S> {
    pub fn new(config: HandlerConfig<S>) -> Result<Self> {
        Ok(InfrastructureReadyHandler {
            store: config.store,
            harness: Harness::new(
                &config.name,
                ConditionType::InfrastructureReady,
                config.update_status,
            )?,
        })
    }
}

#[async_trait]
impl<S, O> DeriveCondition<O> for InfrastructureReadyHandler<S>
where
    S: ExternalObjectSource,
    O: InfrastructureReferenced,
{
    async fn derive(&self, object: &mut O) -> Result<()> {
        remove(object, DEPRECATED_PROVIDER_INFRASTRUCTURE_READY);

        let Some(reference) = object.infrastructure_ref().cloned() else {
            let message = format!(
                "{} object '{}/{}' does not have infrastructure reference set",
                object.kind(),
                object.namespace(),
                object.name()
            );
            mark_false(
                object,
                ConditionType::InfrastructureReady,
                reasons::INFRASTRUCTURE_REFERENCE_NOT_SET,
                ConditionSeverity::Warning,
                message,
            );
            return Ok(());
        };

        let namespace = object.namespace();
        let target_namespace = reference.namespace.as_deref().unwrap_or(&namespace);
        let Some(external) = self.store.get_external(&namespace, &reference).await? else {
            let message = format!(
                "Infrastructure object '{}/{}' of kind {} is not found for {} object '{}/{}'",
                target_namespace,
                reference.name,
                reference.kind,
                object.kind(),
                namespace,
                object.name()
            );
            mark_false(
                object,
                ConditionType::InfrastructureReady,
                reasons::INFRASTRUCTURE_OBJECT_NOT_FOUND,
                ConditionSeverity::Warning,
                message,
            );
            return Ok(());
        };

        let fallback = FallbackCondition::new(
            reasons::WAITING_FOR_INFRASTRUCTURE_FALLBACK,
            ConditionSeverity::Warning,
            format!(
                "Waiting for infrastructure object '{}/{}' of kind {} to have Ready condition set",
                target_namespace, reference.name, reference.kind
            ),
        );
        mirror(
            object,
            ConditionType::InfrastructureReady,
            Some(&external),
            &fallback,
        );

        let ready = is_true(object, ConditionType::InfrastructureReady);
        object.set_infrastructure_ready_flag(ready);
        Ok(())
    }
}

#[async_trait]
impl<S, O> ConditionHandler<O> for InfrastructureReadyHandler<S>
where
    S: ExternalObjectSource + StatusWriter<O>,
    O: InfrastructureReferenced,
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
