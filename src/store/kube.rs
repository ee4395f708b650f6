// SPDX-License-Identifier: Apache-2.0

//! Store implementation backed by the Kubernetes API.

use async_trait::async_trait;
use kube::api::{DynamicObject, ListParams, PostParams};
use kube::core::{ApiResource, GroupVersionKind};
use kube::{Api, Client, ResourceExt};
use tracing::debug;

use crate::constants::labels;
use crate::error::{Result, SignalmanError};
use crate::store::{ExternalObject, ExternalObjectSource, StatusWriter};
use crate::types::{Cluster, Condition, MachinePool, ObjectReference};

/// Production store over a [`kube::Client`]. Referenced objects are fetched
/// dynamically typed, since only their status conditions are consumed.
#[derive(Clone)]
pub struct KubeStore {
    client: Client,
}

impl KubeStore {
    pub fn new(client: Client) -> Self {
        KubeStore { client }
    }
}

fn map_kube_error(err: kube::Error) -> SignalmanError {
    match err {
        kube::Error::Api(response) if response.code == 409 => {
            SignalmanError::StoreConflict(response.message)
        }
        other => SignalmanError::Kube(other),
    }
}

fn conditions_of(object: &DynamicObject) -> Vec<Condition> {
    let Some(raw) = object.data.pointer("/status/conditions") else {
        return Vec::new();
    };

    serde_json::from_value(raw.clone()).unwrap_or_default()
}

#[async_trait]
impl ExternalObjectSource for KubeStore {
    async fn get_external(
        &self,
        namespace: &str,
        reference: &ObjectReference,
    ) -> Result<Option<ExternalObject>> {
        let (group, version) = reference.group_version();
        let gvk = GroupVersionKind::gvk(group, version, &reference.kind);
        let resource = ApiResource::from_gvk(&gvk);

        let target_namespace = reference.namespace.as_deref().unwrap_or(namespace);
        let api: Api<DynamicObject> =
            Api::namespaced_with(self.client.clone(), target_namespace, &resource);

        match api.get(&reference.name).await {
            Ok(object) => Ok(Some(ExternalObject {
                kind: reference.kind.clone(),
                name: object.name_any(),
                conditions: conditions_of(&object),
            })),
            Err(kube::Error::Api(response)) if response.code == 404 => {
                debug!(
                    kind = %reference.kind,
                    name = %reference.name,
                    "referenced object not found"
                );
                Ok(None)
            }
            Err(err) => Err(map_kube_error(err)),
        }
    }

    async fn list_node_pools(
        &self,
        namespace: &str,
        cluster_name: &str,
    ) -> Result<Vec<MachinePool>> {
        let api: Api<MachinePool> = Api::namespaced(self.client.clone(), namespace);
        let selector = format!("{}={}", labels::CLUSTER_NAME, cluster_name);

        let pools = api
            .list(&ListParams::default().labels(&selector))
            .await
            .map_err(map_kube_error)?;

        Ok(pools.items)
    }
}

#[async_trait]
impl StatusWriter<Cluster> for KubeStore {
    async fn update_status(&self, object: &Cluster) -> Result<()> {
        let api: Api<Cluster> =
            Api::namespaced(self.client.clone(), &object.namespace().unwrap_or_default());
        let data = serde_json::to_vec(object)?;

        api.replace_status(&object.name_any(), &PostParams::default(), data)
            .await
            .map_err(map_kube_error)?;
        Ok(())
    }
}

#[async_trait]
impl StatusWriter<MachinePool> for KubeStore {
    async fn update_status(&self, object: &MachinePool) -> Result<()> {
        let api: Api<MachinePool> =
            Api::namespaced(self.client.clone(), &object.namespace().unwrap_or_default());
        let data = serde_json::to_vec(object)?;

        api.replace_status(&object.name_any(), &PostParams::default(), data)
            .await
            .map_err(map_kube_error)?;
        Ok(())
    }
}
