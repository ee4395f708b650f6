// SPDX-License-Identifier: Apache-2.0
use chrono::{DateTime, Utc};
use kube::CustomResource;
use serde::{Deserialize, Serialize};

use crate::conditions::{ConditionGetter, ConditionedObject};
use crate::types::{Condition, ConditionType, ObjectReference};

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "cluster.x-k8s.io", version = "v1beta1", kind = "Cluster")]
#[kube(namespaced)]
#[kube(status = "ClusterStatus")]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_plane_ref: Option<ObjectReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infrastructure_ref: Option<ObjectReference>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClusterStatus {
    /// Deprecated mirror of the InfrastructureReady condition, kept in sync
    /// for older consumers.
    #[serde(default)]
    pub infrastructure_ready: bool,
    /// Deprecated mirror of the ControlPlaneReady condition.
    #[serde(default)]
    pub control_plane_ready: bool,
    /// Latches to true the first time the control plane becomes ready and
    /// never clears.
    #[serde(default)]
    pub control_plane_initialized: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl ConditionGetter for Cluster {
    fn conditions(&self) -> &[Condition] {
        self.status
            .as_ref()
            .map(|s| s.conditions.as_slice())
            .unwrap_or(&[])
    }
}

impl ConditionedObject for Cluster {
    fn set_conditions(&mut self, conditions: Vec<Condition>) {
        self.status.get_or_insert_with(Default::default).conditions = conditions;
    }

    fn kind(&self) -> &'static str {
        "Cluster"
    }

    fn name(&self) -> String {
        self.metadata.name.clone().unwrap_or_default()
    }

    fn namespace(&self) -> String {
        self.metadata.namespace.clone().unwrap_or_default()
    }

    fn annotation(&self, key: &str) -> Option<&str> {
        self.metadata
            .annotations
            .as_ref()
            .and_then(|a| a.get(key))
            .map(String::as_str)
    }

    fn label(&self, key: &str) -> Option<&str> {
        self.metadata
            .labels
            .as_ref()
            .and_then(|l| l.get(key))
            .map(String::as_str)
    }

    fn creation_timestamp(&self) -> Option<DateTime<Utc>> {
        self.metadata.creation_timestamp.as_ref().map(|t| t.0)
    }

    fn supports(&self, condition_type: ConditionType) -> bool {
        !matches!(condition_type, ConditionType::ReplicasReady)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::make_cluster;

    #[test]
    fn test_conditions_are_empty_without_status() {
        let cluster = make_cluster("test-cluster", |_| {});
        assert!(cluster.conditions().is_empty());
    }

    #[test]
    fn test_set_conditions_materializes_status() {
        let mut cluster = make_cluster("test-cluster", |_| {});
        cluster.set_conditions(vec![Condition::true_condition(ConditionType::Ready)]);

        assert_eq!(cluster.conditions().len(), 1);
        assert_eq!(cluster.conditions()[0].condition_type, "Ready");
    }

    #[test]
    fn test_cluster_does_not_support_replicas_ready() {
        let cluster = make_cluster("test-cluster", |_| {});
        assert!(!cluster.supports(ConditionType::ReplicasReady));
        assert!(cluster.supports(ConditionType::NodePoolsReady));
        assert!(cluster.supports(ConditionType::Ready));
    }
}
