// SPDX-License-Identifier: Apache-2.0
use chrono::{DateTime, Utc};
use kube::CustomResource;
use serde::{Deserialize, Serialize};

use crate::conditions::{ConditionGetter, ConditionedObject};
use crate::types::{Condition, ConditionType, ObjectReference};

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "cluster.x-k8s.io", version = "v1beta1", kind = "MachinePool")]
#[kube(namespaced)]
#[kube(status = "MachinePoolStatus")]
#[serde(rename_all = "camelCase")]
pub struct MachinePoolSpec {
    /// Desired number of machines. Defaults to 0 when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    #[serde(default)]
    pub template: MachineTemplate,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MachineTemplate {
    #[serde(default)]
    pub spec: MachineTemplateSpec,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MachineTemplateSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infrastructure_ref: Option<ObjectReference>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MachinePoolStatus {
    /// Observed number of machines.
    #[serde(default)]
    pub replicas: i32,
    /// Number of machines with a ready node.
    #[serde(default)]
    pub ready_replicas: i32,
    /// References to the nodes backing this pool.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub node_refs: Vec<ObjectReference>,
    /// Deprecated mirror of the InfrastructureReady condition.
    #[serde(default)]
    pub infrastructure_ready: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl MachinePool {
    pub fn desired_replicas(&self) -> i32 {
        self.spec.replicas.unwrap_or(0)
    }
}

impl ConditionGetter for MachinePool {
    fn conditions(&self) -> &[Condition] {
        self.status
            .as_ref()
            .map(|s| s.conditions.as_slice())
            .unwrap_or(&[])
    }
}

impl ConditionedObject for MachinePool {
    fn set_conditions(&mut self, conditions: Vec<Condition>) {
        self.status.get_or_insert_with(Default::default).conditions = conditions;
    }

    fn kind(&self) -> &'static str {
        "MachinePool"
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
        !matches!(
            condition_type,
            ConditionType::ControlPlaneReady | ConditionType::NodePoolsReady
        )
    }
}
