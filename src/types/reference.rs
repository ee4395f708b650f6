// SPDX-License-Identifier: Apache-2.0
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Reference locating a dependent object such as a control plane or an
/// infrastructure resource. An absent reference on the owning object is a
/// valid state, not an error.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub name: String,
}

impl ObjectReference {
    pub fn new(kind: &str, namespace: &str, name: &str) -> Self {
        ObjectReference {
            api_version: None,
            kind: kind.to_string(),
            namespace: Some(namespace.to_string()),
            name: name.to_string(),
        }
    }

    /// The group and version encoded in `api_version`, defaulting to the
    /// core group when no version is set.
    pub fn group_version(&self) -> (&str, &str) {
        match self.api_version.as_deref() {
            Some(api_version) => match api_version.split_once('/') {
                Some((group, version)) => (group, version),
                None => ("", api_version),
            },
            None => ("", "v1"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_version_splits_grouped_api_version() {
        let mut reference = ObjectReference::new("AzureCluster", "org-test", "azure-cluster");
        reference.api_version = Some("infrastructure.cluster.x-k8s.io/v1beta1".to_string());

        assert_eq!(
            reference.group_version(),
            ("infrastructure.cluster.x-k8s.io", "v1beta1")
        );
    }

    #[test]
    fn test_group_version_defaults_to_core_group() {
        let reference = ObjectReference::new("ConfigMap", "default", "settings");
        assert_eq!(reference.group_version(), ("", "v1"));
    }
}
