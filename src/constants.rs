// SPDX-License-Identifier: Apache-2.0

//! Annotation and label keys consumed by the condition handlers.

pub mod annotations {
    /// Release version that was last successfully deployed during cluster or
    /// node pool creation or upgrade. Versions are plain semver without the
    /// "v" prefix, e.g. 14.1.0.
    pub const LAST_DEPLOYED_VERSION: &str = "release.signalman.dev/last-deployed-version";

    /// Set to "true" during the first upgrade from a legacy release to a
    /// node pools release.
    pub const UPGRADING_TO_NODE_POOLS: &str = "release.signalman.dev/upgrading-to-node-pools";
}

pub mod labels {
    /// Desired release version for the object.
    pub const RELEASE_VERSION: &str = "release.signalman.dev/version";

    /// Cluster API label tying a node pool to its owning cluster.
    pub const CLUSTER_NAME: &str = "cluster.x-k8s.io/cluster-name";
}
