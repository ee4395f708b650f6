// SPDX-License-Identifier: Apache-2.0

//! Boundary to the backing object store.
//!
//! Handlers read referenced objects and persist owner status exclusively
//! through these traits, so tests run against an in-memory fake and the
//! operator runs against [`KubeStore`].

pub mod kube;

use async_trait::async_trait;

use crate::conditions::ConditionGetter;
use crate::error::Result;
use crate::types::{Condition, MachinePool, ObjectReference};

pub use self::kube::KubeStore;

/// The narrow view of a referenced resource: its kind, name and status
/// conditions. Nothing else about the concrete resource matters to the
/// handlers.
#[derive(Clone, Debug)]
pub struct ExternalObject {
    pub kind: String,
    pub name: String,
    pub conditions: Vec<Condition>,
}

impl ConditionGetter for ExternalObject {
    fn conditions(&self) -> &[Condition] {
        &self.conditions
    }
}

/// Read access to resources referenced by an owner object.
#[async_trait]
pub trait ExternalObjectSource: Send + Sync {
    /// Fetch the referenced object. A missing object is a valid state and
    /// folds to `Ok(None)`; only transport or server failures are errors.
    async fn get_external(
        &self,
        namespace: &str,
        reference: &ObjectReference,
    ) -> Result<Option<ExternalObject>>;

    /// List the node pools labeled as belonging to the named cluster.
    async fn list_node_pools(
        &self,
        namespace: &str,
        cluster_name: &str,
    ) -> Result<Vec<MachinePool>>;
}

/// Write access to an owner object's status subresource.
///
/// A stale write must surface as [`SignalmanError::StoreConflict`] so the
/// harness can abandon the pass instead of failing it.
///
/// [`SignalmanError::StoreConflict`]: crate::error::SignalmanError::StoreConflict
#[async_trait]
pub trait StatusWriter<O>: Send + Sync {
    async fn update_status(&self, object: &O) -> Result<()>;
}
