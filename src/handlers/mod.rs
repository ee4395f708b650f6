// SPDX-License-Identifier: Apache-2.0

//! Condition handlers: one module per derived condition type, the generic
//! harness they share, and the composite sequencer that chains them.

pub mod composite;
pub mod control_plane_ready;
pub mod creating;
pub mod harness;
pub mod infrastructure_ready;
pub mod node_pools_ready;
pub mod ready;
pub mod replicas_ready;
pub mod upgrading;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Condition, ConditionType};

pub use composite::{CompositeHandler, CompositeHandlerConfig};
pub use control_plane_ready::ControlPlaneReadyHandler;
pub use creating::CreatingHandler;
pub use infrastructure_ready::{InfrastructureReadyHandler, InfrastructureReferenced};
pub use node_pools_ready::NodePoolsReadyHandler;
pub use ready::{ReadyHandler, ReadyHandlerConfig};
pub use replicas_ready::ReplicasReadyHandler;
pub use upgrading::UpgradingHandler;

/// A reconciliation building block. Multiple handlers can reconcile the
/// same object in a chain; within a chain they run strictly in order, one
/// after another, against the same object instance.
#[async_trait]
pub trait ConditionHandler<O>: Send + Sync {
    /// Called when the observed object is created or updated. Derives and
    /// replaces this handler's condition on the object. Must be idempotent.
    async fn ensure_created(&self, object: &mut O) -> Result<()>;

    /// Called when the observed object is marked for deletion. None of the
    /// provided condition handlers need teardown bookkeeping, so the
    /// default is a no-op.
    async fn ensure_deleted(&self, _object: &mut O) -> Result<()> {
        Ok(())
    }

    /// Handler name used for identification in logging.
    fn name(&self) -> &str;
}

/// Construction parameters shared by the single-condition handlers.
pub struct HandlerConfig<S> {
    pub store: Arc<S>,
    pub name: String,
    /// Persist the owner's status immediately after deriving the
    /// condition. Handlers with this unset rely on a later handler in the
    /// chain, or the host reconciler, to persist once.
    pub update_status: bool,
}

pub(crate) fn sprint_condition(
    condition_type: ConditionType,
    condition: Option<&Condition>,
) -> String {
    match condition {
        Some(c) => format!(
            "{}(Status={:?}, Reason={:?}, Severity={:?}, Message={:?})",
            condition_type,
            c.status,
            c.reason.as_deref().unwrap_or(""),
            c.severity.map(|s| s.to_string()).unwrap_or_default(),
            c.message.as_deref().unwrap_or(""),
        ),
        None => format!("{condition_type}(not set)"),
    }
}

/// Compact rendering of an elapsed duration for condition messages, e.g.
/// "1h2m3s" or "45s".
pub(crate) fn format_duration(duration: chrono::Duration) -> String {
    let seconds = duration.num_seconds().max(0);
    let (hours, minutes, seconds) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}
