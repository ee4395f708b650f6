// SPDX-License-Identifier: Apache-2.0

//! Custom resource shapes and the condition value types attached to them.

pub mod cluster;
pub mod condition;
pub mod machine_pool;
pub mod reference;

pub use cluster::{Cluster, ClusterSpec, ClusterStatus};
pub use condition::{Condition, ConditionSeverity, ConditionStatus, ConditionType};
pub use machine_pool::{MachinePool, MachinePoolSpec, MachinePoolStatus};
pub use reference::ObjectReference;
