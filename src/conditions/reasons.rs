// SPDX-License-Identifier: Apache-2.0

//! Condition reason tokens. These are part of the operator-facing surface
//! and must stay stable: external tooling matches on them.

pub const INFRASTRUCTURE_REFERENCE_NOT_SET: &str = "InfrastructureReferenceNotSet";
pub const INFRASTRUCTURE_OBJECT_NOT_FOUND: &str = "InfrastructureObjectNotFound";
pub const WAITING_FOR_INFRASTRUCTURE_FALLBACK: &str = "WaitingForInfrastructureFallback";

pub const CONTROL_PLANE_REFERENCE_NOT_SET: &str = "ControlPlaneReferenceNotSet";
pub const CONTROL_PLANE_OBJECT_NOT_FOUND: &str = "ControlPlaneObjectNotFound";
pub const WAITING_FOR_CONTROL_PLANE_FALLBACK: &str = "WaitingForControlPlaneFallback";

pub const NODE_POOLS_NOT_FOUND: &str = "NodePoolsNotFound";

pub const WAITING_FOR_REPLICAS_READY: &str = "WaitingForReplicasReady";

pub const EXISTING_OBJECT: &str = "ExistingObject";
pub const CREATION_COMPLETED: &str = "CreationCompleted";

pub const UPGRADE_NOT_STARTED: &str = "UpgradeNotStarted";
pub const UPGRADE_COMPLETED: &str = "UpgradeCompleted";
