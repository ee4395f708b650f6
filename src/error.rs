// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

use crate::types::ConditionType;

#[derive(Error, Debug)]
pub enum SignalmanError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("condition {condition_type} is not supported for {kind} objects")]
    UnsupportedCondition {
        kind: String,
        condition_type: ConditionType,
    },

    #[error("status update conflict: {0}")]
    StoreConflict(String),

    #[error("unknown kind: {0}")]
    UnknownKind(String),

    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("failed to parse manifest: {0}")]
    Manifest(#[from] serde_yaml::Error),
}

impl SignalmanError {
    /// True for optimistic-concurrency failures reported by the store.
    pub fn is_conflict(&self) -> bool {
        matches!(self, SignalmanError::StoreConflict(_))
    }
}

pub type Result<T> = std::result::Result<T, SignalmanError>;
