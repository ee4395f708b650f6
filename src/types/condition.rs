// SPDX-License-Identifier: Apache-2.0

//! Condition value types following the Cluster API status-condition
//! conventions.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Condition types managed by this crate.
///
/// Condition lists on owner objects stay open (plain strings), so conditions
/// set by other controllers pass through untouched. This enum only names the
/// types the handlers derive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConditionType {
    Ready,
    InfrastructureReady,
    ControlPlaneReady,
    NodePoolsReady,
    ReplicasReady,
    Creating,
    Upgrading,
}

impl ConditionType {
    pub const fn as_str(self) -> &'static str {
        match self {
            ConditionType::Ready => "Ready",
            ConditionType::InfrastructureReady => "InfrastructureReady",
            ConditionType::ControlPlaneReady => "ControlPlaneReady",
            ConditionType::NodePoolsReady => "NodePoolsReady",
            ConditionType::ReplicasReady => "ReplicasReady",
            ConditionType::Creating => "Creating",
            ConditionType::Upgrading => "Upgrading",
        }
    }
}

impl fmt::Display for ConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ConditionStatus {
    True,
    False,
    #[default]
    Unknown,
}

/// Classifies the impact of a condition with status False.
///
/// Conditions with status True carry no severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub enum ConditionSeverity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for ConditionSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionSeverity::Error => f.write_str("Error"),
            ConditionSeverity::Warning => f.write_str("Warning"),
            ConditionSeverity::Info => f.write_str("Info"),
        }
    }
}

/// A single observation of an object's state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: ConditionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<ConditionSeverity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<DateTime<Utc>>,
}

impl Condition {
    /// A condition with status True and no reason, severity or message.
    pub fn true_condition(condition_type: ConditionType) -> Self {
        Condition {
            condition_type: condition_type.as_str().to_string(),
            status: ConditionStatus::True,
            severity: None,
            reason: None,
            message: None,
            last_transition_time: None,
        }
    }

    /// A condition with status False and the given reason, severity and
    /// message.
    pub fn false_condition(
        condition_type: ConditionType,
        reason: &str,
        severity: ConditionSeverity,
        message: impl Into<String>,
    ) -> Self {
        Condition {
            condition_type: condition_type.as_str().to_string(),
            status: ConditionStatus::False,
            severity: Some(severity),
            reason: Some(reason.to_string()),
            message: Some(message.into()),
            last_transition_time: None,
        }
    }

    pub fn is_true(&self) -> bool {
        self.status == ConditionStatus::True
    }

    pub fn is_false(&self) -> bool {
        self.status == ConditionStatus::False
    }

    pub fn is_unknown(&self) -> bool {
        self.status == ConditionStatus::Unknown
    }
}
