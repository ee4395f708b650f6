// SPDX-License-Identifier: Apache-2.0

//! Mirroring a referenced object's Ready condition onto an owner.

use crate::conditions::object::{ConditionGetter, ConditionedObject};
use crate::conditions::ops::set;
use crate::types::{Condition, ConditionSeverity, ConditionType};

/// Synthetic False condition applied when the mirror source is absent or
/// does not expose a Ready condition yet.
#[derive(Clone, Debug)]
pub struct FallbackCondition {
    pub reason: String,
    pub severity: ConditionSeverity,
    pub message: String,
}

impl FallbackCondition {
    pub fn new(reason: &str, severity: ConditionSeverity, message: impl Into<String>) -> Self {
        FallbackCondition {
            reason: reason.to_string(),
            severity,
            message: message.into(),
        }
    }
}

/// Copy the Ready condition from `source` onto `object` under
/// `condition_type`, preserving status, reason, severity and message. A
/// source with Ready Unknown mirrors as Unknown. When `source` is `None`,
/// or the source has no Ready condition at all, the fallback is applied
/// instead.
pub fn mirror<O: ConditionedObject + ?Sized>(
    object: &mut O,
    condition_type: ConditionType,
    source: Option<&dyn ConditionGetter>,
    fallback: &FallbackCondition,
) {
    let ready = source.and_then(|s| {
        s.conditions()
            .iter()
            .find(|c| c.condition_type == ConditionType::Ready.as_str())
    });

    let mirrored = match ready {
        Some(ready) => Condition {
            condition_type: condition_type.as_str().to_string(),
            status: ready.status,
            severity: ready.severity,
            reason: ready.reason.clone(),
            message: ready.message.clone(),
            last_transition_time: None,
        },
        None => Condition::false_condition(
            condition_type,
            &fallback.reason,
            fallback.severity,
            fallback.message.clone(),
        ),
    };

    set(object, mirrored);
}
