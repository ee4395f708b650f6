// SPDX-License-Identifier: Apache-2.0

//! Core operations on an object's condition list.
//!
//! `set` is the single write path: it replaces at most one entry keyed by
//! condition type and only refreshes `last_transition_time` when the status
//! actually flips. Everything else builds on it.

use chrono::Utc;

use crate::conditions::object::{ConditionGetter, ConditionedObject};
use crate::types::{Condition, ConditionSeverity, ConditionType};

/// Get the condition of the given type, if set.
pub fn get<O: ConditionGetter + ?Sized>(object: &O, condition_type: ConditionType) -> Option<&Condition> {
    object
        .conditions()
        .iter()
        .find(|c| c.condition_type == condition_type.as_str())
}

/// Set a condition on the object, replacing any existing condition of the
/// same type. The transition time of an existing condition is preserved
/// when the status is unchanged and stamped with the current time when it
/// flips.
pub fn set<O: ConditionedObject + ?Sized>(object: &mut O, mut condition: Condition) {
    let mut conditions = object.conditions().to_vec();

    match conditions
        .iter_mut()
        .find(|c| c.condition_type == condition.condition_type)
    {
        Some(existing) => {
            if existing.status == condition.status {
                condition.last_transition_time = existing.last_transition_time;
            } else {
                condition.last_transition_time = Some(Utc::now());
            }
            *existing = condition;
        }
        None => {
            condition.last_transition_time = Some(Utc::now());
            conditions.push(condition);
        }
    }

    object.set_conditions(conditions);
}

/// Remove the condition with the given raw type string, if present. Used
/// for opportunistic cleanup of deprecated condition types.
pub fn remove<O: ConditionedObject + ?Sized>(object: &mut O, condition_type: &str) {
    if !object
        .conditions()
        .iter()
        .any(|c| c.condition_type == condition_type)
    {
        return;
    }

    let conditions = object
        .conditions()
        .iter()
        .filter(|c| c.condition_type != condition_type)
        .cloned()
        .collect();
    object.set_conditions(conditions);
}

/// Set a condition with status True, clearing reason, severity and message.
pub fn mark_true<O: ConditionedObject + ?Sized>(object: &mut O, condition_type: ConditionType) {
    set(object, Condition::true_condition(condition_type));
}

/// Set a condition with status False and the given reason, severity and
/// message.
pub fn mark_false<O: ConditionedObject + ?Sized>(
    object: &mut O,
    condition_type: ConditionType,
    reason: &str,
    severity: ConditionSeverity,
    message: impl Into<String>,
) {
    set(
        object,
        Condition::false_condition(condition_type, reason, severity, message),
    );
}

pub fn is_true<O: ConditionGetter + ?Sized>(object: &O, condition_type: ConditionType) -> bool {
    get(object, condition_type).is_some_and(Condition::is_true)
}

pub fn is_false<O: ConditionGetter + ?Sized>(object: &O, condition_type: ConditionType) -> bool {
    get(object, condition_type).is_some_and(Condition::is_false)
}

/// True when the condition is set to Unknown or not set at all.
pub fn is_unknown<O: ConditionGetter + ?Sized>(object: &O, condition_type: ConditionType) -> bool {
    get(object, condition_type).is_none_or(Condition::is_unknown)
}

/// Full equality, including the transition time.
pub fn are_equal(a: Option<&Condition>, b: Option<&Condition>) -> bool {
    a == b
}

/// Equality ignoring `last_transition_time`. This is the diff the handler
/// harness uses to decide whether the observable status changed.
pub fn are_equal_ignoring_transition_time(a: Option<&Condition>, b: Option<&Condition>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => {
            let mut a = a.clone();
            let mut b = b.clone();
            a.last_transition_time = None;
            b.last_transition_time = None;
            a == b
        }
        _ => false,
    }
}
