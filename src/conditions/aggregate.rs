// SPDX-License-Identifier: Apache-2.0

//! Aggregation of several Ready conditions into a single summarized
//! condition with worst-case-wins semantics.
//!
//! Merge policy: the result is True only when every source is True. Any
//! False source wins, and among False sources the one with the highest
//! severity (Error over Warning over Info) decides reason, severity and
//! message. Otherwise any Unknown source (including a source with no Ready
//! condition at all) yields Unknown.

use crate::conditions::object::{ConditionGetter, ConditionedObject};
use crate::conditions::ops::set;
use crate::types::{Condition, ConditionSeverity, ConditionStatus, ConditionType};

/// One aggregation input: a named source and its Ready condition, if any.
#[derive(Clone, Debug)]
pub struct AggregateSource {
    pub name: String,
    pub ready: Option<Condition>,
}

impl AggregateSource {
    pub fn from_getter(name: impl Into<String>, getter: &dyn ConditionGetter) -> Self {
        let ready = getter
            .conditions()
            .iter()
            .find(|c| c.condition_type == ConditionType::Ready.as_str())
            .cloned();

        AggregateSource {
            name: name.into(),
            ready,
        }
    }

    fn is_true(&self) -> bool {
        self.ready.as_ref().is_some_and(Condition::is_true)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AggregateOptions {
    /// Append a "N of M conditions ready" step counter to the message.
    pub step_counter: bool,
    /// Append the name of the source that decided a non-True result.
    pub add_source_ref: bool,
}

pub(crate) struct MergeOutcome {
    pub status: ConditionStatus,
    pub reason: Option<String>,
    pub severity: Option<ConditionSeverity>,
    pub message: Option<String>,
    /// Name of the source that decided a non-True outcome.
    pub deciding_source: Option<String>,
    pub ready_count: usize,
    pub total_count: usize,
}

/// Merge the sources per the worst-case-wins policy. Returns `None` for an
/// empty source list; callers are expected to special-case that.
pub(crate) fn merge(sources: &[AggregateSource]) -> Option<MergeOutcome> {
    if sources.is_empty() {
        return None;
    }

    let ready_count = sources.iter().filter(|s| s.is_true()).count();
    let total_count = sources.len();

    let worst_false = sources
        .iter()
        .filter_map(|s| s.ready.as_ref().map(|c| (s, c)))
        .filter(|(_, c)| c.is_false())
        .min_by_key(|(_, c)| c.severity.unwrap_or(ConditionSeverity::Info));

    if let Some((source, ready)) = worst_false {
        return Some(MergeOutcome {
            status: ConditionStatus::False,
            reason: ready.reason.clone(),
            severity: ready.severity,
            message: ready.message.clone(),
            deciding_source: Some(source.name.clone()),
            ready_count,
            total_count,
        });
    }

    let first_unknown = sources.iter().find(|s| !s.is_true());
    if let Some(source) = first_unknown {
        let ready = source.ready.as_ref();
        return Some(MergeOutcome {
            status: ConditionStatus::Unknown,
            reason: ready.and_then(|c| c.reason.clone()),
            severity: None,
            message: ready.and_then(|c| c.message.clone()),
            deciding_source: Some(source.name.clone()),
            ready_count,
            total_count,
        });
    }

    Some(MergeOutcome {
        status: ConditionStatus::True,
        reason: None,
        severity: None,
        message: None,
        deciding_source: None,
        ready_count,
        total_count,
    })
}

pub(crate) fn merged_message(outcome: &MergeOutcome, options: &AggregateOptions) -> Option<String> {
    let mut message = String::new();

    if outcome.status != ConditionStatus::True {
        if let Some(m) = &outcome.message {
            message.push_str(m);
        }
        if options.add_source_ref {
            if let Some(source) = &outcome.deciding_source {
                if !message.is_empty() {
                    message.push(' ');
                }
                message.push_str(&format!("@ {source}"));
            }
        }
    }

    if options.step_counter {
        if !message.is_empty() {
            message.push_str(", ");
        }
        message.push_str(&format!(
            "{} of {} conditions ready",
            outcome.ready_count, outcome.total_count
        ));
    }

    if message.is_empty() {
        None
    } else {
        Some(message)
    }
}

/// Set `condition_type` on the object by merging the Ready conditions of
/// the given sources. An empty source list leaves the object untouched.
pub fn aggregate<O: ConditionedObject + ?Sized>(
    object: &mut O,
    condition_type: ConditionType,
    sources: &[AggregateSource],
    options: &AggregateOptions,
) {
    let Some(outcome) = merge(sources) else {
        return;
    };

    let message = merged_message(&outcome, options);
    set(
        object,
        Condition {
            condition_type: condition_type.as_str().to_string(),
            status: outcome.status,
            severity: outcome.severity,
            reason: outcome.reason,
            message,
            last_transition_time: None,
        },
    );
}
