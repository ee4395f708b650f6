// SPDX-License-Identifier: Apache-2.0

//! Rolling up sibling conditions on the same object into one summary
//! condition.

use crate::conditions::aggregate::{aggregate, AggregateOptions, AggregateSource};
use crate::conditions::object::ConditionedObject;
use crate::conditions::ops::get;
use crate::types::{Condition, ConditionType};

/// Predicate deciding whether a condition is excluded from summarization.
/// Receives the current condition of a listed type, or `None` when that
/// type is not set yet.
pub type ConditionCheck = Box<dyn Fn(Option<&Condition>) -> bool + Send + Sync>;

/// Set `target` on the object by merging the object's own conditions of the
/// listed types. A listed type whose current condition matches any ignore
/// predicate is excluded before merging; a listed type with no condition
/// yet merges as Unknown. When every listed type is ignored the object is
/// left untouched.
pub fn summarize<O: ConditionedObject + ?Sized>(
    object: &mut O,
    target: ConditionType,
    types: &[ConditionType],
    ignore: &[ConditionCheck],
    options: &AggregateOptions,
) {
    let mut sources = Vec::with_capacity(types.len());

    for condition_type in types {
        let condition = get(object, *condition_type);
        if ignore.iter().any(|check| check(condition)) {
            continue;
        }

        sources.push(AggregateSource {
            name: condition_type.as_str().to_string(),
            ready: condition.cloned(),
        });
    }

    aggregate(object, target, &sources, options);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::ops::{is_true, mark_false, mark_true};
    use crate::test_utils::make_cluster;
    use crate::types::ConditionSeverity;

    const CLUSTER_SUMMARY: [ConditionType; 3] = [
        ConditionType::InfrastructureReady,
        ConditionType::ControlPlaneReady,
        ConditionType::NodePoolsReady,
    ];

    fn ignore_node_pools_not_found() -> ConditionCheck {
        Box::new(|condition| {
            condition.is_some_and(|c| {
                c.condition_type == ConditionType::NodePoolsReady.as_str()
                    && c.is_false()
                    && c.reason.as_deref() == Some("NodePoolsNotFound")
                    && c.severity == Some(ConditionSeverity::Info)
            })
        })
    }

    #[test]
    fn test_summary_is_true_when_all_siblings_are_true() {
        let mut cluster = make_cluster("test-cluster", |_| {});
        mark_true(&mut cluster, ConditionType::InfrastructureReady);
        mark_true(&mut cluster, ConditionType::ControlPlaneReady);
        mark_true(&mut cluster, ConditionType::NodePoolsReady);

        summarize(
            &mut cluster,
            ConditionType::Ready,
            &CLUSTER_SUMMARY,
            &[],
            &AggregateOptions::default(),
        );

        assert!(is_true(&cluster, ConditionType::Ready));
    }

    #[test]
    fn test_summary_is_unknown_when_a_sibling_is_missing() {
        let mut cluster = make_cluster("test-cluster", |_| {});
        mark_true(&mut cluster, ConditionType::InfrastructureReady);
        mark_true(&mut cluster, ConditionType::ControlPlaneReady);

        summarize(
            &mut cluster,
            ConditionType::Ready,
            &CLUSTER_SUMMARY,
            &[],
            &AggregateOptions::default(),
        );

        let condition = get(&cluster, ConditionType::Ready).unwrap();
        assert!(condition.is_unknown());
    }

    #[test]
    fn test_ignored_benign_condition_does_not_force_summary_false() {
        let mut cluster = make_cluster("test-cluster", |_| {});
        mark_true(&mut cluster, ConditionType::InfrastructureReady);
        mark_true(&mut cluster, ConditionType::ControlPlaneReady);
        mark_false(
            &mut cluster,
            ConditionType::NodePoolsReady,
            "NodePoolsNotFound",
            ConditionSeverity::Info,
            "Node pools are not found for Cluster org-test/test-cluster",
        );

        summarize(
            &mut cluster,
            ConditionType::Ready,
            &CLUSTER_SUMMARY,
            &[ignore_node_pools_not_found()],
            &AggregateOptions::default(),
        );

        assert!(is_true(&cluster, ConditionType::Ready));
    }

    #[test]
    fn test_non_benign_false_sibling_forces_summary_false() {
        let mut cluster = make_cluster("test-cluster", |_| {});
        mark_true(&mut cluster, ConditionType::InfrastructureReady);
        mark_false(
            &mut cluster,
            ConditionType::ControlPlaneReady,
            "ControlPlaneObjectNotFound",
            ConditionSeverity::Warning,
            "control plane object is missing",
        );
        mark_true(&mut cluster, ConditionType::NodePoolsReady);

        summarize(
            &mut cluster,
            ConditionType::Ready,
            &CLUSTER_SUMMARY,
            &[ignore_node_pools_not_found()],
            &AggregateOptions {
                step_counter: false,
                add_source_ref: true,
            },
        );

        let condition = get(&cluster, ConditionType::Ready).unwrap();
        assert!(condition.is_false());
        assert_eq!(
            condition.reason.as_deref(),
            Some("ControlPlaneObjectNotFound")
        );
        assert_eq!(
            condition.message.as_deref(),
            Some("control plane object is missing @ ControlPlaneReady")
        );
    }
}
