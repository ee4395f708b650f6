// SPDX-License-Identifier: Apache-2.0

//! Condition primitives: object traits, the single-condition write path,
//! and the mirror/aggregate/summary combinators built on top of it.

pub mod aggregate;
pub mod mirror;
pub mod object;
pub mod ops;
pub mod reasons;
pub mod summary;

pub use aggregate::{aggregate, AggregateOptions, AggregateSource};
pub use mirror::{mirror, FallbackCondition};
pub use object::{ConditionGetter, ConditionedObject};
pub use ops::{
    are_equal, are_equal_ignoring_transition_time, get, is_false, is_true, is_unknown, mark_false,
    mark_true, remove, set,
};
pub use summary::{summarize, ConditionCheck};
