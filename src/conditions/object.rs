// SPDX-License-Identifier: Apache-2.0
use chrono::{DateTime, Utc};

use crate::types::{Condition, ConditionType};

/// Narrow read-only view of any resource that carries status conditions.
///
/// Referenced objects fetched from the store only ever expose this much;
/// mirroring and aggregation need nothing else.
pub trait ConditionGetter {
    fn conditions(&self) -> &[Condition];
}

/// An owner resource whose conditions the handlers derive and replace.
pub trait ConditionedObject: ConditionGetter + Send + Sync {
    fn set_conditions(&mut self, conditions: Vec<Condition>);

    fn kind(&self) -> &'static str;
    fn name(&self) -> String;
    fn namespace(&self) -> String;
    fn annotation(&self, key: &str) -> Option<&str>;
    fn label(&self, key: &str) -> Option<&str>;
    fn creation_timestamp(&self) -> Option<DateTime<Utc>>;

    /// Whether this object's schema supports the given condition type at
    /// all. Distinct from the condition simply not being set yet.
    fn supports(&self, condition_type: ConditionType) -> bool;
}
