// SPDX-License-Identifier: Apache-2.0

//! Generic harness shared by all single-condition handlers.
//!
//! The harness owns the sequencing around one derivation: the
//! unsupported-condition guard, the before/after diff that ignores
//! transition-time churn, transition logging, and the optional status
//! write with conflict swallowing.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::conditions::{are_equal_ignoring_transition_time, get, ConditionedObject};
use crate::error::{Result, SignalmanError};
use crate::handlers::sprint_condition;
use crate::store::StatusWriter;
use crate::types::ConditionType;

/// The derivation rule a handler plugs into the harness: given the owner's
/// current state (and whatever referenced objects the rule fetches),
/// replace the handler's condition on the owner.
#[async_trait]
pub(crate) trait DeriveCondition<O>: Send + Sync {
    async fn derive(&self, object: &mut O) -> Result<()>;
}

#[derive(Debug)]
pub(crate) struct Harness {
    pub(crate) name: String,
    pub(crate) condition_type: ConditionType,
    pub(crate) update_status: bool,
}

impl Harness {
    pub(crate) fn new(
        name: &str,
        condition_type: ConditionType,
        update_status: bool,
    ) -> Result<Self> {
        if name.is_empty() {
            return Err(SignalmanError::InvalidConfig(
                "handler name must not be empty".to_string(),
            ));
        }

        Ok(Harness {
            name: name.to_string(),
            condition_type,
            update_status,
        })
    }

    pub(crate) async fn ensure_created<O, S>(
        &self,
        object: &mut O,
        store: &S,
        rule: &dyn DeriveCondition<O>,
    ) -> Result<()>
    where
        O: ConditionedObject,
        S: StatusWriter<O> + ?Sized,
    {
        if !object.supports(self.condition_type) {
            return Err(SignalmanError::UnsupportedCondition {
                kind: object.kind().to_string(),
                condition_type: self.condition_type,
            });
        }

        let before = get(object, self.condition_type).cloned();
        debug!(
            handler = %self.name,
            condition = %sprint_condition(self.condition_type, before.as_ref()),
            "ensuring condition"
        );

        if let Err(err) = rule.derive(object).await {
            warn!(
                handler = %self.name,
                condition_type = %self.condition_type,
                error = %err,
                "an error occurred while ensuring condition"
            );
            return Err(err);
        }

        let after = get(object, self.condition_type).cloned();
        if are_equal_ignoring_transition_time(before.as_ref(), after.as_ref()) {
            debug!(
                handler = %self.name,
                condition_type = %self.condition_type,
                "ensured condition, no change"
            );
        } else {
            debug!(
                handler = %self.name,
                condition = %sprint_condition(self.condition_type, after.as_ref()),
                "ensured condition"
            );
        }

        if self.update_status {
            match store.update_status(object).await {
                Err(err) if err.is_conflict() => {
                    // A stale write means another pass already observed
                    // fresher state; the host's re-trigger will pick it up.
                    debug!(
                        handler = %self.name,
                        "status update conflicted, abandoning this pass"
                    );
                }
                other => other?,
            }
        }

        Ok(())
    }
}
