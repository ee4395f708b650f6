// SPDX-License-Identifier: Apache-2.0

//! NodePoolsReady: aggregates the Ready conditions of all node pools
//! belonging to a cluster.

use std::sync::Arc;

use async_trait::async_trait;

use crate::conditions::{
    aggregate, mark_false, reasons, AggregateOptions, AggregateSource, ConditionedObject,
};
use crate::constants::labels;
use crate::error::{Result, SignalmanError};
use crate::handlers::harness::{DeriveCondition, Harness};
use crate::handlers::{ConditionHandler, HandlerConfig};
use crate::store::{ExternalObjectSource, StatusWriter};
use crate::types::{Cluster, ConditionSeverity, ConditionType};

pub struct NodePoolsReadyHandler<S> {
    store: Arc<S>,
    harness: Harness,
}

impl<S> NodePoolsReadyHandler<S> {
    pub fn new(config: HandlerConfig<S>) -> Result<Self> {
        Ok(NodePoolsReadyHandler {
            store: config.store,
            harness: Harness::new(
                &config.name,
                ConditionType::NodePoolsReady,
                config.update_status,
            )?,
        })
    }
}

#[async_trait]
impl<S> DeriveCondition<Cluster> for NodePoolsReadyHandler<S>
where
    S: ExternalObjectSource,
{
    async fn derive(&self, cluster: &mut Cluster) -> Result<()> {
        // Node pools carry the cluster-name label, so the owner must too.
        let Some(cluster_name) = cluster.label(labels::CLUSTER_NAME).map(str::to_string) else {
            return Err(SignalmanError::InvalidConfig(format!(
                "Cluster object '{}/{}' does not have label {} set",
                cluster.namespace(),
                cluster.name(),
                labels::CLUSTER_NAME
            )));
        };

        let pools = self
            .store
            .list_node_pools(&cluster.namespace(), &cluster_name)
            .await?;

        if pools.is_empty() {
            let message = format!(
                "Node pools are not found for Cluster {}/{}",
                cluster.namespace(),
                cluster.name()
            );
            mark_false(
                cluster,
                ConditionType::NodePoolsReady,
                reasons::NODE_POOLS_NOT_FOUND,
                ConditionSeverity::Info,
                message,
            );
            return Ok(());
        }

        let sources: Vec<AggregateSource> = pools
            .iter()
            .map(|pool| AggregateSource::from_getter(pool.name(), pool))
            .collect();

        aggregate(
            cluster,
            ConditionType::NodePoolsReady,
            &sources,
            &AggregateOptions {
                step_counter: true,
                add_source_ref: true,
            },
        );
        Ok(())
    }
}

#[async_trait]
impl<S> ConditionHandler<Cluster> for NodePoolsReadyHandler<S>
where
    S: ExternalObjectSource + StatusWriter<Cluster>,
{
    async fn ensure_created(&self, cluster: &mut Cluster) -> Result<()> {
        self.harness
            .ensure_created(cluster, self.store.as_ref(), self)
            .await
    }

    fn name(&self) -> &str {
        &self.harness.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::{get, is_true, set};
    use crate::test_utils::{make_cluster, make_machine_pool, FakeStore};
    use crate::types::Condition;

    fn handler(store: Arc<FakeStore>) -> NodePoolsReadyHandler<FakeStore> {
        NodePoolsReadyHandler::new(HandlerConfig {
            store,
            name: "nodePoolsReadyHandler".to_string(),
            update_status: false,
        })
        .unwrap()
    }

    fn labeled_cluster() -> Cluster {
        make_cluster("test-cluster", |c| {
            c.metadata.labels = Some(
                [(labels::CLUSTER_NAME.to_string(), "test-cluster".to_string())]
                    .into_iter()
                    .collect(),
            );
        })
    }

    fn pool_with_ready(name: &str, ready: Condition) -> crate::types::MachinePool {
        make_machine_pool(name, |p| set(p, ready))
    }

    #[tokio::test]
    async fn test_missing_cluster_name_label_is_a_config_error() {
        let store = Arc::new(FakeStore::new());
        let mut cluster = make_cluster("test-cluster", |_| {});

        let err = handler(store).ensure_created(&mut cluster).await.unwrap_err();

        assert!(matches!(err, SignalmanError::InvalidConfig(_)));
        assert!(get(&cluster, ConditionType::NodePoolsReady).is_none());
    }

    #[tokio::test]
    async fn test_no_node_pools_marks_false_with_info() {
        let store = Arc::new(FakeStore::new());
        let mut cluster = labeled_cluster();

        handler(store).ensure_created(&mut cluster).await.unwrap();

        let condition = get(&cluster, ConditionType::NodePoolsReady).unwrap();
        assert!(condition.is_false());
        assert_eq!(condition.reason.as_deref(), Some(reasons::NODE_POOLS_NOT_FOUND));
        assert_eq!(condition.severity, Some(ConditionSeverity::Info));
        assert_eq!(
            condition.message.as_deref(),
            Some("Node pools are not found for Cluster org-test/test-cluster")
        );
    }

    #[tokio::test]
    async fn test_all_pools_ready_aggregates_to_true_with_step_counter() {
        let store = Arc::new(FakeStore::new());
        store.add_node_pool(pool_with_ready(
            "pool-1",
            Condition::true_condition(ConditionType::Ready),
        ));
        store.add_node_pool(pool_with_ready(
            "pool-2",
            Condition::true_condition(ConditionType::Ready),
        ));
        let mut cluster = labeled_cluster();

        handler(store).ensure_created(&mut cluster).await.unwrap();

        let condition = get(&cluster, ConditionType::NodePoolsReady).unwrap();
        assert!(condition.is_true());
        assert_eq!(condition.message.as_deref(), Some("2 of 2 conditions ready"));
    }

    #[tokio::test]
    async fn test_unready_pool_decides_with_source_ref() {
        let store = Arc::new(FakeStore::new());
        store.add_node_pool(pool_with_ready(
            "pool-1",
            Condition::true_condition(ConditionType::Ready),
        ));
        store.add_node_pool(pool_with_ready(
            "pool-2",
            Condition::false_condition(
                ConditionType::Ready,
                "Deploying",
                ConditionSeverity::Warning,
                "still deploying",
            ),
        ));
        let mut cluster = labeled_cluster();

        handler(store).ensure_created(&mut cluster).await.unwrap();

        let condition = get(&cluster, ConditionType::NodePoolsReady).unwrap();
        assert!(condition.is_false());
        assert_eq!(condition.reason.as_deref(), Some("Deploying"));
        assert_eq!(
            condition.message.as_deref(),
            Some("still deploying @ pool-2, 1 of 2 conditions ready")
        );
    }

    #[tokio::test]
    async fn test_pools_of_other_clusters_are_not_counted() {
        let store = Arc::new(FakeStore::new());
        store.add_node_pool(pool_with_ready(
            "pool-1",
            Condition::true_condition(ConditionType::Ready),
        ));
        store.add_node_pool(make_machine_pool("other-pool", |p| {
            p.metadata.labels = Some(
                [(labels::CLUSTER_NAME.to_string(), "other-cluster".to_string())]
                    .into_iter()
                    .collect(),
            );
        }));
        let mut cluster = labeled_cluster();

        handler(store).ensure_created(&mut cluster).await.unwrap();

        let condition = get(&cluster, ConditionType::NodePoolsReady).unwrap();
        assert!(is_true(&cluster, ConditionType::NodePoolsReady));
        assert_eq!(condition.message.as_deref(), Some("1 of 1 conditions ready"));
    }

    #[tokio::test]
    async fn test_pool_without_ready_condition_yields_unknown() {
        let store = Arc::new(FakeStore::new());
        store.add_node_pool(make_machine_pool("pool-1", |_| {}));
        let mut cluster = labeled_cluster();

        handler(store).ensure_created(&mut cluster).await.unwrap();

        let condition = get(&cluster, ConditionType::NodePoolsReady).unwrap();
        assert!(condition.is_unknown());
        assert_eq!(
            condition.message.as_deref(),
            Some("@ pool-1, 0 of 1 conditions ready")
        );
    }
}
