// SPDX-License-Identifier: Apache-2.0

//! Ready-made handler chains for the supported owner types.

use std::sync::Arc;

use crate::conditions::{reasons, ConditionCheck};
use crate::error::Result;
use crate::handlers::{
    CompositeHandler, CompositeHandlerConfig, ConditionHandler, ControlPlaneReadyHandler,
    CreatingHandler, HandlerConfig, InfrastructureReadyHandler, NodePoolsReadyHandler,
    ReadyHandler, ReadyHandlerConfig, ReplicasReadyHandler, UpgradingHandler,
};
use crate::store::{ExternalObjectSource, StatusWriter};
use crate::types::{Cluster, ConditionSeverity, ConditionType, MachinePool};

/// Excludes the benign "cluster has no node pools yet" condition from the
/// Ready summary.
pub fn ignore_node_pools_not_found() -> ConditionCheck {
    Box::new(|condition| {
        condition.is_some_and(|c| {
            c.condition_type == ConditionType::NodePoolsReady.as_str()
                && c.is_false()
                && c.reason.as_deref() == Some(reasons::NODE_POOLS_NOT_FOUND)
                && c.severity == Some(ConditionSeverity::Info)
        })
    })
}

fn config<S>(store: &Arc<S>, name: &str) -> HandlerConfig<S> {
    HandlerConfig {
        store: Arc::clone(store),
        name: name.to_string(),
        update_status: false,
    }
}

/// The full condition chain for clusters. Only the last handler persists
/// the accumulated status, so the chain issues a single write per pass.
pub fn cluster_conditions_handler<S>(
    store: Arc<S>,
    name: &str,
) -> Result<CompositeHandler<Cluster>>
where
    S: ExternalObjectSource + StatusWriter<Cluster> + 'static,
{
    let handlers: Vec<Box<dyn ConditionHandler<Cluster>>> = vec![
        Box::new(InfrastructureReadyHandler::new(config(
            &store,
            "infrastructureReadyHandler",
        ))?),
        Box::new(ControlPlaneReadyHandler::new(config(
            &store,
            "controlPlaneReadyHandler",
        ))?),
        Box::new(NodePoolsReadyHandler::new(config(
            &store,
            "nodePoolsReadyHandler",
        ))?),
        Box::new(ReadyHandler::new(ReadyHandlerConfig {
            store: Arc::clone(&store),
            name: "readyHandler".to_string(),
            update_status: false,
            types: vec![
                ConditionType::InfrastructureReady,
                ConditionType::ControlPlaneReady,
                ConditionType::NodePoolsReady,
            ],
            ignore: vec![ignore_node_pools_not_found()],
        })?),
        Box::new(CreatingHandler::new(config(&store, "creatingHandler"))?),
        Box::new(UpgradingHandler::new(HandlerConfig {
            store,
            name: "upgradingHandler".to_string(),
            update_status: true,
        })?),
    ];

    CompositeHandler::new(CompositeHandlerConfig {
        name: name.to_string(),
        handlers,
    })
}

/// The full condition chain for node pools, with the same single-write
/// persistence split as the cluster chain.
pub fn machine_pool_conditions_handler<S>(
    store: Arc<S>,
    name: &str,
) -> Result<CompositeHandler<MachinePool>>
where
    S: ExternalObjectSource + StatusWriter<MachinePool> + 'static,
{
    let handlers: Vec<Box<dyn ConditionHandler<MachinePool>>> = vec![
        Box::new(InfrastructureReadyHandler::new(config(
            &store,
            "infrastructureReadyHandler",
        ))?),
        Box::new(ReplicasReadyHandler::new(config(
            &store,
            "replicasReadyHandler",
        ))?),
        Box::new(ReadyHandler::new(ReadyHandlerConfig {
            store: Arc::clone(&store),
            name: "readyHandler".to_string(),
            update_status: false,
            types: vec![
                ConditionType::InfrastructureReady,
                ConditionType::ReplicasReady,
            ],
            ignore: vec![],
        })?),
        Box::new(CreatingHandler::new(config(&store, "creatingHandler"))?),
        Box::new(UpgradingHandler::new(HandlerConfig {
            store,
            name: "upgradingHandler".to_string(),
            update_status: true,
        })?),
    ];

    CompositeHandler::new(CompositeHandlerConfig {
        name: name.to_string(),
        handlers,
    })
}
