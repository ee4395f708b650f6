// SPDX-License-Identifier: Apache-2.0

//! Shared test fixtures: object builders, an in-memory store fake, a YAML
//! manifest loader and a mock Kubernetes API service.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::constants::labels;
use crate::error::{Result, SignalmanError};
use crate::store::{ExternalObject, ExternalObjectSource, StatusWriter};
use crate::types::{
    Cluster, ClusterSpec, Condition, ConditionStatus, MachinePool, MachinePoolSpec,
    ObjectReference,
};

pub fn make_cluster(name: &str, mutate: impl FnOnce(&mut Cluster)) -> Cluster {
    let mut cluster = Cluster::new(name, ClusterSpec::default());
    cluster.metadata.namespace = Some("org-test".to_string());
    mutate(&mut cluster);
    cluster
}

pub fn make_machine_pool(name: &str, mutate: impl FnOnce(&mut MachinePool)) -> MachinePool {
    let mut pool = MachinePool::new(name, MachinePoolSpec::default());
    pool.metadata.namespace = Some("org-test".to_string());
    pool.metadata.labels = Some(
        [(labels::CLUSTER_NAME.to_string(), "test-cluster".to_string())]
            .into_iter()
            .collect(),
    );
    mutate(&mut pool);
    pool
}

pub fn external_with_ready(kind: &str, name: &str, status: ConditionStatus) -> ExternalObject {
    ExternalObject {
        kind: kind.to_string(),
        name: name.to_string(),
        conditions: vec![Condition {
            condition_type: "Ready".to_string(),
            status,
            severity: None,
            reason: None,
            message: None,
            last_transition_time: Some(Utc::now()),
        }],
    }
}

/// Parse a single-document YAML manifest into the matching typed object.
#[derive(Debug)]
pub enum Manifest {
    Cluster(Box<Cluster>),
    MachinePool(Box<MachinePool>),
}

pub fn load_manifest(yaml: &str) -> Result<Manifest> {
    let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
    let kind = value
        .get("kind")
        .and_then(|k| k.as_str())
        .unwrap_or_default()
        .to_string();

    match kind.as_str() {
        "Cluster" => Ok(Manifest::Cluster(Box::new(serde_yaml::from_value(value)?))),
        "MachinePool" => Ok(Manifest::MachinePool(Box::new(serde_yaml::from_value(
            value,
        )?))),
        _ => Err(SignalmanError::UnknownKind(kind)),
    }
}

/// In-memory store double. Externals are keyed by namespace, kind and name;
/// status writes are counted and can be made to fail once with a conflict.
#[derive(Default)]
pub struct FakeStore {
    externals: Mutex<HashMap<(String, String, String), ExternalObject>>,
    node_pools: Mutex<Vec<MachinePool>>,
    status_updates: AtomicUsize,
    conflict_next_update: AtomicBool,
}

impl FakeStore {
    pub fn new() -> Self {
        FakeStore::default()
    }

    pub fn put_external(&self, namespace: &str, kind: &str, name: &str, object: ExternalObject) {
        self.externals.lock().unwrap().insert(
            (namespace.to_string(), kind.to_string(), name.to_string()),
            object,
        );
    }

    pub fn add_node_pool(&self, pool: MachinePool) {
        self.node_pools.lock().unwrap().push(pool);
    }

    /// Number of status update attempts, including failed ones.
    pub fn status_updates(&self) -> usize {
        self.status_updates.load(Ordering::SeqCst)
    }

    pub fn fail_next_update_with_conflict(&self) {
        self.conflict_next_update.store(true, Ordering::SeqCst);
    }

    fn record_update(&self) -> Result<()> {
        self.status_updates.fetch_add(1, Ordering::SeqCst);
        if self.conflict_next_update.swap(false, Ordering::SeqCst) {
            return Err(SignalmanError::StoreConflict(
                "the object has been modified".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ExternalObjectSource for FakeStore {
    async fn get_external(
        &self,
        namespace: &str,
        reference: &ObjectReference,
    ) -> Result<Option<ExternalObject>> {
        let target_namespace = reference.namespace.as_deref().unwrap_or(namespace);
        let key = (
            target_namespace.to_string(),
            reference.kind.clone(),
            reference.name.clone(),
        );
        Ok(self.externals.lock().unwrap().get(&key).cloned())
    }

    async fn list_node_pools(
        &self,
        namespace: &str,
        cluster_name: &str,
    ) -> Result<Vec<MachinePool>> {
        use crate::conditions::ConditionedObject;

        Ok(self
            .node_pools
            .lock()
            .unwrap()
            .iter()
            .filter(|p| {
                p.metadata.namespace.as_deref() == Some(namespace)
                    && p.label(labels::CLUSTER_NAME) == Some(cluster_name)
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl StatusWriter<Cluster> for FakeStore {
    async fn update_status(&self, _object: &Cluster) -> Result<()> {
        self.record_update()
    }
}

#[async_trait]
impl StatusWriter<MachinePool> for FakeStore {
    async fn update_status(&self, _object: &MachinePool) -> Result<()> {
        self.record_update()
    }
}

/// Mock HTTP service standing in for the Kubernetes API server.
pub mod mock {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::task::{Context, Poll};

    use http::{Request, Response};
    use kube::client::Body;
    use kube::Client;
    use tower::Service;

    /// Returns predefined responses keyed by method and request path, and a
    /// Kubernetes-shaped 404 for everything else.
    #[derive(Clone, Default)]
    pub struct MockService {
        responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    }

    impl MockService {
        pub fn new() -> Self {
            MockService::default()
        }

        pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
            self.insert("GET", path, status, body);
            self
        }

        pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
            self.insert("PUT", path, status, body);
            self
        }

        pub fn into_client(self) -> Client {
            Client::new(self, "https://kubernetes.default.svc")
        }

        fn insert(&self, method: &str, path: &str, status: u16, body: &str) {
            self.responses.lock().unwrap().insert(
                (method.to_string(), path.to_string()),
                (status, body.to_string()),
            );
        }

        fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
            self.responses
                .lock()
                .unwrap()
                .get(&(method.to_string(), path.to_string()))
                .cloned()
        }
    }

    impl Service<Request<Body>> for MockService {
        type Response = Response<Body>;
        type Error = tower::BoxError;
        type Future = std::pin::Pin<
            Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
        >;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, req: Request<Body>) -> Self::Future {
            let response = self.find_response(req.method().as_str(), req.uri().path());

            Box::pin(async move {
                let (status, body) = response.unwrap_or_else(|| {
                    (
                        404,
                        r#"{"kind":"Status","apiVersion":"v1","status":"Failure","message":"not found","reason":"NotFound","code":404}"#
                            .to_string(),
                    )
                });
                Ok(Response::builder()
                    .status(status)
                    .header("content-type", "application/json")
                    .body(Body::from(body.into_bytes()))
                    .unwrap())
            })
        }
    }

    /// A 409 conflict response body as the API server renders it.
    pub fn conflict_json(resource: &str, name: &str) -> String {
        serde_json::json!({
            "kind": "Status",
            "apiVersion": "v1",
            "status": "Failure",
            "message": format!(
                "Operation cannot be fulfilled on {} \"{}\": the object has been modified",
                resource, name
            ),
            "reason": "Conflict",
            "code": 409
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_manifest_dispatches_on_kind() {
        let yaml = r#"
apiVersion: cluster.x-k8s.io/v1beta1
kind: Cluster
metadata:
  name: test-cluster
  namespace: org-test
spec:
  infrastructureRef:
    kind: AzureCluster
    name: azure-1
"#;

        let Manifest::Cluster(cluster) = load_manifest(yaml).unwrap() else {
            panic!("expected a Cluster manifest");
        };
        assert_eq!(cluster.metadata.name.as_deref(), Some("test-cluster"));
        assert_eq!(
            cluster.spec.infrastructure_ref.as_ref().unwrap().kind,
            "AzureCluster"
        );
    }

    #[test]
    fn test_load_manifest_rejects_unknown_kind() {
        let yaml = "kind: MachineDeployment\nmetadata:\n  name: md-1\n";

        let err = load_manifest(yaml).unwrap_err();
        assert!(matches!(err, SignalmanError::UnknownKind(kind) if kind == "MachineDeployment"));
    }
}
