//! Context handed to declarative programs
//!
//! Declarations do not talk to the engine directly. Each registration or
//! function call is queued together with the resolvers of its outputs; the
//! deployment runner drains the queue and settles those outputs from the
//! engine's answers.

use crate::error::{DeployError, Result};
use crate::input::Inputs;
use crate::resource::{CustomResource, ResourceOptions, urn};
use skyweave_config::StackConfig;
use skyweave_engine::PropertyMap;
use skyweave_output::{Output, Resolver};
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinSet;

pub(crate) struct PendingResource {
    pub resource: CustomResource,
    pub explicit_id: Option<String>,
    pub inputs: Output<PropertyMap>,
    pub id: Resolver<String>,
    pub outputs: Resolver<PropertyMap>,
}

pub(crate) struct PendingCall {
    pub token: String,
    pub args: Output<PropertyMap>,
    pub outputs: Resolver<PropertyMap>,
}

pub(crate) enum PendingRequest {
    Resource(PendingResource),
    Call(PendingCall),
}

impl PendingRequest {
    fn inputs(&self) -> &Output<PropertyMap> {
        match self {
            Self::Resource(r) => &r.inputs,
            Self::Call(c) => &c.args,
        }
    }
}

struct ContextInner {
    project: String,
    stack: String,
    config: StackConfig,
    is_preview: bool,
    queue: Mutex<VecDeque<PendingRequest>>,
    queued: Notify,
    urns: Mutex<HashSet<String>>,
}

/// Handle through which a program declares resources
///
/// Cheap to clone; clones share the same queue, so declarations made from
/// inside `apply` callbacks join the same run.
#[derive(Clone)]
pub struct DeploymentContext {
    inner: Arc<ContextInner>,
}

impl DeploymentContext {
    pub(crate) fn new(
        project: String,
        stack: String,
        config: StackConfig,
        is_preview: bool,
    ) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                project,
                stack,
                config,
                is_preview,
                queue: Mutex::new(VecDeque::new()),
                queued: Notify::new(),
                urns: Mutex::new(HashSet::new()),
            }),
        }
    }

    pub fn project(&self) -> &str {
        &self.inner.project
    }

    pub fn stack(&self) -> &str {
        &self.inner.stack
    }

    pub fn config(&self) -> &StackConfig {
        &self.inner.config
    }

    pub fn is_preview(&self) -> bool {
        self.inner.is_preview
    }

    fn queue(&self) -> MutexGuard<'_, VecDeque<PendingRequest>> {
        self.inner
            .queue
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn enqueue(&self, request: PendingRequest) {
        self.queue().push_back(request);
        self.inner.queued.notify_one();
    }

    /// Declare a resource
    ///
    /// Fails only when the same type and logical name were already declared
    /// in this run.
    pub fn register_resource(
        &self,
        type_token: &str,
        logical_name: &str,
        inputs: Inputs,
        options: ResourceOptions,
    ) -> Result<CustomResource> {
        let urn = urn(self.stack(), self.project(), type_token, logical_name);
        {
            let mut urns = self
                .inner
                .urns
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if !urns.insert(urn.clone()) {
                return Err(DeployError::DuplicateResource { urn });
            }
        }

        let mut inputs = inputs.into_output();
        if !options.depends_on.is_empty() {
            let ids = options
                .depends_on
                .iter()
                .map(|r| r.id().clone())
                .collect::<Vec<_>>();
            inputs = Output::all(ids).apply_output(move |_| inputs);
        }

        let (id, id_resolver) = Output::pending();
        let (outputs, outputs_resolver) = Output::pending();
        let resource = CustomResource::new(
            type_token.to_string(),
            logical_name.to_string(),
            urn,
            id,
            outputs,
        );

        tracing::debug!(urn = %resource.urn(), "Resource registered");
        self.enqueue(PendingRequest::Resource(PendingResource {
            resource: resource.clone(),
            explicit_id: options.id,
            inputs,
            id: id_resolver,
            outputs: outputs_resolver,
        }));
        Ok(resource)
    }

    /// Invoke a provider function
    pub fn invoke(&self, token: &str, args: Inputs) -> Output<PropertyMap> {
        let (outputs, resolver) = Output::pending();
        tracing::debug!(token, "Function call queued");
        self.enqueue(PendingRequest::Call(PendingCall {
            token: token.to_string(),
            args: args.into_output(),
            outputs: resolver,
        }));
        outputs
    }

    /// Oldest request whose inputs have settled
    pub(crate) fn next_ready(&self) -> Option<PendingRequest> {
        let mut queue = self.queue();
        let index = queue.iter().position(|p| p.inputs().is_resolved())?;
        queue.remove(index)
    }

    pub(crate) fn pop_oldest(&self) -> Option<PendingRequest> {
        self.queue().pop_front()
    }

    /// Wait until the inputs of any queued request settle or a new request
    /// is queued
    ///
    /// Returns `false` if neither happened within `timeout`.
    pub(crate) async fn wait_for_progress(&self, timeout: Duration) -> bool {
        let inputs = self
            .queue()
            .iter()
            .map(|p| p.inputs().clone())
            .collect::<Vec<_>>();

        let mut settling = JoinSet::new();
        for input in inputs {
            settling.spawn(async move {
                let _ = input.await_resolved().await;
            });
        }

        let progress = async {
            tokio::select! {
                _ = settling.join_next() => {}
                _ = self.inner.queued.notified() => {}
            }
        };
        tokio::time::timeout(timeout, progress).await.is_ok()
    }

    pub(crate) fn pending_len(&self) -> usize {
        self.queue().len()
    }
}

impl std::fmt::Debug for DeploymentContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeploymentContext")
            .field("project", &self.inner.project)
            .field("stack", &self.inner.stack)
            .field("is_preview", &self.inner.is_preview)
            .field("pending", &self.pending_len())
            .finish()
    }
}
