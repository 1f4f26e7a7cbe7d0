//! Deployment runner
//!
//! Runs a program against a provisioning engine:
//!
//! 1. the program declares its resources through a [`DeploymentContext`];
//! 2. queued requests are submitted one at a time, oldest ready request
//!    first; when none is ready the runner waits on all of them, and fails
//!    the oldest once nothing settles within [`TestOptions::resolve_timeout`];
//! 3. engine answers settle the request's outputs, which may unblock
//!    further requests or queue new ones from `apply` callbacks.
//!
//! The first failure aborts the run; there is no partial success.

use crate::context::{DeploymentContext, PendingCall, PendingRequest, PendingResource};
use crate::error::{DeployError, Result};
use crate::resource::{CustomResource, MaterializedResource, Resources};
use skyweave_config::StackConfig;
use skyweave_engine::{CallRequest, PropertyMap, ProvisioningEngine, ResourceRequest};
use skyweave_output::{OutputError, Resolver};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Default bound on waiting for a request's inputs
pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(30);

/// A declarative program
pub trait Stack: Sized {
    /// Declare the program's resources and return its exports
    fn declare(ctx: &DeploymentContext) -> Result<Self>;
}

/// Options for a test run
#[derive(Debug, Clone)]
pub struct TestOptions {
    pub project: String,
    pub stack: String,
    pub config: StackConfig,
    pub is_preview: bool,
    pub resolve_timeout: Duration,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            project: "project".to_string(),
            stack: "stack".to_string(),
            config: StackConfig::new("project"),
            is_preview: false,
            resolve_timeout: DEFAULT_RESOLVE_TIMEOUT,
        }
    }
}

impl TestOptions {
    pub fn new(project: impl Into<String>, stack: impl Into<String>) -> Self {
        let project = project.into();
        Self {
            config: StackConfig::new(project.clone()),
            project,
            stack: stack.into(),
            ..Default::default()
        }
    }

    pub fn with_config(mut self, config: StackConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_preview(mut self, is_preview: bool) -> Self {
        self.is_preview = is_preview;
        self
    }

    pub fn with_resolve_timeout(mut self, timeout: Duration) -> Self {
        self.resolve_timeout = timeout;
        self
    }
}

/// Outcome of a successful run
#[derive(Debug)]
pub struct TestRun<S> {
    /// Every resource the engine materialized
    pub resources: Resources,

    /// The program's exports
    pub stack: S,
}

/// Runs programs against an engine
pub struct Deployment;

impl Deployment {
    /// Run the [`Stack`] `S` to completion
    pub async fn test<S: Stack>(
        engine: &dyn ProvisioningEngine,
        options: TestOptions,
    ) -> Result<TestRun<S>> {
        Self::run(engine, options, S::declare).await
    }

    /// Run an ad-hoc program to completion
    #[instrument(
        skip_all,
        fields(engine = engine.name(), project = %options.project, stack = %options.stack)
    )]
    pub async fn run<S, F>(
        engine: &dyn ProvisioningEngine,
        options: TestOptions,
        program: F,
    ) -> Result<TestRun<S>>
    where
        F: FnOnce(&DeploymentContext) -> Result<S>,
    {
        let start = Instant::now();
        let ctx = DeploymentContext::new(
            options.project,
            options.stack,
            options.config,
            options.is_preview,
        );

        let stack = program(&ctx)?;
        info!(pending = ctx.pending_len(), "Program declared");

        let mut materialized = Vec::new();
        loop {
            if let Some(pending) = ctx.next_ready() {
                match pending {
                    PendingRequest::Resource(resource) => {
                        materialized.push(create(engine, resource).await?);
                    }
                    PendingRequest::Call(call) => invoke(engine, call).await?,
                }
                continue;
            }
            if ctx.pending_len() == 0 {
                break;
            }
            if !ctx.wait_for_progress(options.resolve_timeout).await {
                if let Some(stuck) = ctx.pop_oldest() {
                    return Err(stall(stuck, OutputError::Timeout(options.resolve_timeout)));
                }
            }
        }

        info!(
            resources = materialized.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Deployment complete"
        );
        Ok(TestRun {
            resources: Resources::new(materialized),
            stack,
        })
    }
}

async fn create(
    engine: &dyn ProvisioningEngine,
    pending: PendingResource,
) -> Result<MaterializedResource> {
    let PendingResource {
        resource,
        explicit_id,
        inputs,
        id,
        outputs,
    } = pending;

    let resolved = match inputs.await_resolved().await {
        Ok(resolved) => resolved,
        Err(e) => return Err(abort(&resource, id, outputs, e.clone(), e.into())),
    };

    let mut request =
        ResourceRequest::new(resource.type_token(), resource.logical_name(), resolved);
    request.explicit_id = explicit_id;

    let response = match engine.create_resource(request).await {
        Ok(response) => response,
        Err(e) => {
            let error = OutputError::failed(e.to_string());
            return Err(abort(&resource, id, outputs, error, e.into()));
        }
    };

    if inputs.is_secret() {
        outputs.mark_secret();
    }
    debug!(urn = %resource.urn(), id = %response.id, "Resource materialized");
    id.resolve(response.id.clone());
    outputs.resolve(response.outputs);
    Ok(MaterializedResource::new(resource, response.id))
}

/// Settle a failed registration's outputs and build the run error
fn abort(
    resource: &CustomResource,
    id: Resolver<String>,
    outputs: Resolver<PropertyMap>,
    error: OutputError,
    cause: DeployError,
) -> DeployError {
    warn!(urn = %resource.urn(), error = %cause, "Resource registration failed");
    id.reject(error.clone());
    outputs.reject(error);
    DeployError::registration(resource.urn(), cause)
}

/// Fail a request whose inputs never settled
fn stall(pending: PendingRequest, error: OutputError) -> DeployError {
    match pending {
        PendingRequest::Resource(PendingResource {
            resource,
            id,
            outputs,
            ..
        }) => abort(&resource, id, outputs, error.clone(), error.into()),
        PendingRequest::Call(PendingCall { token, outputs, .. }) => {
            fail_call(token, outputs, error.clone(), error.into())
        }
    }
}

/// Settle a failed call's outputs and build the run error
fn fail_call(
    token: String,
    outputs: Resolver<PropertyMap>,
    error: OutputError,
    cause: DeployError,
) -> DeployError {
    warn!(token = %token, error = %cause, "Function call failed");
    outputs.reject(error);
    DeployError::call(token, cause)
}

async fn invoke(engine: &dyn ProvisioningEngine, pending: PendingCall) -> Result<()> {
    let PendingCall {
        token,
        args,
        outputs,
    } = pending;

    let resolved = match args.await_resolved().await {
        Ok(resolved) => resolved,
        Err(e) => return Err(fail_call(token, outputs, e.clone(), e.into())),
    };

    match engine.call(CallRequest::new(token.clone(), resolved)).await {
        Ok(response) => {
            if args.is_secret() {
                outputs.mark_secret();
            }
            debug!(token = %token, "Function call answered");
            outputs.resolve(response.outputs);
            Ok(())
        }
        Err(e) => {
            let error = OutputError::failed(e.to_string());
            Err(fail_call(token, outputs, error, e.into()))
        }
    }
}
