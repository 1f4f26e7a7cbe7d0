//! Deterministic in-process provisioning engine
//!
//! Answers resource and function-call requests without any network access:
//!
//! - resources echo their inputs, default `name` to the logical name, apply
//!   the type override (if any) and get the id `{logical_name}_id` unless
//!   the caller supplied one;
//! - function calls echo their arguments and apply the token override (if
//!   any). Unknown tokens are a plain passthrough.

use crate::engine::ProvisioningEngine;
use crate::error::Result;
use crate::journal::{Journal, JournalEntry};
use crate::overrides::{CALL_OVERRIDES, OverrideTable, RESOURCE_OVERRIDES};
use crate::request::{
    CallRequest, CallResponse, PropertyMap, ResourceRequest, ResourceResponse, Value,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Mock provisioning engine
///
/// Meant for a single run: its journal keeps every answered request for
/// as long as the engine lives.
#[derive(Debug)]
pub struct MockEngine {
    resource_overrides: Arc<OverrideTable<ResourceRequest>>,
    call_overrides: Arc<OverrideTable<CallRequest>>,
    journal: Journal,
}

impl MockEngine {
    /// Engine using the built-in override tables
    pub fn new() -> Self {
        Self {
            resource_overrides: Arc::clone(&*RESOURCE_OVERRIDES),
            call_overrides: Arc::clone(&*CALL_OVERRIDES),
            journal: Journal::new(),
        }
    }

    pub fn builder() -> MockEngineBuilder {
        MockEngineBuilder::default()
    }

    /// Requests answered so far
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Synthesize the response for a resource request.
    pub fn respond_to_resource(&self, request: &ResourceRequest) -> (ResourceResponse, bool) {
        let mut outputs = request.inputs.clone();
        if !outputs.contains_key("name") {
            outputs.insert(
                "name".to_string(),
                Value::String(request.logical_name.clone()),
            );
        }

        let overridden =
            self.resource_overrides
                .apply(&request.type_token, request, &mut outputs);

        let id = request
            .explicit_id
            .clone()
            .unwrap_or_else(|| format!("{}_id", request.logical_name));

        (ResourceResponse { id, outputs }, overridden)
    }

    /// Synthesize the response for a function call.
    pub fn respond_to_call(&self, request: &CallRequest) -> (CallResponse, bool) {
        let mut outputs: PropertyMap = request.args.clone();
        let overridden = self
            .call_overrides
            .apply(&request.token, request, &mut outputs);
        (CallResponse { outputs }, overridden)
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProvisioningEngine for MockEngine {
    fn name(&self) -> &str {
        "mock"
    }

    async fn create_resource(&self, request: ResourceRequest) -> Result<ResourceResponse> {
        request.validate()?;
        let (response, overridden) = self.respond_to_resource(&request);

        tracing::debug!(
            type_token = %request.type_token,
            name = %request.logical_name,
            id = %response.id,
            overridden,
            "Mock resource created"
        );
        self.journal.record(
            JournalEntry::resource(&request.type_token, &request.logical_name)
                .with_overridden(overridden),
        );
        Ok(response)
    }

    async fn call(&self, request: CallRequest) -> Result<CallResponse> {
        request.validate()?;
        let (response, overridden) = self.respond_to_call(&request);

        tracing::debug!(token = %request.token, overridden, "Mock function called");
        self.journal
            .record(JournalEntry::call(&request.token).with_overridden(overridden));
        Ok(response)
    }
}

/// Builder layering extra overrides on top of the built-in tables
///
/// The built-in tables are copied, never modified.
pub struct MockEngineBuilder {
    resource_overrides: OverrideTable<ResourceRequest>,
    call_overrides: OverrideTable<CallRequest>,
}

impl Default for MockEngineBuilder {
    fn default() -> Self {
        Self {
            resource_overrides: (**RESOURCE_OVERRIDES).clone(),
            call_overrides: (**CALL_OVERRIDES).clone(),
        }
    }
}

impl MockEngineBuilder {
    /// Start from empty tables instead of the built-in ones
    pub fn empty() -> Self {
        Self {
            resource_overrides: OverrideTable::new(),
            call_overrides: OverrideTable::new(),
        }
    }

    pub fn resource_override<F>(mut self, type_token: impl Into<String>, f: F) -> Self
    where
        F: Fn(&ResourceRequest, &mut PropertyMap) + Send + Sync + 'static,
    {
        self.resource_overrides.insert(type_token, f);
        self
    }

    pub fn call_override<F>(mut self, token: impl Into<String>, f: F) -> Self
    where
        F: Fn(&CallRequest, &mut PropertyMap) + Send + Sync + 'static,
    {
        self.call_overrides.insert(token, f);
        self
    }

    pub fn build(self) -> MockEngine {
        MockEngine {
            resource_overrides: Arc::new(self.resource_overrides),
            call_overrides: Arc::new(self.call_overrides),
            journal: Journal::new(),
        }
    }
}
