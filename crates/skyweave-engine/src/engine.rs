//! Provisioning engine trait definition

use crate::error::Result;
use crate::request::{CallRequest, CallResponse, ResourceRequest, ResourceResponse};
use async_trait::async_trait;

/// Provisioning engine abstraction
///
/// A declarative program's runtime routes every resource declaration and
/// every provider function call through this trait. The real engine talks
/// to a cloud backend; [`MockEngine`](crate::MockEngine) answers
/// deterministically in-process.
#[async_trait]
pub trait ProvisioningEngine: Send + Sync {
    /// Returns the engine name (e.g., "mock")
    fn name(&self) -> &str;

    /// Materialize a resource and report its id and output properties
    async fn create_resource(&self, request: ResourceRequest) -> Result<ResourceResponse>;

    /// Invoke a provider function and report its outputs
    async fn call(&self, request: CallRequest) -> Result<CallResponse>;
}
