//! Skyweave Deploy
//!
//! Runs declarative resource programs against a [`ProvisioningEngine`] and
//! collects what the engine materialized.
//!
//! A program implements [`Stack`]: it declares resources through a
//! [`DeploymentContext`] and returns its exports as [`Output`] values.
//! [`Deployment::test`] drives the program to completion and hands back a
//! [`TestRun`] whose [`Resources`] can be queried by type or name.
//!
//! [`ProvisioningEngine`]: skyweave_engine::ProvisioningEngine
//! [`Output`]: skyweave_output::Output

pub mod context;
pub mod deployment;
pub mod error;
pub mod input;
pub mod resource;

pub use context::DeploymentContext;
pub use deployment::{DEFAULT_RESOLVE_TIMEOUT, Deployment, Stack, TestOptions, TestRun};
pub use error::{DeployError, Result};
pub use input::{Input, Inputs};
pub use resource::{CustomResource, MaterializedResource, ResourceOptions, Resources, urn};
