//! Skyweave Provisioning Engine
//!
//! This crate defines the two requests a declarative program sends to a
//! provisioning engine (create a resource, call a provider function) and a
//! deterministic mock engine that answers them in-process for unit tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              declarative program                │
//! │        (resource / function declarations)        │
//! └─────────────────┬───────────────────────────────┘
//!                   │ ResourceRequest / CallRequest
//! ┌─────────────────▼───────────────────────────────┐
//! │               skyweave-engine                    │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │          Engine Abstraction               │   │
//! │  │  trait ProvisioningEngine { ... }         │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │  MockEngine  │  │  Overrides   │            │
//! │  └──────────────┘  └──────────────┘            │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod engine;
pub mod error;
pub mod journal;
pub mod mock;
pub mod overrides;
pub mod request;

// Re-exports
pub use engine::ProvisioningEngine;
pub use error::{EngineError, Result};
pub use journal::{Journal, JournalEntry, RequestKind};
pub use mock::{MockEngine, MockEngineBuilder};
pub use overrides::{MOCK_STORAGE_KEY, OverrideTable, tokens};
pub use request::{CallRequest, CallResponse, PropertyMap, ResourceRequest, ResourceResponse, Value};
