//! Skyweave Outputs
//!
//! Deferred values for declarative resource programs. A program refers to
//! provider-computed values (names, endpoints, keys) before the engine has
//! produced them; each such value is an [`Output`] node in a dependency
//! graph that settles once its sources settle.
//!
//! ```text
//!   engine response ──► Resolver ──► Output<PropertyMap>
//!                                        │ apply
//!                                        ▼
//!                                   Output<String> ──► await_resolved()
//! ```
//!
//! # Example
//!
//! ```
//! use skyweave_output::Output;
//!
//! # tokio_test::block_on(async {
//! let (name, resolver) = Output::<String>::pending();
//! let endpoint = name.apply(|n| format!("https://{}.web.core.windows.net", n));
//!
//! resolver.resolve("sa".to_string());
//! assert_eq!(
//!     endpoint.await_resolved().await.unwrap(),
//!     "https://sa.web.core.windows.net"
//! );
//! # });
//! ```

pub mod error;
mod node;
pub mod output;

pub use error::{OutputError, Result};
pub use node::Resolver;
pub use output::Output;
