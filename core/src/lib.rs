//! Core components for signing Huawei Cloud API requests.
//!
//! This crate provides the foundational types and traits shared by the
//! hwcsign ecosystem. It defines the abstractions that service crates build
//! their signing logic on:
//!
//! - **Context**: a container holding the environment implementation used
//!   while resolving credentials
//! - **Traits**: abstract interfaces for credential loading
//!   ([`ProvideCredential`]), request signing ([`SignRequest`]) and the
//!   transport chain ([`HttpSend`])
//! - **SigningRequest**: the canonicalizable view of an outbound request,
//!   constructed fresh for every signing and discarded afterwards
//!
//! ## Example
//!
//! ```no_run
//! use async_trait::async_trait;
//! use bytes::Bytes;
//! use hwcsign_core::{HttpSend, Result};
//!
//! // A transport stage wraps the next stage and owns it exclusively.
//! #[derive(Debug)]
//! struct Passthrough<S: HttpSend> {
//!     next: S,
//! }
//!
//! #[async_trait]
//! impl<S: HttpSend> HttpSend for Passthrough<S> {
//!     async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
//!         self.next.http_send(req).await
//!     }
//! }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: cryptographic hashing helpers
//! - [`time`]: timestamp formatting helpers
//! - [`utils`]: general utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::{Context, Env, NoopEnv, OsEnv, StaticEnv};

mod error;
pub use error::{Error, ErrorKind, Result};

mod http_send;
pub use http_send::{HttpSend, LoggingHttpSend};

mod api;
pub use api::{ProvideCredential, SignRequest, SigningCredential};

mod request;
pub use request::SigningRequest;
