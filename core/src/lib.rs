//! Core components for the adlg2 client.
//!
//! This crate provides the foundational types shared by the adlg2 service
//! crates. It knows nothing about Data Lake Storage itself: it defines the
//! abstractions that request signing and credential handling are built on.
//!
//! ## Overview
//!
//! The crate is built around several key concepts:
//!
//! - **Context**: a container holding the HTTP transport and environment
//!   access used during credential resolution and signing
//! - **Traits**: abstract interfaces for credential loading
//!   ([`ProvideCredential`]) and request decoration ([`SignRequest`])
//! - **Signer**: the orchestrator that caches a resolved credential,
//!   refreshes it when it expires, and drops it on demand
//!
//! ## Example
//!
//! ```no_run
//! use adlg2_core::{Context, ProvideCredential, SignRequest, Signer, SigningCredential};
//! use adlg2_core::Result;
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct MyCredential {
//!     secret: String,
//! }
//!
//! impl SigningCredential for MyCredential {
//!     fn is_valid(&self) -> bool {
//!         !self.secret.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MyProvider;
//!
//! #[async_trait]
//! impl ProvideCredential for MyProvider {
//!     type Credential = MyCredential;
//!
//!     async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
//!         Ok(Some(MyCredential {
//!             secret: "my-secret".to_string(),
//!         }))
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MySigner;
//!
//! #[async_trait]
//! impl SignRequest for MySigner {
//!     type Credential = MyCredential;
//!
//!     async fn sign_request(
//!         &self,
//!         _ctx: &Context,
//!         _req: &mut http::request::Parts,
//!         _cred: Option<&Self::Credential>,
//!     ) -> Result<()> {
//!         // Decorate the request here.
//!         Ok(())
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new();
//! let signer = Signer::new(ctx, MyProvider, MySigner);
//!
//! let mut parts = http::Request::builder()
//!     .method("GET")
//!     .uri("https://example.com")
//!     .body(())
//!     .unwrap()
//!     .into_parts()
//!     .0;
//!
//! signer.sign(&mut parts).await?;
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Context;
mod http;
pub use http::{HttpSend, NoopHttpSend};
mod env;
pub use env::{Env, NoopEnv, OsEnv, StaticEnv};

mod api;
pub use api::{ProvideCredential, SignRequest, SigningCredential};
mod request;
pub use request::SigningRequest;
mod signer;
pub use signer::Signer;

mod error;
pub use error::{Error, ErrorKind, Result};
