//! Azure Data Lake Storage Gen2 client.
//!
//! This crate talks to the hierarchical-namespace (dfs) REST endpoint of an
//! Azure storage account. It exposes two facades: a [`FilesystemClient`]
//! for container management and a [`PathClient`] for files and directories.
//! Requests are authenticated with a shared key (HMAC-signed canonical
//! string), a cached OAuth bearer token, or a pre-signed SAS token —
//! exactly one, chosen when the [`Client`] is built. Transient failures
//! (service-side timeouts, rejected bearer tokens) are retried under a
//! bounded policy; everything else surfaces as a typed error.
//!
//! # Example
//!
//! ```no_run
//! use adlg2_core::{Context, OsEnv};
//! use adlg2_dfs::{Client, Config, FilesystemListOptions};
//! use adlg2_http_send_reqwest::ReqwestHttpSend;
//!
//! #[tokio::main]
//! async fn main() -> adlg2_core::Result<()> {
//!     let ctx = Context::new()
//!         .with_http_send(ReqwestHttpSend::default())
//!         .with_env(OsEnv);
//!
//!     let config = Config {
//!         account_name: Some("myaccount".to_string()),
//!         account_key: Some("bXkta2V5".to_string()),
//!         ..Default::default()
//!     };
//!     let client = Client::new(config, ctx)?;
//!
//!     let filesystems = client
//!         .filesystem()
//!         .list(&FilesystemListOptions::default())
//!         .await?;
//!     for filesystem in filesystems {
//!         println!("{}", filesystem.name);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::{ClientSecretCredentialProvider, StaticCredentialProvider};

mod sign_request;
pub use sign_request::RequestSigner;

mod retry;
pub use retry::RetryPolicy;

mod core;
mod response;

mod models;
pub use models::{
    Filesystem, FilesystemList, FilesystemProperties, LeaseOutcome, PathEntry, PathList,
    PathProperties,
};

mod filesystem;
pub use filesystem::{FilesystemClient, FilesystemListOptions};

mod path;
pub use path::{
    LeaseAction, LeaseOptions, PathClient, PathListOptions, ResourceType, UpdateAction,
    UpdateOptions,
};

mod client;
pub use client::Client;
