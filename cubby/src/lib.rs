//! Client for the Cubby file storage REST API.
//!
//! Cubby speaks a REST protocol secured with the OAuth 1.0 PLAINTEXT
//! signature method and stores files under a root collection. This crate
//! wraps the protocol in a typed client: the three-step authentication
//! flow, file upload (single-shot and chunked), download with byte ranges,
//! metadata, delta synchronization and the file operations.
//!
//! The actual HTTP transport is pluggable through
//! [`Context`](cubby_core::Context); pair the client with
//! `cubby-http-send-reqwest` for a ready-made implementation.
//!
//! **Note**: a [`Cubby`] instance is not meant for concurrent use. Instances
//! are cheap to create, so do not cache or share them; create one when
//! needed, use it from a single caller and throw it away.
//!
//! ## Example
//!
//! ```no_run
//! use cubby::{Config, Context, Cubby};
//! use cubby_http_send_reqwest::ReqwestHttpSend;
//!
//! # async fn example() -> cubby::Result<()> {
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
//! let cubby = Cubby::from_config(
//!     ctx,
//!     &Config::new()
//!         .with_app_key("app-key")
//!         .with_app_secret("app-secret")
//!         .with_access_key("access-key")
//!         .with_access_secret("access-secret"),
//! )?;
//!
//! let entry = cubby
//!     .chunked_upload("/backups/archive.tar")
//!     .with_overwrite()
//!     .from_file("archive.tar")
//!     .await?;
//! println!("uploaded {} ({})", entry.path(), entry.size().unwrap_or("?"));
//! # Ok(())
//! # }
//! ```

mod account;
pub use account::Account;

mod auth;
pub use auth::authorization_header;

mod client;
pub use client::{Cubby, Metadata};

mod config;
pub use config::Config;

mod credential;
pub use credential::Credentials;

mod delta;
pub use delta::{DeltaEntry, DeltaPage};

mod download;
pub use download::{FilesGet, ThumbFormat, ThumbSize};

mod entry;
pub use entry::Entry;

mod upload;
pub use upload::{FilesPut, UploadMode};

mod constants;
mod json;

pub use cubby_core::{Context, Error, ErrorKind, Result};
