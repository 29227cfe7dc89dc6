//! Core components for talking to the Cubby file storage REST API.
//!
//! This crate provides the transport-agnostic foundation used by the `cubby`
//! client crate: the request model and its builder, the bounded chunk reader
//! that slices large uploads, the pluggable [`Context`], and the encoding
//! helpers shared by request rendering and authentication.
//!
//! ## Overview
//!
//! The crate is built around a few key pieces:
//!
//! - **Context**: a container holding the HTTP transport and environment
//!   implementations; nothing here performs I/O on its own
//! - **Request / RequestBuilder**: an immutable description of one HTTP(S)
//!   call, assembled fluently and executed through the context
//! - **ChunkedReader**: a reader adapter exposing a source one bounded chunk
//!   at a time, for uploading arbitrarily large payloads without buffering
//!   them whole
//!
//! ## Example
//!
//! ```no_run
//! use cubby_core::{Context, Request};
//! use http::Method;
//!
//! # async fn example(ctx: &Context) -> cubby_core::Result<()> {
//! let account = Request::with_method(Method::GET)
//!     .with_host("api.cubby.io")
//!     .with_path("/1/account/info")
//!     .with_header("Authorization", Some("OAuth ..."))
//!     .as_string(ctx)
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Traits
//!
//! - [`HttpSend`]: the transport contract — execute one request, return the
//!   raw response, no interpretation
//! - [`Env`]: environment variable access, swappable for tests

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod encode;
pub mod utils;

mod context;
pub use context::{Context, Env, HttpSend, NoopEnv, NoopHttpSend, OsEnv, StaticEnv};

mod error;
pub use error::{Error, ErrorKind, Result};

mod request;
pub use request::{Request, RequestBuilder};

mod chunk;
pub use chunk::ChunkedReader;
