//! # quill
//!
//! A minimal blog: a JSON posts API over MongoDB, and a client that lists
//! and creates posts.
//!
//! ## Layout
//!
//! - [`store`]: the [`PostStore`](store::PostStore) seam, with MongoDB and
//!   in-memory backends.
//! - [`api`]: `GET /posts` and `POST /posts` plus health probes, built
//!   around an injected store.
//! - [`ui`]: the [`BlogView`](ui::BlogView) view-model and its HTTP client.
//! - The HTTP layer underneath: [`Router`], [`Server`], [`Request`],
//!   [`Response`]. Radix-tree routing via [`matchit`], hyper connections,
//!   graceful shutdown on SIGTERM / Ctrl-C.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use quill::middleware::Cors;
//! use quill::store::MemoryStore;
//! use quill::{Server, api};
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = api::router(Arc::new(MemoryStore::new()), Cors::any());
//!     Server::bind(([127, 0, 0, 1], 5000).into()).serve(app).await.unwrap();
//! }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod api;
pub mod config;
pub mod health;
pub mod middleware;
pub mod post;
pub mod store;
pub mod ui;

pub use error::Error;
pub use handler::Handler;
pub use method::{Method, UnknownMethod};
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::{DEFAULT_BODY_LIMIT, Router};
pub use server::{Server, serve_on};
pub use status::Status;
