//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. Register a path, get a
//! handler. [`Router::call`] is the whole request pipeline: CORS preflight,
//! method parsing, lookup, size-limited body buffering, handler, response
//! decoration.

use std::collections::HashMap;
use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Body;
use matchit::Router as MatchitRouter;
use tracing::{Instrument, warn};

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::middleware::{Cors, trace};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// Largest request body buffered by default: 100 KiB.
pub const DEFAULT_BODY_LIMIT: usize = 100 * 1024;

type BoxError = Box<dyn StdError + Send + Sync>;

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
/// Each registration returns `self` so calls chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    cors: Option<Cors>,
    body_limit: usize,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), cors: None, body_limit: DEFAULT_BODY_LIMIT }
    }

    /// Register a handler for a method + path pair.
    ///
    /// ```rust,no_run
    /// # use quill::{Method, Request, Response, Router};
    /// # async fn list_posts(_: Request) -> Response { Response::text("") }
    /// # async fn create_post(_: Request) -> Response { Response::text("") }
    /// Router::new()
    ///     .on(Method::Get,  "/posts", list_posts)
    ///     .on(Method::Post, "/posts", create_post);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`. Routes are fixed at startup.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Post, path, handler)
    }

    /// Enables CORS: `OPTIONS` requests are answered as preflights and every
    /// response carries the allowed origin.
    pub fn cors(mut self, cors: Cors) -> Self {
        self.cors = Some(cors);
        self
    }

    /// Caps buffered request bodies at `bytes`; larger bodies are answered
    /// with `413` before any handler runs.
    pub fn body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = bytes;
        self
    }

    fn lookup(&self, method: Method, path: &str) -> Option<BoxedHandler> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        Some(Arc::clone(matched.value))
    }

    /// `true` if some method other than `method` is registered for `path`.
    fn allowed_elsewhere(&self, method: Method, path: &str) -> bool {
        self.routes.iter()
            .any(|(m, tree)| *m != method && tree.at(path).is_ok())
    }

    /// Routes one request and produces one response. Never fails: every
    /// error becomes a status code.
    ///
    /// Generic over the body so the server passes hyper's `Incoming` and
    /// tests pass `Full<Bytes>` directly, without a socket.
    pub async fn call<B>(&self, req: http::Request<B>) -> http::Response<Full<Bytes>>
    where
        B: Body,
        B::Error: Into<BoxError>,
    {
        let span = trace::span(req.method(), req.uri().path());
        async move {
            let started = Instant::now();
            let mut res = self.route(req).await;
            if let Some(cors) = &self.cors {
                cors.decorate(&mut res);
            }
            trace::completed(res.status_code(), started);
            res.into_inner()
        }
        .instrument(span)
        .await
    }

    async fn route<B>(&self, req: http::Request<B>) -> Response
    where
        B: Body,
        B::Error: Into<BoxError>,
    {
        let (parts, body) = req.into_parts();

        if parts.method == http::Method::OPTIONS {
            if let Some(cors) = &self.cors {
                return cors.preflight(&parts.headers);
            }
        }

        let Ok(method) = Method::try_from(&parts.method) else {
            return Response::status(Status::MethodNotAllowed);
        };
        let path = parts.uri.path();

        let Some(handler) = self.lookup(method, path) else {
            return if self.allowed_elsewhere(method, path) {
                Response::status(Status::MethodNotAllowed)
            } else {
                Response::status(Status::NotFound)
            };
        };

        let body = match Limited::new(body, self.body_limit).collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) if e.is::<LengthLimitError>() => {
                warn!(limit = self.body_limit, "request body too large");
                return Response::status(Status::PayloadTooLarge);
            }
            Err(e) => {
                warn!(error = %e, "failed to read request body");
                return Response::status(Status::BadRequest);
            }
        };

        handler.call(Request::new(body)).await
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
