//! Cross-origin resource sharing.
//!
//! The blog UI is served from a different origin than the API, so browsers
//! need these headers before they will read a response. Behavior matches the
//! common permissive default: any method, reflected request headers, and a
//! configurable allowed origin (`*` unless told otherwise).

use http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_REQUEST_HEADERS, InvalidHeaderValue, VARY,
};
use http::{HeaderMap, HeaderValue};

use crate::response::Response;
use crate::status::Status;

const ALLOWED_METHODS: &str = "GET,HEAD,PUT,PATCH,POST,DELETE";

/// CORS policy applied by the router.
#[derive(Debug, Clone)]
pub struct Cors {
    allow_origin: HeaderValue,
}

impl Cors {
    /// Allows every origin (`access-control-allow-origin: *`).
    pub fn any() -> Self {
        Self { allow_origin: HeaderValue::from_static("*") }
    }

    /// Allows a single origin, e.g. `http://localhost:3000`.
    pub fn origin(origin: &str) -> Result<Self, InvalidHeaderValue> {
        Ok(Self { allow_origin: HeaderValue::from_str(origin)? })
    }

    fn is_wildcard(&self) -> bool {
        self.allow_origin.as_bytes() == b"*"
    }

    /// `204 No Content` answer to an `OPTIONS` preflight.
    pub(crate) fn preflight(&self, request_headers: &HeaderMap) -> Response {
        let mut res = Response::status(Status::NoContent);
        self.decorate(&mut res);

        let headers = res.headers_mut();
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOWED_METHODS));
        if let Some(requested) = request_headers.get(ACCESS_CONTROL_REQUEST_HEADERS) {
            headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, requested.clone());
            headers.append(VARY, HeaderValue::from_static("access-control-request-headers"));
        }
        res
    }

    /// Stamps the allowed origin on an outgoing response.
    pub(crate) fn decorate(&self, res: &mut Response) {
        let headers = res.headers_mut();
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
        if !self.is_wildcard() {
            headers.append(VARY, HeaderValue::from_static("origin"));
        }
    }
}
