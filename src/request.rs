//! Incoming HTTP request type.

use bytes::Bytes;
use serde::de::DeserializeOwned;

/// An incoming HTTP request with its body fully buffered.
///
/// Routing has already happened by the time a handler sees it, so only the
/// body is carried.
pub struct Request {
    pub(crate) body: Bytes,
}

impl Request {
    pub(crate) fn new(body: Bytes) -> Self {
        Self { body }
    }

    pub fn body(&self) -> &[u8] { &self.body }

    /// Deserializes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Returns `true` if the body is empty or whitespace only.
    pub fn body_is_blank(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }
}
