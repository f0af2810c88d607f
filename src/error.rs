//! Infrastructure error type.

/// The error type returned by quill's fallible startup and serving operations.
///
/// Request-level failures (400, 404, 500, ...) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// infrastructure failures such as binding to a port.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
