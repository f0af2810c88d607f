//! Health-check handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can the store be reached? Failure → pulled from load-balancer. |
//!
//! Both are registered by [`api::router`](crate::api::router). A failed
//! database connection at startup is not fatal, so readiness is the place
//! where it becomes visible.

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::store::SharedStore;
use crate::{Request, Response, Status};

/// Pings the store once in the background and logs the outcome.
///
/// Startup does not wait on it: the driver can take its full server
/// selection timeout to give up on an unreachable database, and the
/// listener must be up before then.
pub fn check_connection(store: SharedStore) -> JoinHandle<()> {
    tokio::spawn(async move {
        match store.ping().await {
            Ok(()) => info!("connected to store"),
            Err(e) => error!(error = %e, "store connection error"),
        }
    })
}

/// Liveness probe handler.
///
/// Always returns `200 OK` with body `"ok"`. If the process can respond to
/// HTTP at all, it is alive.
pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

/// Readiness probe handler: `200 "ready"` when the store answers a ping,
/// `503` otherwise.
pub async fn readiness(store: SharedStore, _req: Request) -> Response {
    match store.ping().await {
        Ok(()) => Response::text("ready"),
        Err(e) => {
            warn!(error = %e, "readiness check failed");
            Response::status(Status::ServiceUnavailable)
        }
    }
}
