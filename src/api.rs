//! The posts JSON API.
//!
//! | Method | Path | Success | Failure |
//! |---|---|---|---|
//! | `GET` | `/posts` | `200` array of posts | `500` |
//! | `POST` | `/posts` | `201` the created post | `400`, `413`, `500` |
//! | `GET` | `/healthz` | `200 ok` | |
//! | `GET` | `/readyz` | `200 ready` | `503` |
//!
//! Failures carry a `{"error": "..."}` body, except `413`, which the router
//! answers before any handler runs. Store errors are logged with their cause
//! and answered with a generic message.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use crate::health;
use crate::middleware::Cors;
use crate::post::{NewPost, Post};
use crate::store::{SharedStore, StoreError};
use crate::{IntoResponse, Json, Request, Response, Router, Status};

/// Builds the application router around an injected store.
pub fn router(store: SharedStore, cors: Cors) -> Router {
    let list_store = Arc::clone(&store);
    let create_store = Arc::clone(&store);

    Router::new()
        .get("/posts", move |req: Request| list_posts(Arc::clone(&list_store), req))
        .post("/posts", move |req: Request| create_post(Arc::clone(&create_store), req))
        .get("/healthz", health::liveness)
        .get("/readyz", move |req: Request| health::readiness(Arc::clone(&store), req))
        .cors(cors)
}

/// Request-level failure of a posts route.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::MalformedRequest(_) => (Status::BadRequest, self.to_string()),
            Self::Store(e) => {
                error!(error = %e, "store operation failed");
                (Status::InternalServerError, "internal server error".to_owned())
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// `GET /posts`
pub async fn list_posts(store: SharedStore, _req: Request) -> Result<Json<Vec<Post>>, ApiError> {
    let posts = store.list_all().await?;
    Ok(Json(posts))
}

/// `POST /posts`
///
/// A missing or blank body counts as `{}` and creates a post with both
/// fields absent. Retried submissions create duplicates.
pub async fn create_post(
    store: SharedStore,
    req: Request,
) -> Result<(Status, Json<Post>), ApiError> {
    let new = parse_new_post(&req)?;
    let post = store.create(new).await?;
    info!(id = %post.id, "post created");
    Ok((Status::Created, Json(post)))
}

fn parse_new_post(req: &Request) -> Result<NewPost, ApiError> {
    if req.body_is_blank() {
        return Ok(NewPost::default());
    }
    let value: serde_json::Value = req
        .json()
        .map_err(|e| ApiError::MalformedRequest(e.to_string()))?;
    if !value.is_object() {
        return Err(ApiError::MalformedRequest("expected a JSON object".into()));
    }
    serde_json::from_value(value).map_err(|e| ApiError::MalformedRequest(e.to_string()))
}
