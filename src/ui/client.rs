use async_trait::async_trait;
use serde::Deserialize;

use super::{ClientError, PostsApi};
use crate::post::{NewPost, Post};

/// [`PostsApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpClient {
    /// `base_url` is the API root, e.g. `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { http: reqwest::Client::new(), base_url }
    }

    fn posts_url(&self) -> String {
        format!("{}/posts", self.base_url)
    }

    async fn check(res: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        let message = match res.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.canonical_reason().unwrap_or("unknown error").to_owned(),
        };
        Err(ClientError::Status { status: status.as_u16(), message })
    }
}

#[async_trait]
impl PostsApi for HttpClient {
    async fn list_posts(&self) -> Result<Vec<Post>, ClientError> {
        let res = self.http.get(self.posts_url()).send().await?;
        Ok(Self::check(res).await?.json().await?)
    }

    async fn create_post(&self, new: &NewPost) -> Result<Post, ClientError> {
        let res = self.http.post(self.posts_url()).json(new).send().await?;
        Ok(Self::check(res).await?.json().await?)
    }
}
