//! The blog client.
//!
//! [`BlogView`] is the view-model behind the page: the post list plus the two
//! controlled form inputs. It talks to the API only through [`PostsApi`], so
//! the same view runs against [`HttpClient`] in the CLI and against fakes in
//! tests.
//!
//! Lifecycle: "not loaded" → [`mount`](BlogView::mount) → "loaded", then one
//! more post per successful [`submit`](BlogView::submit).

mod client;

use std::fmt;

use async_trait::async_trait;
use tracing::error;

use crate::post::{NewPost, Post};

pub use client::HttpClient;

/// A request from the client to the posts API failed.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered {status}: {message}")]
    Status { status: u16, message: String },
}

/// Why a form submission did not create a post.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("title and content are required")]
    Incomplete,

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// The two operations the view needs from the backend.
#[async_trait]
pub trait PostsApi: Send + Sync {
    async fn list_posts(&self) -> Result<Vec<Post>, ClientError>;
    async fn create_post(&self, new: &NewPost) -> Result<Post, ClientError>;
}

/// Local view state of the blog page.
#[derive(Debug, Clone, Default)]
pub struct BlogView {
    posts: Vec<Post>,
    title: String,
    content: String,
    loaded: bool,
    error: Option<String>,
}

impl BlogView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posts(&self) -> &[Post] { &self.posts }
    pub fn title(&self) -> &str { &self.title }
    pub fn content(&self) -> &str { &self.content }
    pub fn is_loaded(&self) -> bool { self.loaded }

    /// The last submission failure, if it has not been cleared by a success.
    pub fn error(&self) -> Option<&str> { self.error.as_deref() }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Loads the full post list once.
    ///
    /// On failure the error is logged and the list stays empty; nothing is
    /// retried or shown.
    pub async fn mount<A: PostsApi + ?Sized>(&mut self, api: &A) {
        match api.list_posts().await {
            Ok(posts) => {
                self.posts = posts;
                self.loaded = true;
            }
            Err(e) => error!(error = %e, "error fetching posts"),
        }
    }

    /// Sends the current inputs as a new post.
    ///
    /// Both inputs are required. On success the returned post is appended
    /// and the inputs are cleared. On failure the inputs are kept and the
    /// error is recorded for display.
    pub async fn submit<A: PostsApi + ?Sized>(&mut self, api: &A) -> Result<Post, SubmitError> {
        if self.title.is_empty() || self.content.is_empty() {
            self.error = Some(SubmitError::Incomplete.to_string());
            return Err(SubmitError::Incomplete);
        }

        let new = NewPost::new(self.title.clone(), self.content.clone());
        match api.create_post(&new).await {
            Ok(post) => {
                self.posts.push(post.clone());
                self.title.clear();
                self.content.clear();
                self.error = None;
                Ok(post)
            }
            Err(e) => {
                error!(error = %e, "error creating post");
                self.error = Some(e.to_string());
                Err(e.into())
            }
        }
    }
}

impl fmt::Display for BlogView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "My Blog")?;
        if let Some(error) = &self.error {
            writeln!(f, "error: {error}")?;
        }
        writeln!(f)?;
        writeln!(f, "Posts")?;
        if self.posts.is_empty() {
            return writeln!(f, "  (none)");
        }
        for post in &self.posts {
            writeln!(
                f,
                "  - {}: {}",
                post.title.as_deref().unwrap_or_default(),
                post.content.as_deref().unwrap_or_default(),
            )?;
        }
        Ok(())
    }
}
