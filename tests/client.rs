//! The blog client against a real server on a loopback socket.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use quill::middleware::Cors;
use quill::post::{NewPost, Post};
use quill::store::{MemoryStore, PostStore, SharedStore, StoreError};
use quill::ui::{BlogView, HttpClient, PostsApi};
use quill::{api, health};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

struct TestServer {
    addr: SocketAddr,
    stop: oneshot::Sender<()>,
    handle: JoinHandle<Result<(), quill::Error>>,
}

impl TestServer {
    async fn start() -> Self {
        Self::with_store(Arc::new(MemoryStore::new())).await
    }

    async fn with_store(store: SharedStore) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop, stopped) = oneshot::channel::<()>();
        let app = api::router(store, Cors::any());
        let handle = tokio::spawn(quill::serve_on(listener, app, async move {
            let _ = stopped.await;
        }));
        Self { addr, stop, handle }
    }

    fn client(&self) -> HttpClient {
        HttpClient::new(format!("http://{}", self.addr))
    }

    /// Stops the server; idle keep-alive connections must not hold it open.
    async fn shutdown(self) {
        let _ = self.stop.send(());
        timeout(SHUTDOWN_GRACE, self.handle)
            .await
            .expect("server drained within the grace period")
            .unwrap()
            .unwrap();
    }
}

/// A database that never answers a ping, like an unreachable Mongo host
/// while the driver waits out its server selection timeout.
struct SilentStore(MemoryStore);

#[async_trait]
impl PostStore for SilentStore {
    async fn list_all(&self) -> Result<Vec<Post>, StoreError> {
        self.0.list_all().await
    }

    async fn create(&self, new: NewPost) -> Result<Post, StoreError> {
        self.0.create(new).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn view_lists_and_creates_over_http() {
    let server = TestServer::start().await;
    let api = server.client();

    let mut view = BlogView::new();
    view.mount(&api).await;
    assert!(view.is_loaded());
    assert!(view.posts().is_empty());

    view.set_title("Hello");
    view.set_content("World");
    let created = view.submit(&api).await.unwrap();
    assert_eq!(created.title.as_deref(), Some("Hello"));
    assert_eq!(created.content.as_deref(), Some("World"));
    assert_eq!(view.title(), "");

    // A fresh view sees what the first one created.
    let mut other = BlogView::new();
    other.mount(&api).await;
    assert_eq!(other.posts(), &[created]);

    server.shutdown().await;
}

#[tokio::test]
async fn shutdown_closes_idle_keep_alive_connections() {
    let server = TestServer::start().await;

    // One plain reqwest client keeps its pooled connection open after the
    // response, as a browser would.
    let http = reqwest::Client::new();
    let res = http.get(format!("http://{}/posts", server.addr)).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "[]");

    server.shutdown().await;
    drop(http);
}

#[tokio::test]
async fn serves_while_the_store_never_answers_its_startup_ping() {
    let store: SharedStore = Arc::new(SilentStore(MemoryStore::new()));
    let check = health::check_connection(Arc::clone(&store));

    let server = TestServer::with_store(store).await;
    let api = server.client();

    let posts = timeout(Duration::from_secs(2), api.list_posts())
        .await
        .expect("listener answers before the store does")
        .unwrap();
    assert!(posts.is_empty());
    assert!(!check.is_finished());

    check.abort();
    server.shutdown().await;
}

#[tokio::test]
async fn concurrent_submissions_both_persist() {
    let server = TestServer::start().await;
    let api = server.client();

    let first = NewPost::new("one", "1");
    let second = NewPost::new("two", "2");
    let (a, b) = tokio::join!(api.create_post(&first), api.create_post(&second));
    let (a, b) = (a.unwrap(), b.unwrap());
    assert_ne!(a.id, b.id);

    let listed = api.list_posts().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.contains(&a) && listed.contains(&b));

    server.shutdown().await;
}

#[tokio::test]
async fn unreachable_api_leaves_view_empty_and_keeps_inputs() {
    // Bind and drop to get a port nothing listens on.
    let addr = TcpListener::bind("127.0.0.1:0").await.unwrap().local_addr().unwrap();
    let api = HttpClient::new(format!("http://{addr}"));

    let mut view = BlogView::new();
    view.mount(&api).await;
    assert!(!view.is_loaded());
    assert!(view.posts().is_empty());

    view.set_title("Hello");
    view.set_content("World");
    assert!(view.submit(&api).await.is_err());
    assert_eq!(view.title(), "Hello");
    assert_eq!(view.content(), "World");
    assert!(view.error().is_some());
}
