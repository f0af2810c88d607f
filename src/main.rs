use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quill::config::{Args, ClientArgs, Command, PostArgs, ServeArgs, StoreKind};
use quill::middleware::Cors;
use quill::store::{MemoryStore, MongoStore, SharedStore};
use quill::ui::{BlogView, HttpClient};
use quill::{Server, api, health};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    init_tracing(&args);

    match args.command {
        None => serve(args.serve).await,
        Some(Command::List(client)) => list(client).await,
        Some(Command::Post(post)) => post_and_list(post).await,
    }
}

fn init_tracing(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("quill={},info", args.log_level)));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if args.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let store: SharedStore = match args.store {
        StoreKind::Memory => {
            info!("using in-memory store");
            Arc::new(MemoryStore::new())
        }
        StoreKind::Mongo => {
            let store = MongoStore::connect(&args.mongo_url)
                .await
                .context("invalid MONGO_URL")?;
            Arc::new(store)
        }
    };
    // Not fatal: the listener starts regardless and /readyz reports it.
    health::check_connection(Arc::clone(&store));

    let cors = Cors::origin(&args.cors_origin).context("invalid CORS_ORIGIN")?;
    let app = api::router(store, cors).body_limit(args.body_limit);

    info!(addr = %args.listen_addr(), "backend starting");
    Server::bind(args.listen_addr()).serve(app).await?;
    Ok(())
}

async fn list(args: ClientArgs) -> anyhow::Result<()> {
    let api = HttpClient::new(args.api);
    let mut view = BlogView::new();
    view.mount(&api).await;
    print!("{view}");
    Ok(())
}

async fn post_and_list(args: PostArgs) -> anyhow::Result<()> {
    let api = HttpClient::new(args.client.api);
    let mut view = BlogView::new();
    view.mount(&api).await;

    view.set_title(args.title);
    view.set_content(args.content);
    let result = view.submit(&api).await;
    print!("{view}");
    result.context("failed to create post")?;
    Ok(())
}
