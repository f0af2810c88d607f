//! Command-line and environment configuration.
//!
//! Every flag falls back to an environment variable, and `.env` is loaded
//! before parsing, so `PORT=8080 quill` and `quill --port 8080` agree.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};

use crate::router::DEFAULT_BODY_LIMIT;

pub const DEFAULT_MONGO_URL: &str = "mongodb://localhost:27017/blogdb";
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// quill: a minimal blog backend and its terminal client.
///
/// Without a subcommand, serves the posts API.
#[derive(Parser, Debug, Clone)]
#[command(name = "quill", version, about)]
pub struct Args {
    #[command(flatten)]
    pub serve: ServeArgs,

    #[command(subcommand)]
    pub command: Option<Command>,

    /// Log level used when RUST_LOG is not set (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON", global = true)]
    pub log_json: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fetch and print every post
    List(ClientArgs),
    /// Create a post, then print every post
    Post(PostArgs),
}

/// Where posts are kept.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Mongo,
    /// In-process and lost on exit
    Memory,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// MongoDB connection URL; its path names the database
    #[arg(long, env = "MONGO_URL", default_value = DEFAULT_MONGO_URL)]
    pub mongo_url: String,

    /// Storage backend
    #[arg(long, env = "STORE", value_enum, default_value_t = StoreKind::Mongo)]
    pub store: StoreKind,

    /// Value of access-control-allow-origin
    #[arg(long, env = "CORS_ORIGIN", default_value = "*")]
    pub cors_origin: String,

    /// Largest request body accepted, in bytes; larger ones get 413
    #[arg(long, env = "BODY_LIMIT", default_value_t = DEFAULT_BODY_LIMIT)]
    pub body_limit: usize,
}

impl ServeArgs {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ClientArgs {
    /// Root URL of the posts API
    #[arg(long, env = "BLOG_API", default_value = DEFAULT_API_URL)]
    pub api: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct PostArgs {
    #[command(flatten)]
    pub client: ClientArgs,

    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub content: String,
}
