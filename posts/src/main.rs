//! Posts feed command-line client
//!
//! ```text
//! posts [--offline] list
//! posts [--offline] add <title> <body>
//! ```
//!
//! Settings come from `POSTS_*` environment variables (see `PostsConfig`).
//! `--offline` swaps the HTTP collection for an in-memory one.

use anyhow::{bail, Context};
use postfeed_core::environment::SystemClock;
use posts::{MockPostsClient, Post, PostsConfig, PostsFeed, PostsState, RequestStatus};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: posts [--offline] list | posts [--offline] add <title> <body>";

enum Command {
    List,
    Add { title: String, body: String },
}

struct Args {
    offline: bool,
    command: Command,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Args> {
    let mut offline = false;
    let mut positional = Vec::new();

    for arg in args {
        match arg.as_str() {
            "--offline" => offline = true,
            "-h" | "--help" => bail!(USAGE),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let command = match positional.next().as_deref() {
        None | Some("list") => Command::List,
        Some("add") => {
            let (Some(title), Some(body)) = (positional.next(), positional.next()) else {
                bail!("add needs a title and a body\n{USAGE}");
            };
            Command::Add { title, body }
        },
        Some(other) => bail!("unknown command {other:?}\n{USAGE}"),
    };

    Ok(Args { offline, command })
}

fn sample_posts() -> Vec<Post> {
    (1..=5)
        .map(|i| {
            Post::new(
                i,
                format!("Sample post {i}"),
                format!("Body of sample post {i}"),
                1,
            )
        })
        .collect()
}

fn print_feed(state: &PostsState) {
    println!(
        "fetch: {}  add: {}  posts: {}",
        state.fetch_status,
        state.add_status,
        state.len()
    );
    if let Some(error) = &state.error {
        println!("error: {error}");
    }
    for post in &state.items {
        println!("  [{}] {}", post.id, post.title);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "posts=info,postfeed_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = parse_args(std::env::args().skip(1))?;

    // One-shot runs exit long before an auto-clear would fire
    let config = PostsConfig {
        error_clear_delay_ms: 0,
        ..PostsConfig::from_env().context("reading POSTS_* configuration")?
    };

    let feed = if args.offline {
        tracing::info!("Using in-memory posts collection");
        let client = MockPostsClient::with_posts(sample_posts())
            .with_latency(Duration::from_millis(100));
        PostsFeed::with_client(Arc::new(client), Arc::new(SystemClock), &config)
    } else {
        PostsFeed::connect(&config).context("building HTTP client")?
    };

    // Request timeout plus headroom for applying the outcome
    let wait = config.request_timeout() + Duration::from_secs(1);

    let mut handle = feed.trigger_fetch().await?;
    handle.wait_with_timeout(wait).await?;

    if let Command::Add { title, body } = args.command {
        let mut handle = feed.trigger_add(title, body).await?;
        handle.wait_with_timeout(wait).await?;
    }

    let state = feed.snapshot().await;
    print_feed(&state);

    feed.shutdown().await?;

    if state.fetch_status == RequestStatus::Failed || state.add_status == RequestStatus::Failed {
        bail!(state.error.unwrap_or_else(|| "request failed".to_string()));
    }

    Ok(())
}
