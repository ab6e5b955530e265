use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;

use roster::cache::FileCache;
use roster::config::Config;
use roster::logging::init_tracing;
use roster::model::User;
use roster::source::HttpSource;
use roster::store::{CollectionStore, StoreSettings, StoreState};

/// List users from the remote directory, cached locally.
#[derive(Debug, Parser)]
#[command(name = "roster", version, about)]
struct Cli {
    /// Config file (defaults to the platform config dir).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only show users whose name or email contains this text.
    #[arg(short, long, default_value = "")]
    query: String,

    /// Number of pages to materialize.
    #[arg(short, long, default_value_t = 1)]
    pages: usize,

    /// Retry this many times if loading fails.
    #[arg(long, default_value_t = 0)]
    retries: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;

    let source = HttpSource::new(&config.remote).context("building HTTP client")?;
    let cache = FileCache::new(config.cache.resolved_dir());
    let store: CollectionStore<User> = CollectionStore::new(
        Arc::new(source),
        Arc::new(cache),
        StoreSettings::from(&config.store),
    )?;

    store.initial_load().await;
    for attempt in 1..=cli.retries {
        let Some(error) = store.last_error() else {
            break;
        };
        tracing::info!(attempt, error = %error, "Retrying collection load");
        store.retry().await;
    }

    for _ in 1..cli.pages {
        if !store.snapshot().can_load_more() {
            break;
        }
        store.load_next_page().await;
    }

    store.set_query(cli.query);
    let state = store.snapshot();

    if let Some(error) = &state.last_error {
        bail!("failed to load users: {}", error);
    }

    print_view(&state);
    Ok(())
}

fn print_view(state: &StoreState<User>) {
    for user in &state.view {
        println!("{:>4}  {:<28} {}", user.id, user.name, user.email);
    }
    println!(
        "-- {} shown, {} of {} loaded{}",
        state.view.len(),
        state.all.len(),
        state.total,
        if state.has_more { ", more available" } else { "" }
    );
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn parse_defaults() {
        let cli = Cli::parse_from(["roster"]);
        assert_eq!(cli.query, "");
        assert_eq!(cli.pages, 1);
        assert_eq!(cli.retries, 0);
        assert!(cli.config.is_none());
    }

    #[test]
    fn parse_query_and_pages() {
        let cli = Cli::parse_from(["roster", "-q", "jane", "--pages", "3", "--retries", "2"]);
        assert_eq!(cli.query, "jane");
        assert_eq!(cli.pages, 3);
        assert_eq!(cli.retries, 2);
    }
}
