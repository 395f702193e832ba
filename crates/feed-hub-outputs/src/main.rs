use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use feed_hub_outputs::{Article, HubConfig, OutputRegistry, ProviderSpec};

#[derive(Parser, Debug)]
#[command(name = "feed-hub-outputs")]
struct Args {
    /// Output config file (TOML)
    #[arg(long)]
    config: PathBuf,

    /// Pretty-print the specs JSON
    #[arg(long)]
    pretty: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print the spec of every configured provider.
    Specs,
    /// Deliver one article (JSON file) to every provider, then print the specs.
    Send {
        article: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // stdout belongs to the stdout provider and the specs dump.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,feed_hub_outputs=info")),
        )
        .init();

    let cfg = HubConfig::load(&args.config)?;
    let registry = OutputRegistry::from_configs(&cfg.outputs);
    tracing::info!(
        config = %args.config.display(),
        configured = cfg.outputs.len(),
        active = registry.len(),
        "output registry built"
    );

    match args.cmd {
        Cmd::Specs => {}
        Cmd::Send { article } => {
            let article = read_article(&article)?;
            dispatch(&registry, &article);
        }
    }

    print_specs(&registry.specs(), args.pretty)
}

fn read_article(path: &Path) -> Result<Article> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("read article {:?}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("parse article {:?}", path))
}

fn dispatch(registry: &OutputRegistry, article: &Article) {
    if registry.is_empty() {
        tracing::warn!("no output providers configured; article dropped");
        return;
    }
    std::thread::scope(|scope| {
        for (index, provider) in registry.providers().iter().enumerate() {
            scope.spawn(move || match provider.send(article) {
                Ok(()) => tracing::info!(
                    index,
                    name = provider.name(),
                    tags = ?provider.tags(),
                    title = %article.title,
                    "article delivered"
                ),
                Err(err) => tracing::warn!(
                    index,
                    name = provider.name(),
                    tags = ?provider.tags(),
                    title = %article.title,
                    error = %err,
                    "article delivery failed"
                ),
            });
        }
    });
}

fn print_specs(specs: &[ProviderSpec], pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(specs)
    } else {
        serde_json::to_string(specs)
    }
    .context("encode specs")?;
    println!("{out}");
    Ok(())
}
