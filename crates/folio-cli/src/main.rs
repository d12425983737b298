use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use folio_api::GitHubClient;
use folio_cache::{CacheBackend, MemoryCache, SqliteCache};
use folio_core::{
    skills, Config, GitHubFetcher, HtmlRegion, ListingState, ProjectsPage, RepositoryStore,
    SortCriterion,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version, about = "Builds the projects section of a personal portfolio page", long_about = None)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "FOLIO_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Fetch the repository listing and render the projects section
    Projects {
        /// Account whose repositories are listed
        #[arg(long)]
        owner: Option<String>,
        /// Re-render in this order after loading (stars, recency)
        #[arg(long)]
        sort: Option<SortCriterion>,
        /// Only show repositories matching this text
        #[arg(long)]
        search: Option<String>,
        /// Write the HTML here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Neither read nor write the local cache
        #[arg(long)]
        no_cache: bool,
    },
    /// Show skill cards
    Skills {
        /// Skill identifier, e.g. "Python"; all skills when omitted
        name: Option<String>,
    },
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Manage the cached listing
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(clap::Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write a default config file
    Init,
}

#[derive(clap::Subcommand)]
enum CacheAction {
    /// Print the cached listing as JSON
    Show,
    /// Forget the cached listing
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load config")?;

    match cli.command {
        Commands::Projects {
            owner,
            sort,
            search,
            output,
            no_cache,
        } => {
            let owner = owner.unwrap_or_else(|| config.github.owner.clone());
            let output = output.or_else(|| config.output.path.clone());
            let use_cache = config.cache.enabled && !no_cache;
            run_projects(&config, &owner, sort, search.as_deref(), output.as_deref(), use_cache)
                .await?;
        }
        Commands::Skills { name } => run_skills(name.as_deref())?,
        Commands::Config { action } => match action {
            ConfigAction::Show => print!("{}", config.to_toml()?),
            ConfigAction::Init => {
                let path = match &cli.config {
                    Some(path) => {
                        config.save_to(path)?;
                        path.clone()
                    }
                    None => config.save()?,
                };
                println!("Wrote {}", path.display());
            }
        },
        Commands::Cache { action } => {
            let store = RepositoryStore::open(open_cache(&config)?);
            match action {
                CacheAction::Show => match store.load() {
                    Some(list) => println!("{}", serde_json::to_string_pretty(&list)?),
                    None => println!("No cached listing"),
                },
                CacheAction::Clear => {
                    store.clear_persisted()?;
                    println!("Cleared cached listing");
                }
            }
        }
    }

    Ok(())
}

async fn run_projects(
    config: &Config,
    owner: &str,
    sort: Option<SortCriterion>,
    search: Option<&str>,
    output: Option<&Path>,
    use_cache: bool,
) -> anyhow::Result<()> {
    tracing::info!("Building projects section for {}", owner);

    let client = GitHubClient::with_base_url(&config.github.user_agent, config.github.api_url.clone())?;
    let backend: Box<dyn CacheBackend> = if use_cache {
        Box::new(open_cache(config)?)
    } else {
        Box::new(MemoryCache::new())
    };

    let mut page = ProjectsPage::new(GitHubFetcher::new(client), backend, HtmlRegion::new());
    let state = page.load(owner).await;

    if let Some(criterion) = sort {
        page.sort(criterion);
    }
    if let Some(query) = search {
        page.search(query);
    }

    let mut region = page.into_display();
    if let Some(query) = search {
        region.search_query = query.to_string();
    }
    let html = region.to_html();

    match output {
        Some(path) => {
            std::fs::write(path, &html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {} cards to {}", region.card_count(), path.display());
        }
        None => print!("{}", html),
    }

    if state == ListingState::LoadFailedNoCache {
        anyhow::bail!("Could not load repositories for {} and nothing was cached", owner);
    }

    Ok(())
}

fn open_cache(config: &Config) -> anyhow::Result<SqliteCache> {
    let path = config.cache.resolved_path()?;
    SqliteCache::open(&path).with_context(|| format!("Failed to open cache at {}", path.display()))
}

fn run_skills(name: Option<&str>) -> anyhow::Result<()> {
    match name {
        Some(name) => {
            let skill = skills::lookup(name)
                .with_context(|| format!("Unknown skill: {}", name))?;
            print!("{}", skills::render_card(name, skill));
        }
        None => {
            for (id, skill) in skills::SKILLS {
                println!(
                    "{:<14} {:<9} {:>3}%  {}",
                    id,
                    skill.level,
                    skill.level.progress_percent(),
                    skill.description
                );
            }
        }
    }

    Ok(())
}
