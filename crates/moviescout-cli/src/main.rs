//! moviescout - terminal movie browser for TMDB.

/// Interactive browser TUI.
mod browser;
/// Application configuration (TOML).
mod config;
/// Languages and translation dictionaries.
mod i18n;
/// Tracing subscriber setup.
mod logging;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing::instrument;

use crate::config::{AppConfig, resolve_config_path, resolve_log_path};
use crate::i18n::{Language, Localization};
use crate::logging::LogTarget;
use moviescout_api::tmdb::{CatalogEndpoint, MovieQueryParams, NamedEntry, TmdbApi, TmdbClient};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Interface and content language (en-US or uk-UA). Overrides the config.
    #[arg(long, global = true)]
    language: Option<Language>,

    /// Subcommand to run (default: browse).
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Browse trending movies and search interactively.
    Browse,
    /// Search movies by keyword and print one page of results.
    Search(SearchArgs),
    /// Print one page of today's trending movies.
    Trending(TrendingArgs),
    /// Print the details of one movie.
    Movie(MovieArgs),
    /// Manage the config file.
    Config(ConfigCommand),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (e.g. "Inception").
    #[arg(long, required = true)]
    query: String,
    /// Result page (1-500).
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `trending` subcommand.
#[derive(clap::Args)]
struct TrendingArgs {
    /// Result page (1-500).
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `movie` subcommand.
#[derive(clap::Args)]
struct MovieArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Print the config file path.
    Path,
    /// Write a config file with default values.
    Init(ConfigInitArgs),
}

/// Arguments for the `config init` subcommand.
#[derive(clap::Args)]
struct ConfigInitArgs {
    /// Overwrite an existing config file.
    #[arg(long)]
    force: bool,
}

/// Arguments for the `completions` subcommand.
#[derive(clap::Args)]
struct CompletionsArgs {
    /// Target shell.
    shell: Shell,
}

/// Builds a `TmdbClient` from the `TMDB_API_TOKEN` environment variable.
///
/// # Errors
///
/// Returns an error if the environment variable is not set or the client fails to build.
fn build_tmdb_client() -> Result<TmdbClient> {
    let api_token = std::env::var("TMDB_API_TOKEN")
        .context("TMDB_API_TOKEN environment variable is required")?;

    TmdbClient::builder()
        .api_token(api_token)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build TMDB client")
}

/// Loads the config file and applies the `--language` override.
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let config_path =
        resolve_config_path(cli.dir.as_deref()).context("failed to resolve config path")?;
    let mut config = AppConfig::load(&config_path).context("failed to load config")?;
    if let Some(language) = cli.language {
        config.browse.language = language;
    }
    Ok(config)
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, the client cannot be
/// built, or the TUI fails.
#[instrument(skip_all)]
async fn run_browse(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let client = Arc::new(build_tmdb_client()?);
    let localization = Localization::new(config.browse.language, config.translations.clone());

    tracing::info!(language = %config.browse.language, "launching browser");
    browser::run_browser(client, &config, localization)
        .await
        .context("movie browser TUI failed")
}

/// Runs the `search` and `trending` subcommands.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all, fields(endpoint = ?endpoint))]
async fn run_list(cli: &Cli, endpoint: CatalogEndpoint, query: &str, page: u32) -> Result<()> {
    let config = load_config(cli)?;
    let client = build_tmdb_client()?;

    let params = MovieQueryParams::new(query)
        .language(config.browse.language.tag())
        .page(page)
        .include_adult(config.browse.include_adult);

    let response = client
        .movies(endpoint, &params)
        .await
        .with_context(|| format!("TMDB {} request failed", endpoint.path()))?;

    if response.is_empty() {
        let localization = Localization::new(config.browse.language, config.translations);
        tracing::info!(
            "{}",
            localization.t(i18n::TranslationKey::ToastBadRequest)
        );
        return Ok(());
    }

    tracing::info!(
        "Page {} / {} ({} results)",
        response.page,
        response.page_count(),
        response.total_results
    );
    tracing::info!("ID\tYear\tRating\tTitle");
    for movie in &response.results {
        tracing::info!(
            "{}\t{}\t{:.1}\t{}",
            movie.id,
            movie.release_year().unwrap_or("-"),
            movie.vote_average,
            movie.title,
        );
    }

    Ok(())
}

/// Runs the `movie` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_movie(cli: &Cli, args: &MovieArgs) -> Result<()> {
    let config = load_config(cli)?;
    let client = build_tmdb_client()?;
    let language = config.browse.language;

    let details = client
        .movie_details(args.id, language.tag())
        .await
        .context("TMDB movie details request failed")?;

    let localization = Localization::new(language, config.translations);
    let t = |key| localization.t(key);
    let names = |entries: &[NamedEntry]| {
        entries
            .iter()
            .map(|e| e.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    tracing::info!("ID: {}", details.id);
    tracing::info!("Title: {}", details.title);
    tracing::info!("Original Title: {}", details.original_title);
    if let Some(tagline) = details.tagline.as_deref().filter(|s| !s.is_empty()) {
        tracing::info!("{tagline}");
    }
    tracing::info!(
        "{}",
        details
            .overview
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| t(i18n::TranslationKey::NotDescribed))
    );
    tracing::info!("{}: {}", t(i18n::TranslationKey::Genres), names(&details.genres));
    tracing::info!(
        "{}: {}",
        t(i18n::TranslationKey::ReleaseDate),
        details
            .release_date
            .as_deref()
            .map_or_else(|| String::from("-"), |d| language.format_date(d))
    );
    tracing::info!(
        "{}: {}",
        t(i18n::TranslationKey::OriginalLanguage),
        details.original_language
    );
    if details.budget == 0 {
        tracing::info!("{}", t(i18n::TranslationKey::NoBudget));
    } else {
        tracing::info!("{}: ${}", t(i18n::TranslationKey::Budget), details.budget);
    }
    if details.revenue == 0 {
        tracing::info!("{}", t(i18n::TranslationKey::NoRevenue));
    } else {
        tracing::info!("{}: ${}", t(i18n::TranslationKey::Revenue), details.revenue);
    }
    tracing::info!(
        "{}: {:.1} ({} {})",
        t(i18n::TranslationKey::Rating),
        details.vote_average,
        details.vote_count,
        t(i18n::TranslationKey::Votes)
    );
    tracing::info!(
        "{}: {}",
        t(i18n::TranslationKey::Production),
        names(&details.production_companies)
    );

    Ok(())
}

/// Runs the `config path` subcommand.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved.
fn run_config_path(cli: &Cli) -> Result<()> {
    let path = resolve_config_path(cli.dir.as_deref()).context("failed to resolve config path")?;
    tracing::info!("{}", path.display());
    Ok(())
}

/// Runs the `config init` subcommand.
///
/// # Errors
///
/// Returns an error if the file exists (without `--force`) or cannot be written.
#[instrument(skip_all)]
fn run_config_init(cli: &Cli, args: &ConfigInitArgs) -> Result<()> {
    let path = resolve_config_path(cli.dir.as_deref()).context("failed to resolve config path")?;
    if path.exists() && !args.force {
        bail!(
            "config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    let mut config = AppConfig::default();
    if let Some(language) = cli.language {
        config.browse.language = language;
    }
    config.save(&path).context("failed to save config")?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Completions(args)) = &cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(args.shell, &mut cmd, "moviescout", &mut io::stdout());
        return Ok(());
    }

    match &cli.command {
        None | Some(Commands::Browse) => {
            let log_path =
                resolve_log_path(cli.dir.as_deref()).context("failed to resolve log path")?;
            logging::init(LogTarget::File(&log_path))?;
        }
        Some(_) => logging::init(LogTarget::Stdout)?,
    }

    match &cli.command {
        None | Some(Commands::Browse) => run_browse(&cli).await,
        Some(Commands::Search(args)) => {
            run_list(&cli, CatalogEndpoint::Search, &args.query, args.page).await
        }
        Some(Commands::Trending(args)) => {
            run_list(&cli, CatalogEndpoint::Trending, "", args.page).await
        }
        Some(Commands::Movie(args)) => run_movie(&cli, args).await,
        Some(Commands::Config(cmd)) => match &cmd.command {
            ConfigSubcommands::Path => run_config_path(&cli),
            ConfigSubcommands::Init(args) => run_config_init(&cli, args),
        },
        Some(Commands::Completions(_)) => Ok(()),
    }
}
