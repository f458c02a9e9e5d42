use clap::{ArgAction, Parser, Subcommand};
use cinesearch_config::PathManager;
use commands::{browse, clear, config, details, reviews, search};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "cinesearch")]
#[command(about = "CineSearch - Search movies and share reviews from the terminal")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to a daily-rotated file instead of stderr (defaults to the data directory)
    #[arg(long, global = true, value_name = "PATH", num_args = 0..=1)]
    log_file: Option<Option<PathBuf>>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search movies by title
    #[command(long_about = "Search the movie metadata provider by title. Results are paginated by the provider; use --pages to fetch several pages in one go. Repeated searches within a session are served from cache.")]
    Search {
        /// Title to search for
        query: String,

        /// First page to fetch
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Number of pages to fetch, following the result cursor
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Show full details and review statistics for a movie
    Details {
        /// IMDb identifier, e.g. tt0133093
        imdb_id: String,
    },
    /// List, add, or delete reviews
    Reviews {
        #[command(subcommand)]
        cmd: ReviewCommands,
    },
    /// Interactive session: search, scroll, open movies, and review them
    #[command(long_about = "Start an interactive session backed by a single in-memory store, so repeated searches and reopened movies are served from cache. Type 'help' inside the session for the list of commands.")]
    Browse,
    /// Configure the API key and service URLs
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
    /// Clear stored credentials or the local review snapshot
    Clear {
        /// Clear credentials and the review snapshot
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Clear stored credentials
        #[arg(long, action = ArgAction::SetTrue)]
        credentials: bool,

        /// Clear the local review snapshot
        #[arg(long, action = ArgAction::SetTrue)]
        snapshot: bool,
    },
}

#[derive(Subcommand)]
pub enum ReviewCommands {
    /// List reviews for a movie
    List {
        imdb_id: String,

        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Reviews per page (1-100, defaults to the configured page size)
        #[arg(long)]
        limit: Option<u32>,

        /// Save the fetched reviews to the local snapshot
        #[arg(long, action = ArgAction::SetTrue)]
        snapshot: bool,
    },
    /// Submit a review
    Add {
        imdb_id: String,

        /// Star rating from 1 to 5
        #[arg(long)]
        rating: u8,

        #[arg(long)]
        text: String,

        /// Display name (name or email is required)
        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        email: String,
    },
    /// Delete a review by id
    Delete {
        review_id: String,

        /// Movie the review belongs to
        #[arg(long = "movie", value_name = "IMDB_ID")]
        imdb_id: String,
    },
    /// Store a generated summary and sentiment tally for a movie
    #[command(long_about = "Write the review summary and sentiment counts for a movie. This is the hook the summarization process uses; regular review flows never call it.")]
    Summary {
        imdb_id: String,

        #[arg(long)]
        summary: String,

        #[arg(long, default_value_t = 0)]
        good: u32,

        #[arg(long, default_value_t = 0)]
        average: u32,

        #[arg(long, default_value_t = 0)]
        bad: u32,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Store the OMDb API key
    #[command(long_about = "Store the OMDb API key in the credentials file. Get a free key at https://www.omdbapi.com/apikey.aspx. The OMDB_API_KEY environment variable takes precedence over the stored key.")]
    Omdb {
        /// API key (if not provided, will prompt with hidden input)
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Set the reviews backend URL
    Reviews {
        #[arg(long)]
        base_url: Option<String>,

        /// Default number of reviews per page (1-100)
        #[arg(long)]
        page_size: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let paths = PathManager::default();
    let settings = commands::load_config(&paths)?;

    let log_file = cli.log_file.map(|path| path.unwrap_or_else(|| paths.log_file()));
    logging::init_logging_with_file(cli.verbose, cli.quiet, &settings.logging, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Search { query, page, pages } => search::run_search(&query, page, pages, &paths, &output).await,
        Commands::Details { imdb_id } => details::run_details(&imdb_id, &paths, &output).await,
        Commands::Reviews { cmd } => reviews::run_reviews(cmd, &paths, &output).await,
        Commands::Browse => browse::run_browse(&paths, &output).await,
        Commands::Config { cmd } => config::run_config(cmd, &paths, &output),
        Commands::Clear { all, credentials, snapshot } => clear::run_clear(all, credentials, snapshot, &paths, &output),
    }
}
