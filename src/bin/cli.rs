//! Apploy CLI
//!
//! Search, filter and bookmark job ads from the JobTech search API.

use std::path::PathBuf;

use apploy::{
    error::{AppError, Result},
    models::{Branch, Config, FilterCriteria, SearchMode},
    pipeline::{self, report},
    services::{
        JobFetcher, JobSearchClient, TaxonomyClient,
        classifier::classify_with_reason,
        taxonomy::{SWEDISH_COUNTIES, region_code_for_county},
    },
    storage::LocalStorage,
    store::JobStore,
    utils::http,
};
use clap::{Parser, Subcommand};

/// Apploy - Job Search Client
#[derive(Parser, Debug)]
#[command(
    name = "apploy",
    version,
    about = "Search, filter and bookmark Swedish job ads"
)]
struct Cli {
    /// Path to storage directory containing config.toml and saved jobs
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search job ads
    Search {
        /// County to search in, e.g. "Skåne län" (repeatable)
        #[arg(short, long = "location", value_name = "COUNTY")]
        locations: Vec<String>,

        /// Branch label, e.g. "Data, IT, telekommunikation" (repeatable)
        #[arg(short, long = "branch", value_name = "BRANCH")]
        branches: Vec<String>,

        /// Free-text search term
        #[arg(short, long, default_value = "")]
        query: String,

        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Filter locally instead of sending filters to the API
        #[arg(long)]
        client_side: bool,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single job ad
    Show {
        id: String,

        /// Print the ad as JSON
        #[arg(long)]
        json: bool,
    },

    /// Save a job ad
    Save { id: String },

    /// Remove a saved job ad
    Remove { id: String },

    /// Toggle the applied flag of a saved job ad
    Toggle { id: String },

    /// List saved and applied jobs
    Saved,

    /// Show today's jobs per region
    Chart,

    /// Classify occupation labels into branches
    Classify {
        #[arg(required = true)]
        labels: Vec<String>,
    },

    /// List branches
    Branches {
        /// List occupation fields from the taxonomy API instead
        #[arg(long)]
        remote: bool,

        /// List occupation groups from the taxonomy API
        #[arg(long, conflicts_with = "remote")]
        groups: bool,

        /// Look up one occupation field by concept id
        #[arg(long, value_name = "ID", conflicts_with_all = ["remote", "groups"])]
        field: Option<String>,

        /// Look up the occupation field of an occupation concept id
        #[arg(long, value_name = "ID", conflicts_with_all = ["remote", "groups", "field"])]
        occupation: Option<String>,
    },

    /// List counties and their region codes
    Counties,

    /// Validate configuration
    Validate,
}

/// Initialize logging based on verbosity flag and configured level.
fn init_logging(verbose: bool, configured: Option<&str>) {
    let level = if verbose {
        "debug"
    } else {
        configured.unwrap_or("info")
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.storage_dir.join("config.toml");
    let configured_level = Config::load(&config_path).ok().map(|c| c.logging.level);
    init_logging(cli.verbose, configured_level.as_deref());

    let config = Config::load_or_default(&config_path);
    log::debug!("Loaded configuration from {}", cli.storage_dir.display());

    let storage = LocalStorage::with_key(&cli.storage_dir, &config.storage.saved_jobs_key);

    match cli.command {
        Command::Search {
            locations,
            branches,
            query,
            page,
            client_side,
            json,
        } => {
            for location in &locations {
                if region_code_for_county(location).is_none() {
                    log::warn!("Unknown county {:?} is ignored by the API", location);
                }
            }
            for branch in &branches {
                if Branch::from_label(branch).is_none() {
                    log::warn!("Unknown branch {:?} matches nothing", branch);
                }
            }

            let mode = if client_side {
                SearchMode::Client
            } else {
                config.search.mode
            };
            let fetcher = search_fetcher(&config, mode)?;
            let criteria = FilterCriteria::new(locations, branches, query);
            let outcome = pipeline::run_search(&fetcher, criteria, page, config.search.page_size).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome.results)?);
            } else {
                println!("{}", outcome.filters);
                for job in &outcome.results.jobs {
                    println!("{}", report::job_line(job));
                }
                println!(
                    "Sida {} av {} ({} träffar)",
                    outcome.page, outcome.page_count, outcome.results.total
                );
            }
        }

        Command::Show { id, json } => {
            let fetcher = search_fetcher(&config, config.search.mode)?;
            let job = pipeline::run_show(&fetcher, &id).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&job)?);
            } else {
                print!("{}", report::job_details(&job));
            }
        }

        Command::Save { id } => {
            let fetcher = search_fetcher(&config, config.search.mode)?;
            let mut store = JobStore::open(storage).await?;
            pipeline::run_save(&fetcher, &mut store, &id).await?;
        }

        Command::Remove { id } => {
            let mut store = JobStore::open(storage).await?;
            pipeline::run_remove(&mut store, &id).await?;
        }

        Command::Toggle { id } => {
            let mut store = JobStore::open(storage).await?;
            pipeline::run_toggle(&mut store, &id).await?;
        }

        Command::Saved => {
            let store = JobStore::open(storage).await?;
            print!("{}", report::saved_lists(&store.saved(), &store.applied()));
        }

        Command::Chart => {
            let client = http::create_async_client(&config.api)?;
            let api = JobSearchClient::new(client, &config.api.search_base_url);
            let counts = pipeline::run_chart(&api, &config.search).await;
            print!("{}", report::region_chart(&counts));
        }

        Command::Classify { labels } => {
            for label in &labels {
                match classify_with_reason(Some(label.as_str())) {
                    Some(c) => println!("{} -> {} (\"{}\")", label, c.branch, c.keyword),
                    None => println!("{} -> -", label),
                }
            }
        }

        Command::Branches {
            remote,
            groups,
            field,
            occupation,
        } => {
            if let Some(id) = occupation {
                let taxonomy = taxonomy_client(&config)?;
                let field = taxonomy
                    .occupation_field_for_occupation(&id)
                    .await
                    .ok_or_else(|| AppError::NotFound(format!("occupation field for occupation {}", id)))?;
                println!("{:<14} {}", field.concept_id, field.label);
            } else if let Some(id) = field {
                let taxonomy = taxonomy_client(&config)?;
                let field = taxonomy
                    .occupation_field(&id)
                    .await
                    .ok_or_else(|| AppError::NotFound(format!("occupation field {}", id)))?;
                println!("{:<14} {}", field.concept_id, field.label);
            } else if remote {
                let taxonomy = taxonomy_client(&config)?;
                for field in taxonomy.occupation_fields().await {
                    println!("{:<14} {}", field.concept_id, field.label);
                }
            } else if groups {
                let taxonomy = taxonomy_client(&config)?;
                for group in taxonomy.occupation_groups().await {
                    println!("{:<14} {}", group.concept_id, group.label);
                }
            } else {
                for branch in Branch::ALL {
                    println!("{}", branch);
                }
            }
        }

        Command::Counties => {
            for county in SWEDISH_COUNTIES {
                println!("{}  {}", region_code_for_county(county).unwrap_or("--"), county);
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
            log::info!("  Search API:   {}", config.api.search_base_url);
            log::info!("  Taxonomy API: {}", config.api.taxonomy_base_url);
            log::info!("  Saved jobs:   {}", storage.saved_jobs_path().display());
        }
    }

    Ok(())
}

fn search_fetcher(config: &Config, mode: SearchMode) -> Result<JobFetcher<JobSearchClient>> {
    let client = http::create_async_client(&config.api)?;
    let api = JobSearchClient::new(client, &config.api.search_base_url);
    Ok(JobFetcher::new(api, mode))
}

fn taxonomy_client(config: &Config) -> Result<TaxonomyClient> {
    let client = http::create_async_client(&config.api)?;
    Ok(TaxonomyClient::new(client, &config.api.taxonomy_base_url))
}
