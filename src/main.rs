use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use marketsearch::config::{get_config_path, AppConfig};
use marketsearch::entity::{BusinessSearch, ListingSearch, SearchAdapter, UserSearch};
use marketsearch::output;
use marketsearch::query::{tokenize, FilterSpec, SearchExecutor, SearchRequest};
use marketsearch::store::MemoryStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;
use std::path::PathBuf;
use termcolor::ColorChoice;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "marketsearch")]
#[command(about = "Search marketplace users, businesses and sale listings")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Search users by name or nickname
    Users(SearchArgs),
    /// Search businesses by name
    Businesses {
        #[command(flatten)]
        search: SearchArgs,

        /// Only businesses of this type
        #[arg(long)]
        business_type: Option<String>,
    },
    /// Search sale listings by seller, product or location
    Listings {
        #[command(flatten)]
        search: SearchArgs,

        #[command(flatten)]
        filters: ListingFilterArgs,
    },
    /// Show how a query is split into tokens
    Tokens {
        #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
        color: ColorMode,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,
    },
    /// Manage persisted defaults
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// JSON file holding an array of records
    #[arg(short, long)]
    data: PathBuf,

    /// Search query; wrap a phrase in double quotes to match it exactly
    query: Vec<String>,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    page: i64,

    /// Results per page (default from config)
    #[arg(long, allow_negative_numbers = true)]
    per_page: Option<i64>,

    /// Column to sort by (default: created)
    #[arg(long)]
    sort_by: Option<String>,

    /// Sort direction: asc or desc (default from config)
    #[arg(long)]
    order_by: Option<String>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,
}

#[derive(Args)]
struct ListingFilterArgs {
    /// Only listings from businesses of this type
    #[arg(long)]
    business_type: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    min_price: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    max_price: Option<f64>,

    /// Earliest closing date (YYYY-MM-DD)
    #[arg(long)]
    earliest_closing: Option<String>,

    /// Latest closing date (YYYY-MM-DD)
    #[arg(long)]
    latest_closing: Option<String>,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration if none exists
    Init,
    /// Print the config file location
    Path,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn choice(self, config: &AppConfig) -> ColorChoice {
        match self {
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
            ColorMode::Auto if config.color => ColorChoice::Auto,
            ColorMode::Auto => ColorChoice::Never,
        }
    }
}

impl SearchArgs {
    fn request(&self, filters: FilterSpec, config: &AppConfig) -> SearchRequest {
        let mut request = SearchRequest::new(self.query.join(" "))
            .page(self.page)
            .per_page(self.per_page.unwrap_or(config.default_per_page))
            .order_by(self.order_by.clone().unwrap_or_else(|| config.default_order.clone()))
            .filters(filters);
        if let Some(column) = &self.sort_by {
            request = request.sort_by(column.clone());
        }
        request
    }
}

impl ListingFilterArgs {
    fn to_spec(&self) -> Result<FilterSpec> {
        let date = |value: &Option<String>| -> Result<_> {
            match value {
                Some(value) => Ok(FilterSpec::parse_date(value)?),
                None => Ok(None),
            }
        };

        Ok(FilterSpec {
            business_type: self.business_type.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            earliest_closing_date: date(&self.earliest_closing)?,
            latest_closing_date: date(&self.latest_closing)?,
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Users(search) => {
            let config = AppConfig::load()?;
            run_search(UserSearch, &search, FilterSpec::default(), &config)?;
        }
        Commands::Businesses { search, business_type } => {
            let config = AppConfig::load()?;
            let filters = FilterSpec {
                business_type,
                ..FilterSpec::default()
            };
            run_search(BusinessSearch, &search, filters, &config)?;
        }
        Commands::Listings { search, filters } => {
            let config = AppConfig::load()?;
            run_search(ListingSearch, &search, filters.to_spec()?, &config)?;
        }
        Commands::Tokens { query, color } => {
            let config = AppConfig::load()?;
            output::print_tokens(&tokenize(&query.join(" ")), color.choice(&config))?;
        }
        Commands::Config { action } => handle_config_command(action)?,
    }

    Ok(())
}

/// RUST_LOG overrides; otherwise warnings only, raised by -v
fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "marketsearch=warn",
            1 => "marketsearch=debug",
            _ => "marketsearch=trace",
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_search<A>(adapter: A, args: &SearchArgs, filters: FilterSpec, config: &AppConfig) -> Result<()>
where
    A: SearchAdapter,
    A::Record: DeserializeOwned + Serialize + Display,
{
    let store = MemoryStore::from_json_file(adapter, &args.data)?;
    let request = args.request(filters, config);

    let executor = SearchExecutor::new(store.adapter(), &store);
    let result = executor
        .execute(&request)
        .with_context(|| format!("{} search failed", store.adapter().name()))?;

    if args.json {
        output::print_json(&result)?;
    } else {
        output::print_result(&result, args.color.choice(config))?;
    }
    Ok(())
}

fn handle_config_command(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = AppConfig::load()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Init => {
            let path = get_config_path()?;
            if path.exists() {
                println!("Config already exists: {}", path.display());
            } else {
                let path = AppConfig::default().save()?;
                println!("Wrote default config: {}", path.display());
            }
        }
        ConfigAction::Path => {
            println!("{}", get_config_path()?.display());
        }
    }
    Ok(())
}
