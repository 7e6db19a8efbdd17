//! Fieldbook - terminal front end for the sales dashboard
//!
//! Browse products, clients and visit reports page by page, search them,
//! and create, edit, deactivate or reactivate records, against the
//! dashboard backend.

use anyhow::Result;
use clap::{Parser, Subcommand};

use fieldbook_core::{
    paths, ApiClientConfig, DashboardError, Database, EntityKind, Preferences, SessionStore,
    StatusFilter,
};

mod commands;
mod render;

use commands::{lists, records, session, AppContext};

/// Fieldbook - sales dashboard client
#[derive(Parser)]
#[command(name = "fieldbook")]
#[command(about = "Terminal client for the Fieldbook sales dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend base URL (overrides config file and FIELDBOOK_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a session token issued by the backend
    Login {
        #[arg(long)]
        token: String,
        #[arg(long)]
        username: String,
        /// super_admin, sales_supervisor or salesman
        #[arg(long, default_value = "salesman")]
        role: String,
        #[arg(long)]
        user_id: Option<i64>,
        #[arg(long)]
        email: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in user and what they may do
    Whoami,

    /// List records page by page
    List {
        /// products, clients or reports
        entity: EntityKind,
        /// active, inactive or all (defaults to the saved filter)
        #[arg(long)]
        status: Option<StatusFilter>,
        #[arg(long)]
        region: Option<String>,
        /// Assigned salesman id
        #[arg(long)]
        salesman: Option<String>,
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
        /// Load every page
        #[arg(long)]
        all: bool,
    },

    /// Search records
    Search { entity: EntityKind, term: String },

    /// Create a record from key=value fields (key:=json for raw JSON)
    Add {
        entity: EntityKind,
        #[arg(required = true)]
        fields: Vec<String>,
    },

    /// Change fields of an existing record
    Edit {
        entity: EntityKind,
        id: i64,
        #[arg(required = true)]
        fields: Vec<String>,
    },

    /// Delete a product or deactivate a client or report
    Deactivate { entity: EntityKind, id: i64 },

    /// Reactivate a client or report
    Reactivate { entity: EntityKind, id: i64 },

    /// Show or change the saved filter of the client or report list
    Filter {
        entity: EntityKind,
        status: Option<StatusFilter>,
        /// Saved region (empty to clear)
        #[arg(long)]
        region: Option<String>,
        /// Saved salesman id (empty to clear)
        #[arg(long)]
        salesman: Option<String>,
        /// Forget the saved filter before applying the other flags
        #[arg(long)]
        reset: bool,
    },
}

/// Log to ~/.fieldbook/logs so stdout stays clean for output
fn init_logging(verbose: bool) {
    let log_dir = paths::logs_dir();
    std::fs::create_dir_all(&log_dir).ok();

    let log_file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join(fieldbook_core::constants::app::LOG_FILE_NAME))
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Logging disabled: {}", e);
            return;
        }
    };

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
}

fn open_preferences() -> Option<Preferences> {
    match Database::open_default() {
        Ok(db) => Some(Preferences::new(db)),
        Err(e) => {
            tracing::warn!("Preferences unavailable: {}", e);
            None
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let store = SessionStore::load()?;

    let mut config = ApiClientConfig::load()?;
    if let Some(url) = cli.api_url {
        config = config.with_base_url(url);
    }
    tracing::info!("Using backend {}", config.base_url);
    let ctx = AppContext::new(config, store);

    match cli.command {
        Commands::Login {
            token,
            username,
            role,
            user_id,
            email,
        } => session::login(
            &ctx.session,
            session::LoginArgs {
                token,
                username,
                role,
                user_id,
                email,
            },
        ),
        Commands::Logout => session::logout(&ctx.session),
        Commands::Whoami => session::whoami(&ctx.session),
        Commands::List {
            entity,
            status,
            region,
            salesman,
            pages,
            all,
        } => {
            let prefs = open_preferences();
            let args = lists::ListArgs {
                kind: entity,
                status,
                region,
                salesman,
                pages,
                all,
            };
            lists::list(&ctx, prefs.as_ref(), args).await
        }
        Commands::Search { entity, term } => lists::search(&ctx, entity, &term).await,
        Commands::Add { entity, fields } => records::add(&ctx, entity, &fields).await,
        Commands::Edit { entity, id, fields } => records::edit(&ctx, entity, id, &fields).await,
        Commands::Deactivate { entity, id } => records::deactivate(&ctx, entity, id).await,
        Commands::Reactivate { entity, id } => records::reactivate(&ctx, entity, id).await,
        Commands::Filter {
            entity,
            status,
            region,
            salesman,
            reset,
        } => {
            let prefs = Preferences::new(Database::open_default()?);
            let args = lists::FilterArgs {
                status,
                region,
                salesman,
                reset,
            };
            lists::filter(&prefs, entity, args)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => Ok(()),
        Err(e) => match e.downcast_ref::<DashboardError>() {
            Some(err) if err.is_auth() => {
                tracing::warn!("Session expired: {}", err);
                eprintln!("Session expired, please log in again (fieldbook login).");
                std::process::exit(1);
            }
            Some(DashboardError::Validation(message)) => {
                eprintln!("{}", message);
                std::process::exit(2);
            }
            _ => Err(e),
        },
    }
}
