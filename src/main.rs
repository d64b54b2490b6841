use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use spacectl::app::{App, Services};
use spacectl::indexer::{ExternalIndexer, Indexer};
use spacectl::model::ClientConfig;
use spacectl::remote::RemoteClient;
use spacectl::store::{self, FileSessionStore};

mod cli_exec;

#[derive(Parser)]
#[command(name = "spacectl")]
#[command(about = "Manage remote spaces and index files into them", long_about = None)]
struct Cli {
    /// Directory holding session.json and config.json (defaults to ~/.spacectl)
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and remember the session
    Login {
        /// Server host, host:port, or URL (defaults to the last one used)
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        username: String,
        /// Password (falls back to $SPACECTL_PASSWORD)
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the stored token
    Logout {
        /// Also tell the server to end the session
        #[arg(long)]
        remote: bool,
    },

    /// Show the stored session
    Status {
        #[arg(long)]
        json: bool,
    },

    /// Create an account on the server
    Register {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: Option<String>,
    },

    /// Space management
    Spaces {
        #[command(subcommand)]
        command: SpaceCommands,
    },

    /// Stage tagged files and hand them to the indexer
    Update {
        /// Target space (defaults to the first uninitialized one)
        #[arg(long)]
        space: Option<String>,
        /// File to index, optionally suffixed with `:<tag>` (tag defaults to 0)
        #[arg(long = "file", required = true)]
        files: Vec<String>,
        /// Indexer program (overrides config.json)
        #[arg(long)]
        indexer: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum SpaceCommands {
    /// List spaces
    List {
        /// Only spaces that have not been indexed yet
        #[arg(long)]
        uninitialized: bool,
        #[arg(long)]
        json: bool,
    },
    /// Create a space
    Create { name: String },
    /// Delete one or more spaces
    Delete {
        #[arg(required = true)]
        names: Vec<String>,
    },
}

fn main() {
    spacectl::logging::init("warn");
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let state_dir = cli.state_dir.unwrap_or_else(default_state_dir);
    let cfg = store::read_config(&state_dir)?;

    let indexer_override = match &cli.command {
        Commands::Update { indexer, .. } => indexer.clone(),
        _ => None,
    };
    let app = build_app(&state_dir, &cfg, indexer_override)?;

    match cli.command {
        Commands::Login {
            host,
            username,
            password,
        } => cli_exec::handle_login_command(&app, host, &username, password),
        Commands::Logout { remote } => cli_exec::handle_logout_command(&app, remote),
        Commands::Status { json } => cli_exec::handle_status_command(&app, json),
        Commands::Register {
            host,
            username,
            password,
        } => cli_exec::handle_register_command(&app, host, &username, password),
        Commands::Spaces { command } => match command {
            SpaceCommands::List {
                uninitialized,
                json,
            } => cli_exec::handle_list_command(&app, uninitialized, json),
            SpaceCommands::Create { name } => cli_exec::handle_create_command(&app, &name),
            SpaceCommands::Delete { names } => cli_exec::handle_delete_command(&app, &names),
        },
        Commands::Update { space, files, .. } => {
            cli_exec::handle_update_command(&app, space.as_deref(), &files)
        }
    }
}

fn default_state_dir() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".spacectl"),
        None => std::env::temp_dir().join("spacectl"),
    }
}

fn build_app(
    state_dir: &std::path::Path,
    cfg: &ClientConfig,
    indexer_override: Option<PathBuf>,
) -> Result<App> {
    let store = FileSessionStore::open(state_dir).context("open session store")?;
    let api = RemoteClient::with_default_port(cfg.default_port)?;
    let staging_dir = cfg
        .staging_dir
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("spacectl-staging"));
    let indexer: Arc<dyn Indexer> = match indexer_override.or_else(|| cfg.indexer_program.clone())
    {
        Some(program) => Arc::new(ExternalIndexer::new(program)),
        None => Arc::new(cli_exec::MissingIndexer),
    };

    Ok(App::new(Services {
        store: Arc::new(store),
        api: Arc::new(api),
        indexer,
        staging_dir,
    }))
}
