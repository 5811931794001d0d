//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use postboard_app::{AppRuntime, AppState, UiEvent};
use postboard_core::api::{ApiClient, PostId};
use postboard_core::config;
use postboard_core::credentials::TokenStore;

use crate::logging;

mod commands;

#[derive(Parser)]
#[command(name = "postboard")]
#[command(version)]
#[command(about = "Read and publish posts on a Postboard backend")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,
        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored session token
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Read and manage posts
    Posts {
        #[command(subcommand)]
        command: PostCommands,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum PostCommands {
    /// List all posts
    List,
    /// Publish a new post
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        /// Image URL
        #[arg(long)]
        image: String,
    },
    /// Delete a post by id
    Delete {
        #[arg(value_name = "POST_ID")]
        id: PostId,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = config::Config::load().context("load config")?;
    let _log_guard = logging::init(&config.log)?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli, config).await })
}

async fn dispatch(cli: Cli, config: config::Config) -> Result<()> {
    match cli.command {
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
        Commands::Logout => {
            commands::auth::logout();
            Ok(())
        }
        Commands::Login { email, password } => {
            let mut app = start(&config).await?;
            commands::auth::login(&mut app, &email, password).await
        }
        Commands::Register {
            name,
            email,
            password,
        } => {
            let mut app = start(&config).await?;
            commands::auth::register(&mut app, &name, &email, password).await
        }
        Commands::Whoami => {
            let app = start(&config).await?;
            commands::auth::whoami(&app);
            Ok(())
        }
        Commands::Posts { command } => {
            let mut app = start(&config).await?;
            match command {
                PostCommands::List => commands::posts::list(&mut app),
                PostCommands::Create { title, body, image } => {
                    commands::posts::create(&mut app, &title, &body, &image).await
                }
                PostCommands::Delete { id } => commands::posts::delete(&mut app, id).await,
            }
        }
    }
}

/// Builds the runtime against the configured backend and runs startup
/// (session restore + feed load) to completion.
async fn start(config: &config::Config) -> Result<AppRuntime> {
    let base_url = config.effective_base_url()?;
    tracing::debug!(%base_url, "using backend");

    let state = AppState::new(TokenStore::open_default());
    let mut app = AppRuntime::new(state, ApiClient::new(base_url));
    app.run(UiEvent::Startup).await;
    Ok(app)
}
