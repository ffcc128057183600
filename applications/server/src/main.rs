/// Rollcall Server - fetch generated users into a database and serve them
use clap::{Parser, Subcommand};
use rollcall_server::{config::ServerConfig, create_router, state::AppState};
use std::{net::SocketAddr, path::PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rollcall-server")]
#[command(about = "Fetch generated users into a database and serve them over HTTP", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./config.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Fetch a batch of users from the upstream source and store them
    FetchUsers {
        /// Number of users to fetch
        #[arg(short = 'n', long)]
        count: Option<i64>,
    },
    /// List stored users, newest first
    ListUsers,
    /// Print the number of stored users
    CountUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rollcall_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = ServerConfig::load(cli.config.as_deref())?;
    config.validate()?;

    // Startup fails here if the users table cannot be ensured
    let app_state = AppState::from_config(&config).await?;
    tracing::info!("Database connected");

    match cli.command {
        Commands::Serve => {
            serve(&config, app_state).await?;
        }
        Commands::FetchUsers { count } => {
            let stored = app_state.ingestor.ingest(count).await?;
            println!("Successfully fetched and stored {} users", stored);
        }
        Commands::ListUsers => {
            let users = app_state.store.list().await?;

            println!("Users:");
            for user in users {
                println!(
                    "  {} - {} {} <{}> ({})",
                    user.id,
                    user.first_name,
                    user.last_name,
                    user.email,
                    user.created_at.to_rfc3339()
                );
            }
        }
        Commands::CountUsers => {
            println!("{}", app_state.store.count().await?);
        }
    }

    Ok(())
}

async fn serve(config: &ServerConfig, app_state: AppState) -> anyhow::Result<()> {
    tracing::info!("Starting Rollcall Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let app = create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
