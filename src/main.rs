mod cli;
mod error;

use crate::cli::{Cli, Command};
use crate::error::{ErrorKind, Result};
use clap::Parser;
use exn::{OptionExt, ResultExt};
use lantern_catalog::{Database, Repository};
use lantern_config::Config;
use lantern_public::{AppState, ChannelParams, Reply, StaticIdentity, router};
use serde::Serialize;
use std::io::Write;
use std::net::SocketAddr;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:?}");
            ExitCode::from(err.exit_code())
        },
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    if let Some(database) = cli.database {
        config.database.path = database;
    }
    init_tracing(&config.log.filter);
    tracing::debug!(?config, "Loaded configuration");

    let db = Database::connect(&config.database.path).await.or_raise(|| ErrorKind::Catalog)?;
    let result = dispatch(cli.command, Repository::from(&db), &config).await;
    db.close().await;
    result
}

async fn dispatch(command: Command, repo: Repository, config: &Config) -> Result<()> {
    match command {
        Command::Serve { bind } => serve(repo, config, bind.unwrap_or(config.server.bind)).await,
        Command::Channels { keyword, language, lookup, protocol } => {
            let params = ChannelParams { keyword, language };
            let reply = match lookup {
                Some(identifier) => lantern_public::lookup_channel(&repo, &protocol, &identifier, &params).await,
                None => lantern_public::list_channels(&repo, &protocol, &params).await,
            };
            print_reply(reply.or_raise(|| ErrorKind::Query)?)
        },
        Command::Checksums { channel_id, protocol } => {
            let reply = lantern_public::file_checksums(&repo, &protocol, &channel_id).await;
            print_reply(reply.or_raise(|| ErrorKind::Query)?)
        },
    }
}

/// Logs go to stderr so that command output on stdout stays valid JSON.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

async fn serve(repo: Repository, config: &Config, bind: SocketAddr) -> Result<()> {
    let identity = StaticIdentity::resolve(config.instance.id.clone(), config.instance.device_name.clone());
    let app = router(AppState::new(repo, identity));
    let listener = tokio::net::TcpListener::bind(bind).await.or_raise(|| ErrorKind::Server)?;
    tracing::info!(address = %bind, database = %config.database.path.display(), "Serving public API");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .or_raise(|| ErrorKind::Server)?;
    tracing::info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "Could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

fn print_reply<T: Serialize>(reply: Reply<T>) -> Result<()> {
    let value = reply.into_found().ok_or_raise(|| ErrorKind::NotFound)?;
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &value).or_raise(|| ErrorKind::Output)?;
    writeln!(stdout).or_raise(|| ErrorKind::Output)
}
