#[macro_use]
extern crate tracing;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::prelude::*;
use vesyncapi::ClientConfig;

mod devices;
mod login;

#[derive(Parser)]
#[clap(author, version, about)]
struct Args {
    #[clap(short, long, action, global = true)]
    verbose: bool,
    #[clap(short, long, global = true, help = "json file with client settings")]
    config: Option<PathBuf>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log into the VeSync cloud and print the session token.
    Login(login::LoginArgs),
    /// List the device models this client knows about.
    Devices(devices::DevicesArgs),
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let args = Args::parse();

    let log_level = if args.verbose {
        "info,vesyncapi=trace,vesyncctrl=debug,reqwest=debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::builder().parse_lossy(log_level))
        .with(tracing_forest::ForestLayer::default())
        .init();

    let config = match args.config {
        Some(path) => read_config(&path)?,
        None => ClientConfig::default(),
    };

    match args.command {
        Command::Login(login_args) => login::login(config, login_args),
        Command::Devices(devices_args) => devices::devices(devices_args),
    }
}

fn read_config(path: &Path) -> Result<ClientConfig> {
    debug!("reading client config from {path:?}");
    let file = std::fs::File::open(path)?;
    let config = serde_json::from_reader(std::io::BufReader::new(file))?;
    Ok(config)
}
