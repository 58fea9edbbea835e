//! drone-gcf binary — Drone CI plugin for Google Cloud Functions.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "drone-gcf",
    version,
    about = "Drone CI plugin that deploys Google Cloud Functions through the gcloud CLI"
)]
struct Cli {}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Configuration comes from PLUGIN_* environment variables; argument
    // parsing only serves --version and --help.
    let _cli = Cli::parse();

    log::info!("drone-gcf plugin version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = drone_gcf::cli::run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
