//! container-hosts entry point.

use std::io;

use clap::Parser;
use log::{debug, info};

mod cli;
mod config;
mod custom_list;
mod enumerate;
mod error;
mod host;
mod report;
mod runtime;
mod types;

use cli::Cli;
use config::Config;
use custom_list::{CustomListSync, RunContext};
use enumerate::Enumerator;
use host::HostnameCommand;
use runtime::DockerRuntime;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli).await {
        debug!("Run aborted: {:?}", e);
        eprintln!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> error::Result<()> {
    let cfg = Config::load(cli)?;
    // One timestamp names every artifact of this run.
    let ctx = RunContext::starting_now(&cfg.output_dir);
    info!("Starting container-hosts with config: {:?}", cfg);

    let runtime = DockerRuntime::connect()?;
    let sync = cfg
        .pihole
        .as_deref()
        .map(|name| CustomListSync::new(&runtime, name, cfg.custom_list_path.as_str()));

    let mut stdout = io::stdout().lock();
    let summary = Enumerator::new(&runtime, &HostnameCommand::default())
        .run(&ctx, sync.as_ref(), &mut stdout)
        .await?;
    info!(
        "Reported {} containers, added {} custom.list entries",
        summary.reported, summary.appended
    );
    Ok(())
}
