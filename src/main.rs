use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

use listwatch::config::WatchConfig;
use listwatch::store::ProjectStore;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    listwatch::logging::init().context("init logging")?;

    let cli = listwatch::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        listwatch::cli::Command::Watch(args) => {
            let config = WatchConfig::from_watch_args(&args)?;
            let store = ProjectStore::new(&config.db_path);
            store.ensure_schema().context("ensure schema")?;
            listwatch::schedule::run_forever(&config, &store)
                .await
                .context("watch")?;
        }
        listwatch::cli::Command::Once(args) => {
            let config = WatchConfig::from_once_args(&args)?;
            let store = ProjectStore::new(&config.db_path);
            store.ensure_schema().context("ensure schema")?;
            listwatch::pass::run_pass(&config, &store)
                .await
                .context("once")?;
        }
    }

    Ok(())
}
