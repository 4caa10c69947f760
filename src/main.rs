use actindex::manager::Manager;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    /// Directory holding `config.toml` and the recordings.
    #[arg(long)]
    study_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score every recording and write its report to `results/`.
    Analyze,

    /// Remove the `results/` directory.
    Clean,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let mgr = Manager::new(args.study_dir).context("failed to construct mgr")?;

    match args.command {
        Command::Analyze => mgr.analyze_study()?,
        Command::Clean => mgr.clean_study()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn subcommands_are_documented() {
        CLI::command().debug_assert();
        for name in ["analyze", "clean"] {
            let about = CLI::command()
                .find_subcommand(name)
                .and_then(|cmd| cmd.get_about().map(|about| about.to_string()));
            assert!(about.is_some_and(|about| !about.is_empty()), "{name} has no about");
        }
    }

    #[test]
    fn parses_study_dir() {
        let args = CLI::try_parse_from(["actindex", "--study-dir", "study", "clean"]).unwrap();
        assert_eq!(args.study_dir, PathBuf::from("study"));
        assert!(matches!(args.command, Command::Clean));
    }
}
