//! `lexflow` command line
//!
//! Lists the wizard steps and replays scripted sessions against a fresh
//! wizard. Logs go to stderr; stdout carries only results.

mod replay;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, Command};
use lexflow_wizard::{WizardConfig, STEP_CONFIGS};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("lexflow")
        .version(lexflow_wizard::VERSION)
        .about("Case template wizard engine")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("steps")
                .about("List the wizard steps")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("replay")
                .about("Replay a JSON list of wizard actions")
                .arg(
                    Arg::new("script")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Path to the action script"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("Wizard configuration (TOML)"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print one JSON outcome per line"),
                ),
        )
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lexflow=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_steps(json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(&STEP_CONFIGS).context("serializing steps")?;
        println!("{out}");
        return Ok(());
    }
    for config in &STEP_CONFIGS {
        println!("{}. {} [{}]", config.number, config.title, config.id);
        println!("   {}", config.description);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("steps", args)) => print_steps(args.get_flag("json")),
        Some(("replay", args)) => {
            let script = args
                .get_one::<PathBuf>("script")
                .context("missing script path")?;
            let config = match args.get_one::<PathBuf>("config") {
                Some(path) => WizardConfig::load(path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => WizardConfig::default(),
            };
            let actions = replay::load_script(script)?;
            let summary = replay::run(config, actions, args.get_flag("json")).await?;
            if !summary.submitted {
                tracing::warn!("Script ended without creating a template");
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn replay_parses_config_flag() {
        let matches = cli()
            .try_get_matches_from(["lexflow", "replay", "session.json", "--config", "wizard.toml"])
            .unwrap();
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "replay");
        assert_eq!(
            args.get_one::<PathBuf>("config").unwrap(),
            &PathBuf::from("wizard.toml")
        );
        assert!(!args.get_flag("json"));
    }
}
