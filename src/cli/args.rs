//! CLI argument definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Loader and validator for image-compression training-run configurations.
#[derive(Debug, Parser)]
#[command(name = crate::constants::APP_NAME)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Suppress informational output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load a configuration and report whether it is valid.
    Validate {
        /// Common loading options.
        #[command(flatten)]
        load: LoadArgs,
    },
    /// Load a configuration and print it back out.
    Show {
        /// Common loading options.
        #[command(flatten)]
        load: LoadArgs,

        /// Output format.
        #[arg(long, value_enum, default_value_t = ShowFormat::Toml)]
        format: ShowFormat,
    },
    /// Resolve the `<autoindex>` run-directory template.
    Rundir {
        /// Common loading options.
        #[command(flatten)]
        load: LoadArgs,

        /// Root directory under which run directories live.
        #[arg(long, default_value = crate::constants::DEFAULT_RUNS_ROOT, env = "TRAINCFG_RUNS_ROOT")]
        runs_root: PathBuf,

        /// Create the resolved directory instead of only printing it.
        #[arg(long)]
        create: bool,
    },
    /// List the registered model, dataset, and optimizer keys.
    Registry,
}

/// Options shared by every configuration-loading subcommand.
#[derive(Debug, Args)]
pub struct LoadArgs {
    /// Path to the configuration file.
    pub config: PathBuf,

    /// Fail on keys outside the recognized schema.
    #[arg(long, env = "TRAINCFG_STRICT")]
    pub strict: bool,

    /// Override a field before validation (e.g. `train.learning_rate=0.01`).
    /// May be given multiple times.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,
}

/// Output formats for `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShowFormat {
    /// Pretty-printed TOML.
    Toml,
    /// JSON.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_command_name_matches_app_name() {
        assert_eq!(Cli::command().get_name(), crate::constants::APP_NAME);
    }

    #[test]
    fn test_parse_validate_with_overrides() {
        let cli = Cli::parse_from([
            "traincfg",
            "validate",
            "config.toml",
            "--strict",
            "--set",
            "train.epochs=5",
            "--set",
            "train.batch_size=2",
        ]);
        match cli.command {
            Command::Validate { load } => {
                assert!(load.strict);
                assert_eq!(load.overrides.len(), 2);
                assert_eq!(load.config, PathBuf::from("config.toml"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rundir_defaults() {
        let cli = Cli::parse_from(["traincfg", "rundir", "config.toml"]);
        match cli.command {
            Command::Rundir {
                runs_root, create, ..
            } => {
                assert_eq!(runs_root, PathBuf::from("runs"));
                assert!(!create);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
