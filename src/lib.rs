//! Traincfg - training-run configuration loader and validator.
//!
//! Loads the declarative TOML configuration of an image-compression trainer,
//! validates every field against its documented domain, resolves the
//! `<autoindex>` run-directory placeholder, and checks dotted factory
//! references against the built-in registries.

#![warn(missing_docs)]
#![allow(clippy::print_stdout)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod registry;
pub mod rundir;

use clap::Parser;
use cli::{Cli, Command, LoadArgs, ShowFormat};
use config::{RootConfig, Strictness, load_config_file_with, to_toml_string};
use rundir::{FsProbe, RundirTemplate};
use std::path::Path;
use tracing::{debug, info};

pub use error::{Error, Result};

/// Main entry point for the traincfg CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    handle_command(cli.command)
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn handle_command(command: Command) -> Result<()> {
    match command {
        Command::Validate { load } => handle_validate(&load),
        Command::Show { load, format } => handle_show(&load, format),
        Command::Rundir {
            load,
            runs_root,
            create,
        } => handle_rundir(&load, &runs_root, create),
        Command::Registry => {
            handle_registry();
            Ok(())
        }
    }
}

fn load_config(load: &LoadArgs) -> Result<RootConfig> {
    let strictness = if load.strict {
        Strictness::Strict
    } else {
        Strictness::Lenient
    };
    debug!(
        config = %load.config.display(),
        ?strictness,
        overrides = load.overrides.len(),
        "loading configuration"
    );
    load_config_file_with(&load.config, strictness, &load.overrides)
}

fn handle_validate(load: &LoadArgs) -> Result<()> {
    let config = load_config(load)?;
    registry::validate_references(&config, &registry::builtin())?;
    info!(
        model = %config.model_path,
        optimizer = %config.train.optimizer,
        epochs = config.train.epochs,
        "configuration is valid"
    );
    println!("ok: {}", load.config.display());
    Ok(())
}

fn handle_show(load: &LoadArgs, format: ShowFormat) -> Result<()> {
    let config = load_config(load)?;
    let rendered = match format {
        ShowFormat::Toml => to_toml_string(&config)?,
        ShowFormat::Json => {
            serde_json::to_string_pretty(&config).map_err(|e| Error::JsonSerialize { source: e })?
        }
    };
    println!("{rendered}");
    Ok(())
}

fn handle_rundir(load: &LoadArgs, runs_root: &Path, create: bool) -> Result<()> {
    let config = load_config(load)?;
    let template = RundirTemplate::new(&config.train.rundir_name);
    debug!(
        template = template.raw(),
        runs_root = %runs_root.display(),
        "resolving run directory"
    );

    let path = if create {
        let path = template.create(runs_root)?;
        info!(path = %path.display(), "created run directory");
        path
    } else {
        template.resolve(runs_root, &FsProbe)?
    };

    println!("{}", path.display());
    Ok(())
}

fn handle_registry() {
    let registries = registry::builtin();

    println!("Models:");
    for (key, spec) in registries.models.iter() {
        println!("  {key} - {}", spec.description);
    }

    println!();
    println!("Datasets:");
    for (key, spec) in registries.datasets.iter() {
        println!("  {key} - {}", spec.description);
    }

    println!();
    println!("Optimizers:");
    for (key, spec) in registries.optimizers.iter() {
        println!("  {key} - {}", spec.description);
    }
}
