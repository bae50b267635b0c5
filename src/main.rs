//! fc-devices CLI
//!
//! Entry point for the `fc-devices` command-line tool.

use clap::{Parser, Subcommand};
use fc_devices::device::effective_settings;
use fc_devices::settings::caller_layer;
use fc_devices::{set_up_with, Device, Layer, SettingsError};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fc-devices")]
#[command(about = "Printer device profiles and start/end procedures", version)]
struct Cli {
    /// Log merge and assembly details to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct OverrideArgs {
    /// Override a setting (repeatable), e.g. --set nozzle_temp=205
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,

    /// Flat TOML file of overrides, applied before --set values
    #[arg(long, short = 'o')]
    overrides: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List known device profiles
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Build the settings record for a device
    Setup {
        /// Device profile name
        device: Device,

        #[command(flatten)]
        overrides: OverrideArgs,

        /// Output a step listing instead of JSON
        #[arg(long)]
        human: bool,
    },

    /// Show where each effective setting comes from
    Explain {
        /// Device profile name
        device: Device,

        #[command(flatten)]
        overrides: OverrideArgs,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::List { json } => run_list(json),
        Commands::Setup {
            device,
            overrides,
            human,
        } => run_setup(device, &overrides, human),
        Commands::Explain {
            device,
            overrides,
            json,
        } => run_explain(device, &overrides, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// File overrides first, then `--set` pairs on top, as one user layer.
fn user_layer(args: &OverrideArgs) -> Result<Layer, SettingsError> {
    caller_layer(args.overrides.as_deref(), &args.set)
}

fn run_list(json: bool) -> Result<(), CliError> {
    if json {
        let profiles: Vec<serde_json::Value> = Device::all()
            .iter()
            .map(|d| {
                let profile = d.profile();
                serde_json::json!({
                    "name": profile.name(),
                    "description": profile.description(),
                    "overrides": profile.overrides(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&profiles)?);
        return Ok(());
    }

    for device in Device::all() {
        let profile = device.profile();
        println!("{}", profile.name());
        println!("  {}", profile.description());
        for (key, value) in profile.overrides().iter() {
            println!("  {} = {}", key, value);
        }
    }
    Ok(())
}

fn run_setup(device: Device, args: &OverrideArgs, human: bool) -> Result<(), CliError> {
    let record = set_up_with(device.profile(), user_layer(args)?)?;

    if human {
        print!("{}", record.to_human());
    } else {
        println!("{}", record.to_json()?);
    }
    Ok(())
}

fn run_explain(device: Device, args: &OverrideArgs, json: bool) -> Result<(), CliError> {
    let effective = effective_settings(device.profile(), user_layer(args)?);

    if json {
        println!("{}", effective.to_json()?);
        return Ok(());
    }

    println!("Device: {}", device);
    for source in &effective.sources {
        match (&source.path, &source.digest) {
            (Some(path), Some(digest)) => {
                println!("  layer {:?}: {} (sha256 {})", source.origin, path, digest)
            }
            _ => println!("  layer {:?}", source.origin),
        }
    }
    println!();

    for (key, value) in effective.values.iter() {
        let origin = effective
            .origin_of(key)
            .map(|o| format!("{:?}", o).to_lowercase())
            .unwrap_or_default();
        let marker = if effective.explicit.contains(key) { "*" } else { " " };
        println!("{} {:<24} {:<20} {}", marker, key, value.to_string(), origin);
    }

    if !effective.explicit.is_empty() {
        println!();
        println!("* set explicitly by caller");
    }
    Ok(())
}
