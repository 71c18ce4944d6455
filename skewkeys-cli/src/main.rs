use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use schemars::schema_for;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skewkeys_cli::config::ProfileConfig;
use skewkeys_cli::generate::run_generation;
use skewkeys_cli::inspect::{inspect_files, DEFAULT_BINS};
use skewkeys_cli::output;

/// Skewkeys: uniform and skewed key files for key-value benchmarks
///
/// Generation is driven by a TOML profile. Without one, the built-in defaults
/// are used (1024 distinct keys, 4096 operations, skew-normal with skewness 2.0).
///
/// Example usage:
///   skewkeys generate
///   skewkeys generate -P profiles/skew-normal.toml --set experiment.seed=7
///   skewkeys generate --set skew.family=zipfian --set keys.skewness=0.99
///   skewkeys inspect skewed_keys.txt --domain-size 1024
///   skewkeys inspect random_keys.txt skewed_keys.txt --report inspect.json
///   skewkeys completions bash > ~/.local/share/bash-completion/completions/skewkeys
#[derive(Parser)]
#[command(name = "skewkeys")]
#[command(version, about = "Uniform and skewed benchmark key generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the uniform and the skewed key files
    Generate {
        /// Path to TOML profile (defaults apply when omitted)
        #[arg(short = 'P', long)]
        profile: Option<PathBuf>,

        /// Override any configuration value using dot notation (can be specified multiple times)
        ///
        /// Examples:
        ///   --set keys.number_of_distinct_keys=65536
        ///   --set keys.nops=100000
        ///   --set keys.skewness=4.0
        ///   --set skew.family=zipfian
        ///   --set skew.center_fraction=0.5
        ///   --set skew.sampling=quantile
        ///   --set experiment.seed=999
        ///   --set output.report=report.json
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },

    /// Print frequency statistics and histograms of key files
    ///
    /// Several files share one domain and are drawn in one combined histogram.
    Inspect {
        /// Key files to analyze
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Domain size (defaults to the largest key + 1 across all files)
        #[arg(short = 'n', long)]
        domain_size: Option<u64>,

        /// Number of histogram bins
        #[arg(short, long, default_value_t = DEFAULT_BINS)]
        bins: usize,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Also write the JSON report to this file
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for profile files
    Schema,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match cli.command {
        Commands::Generate { profile, set } => run_generate(profile, set),
        Commands::Inspect { files, domain_size, bins, json, report } => {
            let reports = inspect_files(&files, domain_size, bins)?;
            if json {
                println!("{}", output::to_json(&reports)?);
            } else if let [single] = reports.as_slice() {
                single.print_human();
            } else {
                output::print_comparison(&reports);
            }
            if let Some(path) = report {
                output::write_json(&reports, &path)?;
            }
            Ok(())
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "skewkeys", &mut io::stdout());
            Ok(())
        }
        Commands::Schema => {
            let schema = schema_for!(ProfileConfig);
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(())
        }
    }
}

fn run_generate(profile: Option<PathBuf>, set: Vec<String>) -> anyhow::Result<()> {
    match &profile {
        Some(path) => tracing::info!("Loading profile: {}", path.display()),
        None => tracing::info!("No profile given, using defaults"),
    }

    let config = ProfileConfig::load(profile.as_deref(), &set)?;

    tracing::info!("=== Generation Configuration ===");
    tracing::info!("Name: {}", config.experiment.name);
    if let Some(desc) = &config.experiment.description {
        tracing::info!("Description: {}", desc);
    }
    if let Some(seed) = config.experiment.seed {
        tracing::info!("Seed: {} (reproducible mode)", seed);
    }
    tracing::info!(
        "Keys: {} ops over {} distinct keys",
        config.keys.nops,
        config.keys.number_of_distinct_keys
    );
    tracing::info!(
        "Skew: {} centered at {:.2}, {} sampling (skewness {})",
        config.skew.family.name(),
        config.skew.center(config.keys.number_of_distinct_keys),
        config.skew.sampling.name(),
        config.keys.skewness
    );
    tracing::info!("================================");

    let report = run_generation(&config)?;
    report.print_human();

    if let Some(path) = &config.output.report {
        report.write_json(path)?;
    }

    Ok(())
}
