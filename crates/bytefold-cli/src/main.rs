use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "bytefold")]
#[command(about = "Constant folder and propagator for stack-based bytecode")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimize a textual class file.
    Opt {
        #[arg(help = "Input class assembly file")]
        input: PathBuf,

        #[arg(short, long, help = "Output class assembly file")]
        output: PathBuf,

        #[arg(long, help = "Write a JSON report of what the optimizer did")]
        stats: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Opt {
            input,
            output,
            stats,
        } => {
            let source = fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;

            let mut class = bytefold::parse_class(&source)
                .with_context(|| format!("Failed to parse {}", input.display()))?;
            let report = bytefold::optimize_class(&mut class).context("Optimization failed")?;
            let printed = bytefold::print_class(&class);

            fs::write(&output, &printed)
                .with_context(|| format!("Failed to write output to {}", output.display()))?;

            if let Some(stats_path) = stats {
                let json = serde_json::json!({
                    "tool": format!("bytefold {VERSION}"),
                    "class": class.name,
                    "changed": report.changed(),
                    "sweeps": report.sweeps,
                    "commits": report.commits,
                    "passes": {
                        "simple_fold": report.simple_changes,
                        "constant_variables": report.const_var_changes,
                        "dynamic": report.dynamic_changes,
                    },
                });
                fs::write(&stats_path, serde_json::to_string_pretty(&json)?)
                    .with_context(|| format!("Failed to write stats to {}", stats_path.display()))?;
            }

            println!(
                "Optimized {} -> {} ({} sweeps, {} methods committed)",
                input.display(),
                output.display(),
                report.sweeps,
                report.commits
            );
        }
    }

    Ok(())
}
