// ===== greenwave/src/main.rs =====
use clap::{Parser, Subcommand};
use greenwave::config::OptimizerConfig;
use greenwave::error::GreenwaveError;
use std::process;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Optional JSON file holding a full OptimizerConfig; replaces the
    /// individual tuning flags when present.
    #[arg(global = true, long)]
    params: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Optimize(cmd::optimize::OptimizeArgs),
    Batch(cmd::batch::BatchArgs),
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    println!("\n🚦 Greenwave Signal Optimizer");

    let params = cli.params.as_deref().map(load_params);

    let result = match cli.command {
        Commands::Optimize(mut args) => {
            if let Some(config) = params {
                args.config = config;
            }
            cmd::optimize::run(args)
        }
        Commands::Batch(mut args) => {
            if let Some(config) = params {
                args.config = config;
            }
            cmd::batch::run(args)
        }
    };

    if let Err(e) = result {
        fail(e);
    }
}

fn load_params(path: &str) -> OptimizerConfig {
    match OptimizerConfig::load_from_file(path) {
        Ok(config) => {
            println!("⚖️  Loaded parameters from: {}", path);
            config
        }
        Err(e) => {
            eprintln!("❌ Failed to load parameters from '{}': {}", path, e);
            process::exit(1);
        }
    }
}

fn fail(e: GreenwaveError) -> ! {
    eprintln!("❌ {}", e);
    process::exit(1);
}
