mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skyweave")]
#[command(about = "Declare Azure infrastructure and preview it offline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the static website stack against the mock engine
    Preview {
        /// Stack file (defaults to Skyweave.<stack>.yaml lookup)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Project name used for namespaced config keys and URNs
        #[arg(short, long, env = "SKYWEAVE_PROJECT", default_value = "website")]
        project: String,
        /// Stack name
        #[arg(short, long, env = "SKYWEAVE_STACK", default_value = "dev")]
        stack: String,
        /// Print secret exports in plain text
        #[arg(long)]
        show_secrets: bool,
    },
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Preview {
            config,
            project,
            stack,
            show_secrets,
        } => {
            commands::preview::handle(config, &project, &stack, show_secrets).await?;
        }
        Commands::Version => {
            println!("skyweave {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
