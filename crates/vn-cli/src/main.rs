//! Terminal player for branching visual novels.

mod commands;
mod palette;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use commands::play::PlayOptions;

#[derive(Parser)]
#[command(
    name = "vn",
    about = "Play branching visual novels in the terminal",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the stories in a game directory
    Stories {
        /// Game directory containing vn.json and the stories folder
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Play a story interactively
    Play {
        /// Game directory containing vn.json and the stories folder
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Story id (default: the configured default story)
        #[arg(short, long)]
        story: Option<String>,

        /// Print dialogue at once instead of typing it out
        #[arg(long)]
        instant: bool,

        /// Show scene, chapter, background and state after each scene
        #[arg(long)]
        debug: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Stories { dir } => commands::stories::run(&dir).await,
        Commands::Play {
            dir,
            story,
            instant,
            debug,
        } => {
            let options = PlayOptions {
                story,
                instant,
                debug,
            };
            commands::play::run(&dir, options).await
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
