use clap::Parser;
use crate::enums::commands::Commands;

#[derive(Parser)]
#[clap(name = "codeguard")]
#[clap(about = "Security analysis for code snippets and archives", long_about = None)]
pub struct Cli {
    /// Emit debug logs
    #[clap(short, long, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}
