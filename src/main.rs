use clap::Parser;
use codeguard::errors::ErrorHandler;
use codeguard::structs::cli::Cli;
use codeguard::workers::command_runner::CommandRunner;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let mut runner = CommandRunner::new();
    if let Err(e) = runner.run_command(cli.command).await {
        ErrorHandler::handle_error(&e);
        std::process::exit(1);
    }
}
