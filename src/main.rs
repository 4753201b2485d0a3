use std::process::ExitCode;

use clap::Parser;
use clientdb::adapter::inbound::cli::command::{Cli, Commands};
use clientdb::adapter::inbound::cli::output::{self, OutputConfig};
use clientdb::adapter::inbound::cli::{check, init, serve};

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    let result = match cli.command {
        Commands::Serve(args) => serve::execute(args).await.map(|()| true),
        Commands::Init(args) => init::execute(&args.config).await.map(|()| true),
        Commands::Check(args) => check::execute(&args.config).await,
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
