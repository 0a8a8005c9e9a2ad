use clap::Parser;
use f1_telemetry_api::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or_else(|| Command::Serve(Default::default())) {
        Command::Serve(args) => cli::serve::run(args).await,
        Command::Endpoints => {
            cli::print_endpoints();
            Ok(())
        }
    }
}
