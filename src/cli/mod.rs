//! CLI module for the F1 Telemetry API
//!
//! Subcommands:
//! - `serve`: run the HTTP server
//! - `endpoints`: print the HTTP endpoints

pub mod serve;

use clap::{Args, Parser, Subcommand};

use crate::api::health::ENDPOINTS;

/// F1 Telemetry API - session, lap and car telemetry data over HTTP
#[derive(Parser)]
#[command(name = "f1-telemetry-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve(ServeArgs),

    /// Print the HTTP endpoints
    Endpoints,
}

/// Overrides applied on top of the loaded configuration
#[derive(Args, Debug, Default, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, short)]
    pub port: Option<u16>,
}

/// Print every endpoint, one per line
pub fn print_endpoints() {
    println!("Available endpoints:");
    for endpoint in ENDPOINTS {
        println!(
            "  {} {} - {}",
            endpoint.method, endpoint.path, endpoint.description
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from(["f1-telemetry-api", "serve", "--host", "127.0.0.1", "-p", "8000"])
            .unwrap();

        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.host.as_deref(), Some("127.0.0.1"));
                assert_eq!(args.port, Some(8000));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["f1-telemetry-api"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_endpoints() {
        let cli = Cli::try_parse_from(["f1-telemetry-api", "endpoints"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Endpoints)));
    }
}
