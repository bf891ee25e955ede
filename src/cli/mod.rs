//! CLI module for the user record service

pub mod serve;

use clap::{Parser, Subcommand};

/// User record service - password-protected user records over HTTP
#[derive(Parser)]
#[command(name = "usersvc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve(serve::ServeArgs),
}

impl Default for Command {
    fn default() -> Self {
        Self::Serve(serve::ServeArgs::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_no_command() {
        let cli = Cli::try_parse_from(["usersvc"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_serve_http_addr() {
        let cli =
            Cli::try_parse_from(["usersvc", "serve", "--http-addr", "0.0.0.0:9000"]).unwrap();

        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.http_addr.as_deref(), Some("0.0.0.0:9000"))
            }
            None => panic!("expected serve command"),
        }
    }
}
