//! CLI module for authd
//!
//! Provides subcommands for the daemon and its verification client:
//! - `serve`: run the authorization daemon
//! - `check`: ask a daemon whether a key exists in a bucket
//! - `status`: probe whether a daemon is online
//! - `generate-key`: print fresh API keys without a daemon

pub mod client;
pub mod serve;

use clap::{Parser, Subcommand};

/// authd - minimal authorization daemon with a timing-safe client
#[derive(Parser)]
#[command(name = "authd")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the authorization daemon
    Serve(serve::ServeArgs),

    /// Check a key in a bucket against a running daemon
    Check(client::CheckArgs),

    /// Probe whether a daemon is online
    Status(client::ClientArgs),

    /// Generate API keys offline
    GenerateKey(client::GenerateKeyArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use client::CheckMode;

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from([
            "authd",
            "serve",
            "--addr",
            "0.0.0.0:9000",
            "--admin",
            "s3cret",
            "--ns",
            "ns.test",
        ])
        .unwrap();

        let Command::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.addr.unwrap().port(), 9000);
        assert_eq!(args.admin.as_deref(), Some("s3cret"));
        assert_eq!(args.ns.as_deref(), Some("ns.test"));
        assert!(!args.strict_api_keys);
    }

    #[test]
    fn test_parse_check_defaults_to_auth_timeout() {
        let cli = Cli::try_parse_from(["authd", "check", "soap", "bar"]).unwrap();

        let Command::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.bucket, "soap");
        assert_eq!(args.key, "bar");
        assert_eq!(args.mode, CheckMode::AuthTimeout);
    }

    #[test]
    fn test_parse_check_mode() {
        let cli = Cli::try_parse_from(["authd", "check", "--mode", "plain", "soap", "bar"]).unwrap();

        let Command::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.mode, CheckMode::Plain);
    }

    #[test]
    fn test_parse_generate_key() {
        let cli = Cli::try_parse_from(["authd", "generate-key", "-n", "3"]).unwrap();

        let Command::GenerateKey(args) = cli.command else {
            panic!("expected generate-key");
        };
        assert_eq!(args.count, 3);
        assert!(args.ns.is_none());
    }
}
