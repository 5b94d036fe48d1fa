//! Command-line access to the wallet core

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mypepe_wallet::metadata::{about_line, PackageMetadata};
use mypepe_wallet::{generate_phrase, validate_transaction, Wallet, WalletConfig};

#[derive(Parser, Debug)]
#[command(name = "mypepe-wallet")]
#[command(about = "MyPepe wallet core: phrases, addresses and transfer checks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Print a fresh 12-word phrase
    Phrase,
    /// Derive the address at an index from the phrase in MYPEPE_PHRASE
    Address { index: u32 },
    /// Check a transfer before signing
    Validate {
        sender: String,
        recipient: String,
        amount: String,
        /// Sender balance in smallest units
        balance: u64,
    },
    /// Print the crate name and version
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = WalletConfig::from_env()?;

    match cli.command {
        Commands::Phrase => {
            println!("{}", generate_phrase()?);
        }
        Commands::Address { index } => {
            let phrase = std::env::var("MYPEPE_PHRASE").context("MYPEPE_PHRASE is not set")?;
            let wallet = Wallet::from_phrase(&phrase, config.network)?;
            let account = wallet.derive(index)?;
            println!("{} {}", account.path, account.address);
        }
        Commands::Validate {
            sender,
            recipient,
            amount,
            balance,
        } => match validate_transaction(&config.network, &sender, &recipient, &amount, balance) {
            Ok(amount) => println!("ok {}", amount),
            Err(e) => {
                println!("{}: {}", e.kind(), e);
                std::process::exit(1);
            }
        },
        Commands::Version => {
            println!("{}", about_line(&PackageMetadata));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_validate() {
        let cli = Cli::try_parse_from(["mypepe-wallet", "validate", "DA", "DB", "0.5", "100000000"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Validate {
                sender: "DA".to_string(),
                recipient: "DB".to_string(),
                amount: "0.5".to_string(),
                balance: 100_000_000,
            }
        );
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_address_index() {
        let cli = Cli::try_parse_from(["mypepe-wallet", "-v", "address", "7"]).unwrap();
        assert_eq!(cli.command, Commands::Address { index: 7 });
        assert!(cli.verbose);
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(Cli::try_parse_from(["mypepe-wallet", "address"]).is_err());
        assert!(Cli::try_parse_from(["mypepe-wallet", "address", "-1"]).is_err());
        assert!(Cli::try_parse_from(["mypepe-wallet", "validate", "DA", "DB", "1", "lots"]).is_err());
        assert!(Cli::try_parse_from(["mypepe-wallet", "send"]).is_err());
    }

    #[test]
    fn test_help_is_available() {
        let err = Cli::try_parse_from(["mypepe-wallet", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
