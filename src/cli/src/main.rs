//! Command line wallet for the shielded wallet interface.

use anyhow::Result;
use colored::Colorize;
use rust_decimal::Decimal;
use std::path::PathBuf;
use structopt::StructOpt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use wallet_cli::commands::{
    balance, classify, faucet, faucet_url, fees, recent, stake, transfer, validate,
};
use wallet_cli::{TransferForm, WalletConfig, WalletContext};
use wallet_services::preferences::PreferenceStore;

/// Command line arguments for the CLI wallet.
#[derive(Debug, StructOpt)]
#[structopt(name = "wallet", about = "Shielded wallet command line interface")]
struct Opt {
    /// Path to the configuration file
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Path to the preferences file
    #[structopt(short, long, parse(from_os_str))]
    preferences: Option<PathBuf>,

    /// Indexer to query
    #[structopt(short, long)]
    indexer: Option<String>,

    /// Print results as JSON
    #[structopt(long)]
    json: bool,

    /// Subcommand to run
    #[structopt(subcommand)]
    cmd: Command,
}

/// Transfer form fields shared by `validate` and `transfer`.
#[derive(Debug, StructOpt)]
struct FormArgs {
    /// Source address
    #[structopt(long)]
    from: Option<String>,

    /// Destination address
    #[structopt(long)]
    to: Option<String>,

    /// Asset symbol
    #[structopt(long)]
    asset: Option<String>,

    /// Amount in display units
    #[structopt(long)]
    amount: Option<Decimal>,

    /// Keychain version, for shielded operations
    #[structopt(long)]
    keychain_version: Option<String>,

    /// Source is a hardware wallet account; pass whether the device is connected
    #[structopt(long)]
    ledger_connected: Option<bool>,

    /// Balance on the source chain, for IBC sources
    #[structopt(long)]
    available: Option<Decimal>,
}

impl From<FormArgs> for TransferForm {
    fn from(args: FormArgs) -> Self {
        TransferForm {
            source: args.from,
            destination: args.to,
            symbol: args.asset,
            amount: args.amount,
            keychain_version: args.keychain_version,
            ledger_connected: args.ledger_connected,
            available: args.available,
        }
    }
}

/// Subcommands for the CLI wallet.
#[derive(Debug, StructOpt)]
enum Command {
    /// Show which flow a transfer between two addresses follows
    #[structopt(name = "classify")]
    Classify {
        /// Source address
        #[structopt(long, default_value = "")]
        from: String,

        /// Destination address
        #[structopt(long, default_value = "")]
        to: String,
    },

    /// Check a transfer form without sending it
    #[structopt(name = "validate")]
    Validate(FormArgs),

    /// Show the fee a transfer would pay
    #[structopt(name = "fees")]
    Fees {
        /// Source address
        #[structopt(long)]
        from: String,

        /// Destination address
        #[structopt(long, default_value = "")]
        to: String,
    },

    /// Send a transfer
    #[structopt(name = "transfer")]
    Transfer {
        #[structopt(flatten)]
        form: FormArgs,

        /// Memo attached to the transfer
        #[structopt(long)]
        memo: Option<String>,
    },

    /// Show the balances of an account
    #[structopt(name = "balance")]
    Balance {
        /// Account address
        address: String,
    },

    /// Claim staking rewards and bond them again
    #[structopt(name = "claim-and-stake")]
    ClaimAndStake {
        /// Account address
        #[structopt(long)]
        from: String,

        /// Validators to claim from
        #[structopt(long = "validator", required = true)]
        validators: Vec<String>,
    },

    /// List recently used destinations
    #[structopt(name = "recent")]
    Recent {
        /// Forget all recent destinations
        #[structopt(long)]
        clear: bool,
    },

    /// Request test tokens from the faucet
    #[structopt(name = "faucet")]
    Faucet {
        /// Receiving address
        #[structopt(long)]
        to: String,

        /// Asset symbol
        #[structopt(long, default_value = "NAM")]
        asset: String,

        /// Amount in display units
        #[structopt(long)]
        amount: Decimal,
    },

    /// Show or change the faucet URL
    #[structopt(name = "faucet-url")]
    FaucetUrl {
        /// New faucet URL
        url: Option<String>,

        /// Go back to the configured faucet
        #[structopt(long)]
        reset: bool,
    },
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command line arguments
    let opt = Opt::from_args();

    // Load configuration
    let mut config = match &opt.config {
        Some(path) => WalletConfig::from_file(path)?,
        None => WalletConfig::default(),
    };

    // Override indexer if specified
    if let Some(indexer) = opt.indexer {
        config.indexer_url = indexer;
    }

    let preferences = opt.preferences.unwrap_or_else(PreferenceStore::default_path);
    let ctx = WalletContext::from_config(config, preferences)?;

    // Run the appropriate command
    match opt.cmd {
        Command::Classify { from, to } => {
            let classification = classify::run(&ctx.registry, &from, &to);
            if opt.json {
                print_json(&classification)?;
            } else {
                println!("{} {}", "Transfer type:".green(), classification.transfer_type);
                println!("{} {:?}", "Gas estimate kind:".green(), classification.tx_kind);
                if let Some(label) = classification.destination_label {
                    println!("{} {}", "Destination:".green(), label);
                }
            }
        }
        Command::Validate(form) => {
            let check = validate::run(&ctx, &form.into()).await?;
            if opt.json {
                print_json(&check)?;
            } else if check.result.is_ok() {
                println!("{} {}", "Ready:".green(), check.button_text);
            } else {
                println!("{} {}", "Not ready:".red(), check.button_text);
            }
        }
        Command::Fees { from, to } => {
            let quote = fees::run(&ctx, &from, &to).await?;
            if opt.json {
                print_json(&quote)?;
            } else {
                println!(
                    "{} {} {}",
                    "Fee:".green(),
                    quote.total_display_amount,
                    quote.symbol.unwrap_or(quote.gas_config.gas_token)
                );
            }
        }
        Command::Transfer { form, memo } => {
            let hash = transfer::run(&ctx, &form.into(), memo).await?;
            println!("{} {}", "Transaction sent:".green(), hash);
        }
        Command::Balance { address } => {
            let report = balance::run(&ctx, &address).await?;
            if opt.json {
                print_json(&report)?;
            } else {
                for holding in &report.holdings {
                    match holding.dollar {
                        Some(dollar) => println!(
                            "{:>24} {:<8} ${}",
                            holding.amount, holding.asset.symbol, dollar.round_dp(2)
                        ),
                        None => println!("{:>24} {:<8}", holding.amount, holding.asset.symbol),
                    }
                }
                println!("{} ${}", "Total:".green(), report.total_dollar.round_dp(2));
            }
        }
        Command::ClaimAndStake { from, validators } => {
            let hash = stake::run(&ctx, &from, &validators).await?;
            println!("{} {}", "Rewards restaked:".green(), hash);
        }
        Command::Recent { clear } => {
            if clear {
                recent::clear(&ctx)?;
                println!("{}", "Recent addresses cleared".green());
            } else {
                let list = recent::list(&ctx)?;
                if opt.json {
                    print_json(&list)?;
                } else {
                    for entry in list {
                        println!(
                            "{} {} {}",
                            entry.timestamp.format("%Y-%m-%d %H:%M"),
                            entry.address,
                            entry.label.unwrap_or_default().dimmed()
                        );
                    }
                }
            }
        }
        Command::Faucet { to, asset, amount } => {
            let response = faucet::run(&ctx, &to, &asset, amount).await?;
            if response.sent {
                println!("{} {} {} to {}", "Faucet sent".green(), amount, asset, to);
            } else {
                println!(
                    "{} {}",
                    "Faucet refused:".red(),
                    response.message.unwrap_or_default()
                );
            }
        }
        Command::FaucetUrl { url, reset } => {
            if reset {
                faucet_url::reset(&ctx)?;
            } else if let Some(url) = url {
                faucet_url::set(&ctx, &url)?;
            }
            println!("{} {}", "Faucet:".green(), faucet_url::show(&ctx)?);
        }
    }

    Ok(())
}
