//! Meltemi CLI - catalog checks and a quote calculator.
//!
//! # Usage
//!
//! ```bash
//! # Check a collection's variants against the catalog invariants
//! meltemi-cli catalog validate -f variants.json
//!
//! # Price an order from a cart file and the shipping configuration
//! meltemi-cli quote -c cart.json -s shipping.json --coupon coupon.json \
//!     --delivery courier --payment cash-on-delivery
//! ```
//!
//! # Commands
//!
//! - `catalog validate` - Check catalog invariants over a variants file
//! - `quote` - Compute an order total offline, with the same arithmetic the
//!   storefront and backend use

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use meltemi_core::{DeliveryMethod, PaymentMethod};

mod commands;

#[derive(Parser)]
#[command(name = "meltemi-cli")]
#[command(author, version, about = "Meltemi CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Catalog inspection tools
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Compute an order quote from JSON files
    Quote {
        /// Cart file (JSON, as stored in the session)
        #[arg(short, long)]
        cart: PathBuf,

        /// Shipping configuration file (JSON, backend wire format)
        #[arg(short, long)]
        shipping: PathBuf,

        /// Coupon file (JSON, backend wire format)
        #[arg(long)]
        coupon: Option<PathBuf>,

        /// Delivery method
        #[arg(long, value_enum, default_value_t = DeliveryArg::Courier)]
        delivery: DeliveryArg,

        /// Payment method
        #[arg(long, value_enum, default_value_t = PaymentArg::Card)]
        payment: PaymentArg,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Check the catalog invariants over a variants file
    Validate {
        /// Variants file (JSON array)
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DeliveryArg {
    Courier,
    BoxNow,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaymentArg {
    Card,
    CashOnDelivery,
}

impl From<DeliveryArg> for DeliveryMethod {
    fn from(arg: DeliveryArg) -> Self {
        match arg {
            DeliveryArg::Courier => Self::Courier,
            DeliveryArg::BoxNow => Self::BoxNow,
        }
    }
}

impl From<PaymentArg> for PaymentMethod {
    fn from(arg: PaymentArg) -> Self {
        match arg {
            PaymentArg::Card => Self::Card,
            PaymentArg::CashOnDelivery => Self::CashOnDelivery,
        }
    }
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Validate { file } => commands::catalog::validate(&file)?,
        },
        Commands::Quote {
            cart,
            shipping,
            coupon,
            delivery,
            payment,
        } => commands::quote::run(
            &cart,
            &shipping,
            coupon.as_deref(),
            delivery.into(),
            payment.into(),
        )?,
    }
    Ok(())
}
