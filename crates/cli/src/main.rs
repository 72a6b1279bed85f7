//! Rocket Computers CLI - catalog and order access from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List product categories
//! rc-cli categories
//!
//! # List the products of one category
//! rc-cli products --category Laptops
//!
//! # Show stock (needs an admin token)
//! ROCKET_TOKEN=... rc-cli stock
//!
//! # Page through orders, show one, export its invoice
//! rc-cli orders list --page 2
//! rc-cli orders show ORD-1001
//! rc-cli orders invoice ORD-1001 -o invoice.pdf
//! ```
//!
//! # Environment Variables
//!
//! - `ROCKET_API_URL` - Base URL of the backend API (or `--api-url`)
//! - `ROCKET_TOKEN` - Bearer token for `stock`
//! - `COMPANY_NAME` / `COMPANY_ADDRESS` / `COMPANY_GST_NUMBER` - Invoice header

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use rocket_computers_admin::{backend::BackendClient, config::BackendConfig};
use rocket_computers_core::CompanyDetails;

mod commands;

#[derive(Parser)]
#[command(name = "rc-cli")]
#[command(author, version, about = "Rocket Computers CLI tools")]
struct Cli {
    /// Backend API base URL
    #[arg(long, env = "ROCKET_API_URL", global = true)]
    api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List product categories
    Categories,
    /// List the products in a category
    Products {
        /// Category name
        #[arg(short, long)]
        category: String,
    },
    /// Show current stock (admin token required)
    Stock {
        /// Bearer token from an admin login
        #[arg(long, env = "ROCKET_TOKEN", hide_env_values = true)]
        token: String,
    },
    /// Work with orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List orders, ten per page
    List {
        /// Page number (out-of-range pages are clamped)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Show an order with its invoice totals
    Show {
        /// Order ID
        order_id: String,

        #[command(flatten)]
        company: CompanyArgs,
    },
    /// Export an order's invoice as PDF
    Invoice {
        /// Order ID
        order_id: String,

        /// Output file (default: invoice-<ORDER_ID>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        company: CompanyArgs,
    },
}

/// Seller details printed on invoices; unset fields keep the defaults.
#[derive(Args)]
struct CompanyArgs {
    #[arg(long, env = "COMPANY_NAME")]
    company_name: Option<String>,
    #[arg(long, env = "COMPANY_ADDRESS")]
    company_address: Option<String>,
    #[arg(long, env = "COMPANY_GST_NUMBER")]
    company_gst_number: Option<String>,
}

impl CompanyArgs {
    fn into_details(self) -> CompanyDetails {
        let defaults = CompanyDetails::default();
        CompanyDetails {
            name: self.company_name.unwrap_or(defaults.name),
            address: self.company_address.unwrap_or(defaults.address),
            gst_number: self.company_gst_number.unwrap_or(defaults.gst_number),
        }
    }
}

#[tokio::main]
async fn main() {
    // Load .env before parsing so clap sees its variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rocket_computers_cli=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let client = connect(cli.api_url.as_deref(), cli.timeout)?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Categories => commands::catalog::categories(&client, &mut out).await?,
        Commands::Products { category } => {
            commands::catalog::products(&client, &category, &mut out).await?;
        }
        Commands::Stock { token } => commands::catalog::stock(&client, token, &mut out).await?,
        Commands::Orders { action } => match action {
            OrdersAction::List { page } => commands::orders::list(&client, page, &mut out).await?,
            OrdersAction::Show { order_id, company } => {
                commands::orders::show(&client, &company.into_details(), order_id, &mut out)
                    .await?;
            }
            OrdersAction::Invoice {
                order_id,
                output,
                company,
            } => {
                let path = commands::orders::invoice(
                    &client,
                    &company.into_details(),
                    order_id,
                    output,
                )
                .await?;
                tracing::info!("Invoice written to {}", path.display());
            }
        },
    }
    Ok(())
}

/// Build the backend client from the `--api-url` / `ROCKET_API_URL` value.
fn connect(api_url: Option<&str>, timeout_secs: u64) -> Result<BackendClient, commands::CliError> {
    let api_url = api_url.ok_or(commands::CliError::MissingApiUrl)?;
    let config = BackendConfig::new(api_url, Duration::from_secs(timeout_secs))?;
    Ok(BackendClient::new(&config)?)
}
