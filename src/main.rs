// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! `nftix` command-line client.
//!
//! Every invocation loads the persisted session for the configured backend
//! before running its command, so `connect` in one run and `tickets mine` in
//! the next share a session. Results are printed to stdout as JSON; logs go
//! to stderr.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use nftix_client::{
    config::{LogFormat, DEFAULT_LOG_FILTER},
    models::{EventUpdate, ListTicketRequest, NewEvent, WalletAddress},
    ClientConfig, NftixClient,
};

#[derive(Parser)]
#[command(name = "nftix", version, about = "NFTix ticketing client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect a mock wallet and log in
    Connect {
        #[arg(long, default_value = "sui")]
        wallet_type: String,
    },
    /// Clear the local session
    Disconnect,
    /// Show the current session
    Status,
    #[command(subcommand)]
    Events(EventsCommand),
    #[command(subcommand)]
    Tickets(TicketsCommand),
    #[command(subcommand)]
    Market(MarketCommand),
}

#[derive(Subcommand)]
enum EventsCommand {
    /// List all events
    List,
    /// List events by organizer
    Organizer { organizer_id: String },
    /// Create an event from a JSON file
    Create { file: PathBuf },
    /// Update an event from a JSON file of changed fields
    Update { id: String, file: PathBuf },
    /// Delete an event
    Delete { id: String },
}

#[derive(Subcommand)]
enum TicketsCommand {
    /// Tickets owned by the connected wallet
    Mine,
    /// Transfer a ticket to another address
    Transfer { ticket_id: String, recipient: String },
}

#[derive(Subcommand)]
enum MarketCommand {
    /// Active resale listings
    Listings,
    /// Buy a listing
    Buy { listing_id: String },
    /// List a ticket for resale
    List {
        ticket_id: String,
        price: f64,
        /// End date for an auction listing; fixed price when omitted
        #[arg(long)]
        auction_end: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    init_logging(LogFormat::from_env());

    let cli = Cli::parse();

    let config = ClientConfig::from_env().context("invalid configuration")?;
    let client = NftixClient::new(config).context("failed to build client")?;
    let state = client.wallet().rehydrate();
    debug!(?state, base_url = %client.config().api_base_url, "Session loaded");

    match cli.command {
        Commands::Connect { wallet_type } => {
            let session = client.wallet().connect(&wallet_type).await?;
            info!(address = %session.address, "Connected");
            print_json(&session)
        }
        Commands::Disconnect => {
            client.wallet().disconnect();
            print_json(&client.wallet().session())
        }
        Commands::Status => print_json(&serde_json::json!({
            "state": client.wallet().state(),
            "session": client.wallet().session(),
        })),
        Commands::Events(cmd) => handle_events(&client, cmd).await,
        Commands::Tickets(cmd) => handle_tickets(&client, cmd).await,
        Commands::Market(cmd) => handle_market(&client, cmd).await,
    }
}

async fn handle_events(client: &NftixClient, cmd: EventsCommand) -> Result<()> {
    let events = client.events();
    match cmd {
        EventsCommand::List => print_json(&events.list().await?),
        EventsCommand::Organizer { organizer_id } => {
            print_json(&events.by_organizer(&organizer_id).await?)
        }
        EventsCommand::Create { file } => {
            let event: NewEvent = read_json(&file)?;
            print_json(&events.create(&event).await?)
        }
        EventsCommand::Update { id, file } => {
            let update: EventUpdate = read_json(&file)?;
            print_json(&events.update(&id, &update).await?)
        }
        EventsCommand::Delete { id } => print_json(&events.delete(&id).await?),
    }
}

async fn handle_tickets(client: &NftixClient, cmd: TicketsCommand) -> Result<()> {
    match cmd {
        TicketsCommand::Mine => print_json(&client.my_tickets().await?),
        TicketsCommand::Transfer {
            ticket_id,
            recipient,
        } => {
            let recipient = WalletAddress::from(recipient);
            print_json(&client.tickets().transfer(&ticket_id, &recipient).await?)
        }
    }
}

async fn handle_market(client: &NftixClient, cmd: MarketCommand) -> Result<()> {
    let market = client.marketplace();
    match cmd {
        MarketCommand::Listings => print_json(&market.listings().await?),
        MarketCommand::Buy { listing_id } => print_json(&market.buy(&listing_id).await?),
        MarketCommand::List {
            ticket_id,
            price,
            auction_end,
        } => {
            let request = match auction_end {
                Some(ends_at) => ListTicketRequest::auction(ticket_id, price, ends_at),
                None => ListTicketRequest::fixed_price(ticket_id, price),
            };
            print_json(&market.list_ticket(&request).await?)
        }
    }
}

fn init_logging(format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init(),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
