// Copyright (c) 2025 - Cowboy AI, Inc.
//! Collins attribute tool
//!
//! Reads and writes inventory attributes for one asset tag through the same
//! engine the fleet tooling uses, locality guard included.
//!
//! Run with: cargo run --bin collins-attr -- get 001234 pool primary_role
//!
//! Prerequisites:
//! 1. COLLINS_URL, COLLINS_USER and COLLINS_PASSWORD set
//! 2. COLLINS_DATACENTER set when working on server nodes

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use cim_asset_sync::{AssetTag, AttributeUpdate, CollinsConfig, CollinsContext};

#[derive(Debug, Parser)]
#[command(name = "collins-attr", about = "Read and write Collins asset attributes")]
struct Cli {
    /// Allow writes to assets in other datacenters
    #[arg(long)]
    inter_dc: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print one or more fields
    Get {
        tag: String,
        #[arg(required = true)]
        fields: Vec<String>,
    },
    /// Write field=value pairs, in order
    Set {
        tag: String,
        #[arg(required = true)]
        pairs: Vec<String>,
    },
}

fn parse_pair(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((field, value)) if !field.is_empty() => Ok((field, value)),
        _ => bail!("expected field=value, got '{}'", raw),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let config = CollinsConfig::from_env().context("Failed to load Collins configuration")?;
    info!("Collins URL: {}", config.url);

    let ctx = CollinsContext::connect(&config).context("Failed to create Collins client")?;
    if cli.inter_dc {
        ctx.enable_inter_dc_mode();
    }
    info!("Datacenter: {}", ctx.current_datacenter());

    match cli.command {
        Command::Get { tag, fields } => {
            let subject = AssetTag::new(tag);
            let values = ctx.get_many(&subject, fields.as_slice()).await?;
            if values.asset().is_none() {
                bail!("no Collins asset for {}", subject);
            }
            for field in &fields {
                println!("{}={}", field, values.get(field).unwrap_or_default());
            }
        }
        Command::Set { tag, pairs } => {
            let subject = AssetTag::new(tag);
            let mut update = AttributeUpdate::new();
            for raw in &pairs {
                let (field, value) = parse_pair(raw)?;
                update = update.with(field, value);
            }
            ctx.set(&subject, update).await?;
        }
    }

    Ok(())
}
