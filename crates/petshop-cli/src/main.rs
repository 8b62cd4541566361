//! `petshop`: command-line front end for the pet store.
//!
//! # Usage
//!
//! ```
//! petshop add --name Rex --breed Labrador --price 150
//! petshop search lab --open 1
//! petshop --store ./pets.db dashboard
//! ```

mod commands;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use petshop_core::{paths::DEFAULT_STORE_PATH, pet::PetId};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "petshop", about = "Manage a pet store inventory")]
struct Args {
  /// Path to a TOML config file (store_path, business_name).
  #[arg(short, long, value_name = "FILE", env = "PETSHOP_CONFIG")]
  config: Option<PathBuf>,

  /// SQLite file holding the inventory.
  #[arg(long, env = "PETSHOP_STORE")]
  store: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Add a pet.
  Add {
    #[arg(long)]
    name:    String,
    #[arg(long)]
    breed:   String,
    /// Price in FCFA.
    #[arg(long)]
    price:   String,
    #[arg(long, default_value = "")]
    details: String,
    /// Reference to an image stored elsewhere.
    #[arg(long)]
    image:   Option<String>,
    /// Record the pet as already sold.
    #[arg(long)]
    sold:    bool,
  },

  /// List every pet.
  List {
    #[command(flatten)]
    pick: Pick,
  },

  /// List pets whose name or breed contains QUERY.
  Search {
    query: String,
    #[command(flatten)]
    pick:  Pick,
  },

  /// Show one pet.
  Show { id: PetId },

  /// Change fields of an existing pet; omitted fields are kept.
  Update {
    id:        PetId,
    #[arg(long)]
    name:      Option<String>,
    #[arg(long)]
    breed:     Option<String>,
    #[arg(long)]
    price:     Option<String>,
    #[arg(long)]
    details:   Option<String>,
    #[arg(long)]
    image:     Option<String>,
    #[arg(long)]
    available: Option<bool>,
  },

  /// Delete one pet.
  Delete { id: PetId },

  /// Delete every pet.
  Clear {
    /// Confirm the irreversible deletion.
    #[arg(long)]
    yes: bool,
  },

  /// Show inventory metrics.
  Dashboard,
}

/// Row selection for `list` and `search`. Rows are numbered from 1.
#[derive(clap::Args, Debug, Default)]
pub struct Pick {
  /// Show the details of row N.
  #[arg(long, value_name = "N")]
  open:   Option<usize>,
  /// Delete the pet in row N (requires --yes).
  #[arg(long, value_name = "N")]
  remove: Option<usize>,
  /// Confirm a --remove.
  #[arg(long)]
  yes:    bool,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default, Debug)]
struct ConfigFile {
  #[serde(default)]
  store_path:    Option<PathBuf>,
  #[serde(default)]
  business_name: Option<String>,
}

/// Settings after merging flags, config file and defaults.
#[derive(Debug)]
pub struct Resolved {
  pub store_path:    PathBuf,
  pub business_name: String,
}

/// CLI flags override the config file, which overrides defaults.
fn resolve(store: Option<PathBuf>, file_cfg: ConfigFile) -> Resolved {
  Resolved {
    store_path:    store
      .or(file_cfg.store_path)
      .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH)),
    business_name: file_cfg
      .business_name
      .filter(|n| !n.trim().is_empty())
      .unwrap_or_else(|| petshop_core::settings::Preferences::default().business_name),
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  let resolved = resolve(args.store, file_cfg);
  commands::run(args.command, &resolved).await
}
