//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - pull: external library -> document library
//! - push: document library -> external library
//! - libraries: list discovered libraries

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use toolsync::config::{ConfigOverrides, ConfigOverridesBuilder};
use toolsync::correlation::{CorrelationMode, DescriptionMatch};
use toolsync::domain::SyncDirection;

/// toolsync - sync CAM tool parameters and presets between libraries
#[derive(Parser, Debug)]
#[command(name = "toolsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy parameters and presets from an external library into the document library
    Pull {
        #[command(flatten)]
        args: SyncArgs,
    },

    /// Copy parameters and presets from the document library into an external library
    Push {
        #[command(flatten)]
        args: SyncArgs,
    },

    /// List libraries found under the configured locations
    Libraries {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Sync direction and arguments of pull/push commands
    pub fn sync_args(&self) -> Option<(SyncDirection, &SyncArgs)> {
        match self {
            Commands::Pull { args } => Some((SyncDirection::Pull, args)),
            Commands::Push { args } => Some((SyncDirection::Push, args)),
            Commands::Libraries { .. } => None,
        }
    }
}

/// Arguments shared by pull and push
#[derive(Args, Debug, Clone)]
pub struct SyncArgs {
    /// External library: display name from `libraries`, or a file path
    pub library: String,

    /// Document library file (overrides config)
    #[arg(short, long)]
    pub document: Option<PathBuf>,

    /// Correlation mode (description, product-id, geometry)
    #[arg(short, long, value_parser = CorrelationMode::parse)]
    pub mode: Option<CorrelationMode>,

    /// Description matching (exact, contains)
    #[arg(long = "match", value_parser = DescriptionMatch::parse)]
    pub description_match: Option<DescriptionMatch>,

    /// Parameters never overwritten, comma separated (overrides config)
    #[arg(long, value_delimiter = ',')]
    pub reserve: Option<Vec<String>>,

    /// Print the sync report as JSON
    #[arg(long)]
    pub json: bool,
}

impl SyncArgs {
    /// Config overrides carried by the flags
    pub fn overrides(&self) -> ConfigOverrides {
        let mut builder = ConfigOverridesBuilder::new();
        if let Some(document) = &self.document {
            builder = builder.document(document.clone());
        }
        if let Some(mode) = self.mode {
            builder = builder.mode(mode);
        }
        if let Some(strategy) = self.description_match {
            builder = builder.description_match(strategy);
        }
        if let Some(reserve) = &self.reserve {
            builder = builder.reserved_parameters(reserve.clone());
        }
        builder.build()
    }
}
