//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands::issue::{
    CreateArgs, EditArgs, ImportArgs, LinkArgs, SearchArgs, TransitArgs,
};

#[derive(Parser, Debug)]
#[command(name = "yatracker")]
#[command(about = "Yatracker - Yandex Tracker issue client", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to .yatracker/config.yaml + local.yaml)
    #[arg(short, long, global = true, env = "YATRACKER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Connection id to use instead of the configured default
    #[arg(long, global = true)]
    pub conn: Option<String>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import an issue with its original history fields
    Import(ImportArgs),

    /// Create a new issue
    Create(CreateArgs),

    /// Edit an existing issue
    Edit(EditArgs),

    /// Link an issue to another issue
    Link(LinkArgs),

    /// Execute a status transition
    Transit(TransitArgs),

    /// Search issues
    Search(SearchArgs),
}
