//! CLI module - Command-line interface for the gadget service
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// IMF Gadget System - inventory API for field equipment
#[derive(Parser)]
#[command(name = "imf-gadgets")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API (default)
    #[command(alias = "web")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Create the default admin/agent accounts and sample gadgets
    Seed,

    /// Create a user account
    CreateUser {
        username: String,

        password: String,

        /// `admin` or `agent`
        #[arg(long, default_value = "agent")]
        role: String,
    },

    /// List gadgets in the inventory
    #[command(alias = "ls")]
    List {
        /// Only show gadgets with this status
        #[arg(long)]
        status: Option<String>,
    },
}

pub use commands::*;
