// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "hakim")]
#[command(version)]
#[command(about = "AI-assisted legal analysis of a dispute and its evidence", long_about = None)]
pub struct Cli {
    /// Dispute description (read from stdin when omitted and stdin is piped)
    pub text: Option<String>,

    /// Evidence file (image or PDF); repeat for several, order is kept
    #[arg(short, long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Model name
    #[arg(short, long, env = "HAKIM_MODEL")]
    pub model: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print the verdict records as JSON instead of the report
    #[arg(long)]
    pub json: bool,

    /// Also write the output to this file
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Copy the output to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Show the request sent to the backend (attachment data elided)
    #[arg(long)]
    pub show_request: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Initialize config file
    Init,
    /// Show current configuration
    Config,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Store the API key in the system keychain
    #[cfg(feature = "secure-storage")]
    SetKey,
    /// Check whether an API key is stored in the keychain
    #[cfg(feature = "secure-storage")]
    GetKey,
}
