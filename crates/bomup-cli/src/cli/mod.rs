//! CLI for the bomup spreadsheet upload client.

mod commands;
mod terminal;

use anyhow::Result;
use bomup_core::config;
use clap::{Parser, Subcommand};
use std::fmt;
use std::path::PathBuf;

use commands::{run_completions, run_tables, run_upload, run_view};

/// Top-level CLI for bomup.
#[derive(Debug, Parser)]
#[command(name = "bomup")]
#[command(about = "bomup: upload a BOM spreadsheet for processing and save the result", long_about = None)]
pub struct Cli {
    /// Processing server base URL (overrides `server_url` in config.toml).
    #[arg(long, global = true, value_name = "URL")]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Upload a spreadsheet and save the processed file.
    Upload {
        /// Spreadsheet to upload.
        file: Option<PathBuf>,
        /// Directory to save the processed file in (default: config `download_dir`, else current dir).
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
        /// Save under the server's attachment name instead of `<name>_updated.xlsx`.
        #[arg(long)]
        server_name: bool,
    },

    /// List the tables the server built from earlier uploads.
    Tables,

    /// Show one table as HTML.
    View {
        /// Table name as listed by `bomup tables`.
        table: String,
        /// Write the HTML to this file instead of stdout.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Print shell completions to stdout.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// The failure was already shown to the user; exit non-zero without repeating it.
#[derive(Debug)]
pub struct Reported;

impl fmt::Display for Reported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("failure already reported")
    }
}

impl std::error::Error for Reported {}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // Completions need neither config nor network.
        if let CliCommand::Completions { shell } = cli.command {
            return run_completions(shell);
        }

        let mut cfg = config::load_or_init()?;
        if let Some(server) = cli.server {
            cfg.server_url = server;
        }
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Upload {
                file,
                out,
                server_name,
            } => {
                let out_dir = match out.or_else(|| cfg.download_dir.clone()) {
                    Some(dir) => dir,
                    None => std::env::current_dir()?,
                };
                let prefer_server = server_name || cfg.prefer_server_filename;
                run_upload(&cfg, file.as_deref(), &out_dir, prefer_server).await?;
            }
            CliCommand::Tables => run_tables(&cfg).await?,
            CliCommand::View { table, out } => run_view(&cfg, &table, out.as_deref()).await?,
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
