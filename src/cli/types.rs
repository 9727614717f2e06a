use clap::{Parser, Subcommand};
use decent_rollback::validation::clap_app_name_validator;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "decent-rollback")]
#[command(about = "Roll a Decent App's production slot back to its previous version", long_about = None)]
#[command(version)]
#[command(subcommand_help_heading = "Commands")]
pub struct Cli {
    /// TOML file overriding hosts and publish options
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Host serving published apps (default: decentapps.net)
    #[arg(long, global = true)]
    pub site_host: Option<String>,

    /// Host of the partner deployment API (default: partner.decentapps.net)
    #[arg(long, global = true)]
    pub partner_host: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Roll production back to the rollback version (default)
    ///
    /// Reads GITHUB_REPOSITORY_OWNER, INPUT_API-KEY and INPUT_APP-NAME from
    /// the environment, as provided by GitHub Actions.
    Rollback {
        /// Skip comparing this tool against the latest released version
        #[arg(long)]
        skip_version_check: bool,
    },

    /// Check whether a newer version of this tool has been released
    CheckVersion,

    /// Show the slots currently published for an app
    Show {
        /// App name (alphanumeric, dash, underscore, dot; max 128 characters)
        #[arg(long, value_parser = clap_app_name_validator)]
        app_name: String,
    },
}
