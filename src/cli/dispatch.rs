use anyhow::Result;
use decent_rollback::commands::action_version::{self, HttpVersionSource};
use decent_rollback::commands::rollback::{self, RollbackOptions};
use decent_rollback::commands::show;
use decent_rollback::config::RollbackConfig;
use decent_rollback::inputs::ProcessEnvironment;
use decent_rollback::partner::HttpDeploymentHost;
use decent_rollback::report::Reporter;

use super::types::{Cli, Commands};

pub fn dispatch(cli: Cli, reporter: &dyn Reporter) -> Result<()> {
    let config = RollbackConfig::resolve(cli.config.as_deref(), cli.site_host, cli.partner_host)?;
    let command = cli.command.unwrap_or(Commands::Rollback {
        skip_version_check: false,
    });

    match command {
        Commands::Rollback { skip_version_check } => {
            let host = HttpDeploymentHost::new(&config)?;
            let versions = HttpVersionSource::new(&config)?;
            let options = RollbackOptions { skip_version_check };
            rollback::execute(
                &options,
                &config,
                &ProcessEnvironment,
                &host,
                &versions,
                reporter,
            )?;
            Ok(())
        }
        Commands::CheckVersion => {
            let versions = HttpVersionSource::new(&config)?;
            action_version::check(&versions, reporter)?;
            Ok(())
        }
        Commands::Show { app_name } => {
            let host = HttpDeploymentHost::new(&config)?;
            show::execute(&host, &app_name, reporter)
        }
    }
}
