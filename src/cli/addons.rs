//! Addon management commands

use super::display::{self, TerminalSink};
use crate::domain::addons::AddonsStatus;
use crate::domain::setup::determine_ps_version;
use crate::infrastructure::constants::{
    ADDONS_MESSAGE_TYPE, ADDONS_STATUS_SCRIPT, ADDON_DISABLE_SCRIPT, ADDON_ENABLE_SCRIPT,
};
use crate::infrastructure::host;
use crate::infrastructure::powershell::{self, build_script_command, format_script_call, PsParam};
use clap::Parser;
use colored::Colorize;

const JSON_OPTION: &str = "json";

#[derive(Parser, Debug)]
pub struct AddonsCommand {
    #[command(subcommand)]
    pub command: AddonsCommands,
}

#[derive(clap::Subcommand, Debug)]
pub enum AddonsCommands {
    /// List addons available for the cluster
    Ls(AddonsLsCommand),

    /// Enable an addon
    Enable(AddonActionCommand),

    /// Disable an addon
    Disable(AddonActionCommand),
}

impl AddonsCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        match &self.command {
            AddonsCommands::Ls(cmd) => cmd.execute().await,
            AddonsCommands::Enable(cmd) => cmd.execute(ADDON_ENABLE_SCRIPT, "enable").await,
            AddonsCommands::Disable(cmd) => cmd.execute(ADDON_DISABLE_SCRIPT, "disable").await,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct AddonsLsCommand {
    /// Output format modifier. Currently supported: 'json' for output as JSON structure
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

impl AddonsLsCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        match self.output.as_deref() {
            None | Some(JSON_OPTION) => {}
            Some(other) => anyhow::bail!("parameter '{other}' not supported for flag 'o'"),
        }

        let Some(config) = super::read_setup_for_command()? else {
            return Ok(());
        };

        let script = format_script_call(&host::install_dir()?.join(ADDONS_STATUS_SCRIPT));
        let mut sink = TerminalSink::default();
        let version = determine_ps_version(&config);

        let status: AddonsStatus = powershell::execute_with_structured_result(
            &script,
            ADDONS_MESSAGE_TYPE,
            version,
            &mut sink,
            &[],
        )
        .await?;

        if self.output.as_deref() == Some(JSON_OPTION) {
            println!("{}", serde_json::to_string_pretty(&status)?);
            return Ok(());
        }

        if let Some(failure) = &status.failure {
            display::print_failure(&failure.message);
            return Ok(());
        }

        println!("Available addons:");
        for addon in &status.available_addons {
            let state = if status.enabled_addons.contains(addon) {
                "Enabled".green()
            } else {
                "Disabled".bright_black()
            };
            println!("  {addon} ({state})");
        }

        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct AddonActionCommand {
    /// Addon name
    pub name: String,

    /// Show all script output in the terminal
    #[arg(long, short = 'o')]
    pub show_output: bool,
}

impl AddonActionCommand {
    async fn execute(&self, script_rel_path: &str, action: &str) -> anyhow::Result<()> {
        let Some(config) = super::read_setup_for_command()? else {
            return Ok(());
        };

        let mut params = vec![PsParam::single_quoted("-Name", &self.name)];
        if self.show_output {
            params.push(PsParam::switch("-ShowLogs"));
        }

        let script = build_script_command(&host::install_dir()?.join(script_rel_path), &params);

        let mut sink = TerminalSink::new(!self.show_output);
        let version = determine_ps_version(&config);
        let duration = powershell::execute(&script, version, &mut sink).await?;

        display::print_completed(&format!("winkube addons {action} {}", self.name), duration);

        Ok(())
    }
}
