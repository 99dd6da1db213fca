//! Cluster status command

use super::display::{self, TableRenderer, TerminalSink};
use crate::domain::setup::determine_ps_version;
use crate::domain::status::ClusterStatus;
use crate::infrastructure::constants::{STATUS_MESSAGE_TYPE, STATUS_SCRIPT};
use crate::infrastructure::host;
use crate::infrastructure::powershell::{
    self, format_script_call, PowerShellVersion,
};
use crate::shared::error::Result;
use clap::Parser;
use colored::Colorize;

const WIDE_OPTION: &str = "wide";
const JSON_OPTION: &str = "json";

#[derive(Parser, Debug, Clone)]
pub struct StatusCommand {
    /// Output format modifier. Currently supported: 'wide' for more information and 'json' for output as JSON structure
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

impl StatusCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        match self.output.as_deref() {
            None | Some(WIDE_OPTION) | Some(JSON_OPTION) => {}
            Some(other) => anyhow::bail!("parameter '{other}' not supported for flag 'o'"),
        }

        let Some(config) = super::read_setup_for_command()? else {
            return Ok(());
        };

        let version = determine_ps_version(&config);
        let status = load_status(version).await?;

        if self.output.as_deref() == Some(JSON_OPTION) {
            println!("{}", serde_json::to_string_pretty(&status)?);
            return Ok(());
        }

        print_status(&status, self.output.as_deref() == Some(WIDE_OPTION));

        Ok(())
    }
}

/// Runs the status script and decodes its structured result.
pub async fn load_status(version: PowerShellVersion) -> Result<ClusterStatus> {
    let script = format_script_call(&host::install_dir()?.join(STATUS_SCRIPT));
    let mut sink = TerminalSink::default();

    powershell::execute_with_structured_result(
        &script,
        STATUS_MESSAGE_TYPE,
        version,
        &mut sink,
        &[],
    )
    .await
}

fn print_status(status: &ClusterStatus, wide: bool) {
    if let Some(failure) = &status.failure {
        display::print_failure(&failure.message);
        return;
    }

    match &status.running_state {
        Some(state) if state.is_running => {
            println!("{}", "The cluster is running".green());
        }
        Some(state) => {
            println!("{}", "The cluster is not running".red());
            for issue in &state.issues {
                println!("  {} {}", "•".red(), issue);
            }
            return;
        }
        None => {
            display::print_warning("Running state could not be determined");
            return;
        }
    }

    let renderer = TableRenderer::new();
    println!("{}", renderer.render_nodes(&status.nodes, wide));
    println!("{}", renderer.render_pods(&status.pods, wide));

    if let Some(versions) = &status.k8s_version_info {
        println!(
            "Kubernetes server {}, client {}",
            versions.k8s_server_version, versions.k8s_client_version
        );
    }
}
