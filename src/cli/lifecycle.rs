//! Cluster lifecycle commands

use super::display::{self, TerminalSink};
use crate::domain::setup::determine_ps_version;
use crate::infrastructure::constants::{
    INSTALL_SCRIPT, START_SCRIPT, STOP_SCRIPT, UNINSTALL_SCRIPT,
};
use crate::infrastructure::host;
use crate::infrastructure::powershell::{self, build_script_command, PowerShellVersion, PsParam};
use clap::Parser;

#[derive(Parser, Debug, Clone)]
pub struct InstallCommand {
    /// HTTP proxy to use while downloading artifacts
    #[arg(long)]
    pub proxy: Option<String>,

    /// Memory of the control-plane VM (e.g. "6GB")
    #[arg(long, default_value = "6GB")]
    pub master_vm_memory: String,

    /// Processor count of the control-plane VM
    #[arg(long, default_value = "6")]
    pub master_vm_cpus: String,

    /// After an online installation delete the files that are needed for an offline installation
    #[arg(long, short = 'd')]
    pub delete_files_for_offline_installation: bool,

    /// Force the online installation
    #[arg(long, short = 'f')]
    pub force_online_installation: bool,

    /// Directory containing additional hooks to be executed
    #[arg(long)]
    pub additional_hooks_dir: Option<String>,

    /// Show all script output in the terminal
    #[arg(long, short = 'o')]
    pub show_output: bool,
}

impl InstallCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        println!("🤖 Installing cluster on {}", std::env::consts::OS);

        let mut params = vec![
            PsParam::single_quoted("-MasterVMMemory", &self.master_vm_memory),
            PsParam::single_quoted("-MasterVMProcessorCount", &self.master_vm_cpus),
        ];
        if let Some(proxy) = &self.proxy {
            params.push(PsParam::double_quoted("-Proxy", proxy));
        }
        if self.delete_files_for_offline_installation {
            params.push(PsParam::switch("-DeleteFilesForOfflineInstallation"));
        }
        if self.force_online_installation {
            params.push(PsParam::switch("-ForceOnlineInstallation"));
        }
        if let Some(dir) = &self.additional_hooks_dir {
            params.push(PsParam::single_quoted("-AdditionalHooksDir", dir));
        }
        if self.show_output {
            params.push(PsParam::switch("-ShowLogs"));
        }

        let script = build_script_command(&host::install_dir()?.join(INSTALL_SCRIPT), &params);

        // Nothing is installed yet, so the legacy interpreter bootstraps.
        let mut sink = TerminalSink::new(!self.show_output);
        let duration = powershell::execute(&script, PowerShellVersion::V5, &mut sink).await?;

        display::print_completed("winkube install", duration);

        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct UninstallCommand {
    /// Skip purging cluster artifacts from disk
    #[arg(long)]
    pub skip_purge: bool,

    /// Directory containing additional hooks to be executed
    #[arg(long)]
    pub additional_hooks_dir: Option<String>,

    /// Show all script output in the terminal
    #[arg(long, short = 'o')]
    pub show_output: bool,
}

impl UninstallCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let Some(config) = super::read_setup_for_command()? else {
            return Ok(());
        };

        let mut params = Vec::new();
        if self.skip_purge {
            params.push(PsParam::switch("-SkipPurge"));
        }
        if let Some(dir) = &self.additional_hooks_dir {
            params.push(PsParam::single_quoted("-AdditionalHooksDir", dir));
        }
        if self.show_output {
            params.push(PsParam::switch("-ShowLogs"));
        }

        let script = build_script_command(&host::install_dir()?.join(UNINSTALL_SCRIPT), &params);

        let mut sink = TerminalSink::new(!self.show_output);
        let version = determine_ps_version(&config);
        let duration = powershell::execute(&script, version, &mut sink).await?;

        display::print_completed("winkube uninstall", duration);

        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct StartCommand {
    /// Directory containing additional hooks to be executed
    #[arg(long)]
    pub additional_hooks_dir: Option<String>,

    /// Automatically utilize the cached vSwitches for cluster connectivity
    #[arg(long)]
    pub autouse_cached_vswitch: bool,

    /// Show all script output in the terminal
    #[arg(long, short = 'o')]
    pub show_output: bool,
}

impl StartCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        println!("🤖 Starting cluster on {}", std::env::consts::OS);

        let Some(config) = super::read_setup_for_command()? else {
            return Ok(());
        };

        let mut params = Vec::new();
        if let Some(dir) = &self.additional_hooks_dir {
            params.push(PsParam::single_quoted("-AdditionalHooksDir", dir));
        }
        if self.autouse_cached_vswitch {
            params.push(PsParam::switch("-UseCachedK8sVSwitches"));
        }
        if self.show_output {
            params.push(PsParam::switch("-ShowLogs"));
        }

        let script = build_script_command(&host::install_dir()?.join(START_SCRIPT), &params);

        let mut sink = TerminalSink::new(!self.show_output);
        let version = determine_ps_version(&config);
        let duration = powershell::execute(&script, version, &mut sink).await?;

        display::print_completed("winkube start", duration);

        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct StopCommand {
    /// Directory containing additional hooks to be executed
    #[arg(long)]
    pub additional_hooks_dir: Option<String>,

    /// Cache the vSwitches instead of removing them
    #[arg(long)]
    pub cache_vswitch: bool,

    /// Show all script output in the terminal
    #[arg(long, short = 'o')]
    pub show_output: bool,
}

impl StopCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let Some(config) = super::read_setup_for_command()? else {
            return Ok(());
        };

        let mut params = Vec::new();
        if let Some(dir) = &self.additional_hooks_dir {
            params.push(PsParam::single_quoted("-AdditionalHooksDir", dir));
        }
        if self.cache_vswitch {
            params.push(PsParam::switch("-CacheK8sVSwitches"));
        }
        if self.show_output {
            params.push(PsParam::switch("-ShowLogs"));
        }

        let script = build_script_command(&host::install_dir()?.join(STOP_SCRIPT), &params);

        let mut sink = TerminalSink::new(!self.show_output);
        let version = determine_ps_version(&config);
        let duration = powershell::execute(&script, version, &mut sink).await?;

        display::print_completed("winkube stop", duration);

        Ok(())
    }
}
