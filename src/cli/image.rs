//! Container image management commands

use super::display::{self, TableRenderer, TerminalSink};
use crate::domain::images::LoadedImages;
use crate::domain::setup::{determine_ps_version, SetupName};
use crate::domain::status::CmdResult;
use crate::infrastructure::constants::{
    CMD_RESULT_MESSAGE_TYPE, IMAGES_MESSAGE_TYPE, IMAGES_SCRIPT, IMAGE_RM_SCRIPT,
};
use crate::infrastructure::host;
use crate::infrastructure::powershell::{self, format_script_call, PsParam};
use clap::Parser;
use std::time::Instant;

const JSON_OPTION: &str = "json";

#[derive(Parser, Debug)]
pub struct ImageCommand {
    #[command(subcommand)]
    pub command: ImageCommands,
}

#[derive(clap::Subcommand, Debug)]
pub enum ImageCommands {
    /// List container images stored in the cluster
    Ls(ImageLsCommand),

    /// Remove a container image by id or name
    Rm(ImageRmCommand),
}

impl ImageCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        match &self.command {
            ImageCommands::Ls(cmd) => cmd.execute().await,
            ImageCommands::Rm(cmd) => cmd.execute().await,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ImageLsCommand {
    /// Include kubernetes container images
    #[arg(long, short = 'A')]
    pub include_k8s_images: bool,

    /// Output format modifier. Currently supported: 'json' for output as JSON structure
    #[arg(long, short = 'o')]
    pub output: Option<String>,
}

impl ImageLsCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        match self.output.as_deref() {
            None | Some(JSON_OPTION) => {}
            Some(other) => anyhow::bail!("parameter '{other}' not supported for flag 'o'"),
        }

        let Some(config) = super::read_setup_for_command()? else {
            return Ok(());
        };

        let mut params = Vec::new();
        if self.include_k8s_images {
            params.push(PsParam::switch("-IncludeK8sImages"));
        }

        let script = format_script_call(&host::install_dir()?.join(IMAGES_SCRIPT));
        let mut sink = TerminalSink::default();
        let version = determine_ps_version(&config);

        let images: LoadedImages = powershell::execute_with_structured_result(
            &script,
            IMAGES_MESSAGE_TYPE,
            version,
            &mut sink,
            &params,
        )
        .await?;

        if self.output.as_deref() == Some(JSON_OPTION) {
            println!("{}", serde_json::to_string_pretty(&images)?);
            return Ok(());
        }

        if let Some(failure) = &images.failure {
            display::print_failure(&failure.message);
            return Ok(());
        }

        let renderer = TableRenderer::new();
        println!("{}", renderer.render_images(&images.container_images));

        if let Some(registry) = images.container_registry.as_deref().filter(|r| !r.is_empty()) {
            if images.pushed_images.is_empty() {
                println!("No pushed images in registry {registry}");
            } else {
                println!("Images pushed to registry {registry}:");
                for image in &images.pushed_images {
                    println!("  {}:{}", image.name, image.tag);
                }
            }
        }

        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ImageRmCommand {
    /// Image ID of the container image
    #[arg(long)]
    pub id: Option<String>,

    /// Name of the container image, e.g. 'registry.local/alpine:v1'
    #[arg(long)]
    pub name: Option<String>,

    /// Remove the image from the local registry (requires the registry addon)
    #[arg(long)]
    pub from_registry: bool,

    /// Show all script output in the terminal
    #[arg(long, short = 'o')]
    pub show_output: bool,
}

impl ImageRmCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        if self.id.is_none() && self.name.is_none() {
            anyhow::bail!("either flag 'id' or flag 'name' must be provided");
        }

        let Some(config) = super::read_setup_for_command()? else {
            return Ok(());
        };

        if config.setup_name == SetupName::MultiVm {
            anyhow::bail!("'image rm' is not available for the multi-vm setup");
        }

        let mut params = Vec::new();
        if let Some(id) = &self.id {
            params.push(PsParam::single_quoted("-ImageId", id));
        }
        if let Some(name) = &self.name {
            params.push(PsParam::single_quoted("-ImageName", name));
        }
        if self.from_registry {
            params.push(PsParam::switch("-FromRegistry"));
        }
        if self.show_output {
            params.push(PsParam::switch("-ShowLogs"));
        }

        let script = format_script_call(&host::install_dir()?.join(IMAGE_RM_SCRIPT));
        let mut sink = TerminalSink::new(!self.show_output);
        let version = determine_ps_version(&config);

        let started = Instant::now();

        let result: CmdResult = powershell::execute_with_structured_result(
            &script,
            CMD_RESULT_MESSAGE_TYPE,
            version,
            &mut sink,
            &params,
        )
        .await?;

        if let Some(failure) = &result.failure {
            display::print_failure(&failure.message);
            anyhow::bail!("'image rm' failed with code '{}'", failure.code);
        }

        display::print_completed("winkube image rm", started.elapsed());

        Ok(())
    }
}
