// CLI command definitions

use super::addons::AddonsCommand;
use super::image::ImageCommand;
use super::lifecycle::{InstallCommand, StartCommand, StopCommand, UninstallCommand};
use super::status::StatusCommand;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "winkube",
    version,
    about = "CLI for a Windows-hosted Kubernetes cluster",
    long_about = "Installs and operates a Kubernetes cluster on a Windows host by dispatching to the bundled automation scripts"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Install the cluster on this machine
    Install(InstallCommand),

    /// Uninstall the cluster from this machine
    Uninstall(UninstallCommand),

    /// Start the cluster
    Start(StartCommand),

    /// Stop the cluster
    Stop(StopCommand),

    /// Show cluster status
    Status(StatusCommand),

    /// Manage addons
    Addons(AddonsCommand),

    /// Manage container images
    Image(ImageCommand),
}
