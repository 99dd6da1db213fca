// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Installed-setup configuration written by the installation scripts.

use crate::infrastructure::constants::SETUP_CONFIG_FILE;
use crate::infrastructure::powershell::PowerShellVersion;
use crate::shared::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Flavor of the installed cluster setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetupName {
    #[serde(rename = "Host")]
    Host,
    #[serde(rename = "MultiVm")]
    MultiVm,
    #[serde(rename = "BuildOnly")]
    BuildOnly,
}

/// Contents of `setup.json` in the host config directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetupConfig {
    #[serde(rename = "SetupType")]
    pub setup_name: SetupName,
    #[serde(default)]
    pub registries: Vec<String>,
    #[serde(default)]
    pub linux_only: bool,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub control_plane_node_hostname: String,
    #[serde(default)]
    pub corrupted: bool,
}

/// Reads the setup config, mapping a missing file to `SystemNotInstalled`
/// and the corrupted flag to `SystemInCorruptedState`.
pub fn read_config(config_dir: &Path) -> Result<SetupConfig> {
    let path = config_dir.join(SETUP_CONFIG_FILE);

    let raw = match std::fs::read(&path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "Setup config file not found, assuming setup is not installed");
            return Err(CliError::SystemNotInstalled);
        }
        Err(err) => return Err(err.into()),
    };

    let config: SetupConfig = serde_json::from_slice(&raw)?;

    if config.corrupted {
        return Err(CliError::SystemInCorruptedState);
    }

    Ok(config)
}

/// Multi-VM setups drive a Linux VM through the modern interpreter; all
/// other setups stay on the legacy one.
pub fn determine_ps_version(config: &SetupConfig) -> PowerShellVersion {
    if config.setup_name == SetupName::MultiVm && !config.linux_only {
        PowerShellVersion::V7
    } else {
        PowerShellVersion::V5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, content: &str) {
        std::fs::write(dir.join(SETUP_CONFIG_FILE), content).unwrap();
    }

    #[test]
    fn test_missing_file_means_not_installed() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_config(dir.path()).unwrap_err();
        assert!(matches!(err, CliError::SystemNotInstalled));
    }

    #[test]
    fn test_corrupted_flag_means_corrupted_state() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            r#"{"SetupType": "Host", "Corrupted": true}"#,
        );

        let err = read_config(dir.path()).unwrap_err();
        assert!(matches!(err, CliError::SystemInCorruptedState));
    }

    #[test]
    fn test_valid_config_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            r#"{
                "SetupType": "MultiVm",
                "Registries": ["registry.local"],
                "LinuxOnly": false,
                "Version": "1.2.3",
                "ControlPlaneNodeHostname": "cp-1"
            }"#,
        );

        let config = read_config(dir.path()).unwrap();
        assert_eq!(config.setup_name, SetupName::MultiVm);
        assert_eq!(config.registries, vec!["registry.local"]);
        assert_eq!(config.version, "1.2.3");
        assert!(!config.corrupted);
    }

    #[test]
    fn test_multi_vm_uses_modern_interpreter() {
        let config = SetupConfig {
            setup_name: SetupName::MultiVm,
            registries: Vec::new(),
            linux_only: false,
            version: String::new(),
            control_plane_node_hostname: String::new(),
            corrupted: false,
        };

        assert_eq!(determine_ps_version(&config), PowerShellVersion::V7);
    }

    #[test]
    fn test_linux_only_and_host_setups_use_legacy_interpreter() {
        let mut config = SetupConfig {
            setup_name: SetupName::MultiVm,
            registries: Vec::new(),
            linux_only: true,
            version: String::new(),
            control_plane_node_hostname: String::new(),
            corrupted: false,
        };
        assert_eq!(determine_ps_version(&config), PowerShellVersion::V5);

        config.setup_name = SetupName::Host;
        config.linux_only = false;
        assert_eq!(determine_ps_version(&config), PowerShellVersion::V5);
    }
}
