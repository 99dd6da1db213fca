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

/// Well-known script locations relative to the installation directory
pub const EXEC_WRAPPER_SCRIPT: &str = r"lib\scripts\winkube\base\Invoke-ExecScript.ps1";
pub const STATUS_SCRIPT: &str = r"lib\scripts\winkube\status\Get-Status.ps1";
pub const START_SCRIPT: &str = r"lib\scripts\winkube\lifecycle\Start-Cluster.ps1";
pub const STOP_SCRIPT: &str = r"lib\scripts\winkube\lifecycle\Stop-Cluster.ps1";
pub const INSTALL_SCRIPT: &str = r"lib\scripts\winkube\lifecycle\Install-Cluster.ps1";
pub const UNINSTALL_SCRIPT: &str = r"lib\scripts\winkube\lifecycle\Uninstall-Cluster.ps1";
pub const ADDONS_STATUS_SCRIPT: &str = r"lib\scripts\winkube\addons\Get-AddonsStatus.ps1";
pub const ADDON_ENABLE_SCRIPT: &str = r"lib\scripts\winkube\addons\Enable-Addon.ps1";
pub const ADDON_DISABLE_SCRIPT: &str = r"lib\scripts\winkube\addons\Disable-Addon.ps1";
pub const IMAGES_SCRIPT: &str = r"lib\scripts\winkube\image\Get-Images.ps1";
pub const IMAGE_RM_SCRIPT: &str = r"lib\scripts\winkube\image\Remove-Image.ps1";

/// Host configuration
pub const CONFIG_DIR_NAME: &str = "config";
pub const SETUP_CONFIG_FILE: &str = "setup.json";

/// Result-type tags agreed between CLI and scripts
pub const STATUS_MESSAGE_TYPE: &str = "ClusterStatus";
pub const ADDONS_MESSAGE_TYPE: &str = "AddonsStatus";
pub const IMAGES_MESSAGE_TYPE: &str = "StoredImages";
pub const CMD_RESULT_MESSAGE_TYPE: &str = "CmdResult";

/// Maximum stderr lines buffered before a forced flush to the log
pub const ERROR_LINE_LIMIT: usize = 100;
