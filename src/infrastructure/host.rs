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

use crate::infrastructure::constants::CONFIG_DIR_NAME;
use crate::shared::error::{CliError, Result};
use std::path::PathBuf;

/// Installation directory, i.e. the directory containing the CLI executable.
/// Scripts and host configuration live underneath it.
pub fn install_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;

    exe.parent()
        .map(|dir| dir.to_path_buf())
        .ok_or_else(|| CliError::config_error("executable directory could not be determined"))
}

pub fn config_dir() -> Result<PathBuf> {
    Ok(install_dir()?.join(CONFIG_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_is_below_install_dir() {
        let install = install_dir().unwrap();
        let config = config_dir().unwrap();
        assert_eq!(config.parent().unwrap(), install.as_path());
        assert!(config.ends_with(CONFIG_DIR_NAME));
    }
}
