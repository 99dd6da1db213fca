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

//! Assembly of the literal PowerShell invocation line.

use crate::infrastructure::constants::EXEC_WRAPPER_SCRIPT;
use std::fmt;
use std::path::Path;

/// A single script parameter, escaped exactly once at construction time.
///
/// The command builder concatenates parameters verbatim, so all quoting has
/// to happen through these constructors. Call sites must not pass quoted
/// strings of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PsParam(String);

impl PsParam {
    /// A bare switch, e.g. `-ShowLogs`.
    pub fn switch(name: &str) -> Self {
        Self(name.to_string())
    }

    /// A named value in single quotes, e.g. `-AdditionalHooksDir 'D:\hooks'`.
    pub fn single_quoted(name: &str, value: &str) -> Self {
        Self(format!("{name} '{value}'"))
    }

    /// A named value in double quotes, e.g. `-Proxy "http://proxy:8080"`.
    pub fn double_quoted(name: &str, value: &str) -> Self {
        Self(format!("{name} \"{value}\""))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PsParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Call operator form of a script path, e.g. `&'C:\winkube\...\Get-Status.ps1'`.
pub fn format_script_call(script_path: &Path) -> String {
    format!("&'{}'", script_path.display())
}

/// Builds a plain invocation of a script with its parameters, for scripts
/// producing no structured result.
pub fn build_script_command(script_path: &Path, params: &[PsParam]) -> String {
    let mut cmd = format_script_call(script_path);

    for param in params {
        cmd.push(' ');
        cmd.push_str(param.as_str());
    }

    cmd
}

/// Builds the structured-output invocation for a script:
/// `<script> -EncodeStructuredOutput -MessageType <tag> <params...>`.
/// Parameter order is preserved.
pub(crate) fn build_cmd_string(script_path: &str, target_type: &str, params: &[PsParam]) -> String {
    let mut cmd = format!("{script_path} -EncodeStructuredOutput -MessageType {target_type}");

    for param in params {
        cmd.push(' ');
        cmd.push_str(param.as_str());
    }

    cmd
}

/// Wraps an assembled command string into the well-known execution wrapper,
/// which takes care of transcript logging on the script side. The command
/// string is passed as one double-quoted argument.
pub(crate) fn wrap_exec_script(cmd_string: &str, install_dir: &Path) -> String {
    format!(
        "&'{}\\{}' -Script \"{}\"",
        install_dir.display(),
        EXEC_WRAPPER_SCRIPT,
        cmd_string
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_cmd_string_without_params() {
        let cmd = build_cmd_string("&'C:\\s\\Get-Status.ps1'", "ClusterStatus", &[]);
        assert_eq!(
            cmd,
            "&'C:\\s\\Get-Status.ps1' -EncodeStructuredOutput -MessageType ClusterStatus"
        );
    }

    #[test]
    fn test_cmd_string_preserves_param_order() {
        let params = vec![
            PsParam::switch("-ShowLogs"),
            PsParam::single_quoted("-AdditionalHooksDir", "D:\\hooks"),
            PsParam::switch("-CacheVSwitch"),
        ];

        let cmd = build_cmd_string("script.ps1", "T", &params);
        assert_eq!(
            cmd,
            "script.ps1 -EncodeStructuredOutput -MessageType T \
             -ShowLogs -AdditionalHooksDir 'D:\\hooks' -CacheVSwitch"
        );
    }

    #[test]
    fn test_params_are_not_re_escaped() {
        let param = PsParam::single_quoted("-Name", "ingress");
        let cmd = build_cmd_string("s.ps1", "T", &[param]);
        assert!(cmd.ends_with("-Name 'ingress'"));
        assert!(!cmd.contains("''"));
        assert!(!cmd.contains("\"'"));
    }

    #[test]
    fn test_wrapped_form() {
        let wrapped = wrap_exec_script("s.ps1 -EncodeStructuredOutput -MessageType T", &PathBuf::from("C:\\winkube"));
        assert_eq!(
            wrapped,
            "&'C:\\winkube\\lib\\scripts\\winkube\\base\\Invoke-ExecScript.ps1' \
             -Script \"s.ps1 -EncodeStructuredOutput -MessageType T\""
        );
    }

    #[test]
    fn test_script_command_with_params() {
        let cmd = build_script_command(
            &PathBuf::from("C:\\winkube\\Start-Cluster.ps1"),
            &[PsParam::switch("-ShowLogs")],
        );
        assert_eq!(cmd, "&'C:\\winkube\\Start-Cluster.ps1' -ShowLogs");
    }

    #[test]
    fn test_format_script_call() {
        let call = format_script_call(&PathBuf::from("C:\\winkube\\lib\\scripts\\winkube\\status\\Get-Status.ps1"));
        assert_eq!(
            call,
            "&'C:\\winkube\\lib\\scripts\\winkube\\status\\Get-Status.ps1'"
        );
    }
}
