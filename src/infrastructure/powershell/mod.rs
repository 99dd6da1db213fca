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

//! Bridge between the CLI and the external PowerShell scripts.
//!
//! Scripts are invoked through a well-known execution wrapper and can return
//! one strongly-typed result via the structured-output protocol while their
//! progress output is forwarded to the user line by line.

pub mod command;
pub mod decode;
pub mod runner;

use crate::infrastructure::host;
use crate::shared::error::{CliError, Result};
use runner::{ForwardingWriter, StructuredOutputWriter};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub use command::{build_script_command, format_script_call, PsParam};
pub use runner::{LineHandler, OutputSink, ProcessExecutor, TokioProcessExecutor};

const PS5_CMD_NAME: &str = "powershell";
const PS7_CMD_NAME: &str = "pwsh";

/// Supported major versions of the script interpreter.
///
/// The legacy interpreter (v5) ships with the OS and takes the command
/// string as a bare argument; the modern one (v7) must be installed
/// separately and takes it via `-Command`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerShellVersion {
    V5,
    V7,
}

impl PowerShellVersion {
    /// Parses a version tag carried as a string, e.g. from configuration.
    ///
    /// In-process callers hold the enum directly; this is the constructor
    /// for library consumers whose version selection arrives as text.
    ///
    /// ```
    /// use winkube::PowerShellVersion;
    ///
    /// assert_eq!(PowerShellVersion::parse("7")?, PowerShellVersion::V7);
    /// assert!(PowerShellVersion::parse("6").is_err());
    /// # Ok::<(), winkube::CliError>(())
    /// ```
    pub fn parse(tag: &str) -> Result<Self> {
        match tag {
            "5" => Ok(Self::V5),
            "7" => Ok(Self::V7),
            _ => Err(CliError::UnsupportedVersion(tag.to_string())),
        }
    }

    /// Maps the version to `(program, args)` for the given command string,
    /// probing for the modern interpreter first.
    fn command_line(self, cmd_string: String) -> Result<(&'static str, Vec<String>)> {
        match self {
            Self::V7 => {
                info!("Switching to PowerShell 7 command syntax");
                assert_pwsh_installed()?;
                Ok((PS7_CMD_NAME, vec!["-Command".to_string(), cmd_string]))
            }
            Self::V5 => {
                info!("Using PowerShell 5 command syntax");
                Ok((PS5_CMD_NAME, vec![cmd_string]))
            }
        }
    }
}

fn assert_pwsh_installed() -> Result<()> {
    let path = std::env::var_os("PATH").unwrap_or_default();

    for dir in std::env::split_paths(&path) {
        if dir.join(PS7_CMD_NAME).is_file()
            || dir.join(format!("{PS7_CMD_NAME}.exe")).is_file()
        {
            debug!("PowerShell 7 is installed");
            return Ok(());
        }
    }

    Err(CliError::InterpreterNotInstalled {
        name: PS7_CMD_NAME.to_string(),
    })
}

/// Runs a script and decodes its structured result into `T`.
///
/// Progress lines are written to the sink while the script runs; the call
/// returns only after the subprocess has exited. `params` must be built via
/// [`PsParam`] and are passed through in order without further escaping.
pub async fn execute_with_structured_result<T: DeserializeOwned>(
    script_path: &str,
    target_type: &str,
    version: PowerShellVersion,
    sink: &mut dyn OutputSink,
    params: &[PsParam],
) -> Result<T> {
    let cmd_string = command::build_cmd_string(script_path, target_type, params);
    let cmd_string = command::wrap_exec_script(&cmd_string, &host::install_dir()?);

    debug!(command = %cmd_string, "PS command created");

    let (program, args) = version.command_line(cmd_string)?;

    run_with_structured_result(&TokioProcessExecutor, program, &args, target_type, sink).await
}

/// Executor-parametrized variant of [`execute_with_structured_result`],
/// taking an already-built `(program, args)` invocation.
pub async fn run_with_structured_result<T: DeserializeOwned>(
    executor: &dyn ProcessExecutor,
    program: &str,
    args: &[String],
    target_type: &str,
    sink: &mut dyn OutputSink,
) -> Result<T> {
    let mut writer = StructuredOutputWriter::new(target_type, sink);
    executor.run(program, args, &mut writer).await?;

    let messages = writer.finish()?;

    convert_to_result(messages)
}

/// Runs a script that produces no structured result, returning the rounded
/// wall-clock duration of the run.
pub async fn execute(
    script: &str,
    version: PowerShellVersion,
    sink: &mut dyn OutputSink,
) -> Result<Duration> {
    let wrapped = command::wrap_exec_script(script, &host::install_dir()?);

    debug!(command = %wrapped, "PS command created");

    let (program, args) = version.command_line(wrapped)?;

    let started = Instant::now();
    let mut writer = ForwardingWriter::new(sink);
    TokioProcessExecutor.run(program, &args, &mut writer).await?;

    let seconds = started.elapsed().as_secs_f64().round() as u64;
    Ok(Duration::from_secs(seconds))
}

/// Enforces the single-result protocol and deserializes the payload.
fn convert_to_result<T: DeserializeOwned>(messages: Vec<Vec<u8>>) -> Result<T> {
    if messages.is_empty() {
        return Err(CliError::NoMessages);
    }

    if messages.len() != 1 {
        return Err(CliError::UnexpectedMessageCount {
            count: messages.len(),
        });
    }

    debug!("Unmarshalling message");

    serde_json::from_slice(&messages[0]).map_err(CliError::UnmarshalFailure)
}
