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

use thiserror::Error;
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("PowerShell version '{0}' is not supported")]
    UnsupportedVersion(String),

    #[error("'{name}' is not installed. Please install PowerShell 7: https://learn.microsoft.com/en-us/powershell/scripting/install/installing-powershell-on-windows")]
    InterpreterNotInstalled { name: String },

    #[error("command execution could not be started: {0}")]
    ProcessSpawnFailure(#[source] std::io::Error),

    #[error("command execution failed, see log output above. Error: exit code {code}")]
    ProcessExitFailure { code: i32 },

    #[error("message malformed, found {segments} parts")]
    MalformedFragment { segments: usize },

    #[error("message type mismatch: expected '{expected}', but got '{actual}'")]
    TypeMismatch { expected: String, actual: String },

    #[error("base64 decoding failed: {0}")]
    Base64DecodeFailure(#[source] base64::DecodeError),

    #[error("payload decompression failed: {0}")]
    DecompressionFailure(#[source] std::io::Error),

    #[error("no structured messages received")]
    NoMessages,

    #[error("unexpected number of messages. Expected 1, but got {count}")]
    UnexpectedMessageCount { count: usize },

    #[error("could not unmarshal message: {0}")]
    UnmarshalFailure(#[source] serde_json::Error),

    #[error("errors occurred during execution:\n{}", join_errors(.0))]
    FragmentErrors(Vec<CliError>),

    #[error("system is not installed")]
    SystemNotInstalled,

    #[error("system is in corrupted state")]
    SystemInCorruptedState,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl CliError {
    pub fn config_error(context: impl Into<String>) -> Self {
        Self::ConfigError(context.into())
    }
}

fn join_errors(errors: &[CliError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
