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

//! Subprocess spawning with line-by-line output streaming.

use crate::infrastructure::constants::ERROR_LINE_LIMIT;
use crate::infrastructure::powershell::decode::{self, FragmentBuffer};
use crate::shared::error::{CliError, Result};
use crate::shared::logging::ErrorLineBuffer;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::debug;

/// Line-oriented consumer of subprocess output, used for live progress
/// display while a script runs.
pub trait OutputSink: Send {
    fn write_std_out(&mut self, line: &str);
    fn write_std_err(&mut self, line: &str);
    fn flush(&mut self);
}

/// Receiver of classified output lines during a subprocess run.
///
/// `flush` is invoked once both output streams have closed, before the
/// process exit status is evaluated.
pub trait LineHandler: Send {
    fn on_std_out(&mut self, line: &str);
    fn on_std_err(&mut self, line: &str);
    fn flush(&mut self);
}

/// Spawns `(program, args...)` and streams its output to a handler,
/// returning only after process exit.
#[async_trait::async_trait]
pub trait ProcessExecutor: Send + Sync {
    async fn run(&self, program: &str, args: &[String], handler: &mut dyn LineHandler)
        -> Result<()>;
}

/// Tokio-based executor with one dedicated reader task per output stream.
///
/// The child is spawned with `kill_on_drop`, so dropping the future returned
/// by [`ProcessExecutor::run`] (e.g. from a caller-side timeout) kills the
/// subprocess and releases its handles.
pub struct TokioProcessExecutor;

#[async_trait::async_trait]
impl ProcessExecutor for TokioProcessExecutor {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        handler: &mut dyn LineHandler,
    ) -> Result<()> {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = command.spawn().map_err(CliError::ProcessSpawnFailure)?;

        let stdout = child.stdout.take().ok_or_else(|| {
            CliError::ProcessSpawnFailure(std::io::Error::other("stdout pipe missing"))
        })?;
        let stderr = child.stderr.take().ok_or_else(|| {
            CliError::ProcessSpawnFailure(std::io::Error::other("stderr pipe missing"))
        })?;

        debug!(program, "Command started");

        let (out_tx, mut out_rx) = mpsc::channel::<String>(64);
        let (err_tx, mut err_rx) = mpsc::channel::<String>(64);

        let out_task = tokio::spawn(read_lines(stdout, out_tx));
        let err_task = tokio::spawn(read_lines(stderr, err_tx));

        let mut out_open = true;
        let mut err_open = true;

        while out_open || err_open {
            tokio::select! {
                line = out_rx.recv(), if out_open => match line {
                    Some(line) => handler.on_std_out(&line),
                    None => {
                        out_open = false;
                        debug!(channel = "stdout", "Channel closed");
                    }
                },
                line = err_rx.recv(), if err_open => match line {
                    Some(line) => handler.on_std_err(&line),
                    None => {
                        err_open = false;
                        debug!(channel = "stderr", "Channel closed");
                    }
                },
            }
        }

        handler.flush();

        let _ = futures::future::join(out_task, err_task).await;

        debug!("Waiting for command to finish");

        let status = child.wait().await?;
        if !status.success() {
            return Err(CliError::ProcessExitFailure {
                code: status.code().unwrap_or(-1),
            });
        }

        debug!("Command finished");

        Ok(())
    }
}

async fn read_lines<R>(stream: R, tx: mpsc::Sender<String>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    debug!(routine = "read_lines", "Routine started");

    let mut lines = BufReader::new(stream).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        if tx.send(line).await.is_err() {
            break;
        }
    }

    debug!(routine = "read_lines", "Routine finished");
}

/// Demultiplexer for structured-result invocations.
///
/// Stdout lines carrying the message marker are buffered for decoding after
/// process exit, everything else is forwarded verbatim to the sink. Stderr
/// lines are forwarded and additionally recorded for aggregate logging.
/// One instance exists per invocation; nothing is shared across calls.
pub(crate) struct StructuredOutputWriter<'a> {
    buffer: FragmentBuffer,
    error_lines: ErrorLineBuffer,
    sink: &'a mut dyn OutputSink,
}

impl<'a> StructuredOutputWriter<'a> {
    pub(crate) fn new(target_type: &str, sink: &'a mut dyn OutputSink) -> Self {
        Self {
            buffer: FragmentBuffer::new(target_type),
            error_lines: ErrorLineBuffer::new(ERROR_LINE_LIMIT),
            sink,
        }
    }

    pub(crate) fn finish(self) -> Result<Vec<Vec<u8>>> {
        self.buffer.finish()
    }
}

impl LineHandler for StructuredOutputWriter<'_> {
    fn on_std_out(&mut self, line: &str) {
        if decode::is_encoded_message(line) {
            self.buffer.push(line);
        } else {
            self.sink.write_std_out(line);
        }
    }

    fn on_std_err(&mut self, line: &str) {
        self.error_lines.push(line);
        self.sink.write_std_err(line);
    }

    fn flush(&mut self) {
        self.sink.flush();
        self.error_lines.flush();
    }
}

/// Pass-through handler for scripts producing no structured result.
pub(crate) struct ForwardingWriter<'a> {
    error_lines: ErrorLineBuffer,
    sink: &'a mut dyn OutputSink,
}

impl<'a> ForwardingWriter<'a> {
    pub(crate) fn new(sink: &'a mut dyn OutputSink) -> Self {
        Self {
            error_lines: ErrorLineBuffer::new(ERROR_LINE_LIMIT),
            sink,
        }
    }
}

impl LineHandler for ForwardingWriter<'_> {
    fn on_std_out(&mut self, line: &str) {
        self.sink.write_std_out(line);
    }

    fn on_std_err(&mut self, line: &str) {
        self.error_lines.push(line);
        self.sink.write_std_err(line);
    }

    fn flush(&mut self) {
        self.sink.flush();
        self.error_lines.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        out: Vec<String>,
        err: Vec<String>,
        flushed: bool,
    }

    impl OutputSink for RecordingSink {
        fn write_std_out(&mut self, line: &str) {
            self.out.push(line.to_string());
        }

        fn write_std_err(&mut self, line: &str) {
            self.err.push(line.to_string());
        }

        fn flush(&mut self) {
            self.flushed = true;
        }
    }

    #[test]
    fn test_plain_lines_are_forwarded_not_buffered() {
        let mut sink = RecordingSink::default();
        let mut writer = StructuredOutputWriter::new("T", &mut sink);

        writer.on_std_out("plain progress");
        writer.on_std_out("#pm"); // no trailing hash, still plain

        let messages = writer.finish().unwrap();
        assert!(messages.is_empty());
        assert_eq!(sink.out, vec!["plain progress", "#pm"]);
    }

    #[test]
    fn test_marker_lines_enter_the_fragment_buffer() {
        let mut sink = RecordingSink::default();
        let mut writer = StructuredOutputWriter::new("T", &mut sink);

        writer.on_std_out("#pm#T#H4sIAAAAAAAAAytJLS7RzU0tLk5MTwUAWnKJhAwAAAA=");

        let messages = writer.finish().unwrap();
        assert_eq!(messages, vec![b"test-message".to_vec()]);
        assert!(sink.out.is_empty());
    }

    #[test]
    fn test_stderr_lines_reach_the_error_sink() {
        let mut sink = RecordingSink::default();
        let mut writer = StructuredOutputWriter::new("T", &mut sink);

        writer.on_std_err("something failed");
        writer.flush();

        assert_eq!(sink.err, vec!["something failed"]);
        assert!(sink.flushed);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_executor_streams_both_channels_and_reports_exit() {
        struct Collector {
            out: Vec<String>,
            err: Vec<String>,
        }

        impl LineHandler for Collector {
            fn on_std_out(&mut self, line: &str) {
                self.out.push(line.to_string());
            }
            fn on_std_err(&mut self, line: &str) {
                self.err.push(line.to_string());
            }
            fn flush(&mut self) {}
        }

        let mut handler = Collector {
            out: Vec::new(),
            err: Vec::new(),
        };

        let args = vec![
            "-c".to_string(),
            "echo out-line; echo err-line >&2".to_string(),
        ];
        TokioProcessExecutor
            .run("sh", &args, &mut handler)
            .await
            .unwrap();

        assert_eq!(handler.out, vec!["out-line"]);
        assert_eq!(handler.err, vec!["err-line"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_executor_propagates_nonzero_exit() {
        struct Ignore;
        impl LineHandler for Ignore {
            fn on_std_out(&mut self, _: &str) {}
            fn on_std_err(&mut self, _: &str) {}
            fn flush(&mut self) {}
        }

        let args = vec!["-c".to_string(), "exit 3".to_string()];
        let err = TokioProcessExecutor
            .run("sh", &args, &mut Ignore)
            .await
            .unwrap_err();

        assert!(matches!(err, CliError::ProcessExitFailure { code: 3 }));
    }

    #[tokio::test]
    async fn test_executor_reports_spawn_failure() {
        struct Ignore;
        impl LineHandler for Ignore {
            fn on_std_out(&mut self, _: &str) {}
            fn on_std_err(&mut self, _: &str) {}
            fn flush(&mut self) {}
        }

        let err = TokioProcessExecutor
            .run("definitely-not-an-executable", &[], &mut Ignore)
            .await
            .unwrap_err();

        assert!(matches!(err, CliError::ProcessSpawnFailure(_)));
    }
}
