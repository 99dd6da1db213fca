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

//! End-to-end tests of the structured-result execution path against a stub
//! subprocess standing in for the script interpreter.

#![cfg(unix)]

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use winkube::{run_with_structured_result, CliError, OutputSink, TokioProcessExecutor};

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

fn encode_payload(payload: &[u8]) -> String {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(payload).unwrap();
    BASE64.encode(encoder.finish().unwrap())
}

fn stub_args(script: &str) -> Vec<String> {
    vec!["-c".to_string(), script.to_string()]
}

#[tokio::test]
async fn plain_line_then_fragment_yields_typed_result() {
    let encoded = encode_payload(b"[\"ok\"]");
    let script = format!("echo 'applying manifests'; echo '#pm#T#{encoded}'");

    let mut sink = RecordingSink::default();
    let result: Vec<String> = run_with_structured_result(
        &TokioProcessExecutor,
        "sh",
        &stub_args(&script),
        "T",
        &mut sink,
    )
    .await
    .unwrap();

    assert_eq!(result, vec!["ok"]);
    // The plain line reached the sink; the fragment line never did.
    assert_eq!(sink.out, vec!["applying manifests"]);
    assert!(sink.flushed);
}

#[tokio::test]
async fn payload_split_across_fragments_decodes_like_one() {
    let encoded = encode_payload(b"{\"name\":\"cluster-1\"}");
    let (first, second) = encoded.split_at(encoded.len() / 2);
    let script = format!("echo '#pm#T#{first}'; echo '#pm#T#{second}'");

    #[derive(serde::Deserialize)]
    struct Payload {
        name: String,
    }

    let mut sink = RecordingSink::default();
    let result: Payload = run_with_structured_result(
        &TokioProcessExecutor,
        "sh",
        &stub_args(&script),
        "T",
        &mut sink,
    )
    .await
    .unwrap();

    assert_eq!(result.name, "cluster-1");
}

#[tokio::test]
async fn stderr_is_forwarded_while_result_still_decodes() {
    let encoded = encode_payload(b"\"fine\"");
    let script = format!("echo 'warning: slow disk' >&2; echo '#pm#T#{encoded}'");

    let mut sink = RecordingSink::default();
    let result: String = run_with_structured_result(
        &TokioProcessExecutor,
        "sh",
        &stub_args(&script),
        "T",
        &mut sink,
    )
    .await
    .unwrap();

    assert_eq!(result, "fine");
    assert_eq!(sink.err, vec!["warning: slow disk"]);
}

#[tokio::test]
async fn no_fragments_reports_no_messages() {
    let mut sink = RecordingSink::default();
    let err = run_with_structured_result::<String>(
        &TokioProcessExecutor,
        "sh",
        &stub_args("echo 'just progress'"),
        "T",
        &mut sink,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, CliError::NoMessages));
    assert_eq!(sink.out, vec!["just progress"]);
}

#[tokio::test]
async fn foreign_message_type_surfaces_after_exit() {
    let encoded = encode_payload(b"\"ignored\"");
    let script = format!("echo '#pm#Other#{encoded}'");

    let mut sink = RecordingSink::default();
    let err = run_with_structured_result::<String>(
        &TokioProcessExecutor,
        "sh",
        &stub_args(&script),
        "T",
        &mut sink,
    )
    .await
    .unwrap_err();

    match err {
        CliError::FragmentErrors(errors) => {
            assert_eq!(errors.len(), 1);
            assert!(matches!(
                &errors[0],
                CliError::TypeMismatch { expected, actual }
                    if expected == "T" && actual == "Other"
            ));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn nonzero_exit_short_circuits_decoding() {
    let encoded = encode_payload(b"\"never seen\"");
    let script = format!("echo '#pm#T#{encoded}'; exit 7");

    let mut sink = RecordingSink::default();
    let err = run_with_structured_result::<String>(
        &TokioProcessExecutor,
        "sh",
        &stub_args(&script),
        "T",
        &mut sink,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, CliError::ProcessExitFailure { code: 7 }));
}

async fn wait_for_pid(path: &Path) -> u32 {
    loop {
        if let Ok(text) = tokio::fs::read_to_string(path).await {
            if let Ok(pid) = text.trim().parse() {
                return pid;
            }
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
}

/// A killed child may linger as a zombie until the runtime reaps it; both
/// states count as no longer running.
fn process_gone(pid: u32) -> bool {
    match std::fs::read_to_string(format!("/proc/{pid}/stat")) {
        Ok(stat) => stat.contains(") Z "),
        Err(_) => true,
    }
}

#[tokio::test]
async fn dropping_the_run_future_kills_the_subprocess() {
    let dir = tempfile::tempdir().unwrap();
    let pid_file = dir.path().join("pid");
    let script = format!("echo $$ > '{}'; sleep 30", pid_file.display());

    let pid = {
        let mut sink = RecordingSink::default();
        let args = stub_args(&script);
        let run = run_with_structured_result::<String>(
            &TokioProcessExecutor,
            "sh",
            &args,
            "T",
            &mut sink,
        );
        tokio::pin!(run);

        let pid = tokio::select! {
            _ = &mut run => panic!("stub exited before it was cancelled"),
            pid = wait_for_pid(&pid_file) => pid,
        };

        // the pinned run future is dropped here, before process exit
        pid
    };

    let mut gone = false;
    for _ in 0..100 {
        if process_gone(pid) {
            gone = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    assert!(gone, "subprocess {pid} kept running after its invocation was dropped");
}
