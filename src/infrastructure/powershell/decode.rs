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

//! Decoding of structured script output.
//!
//! Scripts emit structured results on stdout as marked lines of the form
//! `#pm#<type>#<chunk>`, where the full payload is `base64(gzip(bytes))` and
//! may be split across several marked lines carrying successive chunks.
//! Everything else on stdout is human-readable progress text.

use crate::shared::error::{CliError, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use flate2::read::GzDecoder;
use std::io::Read;
use tracing::debug;

/// Prefix marking a stdout line as an encoded message fragment.
pub const MESSAGE_MARKER: &str = "#pm#";

/// Segment count of a well-formed fragment line when split on `#`:
/// empty, `pm`, declared type, payload chunk.
const FRAGMENT_SEGMENTS: usize = 4;

/// Cheap per-line check, runs on every stdout line.
pub fn is_encoded_message(line: &str) -> bool {
    line.starts_with(MESSAGE_MARKER)
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Fragment<'a> {
    pub message_type: &'a str,
    pub chunk: &'a str,
}

pub(crate) fn parse_fragment(line: &str) -> Result<Fragment<'_>> {
    let segments: Vec<&str> = line.split('#').collect();

    if segments.len() != FRAGMENT_SEGMENTS {
        return Err(CliError::MalformedFragment {
            segments: segments.len(),
        });
    }

    Ok(Fragment {
        message_type: segments[2],
        chunk: segments[3],
    })
}

/// Reverses the `base64(gzip(bytes))` encoding of a complete payload.
pub(crate) fn decode_payload(encoded: &str) -> Result<Vec<u8>> {
    let compressed = BASE64
        .decode(encoded)
        .map_err(CliError::Base64DecodeFailure)?;

    let mut decoder = GzDecoder::new(compressed.as_slice());
    let mut payload = Vec::new();
    decoder
        .read_to_end(&mut payload)
        .map_err(CliError::DecompressionFailure)?;

    Ok(payload)
}

/// Per-invocation buffer for raw fragment lines.
///
/// Lines are buffered as received and only parsed and decoded once the
/// subprocess has exited, so a bad fragment never interrupts live output
/// streaming. Fragment-level errors are collected and surface in aggregate
/// from [`FragmentBuffer::finish`].
#[derive(Debug)]
pub(crate) struct FragmentBuffer {
    target_type: String,
    lines: Vec<String>,
}

impl FragmentBuffer {
    pub(crate) fn new(target_type: &str) -> Self {
        Self {
            target_type: target_type.to_string(),
            lines: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    /// Decodes all buffered fragments into logical messages.
    ///
    /// Chunks of fragments whose declared type matches the target type are
    /// concatenated in arrival order and decoded as one payload. Fragments
    /// with a foreign type or a malformed shape are dropped and reported via
    /// `FragmentErrors`. An empty buffer decodes to no messages.
    pub(crate) fn finish(self) -> Result<Vec<Vec<u8>>> {
        let mut chunks = String::new();
        let mut accepted = 0usize;
        let mut errors = Vec::new();

        for line in &self.lines {
            match parse_fragment(line) {
                Ok(fragment) if fragment.message_type == self.target_type => {
                    chunks.push_str(fragment.chunk);
                    accepted += 1;
                }
                Ok(fragment) => errors.push(CliError::TypeMismatch {
                    expected: self.target_type.clone(),
                    actual: fragment.message_type.to_string(),
                }),
                Err(err) => errors.push(err),
            }
        }

        if !errors.is_empty() {
            return Err(CliError::FragmentErrors(errors));
        }

        if accepted == 0 {
            return Ok(Vec::new());
        }

        debug!(fragments = accepted, "Decoding buffered fragments");

        Ok(vec![decode_payload(&chunks)?])
    }
}
