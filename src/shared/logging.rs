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

use tracing::error;

/// Bounded collector for stderr lines of an external script run.
///
/// Lines are kept in memory while the script streams and are emitted to the
/// structured log in one batch, either when the limit is reached or when the
/// owner flushes after process exit.
#[derive(Debug)]
pub struct ErrorLineBuffer {
    limit: usize,
    lines: Vec<String>,
}

impl ErrorLineBuffer {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            lines: Vec::new(),
        }
    }

    pub fn push(&mut self, line: &str) {
        self.lines.push(line.to_string());

        if self.lines.len() >= self.limit {
            self.flush();
        }
    }

    pub fn flush(&mut self) {
        if self.lines.is_empty() {
            return;
        }

        error!(
            count = self.lines.len(),
            lines = %self.lines.join("\n"),
            "Flushing error lines"
        );

        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flush_clears_buffered_lines() {
        let mut buffer = ErrorLineBuffer::new(10);
        buffer.push("first");
        buffer.push("second");
        assert!(!buffer.is_empty());

        buffer.flush();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_reaching_limit_drains_buffer() {
        let mut buffer = ErrorLineBuffer::new(2);
        buffer.push("first");
        assert!(!buffer.is_empty());

        buffer.push("second");
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_flush_on_empty_buffer_is_a_no_op() {
        let mut buffer = ErrorLineBuffer::new(2);
        buffer.flush();
        assert!(buffer.is_empty());
    }
}
