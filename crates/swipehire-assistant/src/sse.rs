//! Server-sent event line framing

use crate::error::{Error, Result};

/// Upper bound on buffered, not-yet-framed bytes.
///
/// The framer re-queues a `data:` line whose JSON payload fails to parse, on
/// the assumption the payload was split across a transport chunk boundary.
/// A permanently malformed payload would otherwise buffer forever; once the
/// pending buffer crosses this bound the turn fails with a framing error.
pub const MAX_PENDING_BYTES: usize = 256 * 1024;

/// One classified line of the event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolLine<'a> {
    /// Comment / keepalive (`:` prefix)
    Comment,
    /// Empty or whitespace-only line
    Blank,
    /// `data: ` line carrying an event payload (trimmed)
    Data(&'a str),
    /// `data: [DONE]`, end of the event stream
    Terminator,
    /// Any other prefix; dropped without error
    Ignored,
}

impl<'a> ProtocolLine<'a> {
    /// Classify a single line (newline already stripped).
    pub fn classify(line: &'a str) -> Self {
        if line.starts_with(':') {
            return ProtocolLine::Comment;
        }
        if line.trim().is_empty() {
            return ProtocolLine::Blank;
        }
        match line.strip_prefix("data: ") {
            Some(rest) => {
                let payload = rest.trim();
                if payload == "[DONE]" {
                    ProtocolLine::Terminator
                } else {
                    ProtocolLine::Data(payload)
                }
            }
            None => ProtocolLine::Ignored,
        }
    }
}

/// Pull-based line framer over decoded text fragments.
///
/// Holds at most one trailing partial line between fragments. Complete lines
/// are pulled one at a time so the consumer can stop mid-fragment (on a
/// terminator, or to wait for more bytes after [`LineFramer::requeue`]).
#[derive(Debug, Default)]
pub struct LineFramer {
    pending: String,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a decoded fragment to the pending buffer.
    pub fn extend(&mut self, fragment: &str) {
        self.pending.push_str(fragment);
    }

    /// Pull the next complete line, stripping `\n` and one trailing `\r`.
    ///
    /// Returns `None` when only a partial line (or nothing) remains.
    pub fn next_line(&mut self) -> Option<String> {
        let idx = self.pending.find('\n')?;
        let mut line: String = self.pending.drain(..=idx).collect();
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
        Some(line)
    }

    /// Push a line back to the front of the buffer, rejoined with `\n`.
    ///
    /// Used when a `data:` payload fails JSON parsing and may be completed by
    /// bytes still in flight. Fails once the buffer exceeds
    /// [`MAX_PENDING_BYTES`], which means the payload is malformed for good.
    pub fn requeue(&mut self, line: &str) -> Result<()> {
        self.pending.insert(0, '\n');
        self.pending.insert_str(0, line);
        if self.pending.len() > MAX_PENDING_BYTES {
            return Err(Error::Framing(format!(
                "unparseable event data exceeded {} buffered bytes",
                MAX_PENDING_BYTES
            )));
        }
        Ok(())
    }

    /// Bytes currently buffered (partial line plus any re-queued lines).
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
