//! Turn event types and the streaming response interpreter

use async_stream::stream;
use bytes::Bytes;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use tokio_stream::Stream;

use crate::{
    decode::Utf8Decoder,
    directive::{ChartDirective, extract_directives, strip_directives},
    error::Result,
    sse::{LineFramer, ProtocolLine},
};

/// Events emitted while interpreting one assistant turn
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnEvent {
    /// Visible text recomputed after a content delta.
    ///
    /// Replaces the previously shown assistant message; it is the whole
    /// message so far, not an increment.
    TextUpdate { text: String },
    /// Chart directives extracted from the final content, in order.
    /// Emitted at most once per turn, only when non-empty.
    Charts { charts: Vec<ChartDirective> },
    /// Turn completed; carries the final visible text
    Done { text: String },
    /// Fatal mid-stream failure; the stream ends after this
    Error { message: String },
}

impl TurnEvent {
    /// Check if this is a terminal event (Done or Error)
    pub fn is_terminal(&self) -> bool {
        matches!(self, TurnEvent::Done { .. } | TurnEvent::Error { .. })
    }
}

/// A stream of turn events
pub type TurnEventStream = Pin<Box<dyn Stream<Item = TurnEvent> + Send>>;

// Wire shape of one `data:` payload. Only `choices[0].delta.content` is
// consulted; everything else the gateway sends is ignored.

#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: StreamDelta,
}

#[derive(Debug, Default, Deserialize)]
struct StreamDelta {
    content: Option<String>,
}

impl StreamChunk {
    fn delta_content(&self) -> Option<&str> {
        self.choices.first()?.delta.content.as_deref()
    }
}

/// Interpret a raw SSE byte stream as turn events.
///
/// Pipeline per chunk: incremental UTF-8 decode, line framing, `data:`
/// payload parsing, content accumulation, visible-text recompute. Directive
/// extraction runs once, at stream end. Dropping the returned stream cancels
/// the turn; no further chunks are polled.
pub fn interpret<S>(byte_stream: S) -> TurnEventStream
where
    S: Stream<Item = Result<Bytes>> + Send + 'static,
{
    Box::pin(stream! {
        let mut chunks = std::pin::pin!(byte_stream);
        let mut decoder = Utf8Decoder::new();
        let mut framer = LineFramer::new();
        let mut content = String::new();

        'read: while let Some(next) = chunks.next().await {
            let bytes = match next {
                Ok(bytes) => bytes,
                Err(e) => {
                    yield TurnEvent::Error { message: e.to_string() };
                    return;
                }
            };
            framer.extend(&decoder.decode(&bytes));

            while let Some(line) = framer.next_line() {
                match ProtocolLine::classify(&line) {
                    ProtocolLine::Comment | ProtocolLine::Blank | ProtocolLine::Ignored => {}
                    ProtocolLine::Terminator => break 'read,
                    ProtocolLine::Data(payload) => {
                        match serde_json::from_str::<StreamChunk>(payload) {
                            Ok(chunk) => {
                                if let Some(delta) = chunk.delta_content() {
                                    if !delta.is_empty() {
                                        content.push_str(delta);
                                        yield TurnEvent::TextUpdate {
                                            text: strip_directives(&content),
                                        };
                                    }
                                }
                            }
                            Err(e) => {
                                // Assume the JSON was split across a chunk
                                // boundary; put the line back and wait for
                                // more bytes.
                                tracing::debug!(error = %e, "re-queuing unparsed event line");
                                if let Err(e) = framer.requeue(&line) {
                                    yield TurnEvent::Error { message: e.to_string() };
                                    return;
                                }
                                break;
                            }
                        }
                    }
                }
            }
        }

        let charts = extract_directives(&content);
        if !charts.is_empty() {
            yield TurnEvent::Charts { charts };
        }
        yield TurnEvent::Done { text: strip_directives(&content) };
    })
}
