//! swipehire-assistant: streaming response interpreter for the hiring assistant
//!
//! This crate turns the chunked `text/event-stream` body produced by the
//! assistant gateway into a stream of display-ready events: incremental
//! visible text (with embedded `<chart-data>` directives stripped) and, once
//! the stream ends, the ordered list of extracted chart directives.

pub mod client;
pub mod conversation;
pub mod decode;
pub mod directive;
pub mod error;
pub mod sse;
pub mod stream;

pub use client::{AssistantClient, CompanyData};
pub use conversation::{ChatMessage, Conversation, Role};
pub use directive::ChartDirective;
pub use error::{Error, Result};
pub use stream::{TurnEvent, TurnEventStream};
