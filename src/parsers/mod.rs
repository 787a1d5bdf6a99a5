//! Transcript parsers.
//!
//! - [`WhatsAppParser`] - Parses WhatsApp `_chat.txt` exports

mod whatsapp;

pub use whatsapp::{ParseState, WhatsAppParser};
