//! Shared line grammar used by the transcript parsers.

pub mod whatsapp;

pub use whatsapp::{LineKind, build_timestamp, classify_line, parse_header};
