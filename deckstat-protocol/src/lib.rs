//! Deckstat Telemetry Protocol
//!
//! This crate decodes the text stream a host writes to the status panel
//! over a serial link. Each update is one newline-terminated ASCII line of
//! `key=value` pairs separated by `;`:
//!
//! ```text
//! time=2026-02-27 13:45:12;hostname=cyberdeck;cpu=12.3;ram_percent=25.9;
//! ```
//!
//! - `\r` is ignored, `\n` ends a line, empty lines are ignored
//! - whitespace around keys and values is trimmed, the trailing `;` is optional
//! - unknown keys and malformed tokens are skipped, never fatal
//! - lines longer than [`MAX_LINE_LEN`] bytes are dropped as a whole
//! - a line may carry any subset of keys; omitted keys mean "unchanged"
//!
//! The protocol is one-way: the panel never answers.

#![no_std]
#![deny(unsafe_code)]

pub mod convert;
pub mod fields;
pub mod keys;
pub mod line;

pub use convert::{lenient_f32, lenient_i32};
pub use fields::{parse_line, split_key_value, Field, Fields};
pub use keys::{Key, KeySet};
pub use line::{LineAssembler, MAX_LINE_LEN};
