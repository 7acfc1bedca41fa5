//! Board-agnostic core logic for the status panel firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware or a drawing surface:
//!
//! - Persistent stats record merged from telemetry lines
//! - Display mode state machine and dashboard cadence
//! - Matrix rain animation state
//! - ASCII art gallery
//! - Panel profiles, layouts and the `panel.toml` parser

#![no_std]
#![deny(unsafe_code)]

pub mod art;
pub mod config;
pub mod matrix;
pub mod mode;
pub mod rng;
pub mod stats;
