//! Deckstat Hardware Abstraction Layer
//!
//! This crate defines the hardware capabilities the status panel consumes,
//! so the panel logic can run against a real board or against test doubles
//! on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  deckstat-display (StatusPanel::tick)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  deckstat-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  deckstat-firmware (RP2040 bindings)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`serial::SerialSource`] - Non-blocking access to received serial bytes
//! - [`gpio::InputPin`] - Digital input
//! - [`button::PressEdge`] - "Was just pressed" edge query

#![no_std]
#![deny(unsafe_code)]

pub mod button;
pub mod gpio;
pub mod serial;

// Re-export key traits at crate root for convenience
pub use button::{DebouncedButton, PressEdge};
pub use gpio::InputPin;
pub use serial::{SerialSource, UartConfig};
