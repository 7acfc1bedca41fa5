//! Display mode state machine
//!
//! Three buttons switch between the dashboard and the two decorative modes.
//! The controller is a plain value; the application context owns it and
//! asks it every tick what to draw.

pub mod events;
pub mod machine;

pub use events::*;
pub use machine::*;
