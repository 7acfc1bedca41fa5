//! Drawing abstraction and renderers for the status panel
//!
//! This crate provides:
//! - `Canvas` trait: the drawing capability the renderers need
//! - `GraphicsCanvas`: a `Canvas` over any embedded-graphics `DrawTarget`
//! - Dashboard, matrix rain and ASCII art renderers
//! - `StatusPanel`: the application context driven by the firmware loop
//!
//! # Architecture
//!
//! ```text
//! SerialSource ──► LineAssembler ──► StatsModel ─┐
//!                                                ├──► renderers ──► Canvas
//! PressEdge ×3 ──► ModeController ───────────────┘
//! ```
//!
//! Everything in a tick runs to completion before the next one starts, so
//! renderers always read a fully merged model.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod art;
pub mod backend;
pub mod dashboard;
pub mod graphics;
pub mod palette;
pub mod panel;
pub mod rain;

// Re-export key types
pub use backend::{Canvas, DisplayError, TextSize, TextStyle};
pub use dashboard::{bar_fill_width, DashboardRenderer};
pub use graphics::GraphicsCanvas;
pub use panel::StatusPanel;
pub use rain::MatrixRainRenderer;
