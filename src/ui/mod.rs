//! UI rendering module for Skycast
//!
//! This module contains all the rendering logic for the terminal user
//! interface, using the ratatui library for TUI components. Every render
//! function receives the active `Palette` explicitly; nothing in here reads
//! theme state from the environment.

pub mod chart;
pub mod dashboard;
pub mod header;
pub mod help_overlay;

pub use dashboard::{render_dashboard, render_error};
pub use header::{render_footer, render_header};
pub use help_overlay::render as render_help_overlay;
