// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! CLI module for rendering overlays.
//!
//! This module contains the command-line interface logic, including argument parsing
//! and the `render` command implementation.

// Modules
/// CLI arguments.
pub mod args;

/// Render logic.
pub mod render;
