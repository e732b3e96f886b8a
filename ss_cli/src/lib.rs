//! Internal modules for the bracket operator console.
//!
//! This library provides command parsing, configuration, roster loading and
//! rendering used by the ss_cli binary.

pub mod commands;
pub mod config;
pub mod console;
pub mod logging;
pub mod render;
pub mod roster;
