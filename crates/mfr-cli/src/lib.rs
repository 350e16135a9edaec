//! mfr library - expose modules for testing
//!
//! This library exposes core modules needed for testing and integration.

pub mod commands;
pub mod common;
pub mod config_manager;
pub mod errors;
pub mod installer;
pub mod plugins;

pub use common::GlobalOpts;
pub use mfr_logger as logger;
