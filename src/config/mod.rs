//! Service Configuration Module
//!
//! Settings are loaded from a TOML file, falling back to built-in defaults
//! for anything the file leaves out.
//!
//! ## Loading Order
//!
//! 1. `CROP_ADVISOR_CONFIG` environment variable (path to TOML file)
//! 2. `crop_advisor.toml` in the current working directory
//! 3. Built-in defaults
//!
//! An explicit `--config` flag bypasses the search and must load cleanly.
//!
//! ## Example
//!
//! ```toml
//! [server]
//! addr = "0.0.0.0:5000"
//!
//! [artifacts]
//! dir = "models"
//!
//! [ranking]
//! top_n = 3
//! exclude_zero_probability = false
//! ```

mod app_config;
pub mod defaults;
pub mod validation;

pub use app_config::*;
