//! Core module for mdcodes
//!
//! This module contains the core types and file discovery.

pub mod scanner;
mod types;

pub use scanner::discover_files;
pub use types::*;
