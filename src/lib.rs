//! Pattern Tree Library
//!
//! Builds ordered Component/Collection hierarchies from pattern library
//! directory trees.

pub mod builder;
pub mod classify;
pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod format;
pub mod logging;
pub mod types;
pub mod walk;
