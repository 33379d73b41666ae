//! Configuration module
//!
//! Server, dataset and dashboard settings loaded from a TOML file.

pub mod config;
