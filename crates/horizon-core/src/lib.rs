//! Core types and definitions for ImpactHorizon.
//!
//! This crate defines the vocabulary shared across all other crates:
//! impactor parameters, damage radii, exposure scores, monetary estimates,
//! configuration, constants, and the error taxonomy.
//! It performs no I/O beyond reading a configuration file.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod types;

pub use error::{ConfigError, HorizonError};
