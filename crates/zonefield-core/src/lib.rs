//! Core types and definitions for the ZONEFIELD terrain engine.
//!
//! This crate defines the vocabulary shared across all other crates:
//! pipeline configuration, tuning constants, and the error taxonomy.
//! It has no dependency on any runtime framework.

pub mod config;
pub mod constants;
pub mod error;

pub use config::TerrainConfig;
pub use error::TerrainError;

#[cfg(test)]
mod tests;
