//! Core types, syntax model, and configuration for marklint.
//!
//! This crate provides the foundational data structures used across all marklint crates:
//! - [`syntax`]: Lossless, arena-backed syntax trees with stable node ids
//! - [`markers`]: The closed catalog of generator markers
//! - [`semantic`]: The [`SemanticModel`](semantic::SemanticModel) resolution capability
//! - [`config`]: Configuration loading from `.marklint/marklint.json`

pub mod config;
pub mod markers;
pub mod semantic;
pub mod syntax;
