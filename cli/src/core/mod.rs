//! # gzpipe Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the core infrastructure shared by every command:
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and error handling utilities
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{GzpipeError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
