//! Core domain concepts shared across all subdomains.
//!
//! - [`id`]: identifier and timestamp generation
//! - [`tokens`]: token estimation and truncation

pub mod id;
pub mod tokens;
