//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod analyze_conversation;
pub mod run_conversation;
