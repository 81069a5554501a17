//! Progress reporting while a conversation runs

pub mod reporter;
