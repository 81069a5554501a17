//! Output formatting for transcripts and analytics reports

pub mod console;
