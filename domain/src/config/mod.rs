//! Configuration value objects shared by several layers

mod output_format;

pub use output_format::OutputFormat;
