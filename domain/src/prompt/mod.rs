//! Prompt domain
//!
//! Templates for the directives sent to agents and to the transcript analyst.

mod template;

pub use template::SandboxPromptTemplate;
