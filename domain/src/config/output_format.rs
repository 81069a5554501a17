//! Output format value object

use serde::{Deserialize, Serialize};

/// How conversation results are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Transcript followed by the analytics report (default)
    #[default]
    Full,
    /// Transcript only
    Transcript,
    /// Machine-readable JSON
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_full() {
        assert_eq!(OutputFormat::default(), OutputFormat::Full);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&OutputFormat::Transcript).unwrap(), "\"transcript\"");
        let format: OutputFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, OutputFormat::Json);
    }
}
