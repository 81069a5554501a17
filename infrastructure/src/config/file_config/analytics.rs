//! Analytics configuration from TOML (`[analytics]` section)

use sandbox_domain::analytics::DEFAULT_SHIFT_THRESHOLD;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnalyticsConfig {
    /// Trajectory magnitude above which a step counts as a cognitive shift.
    pub shift_threshold: f64,
}

impl Default for FileAnalyticsConfig {
    fn default() -> Self {
        Self {
            shift_threshold: DEFAULT_SHIFT_THRESHOLD,
        }
    }
}
