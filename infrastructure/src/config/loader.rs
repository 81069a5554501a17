//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_CONFIG_FILES: [&str; 2] = ["sandbox.toml", ".sandbox.toml"];
const ENV_PREFIX: &str = "SANDBOX_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `SANDBOX_`-prefixed environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./sandbox.toml` or `./.sandbox.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/llm-sandbox/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load a single file on top of the defaults, ignoring every other source
    pub fn load_file(path: &Path) -> Result<FileConfig, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns `$XDG_CONFIG_HOME/llm-sandbox/config.toml` if set, otherwise
    /// the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("llm-sandbox").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");
        println!("  [     ] Env:     {}* variables", ENV_PREFIX);

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            println!("  [{}] Explicit: {}", mark, path.display());
        }

        match Self::project_config_path() {
            Some(path) => println!("  [FOUND] Project: {}", path.display()),
            None => println!("  [     ] Project: ./sandbox.toml or ./.sandbox.toml"),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            println!("  [{}] Global:  {}", mark, path.display());
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.conversation.turns, 6);
        assert!(config.output.color);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("llm-sandbox"));
    }

    #[test]
    fn test_load_file_merges_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[conversation]\nturns = 3\n\n[analytics]\nshift_threshold = 0.6").unwrap();

        let config = ConfigLoader::load_file(file.path()).unwrap();
        assert_eq!(config.conversation.turns, 3);
        assert_eq!(config.analytics.shift_threshold, 0.6);
        assert_eq!(config.conversation.max_tokens, 500);
    }

    #[test]
    fn test_load_file_rejects_bad_types() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[conversation]\nturns = \"many\"").unwrap();
        assert!(ConfigLoader::load_file(file.path()).is_err());
    }
}
