use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Directory holding one `YYYY-MM-DD.csv` file per scan.
    pub scans_dir: String,
    /// YAML asset and location database.
    pub assets_file: String,
    /// File name globs skipped while listing scans (editor backups, dotfiles).
    pub ignore_patterns: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scans_dir: "scans".to_string(),
            assets_file: "assets.yml".to_string(),
            ignore_patterns: vec!["*~".to_string(), ".*".to_string()],
        }
    }
}

pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    build_configuration(environment())
}

/// `ASSET_REPORTER_*` variables; `ASSET_REPORTER_IGNORE_PATTERNS` is a comma-separated list.
fn environment() -> Environment {
    Environment::with_prefix("ASSET_REPORTER")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("ignore_patterns")
}

fn build_configuration(environment: Environment) -> Result<AppConfig, ConfigError> {
    let defaults = AppConfig::default();
    let builder = Config::builder()
        .set_default("scans_dir", defaults.scans_dir)?
        .set_default("assets_file", defaults.assets_file)?
        .set_default("ignore_patterns", defaults.ignore_patterns)?
        .add_source(ConfigFile::with_name("Config").required(false))
        .add_source(environment)
        .build()?;
    builder.try_deserialize::<AppConfig>()
}
