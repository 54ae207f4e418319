use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::RecommendationOrder;

/// Prefix of environment overrides, e.g. `RISK_ANALYZER_LOGGING__LEVEL=debug`.
pub const ENV_PREFIX: &str = "RISK_ANALYZER";
/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "risk_analyzer";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub analysis: AnalysisSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSettings {
    pub recommendation_order: RecommendationOrder,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    pub pretty: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings { pretty: true }
    }
}

impl Settings {
    /// Defaults, then `risk_analyzer.{toml,yaml,json}` if present, then env.
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load(None)
    }

    /// Like [`Settings::new`], but an explicit file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .set_default("logging.level", "info")?
            .set_default("logging.format", "compact")?
            .set_default("analysis.recommendation_order", "canonical")?
            .set_default("output.pretty", true)?;

        let builder = match path {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => builder.add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.logging.format, LogFormat::Compact);
        assert_eq!(
            settings.analysis.recommendation_order,
            RecommendationOrder::Canonical
        );
        assert!(settings.output.pretty);
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[logging]\nlevel = \"debug\"\nformat = \"json\"\n\n[analysis]\nrecommendation_order = \"input\"\n\n[output]\npretty = false"
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert_eq!(settings.analysis.recommendation_order, RecommendationOrder::Input);
        assert!(!settings.output.pretty);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[output]\npretty = false").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.analysis.recommendation_order, RecommendationOrder::Canonical);
        assert!(!settings.output.pretty);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Settings::load(Some(&missing)).is_err());
    }
}
