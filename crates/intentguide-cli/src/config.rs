use anyhow::Context;
use clap::ValueEnum;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config template created when no config exists
const DEFAULT_CONFIG: &str = r#"
[corpus]
path = "corpus"  # Set via INTENTGUIDE_CORPUS env var

[logging]
level = "warn"  # trace, debug, info, warn, error; set via INTENTGUIDE_LOG

[output]
format = "text"  # or "json"
"#;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CorpusConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub corpus: CorpusConfig,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
    /// Problems met while loading, reported once logging is up
    #[serde(skip)]
    pub warnings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus: CorpusConfig {
                path: PathBuf::from("corpus"),
            },
            logging: LoggingConfig {
                level: "warn".to_string(),
            },
            output: OutputConfig {
                format: OutputFormat::Text,
            },
            warnings: Vec::new(),
        }
    }
}

impl Config {
    /// Get the global config path: ~/.intentguide/intentguide.toml
    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".intentguide").join("intentguide.toml"))
    }

    /// Ensure the config directory and file exist, creating defaults if needed
    fn ensure_config_file(config_path: &Path) -> anyhow::Result<()> {
        if let Some(config_dir) = config_path.parent() {
            if !config_dir.exists() {
                fs::create_dir_all(config_dir)
                    .with_context(|| format!("Failed to create {}", config_dir.display()))?;
                eprintln!("Created config directory: {}", config_dir.display());
            }
        }

        if !config_path.exists() {
            fs::write(config_path, DEFAULT_CONFIG.trim())
                .with_context(|| format!("Failed to create {}", config_path.display()))?;
            eprintln!("Created default config: {}", config_path.display());
        }

        Ok(())
    }

    /// Global config layer, skipped with a warning when it cannot be created
    fn global_layer(config_path: Option<PathBuf>, warnings: &mut Vec<String>) -> Option<PathBuf> {
        let config_path = config_path?;

        match Self::ensure_config_file(&config_path) {
            Ok(()) => Some(config_path),
            Err(e) => {
                warnings.push(format!("Skipping global config: {e:#}"));
                None
            }
        }
    }

    /// Load configuration with layered approach:
    /// 1. Global config: ~/.intentguide/intentguide.toml (auto-created if missing)
    /// 2. Local override: ./intentguide.toml (workspace, optional)
    /// 3. Explicit file passed with --config
    /// 4. Environment variables with INTENTGUIDE__ prefix
    /// 5. Convenience env vars (highest priority)
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        // Load .env file from current directory
        dotenvy::dotenv().ok();

        Self::build(Self::global_config_path(), explicit)
    }

    fn build(global: Option<PathBuf>, explicit: Option<&Path>) -> anyhow::Result<Self> {
        let mut warnings = Vec::new();

        let mut config_builder = config::Config::builder()
            .set_default("corpus.path", "corpus")?
            .set_default("logging.level", "warn")?
            .set_default("output.format", "text")?;

        // Layer 1: Global config (best effort)
        if let Some(global_config_path) = Self::global_layer(global, &mut warnings) {
            config_builder = config_builder.add_source(config::File::from(global_config_path));
        }

        // Layer 2: Local workspace config (optional override)
        config_builder =
            config_builder.add_source(config::File::with_name("intentguide").required(false));

        // Layer 3: Explicit config file (must exist)
        if let Some(path) = explicit {
            config_builder = config_builder.add_source(config::File::from(path));
        }

        // Layer 4: Environment variables, e.g. INTENTGUIDE__OUTPUT__FORMAT
        config_builder = config_builder
            .add_source(config::Environment::with_prefix("INTENTGUIDE").separator("__"));

        // Layer 5: Convenience env var overrides
        if let Ok(path) = env::var("INTENTGUIDE_CORPUS") {
            config_builder = config_builder.set_override("corpus.path", path)?;
        }

        if let Ok(level) = env::var("INTENTGUIDE_LOG") {
            config_builder = config_builder.set_override("logging.level", level)?;
        }

        let config = config_builder.build()?;

        let mut config: Self = config.try_deserialize()?;
        config.warnings = warnings;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_matches_default() {
        let parsed: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_json_format_parses() {
        let parsed: Config = toml::from_str(
            r#"
            [corpus]
            path = "/opt/app-intents"

            [logging]
            level = "debug"

            [output]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.output.format, OutputFormat::Json);
        assert_eq!(parsed.corpus.path, PathBuf::from("/opt/app-intents"));
    }

    #[test]
    fn test_unwritable_global_config_is_skipped() {
        let tmp = tempfile::TempDir::new().unwrap();
        let not_a_dir = tmp.path().join("home");
        fs::write(&not_a_dir, "").unwrap();
        let global = not_a_dir.join(".intentguide").join("intentguide.toml");

        let mut warnings = Vec::new();
        assert_eq!(Config::global_layer(Some(global.clone()), &mut warnings), None);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Failed to create"), "{}", warnings[0]);

        let config = Config::build(Some(global), None).unwrap();
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.warnings.len(), 1);
    }

    #[test]
    fn test_global_config_created_with_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let global = tmp.path().join(".intentguide").join("intentguide.toml");

        let config = Config::build(Some(global.clone()), None).unwrap();
        assert!(global.is_file());
        assert!(config.warnings.is_empty());
        assert_eq!(config.corpus.path, PathBuf::from("corpus"));
    }

    #[test]
    fn test_explicit_file_layered_over_global() {
        let tmp = tempfile::TempDir::new().unwrap();
        let explicit = tmp.path().join("custom.toml");
        fs::write(&explicit, "[output]\nformat = \"json\"\n").unwrap();

        let config = Config::build(None, Some(&explicit)).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result: Result<Config, _> = toml::from_str(
            r#"
            [corpus]
            path = "corpus"
            [logging]
            level = "warn"
            [output]
            format = "yaml"
            "#,
        );
        assert!(result.is_err());
    }
}
