use std::path::PathBuf;

use anyhow::{Context, Result};
use finsight_gemini::ModelId;
use serde::Deserialize;

/// Resolved runtime configuration for the CLI.
pub struct Config {
    pub api_key: String,
    pub model: ModelId,
}

/// On-disk shape of `~/.config/finsight/config.toml`. All fields optional.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_key: Option<String>,
    model: Option<String>,
}

impl Config {
    /// Resolve the runtime configuration.
    ///
    /// The API key is taken from the first source that provides one:
    /// `--api-key` flag, `GOOGLE_API_KEY`, `GEMINI_API_KEY`, then the config
    /// file. The model comes from `--model`, then the config file, then the
    /// default. A missing key is a startup error, never a pipeline error.
    pub fn resolve(api_key_flag: Option<String>, model_flag: Option<String>) -> Result<Self> {
        let file = FileConfig::load()?;
        let api_key = pick_api_key(
            api_key_flag,
            std::env::var("GOOGLE_API_KEY").ok(),
            std::env::var("GEMINI_API_KEY").ok(),
            file.api_key,
        )
        .context(
            "no API key found: pass --api-key, set GOOGLE_API_KEY or GEMINI_API_KEY, \
             or add api_key to ~/.config/finsight/config.toml",
        )?;
        Ok(Self { api_key, model: pick_model(model_flag, file.model) })
    }
}

impl FileConfig {
    fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("finsight").join("config.toml"))
    }

    /// Load the config file if present. A missing file is fine; an
    /// unreadable or malformed one is a startup error.
    fn load() -> Result<Self> {
        let Some(path) = Self::path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("invalid config file {}", path.display()))
    }
}

fn pick_api_key(
    flag: Option<String>,
    google_env: Option<String>,
    gemini_env: Option<String>,
    file: Option<String>,
) -> Option<String> {
    flag.or(google_env).or(gemini_env).or(file)
}

fn pick_model(flag: Option<String>, file: Option<String>) -> ModelId {
    flag.or(file).map(ModelId::from).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn api_key_flag_wins_over_every_other_source() {
        let key = pick_api_key(some("flag"), some("google"), some("gemini"), some("file"));
        assert_eq!(key.as_deref(), Some("flag"));
    }

    #[test]
    fn api_key_environment_order_is_google_then_gemini_then_file() {
        assert_eq!(
            pick_api_key(None, some("google"), some("gemini"), some("file")).as_deref(),
            Some("google")
        );
        assert_eq!(
            pick_api_key(None, None, some("gemini"), some("file")).as_deref(),
            Some("gemini")
        );
        assert_eq!(pick_api_key(None, None, None, some("file")).as_deref(), Some("file"));
        assert_eq!(pick_api_key(None, None, None, None), None);
    }

    #[test]
    fn model_defaults_to_the_latest_pro() {
        assert_eq!(pick_model(None, None), ModelId::Gemini25Pro);
    }

    #[test]
    fn model_flag_wins_over_the_config_file() {
        let model = pick_model(some("gemini-1.5-pro"), some("gemini-1.0-pro"));
        assert_eq!(model, ModelId::Gemini15Pro);
        assert_eq!(model.display_name(), "Gemini 1.5 Pro");
    }

    #[test]
    fn config_file_parses_with_optional_fields() {
        let file: FileConfig = toml::from_str(
            r#"
api_key = "key-from-file"
model = "gemini-1.5-pro"
"#,
        )
        .expect("config parses");
        assert_eq!(file.api_key.as_deref(), Some("key-from-file"));
        assert_eq!(pick_model(None, file.model), ModelId::Gemini15Pro);

        let empty: FileConfig = toml::from_str("").expect("empty config parses");
        assert!(empty.api_key.is_none());
        assert!(empty.model.is_none());
    }
}
