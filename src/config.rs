use serde::Deserialize;
use std::path::Path;

const DEFAULT_SYSTEM_PROMPT: &str = "You are a friendly assistant chatting with a person. \
Answer in one short sentence. If you do not know something, say so.";

/// Errors raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Generation settings forwarded to the model runtime.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LlmOptions {
    pub temperature: f32,
    /// Context window in tokens.
    pub num_ctx: u64,
    /// Upper bound on generated tokens.
    pub max_tokens: i32,
    pub stop: Vec<String>,
    pub system_prompt: Option<String>,
    /// How many remembered messages accompany each request.
    pub memory_window: usize,
}

impl Default for LlmOptions {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            num_ctx: 2048,
            max_tokens: 256,
            stop: ["\n", ".", "?", "!"].into_iter().map(String::from).collect(),
            system_prompt: Some(DEFAULT_SYSTEM_PROMPT.to_string()),
            memory_window: 20,
        }
    }
}

/// Contents of a `tinychat.toml` file.
///
/// ```toml
/// [llm]
/// temperature = 0.3
/// stop = ["\n"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmOptions,
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

/// Load a [`Config`], or the defaults when no path is given.
///
/// # Examples
///
/// ```no_run
/// use tinychat::config::load;
/// # tokio_test::block_on(async {
/// let cfg = load(Some("tinychat.toml")).await.unwrap();
/// assert!(cfg.llm.num_ctx > 0);
/// # });
/// ```
pub async fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => {
            let text = tokio::fs::read_to_string(path).await?;
            Config::from_toml(&text)
        }
        None => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_runtime_settings() {
        let opts = LlmOptions::default();
        assert_eq!(opts.num_ctx, 2048);
        assert_eq!(opts.max_tokens, 256);
        assert!((opts.temperature - 0.1).abs() < f32::EPSILON);
        assert_eq!(opts.stop, ["\n", ".", "?", "!"]);
    }

    #[test]
    fn partial_table_keeps_other_defaults() {
        let cfg = Config::from_toml("[llm]\ntemperature = 0.7\nmemory_window = 4\n").unwrap();
        assert!((cfg.llm.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(cfg.llm.memory_window, 4);
        assert_eq!(cfg.llm.num_ctx, 2048);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn rejects_wrong_types() {
        let err = Config::from_toml("[llm]\nnum_ctx = \"big\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[tokio::test]
    async fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[llm]\nmax_tokens = 64").unwrap();
        let cfg = load(Some(file.path())).await.unwrap();
        assert_eq!(cfg.llm.max_tokens, 64);
    }

    #[tokio::test]
    async fn missing_path_yields_defaults() {
        let cfg = load(None::<&str>).await.unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[tokio::test]
    async fn unreadable_file_is_read_error() {
        let err = load(Some("/nonexistent/tinychat.toml")).await.unwrap_err();
        assert!(matches!(err, ConfigError::Read(_)));
    }
}
