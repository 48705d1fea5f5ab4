use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

/// Gemini model every request is sent to.
pub const MODEL_ID: &str = "gemini-1.5-flash";

/// Instruction prepended to every generation call.
pub const SYSTEM_INSTRUCTION: &str = "Lee el título de la noticia provista en el enlace y analiza si tiene elementos de clickbait. Para identificar el clickbait, verifica si el título exagera, deja la información incompleta o sugiere misterio innecesario. Si detectas clickbait, responde brevemente a la pregunta implícita en el título. La respuesta debe proporcionar la información clave de la noticia de forma concisa. La noticia puede estar en español o inglés.";

const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct ClickbaitConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Secret<String>,
    pub api_base_url: String,
    pub timeout: Duration,
}

impl GeminiSettings {
    /// Settings pointing at the public Gemini endpoint.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            api_base_url: DEFAULT_GEMINI_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClickbaitConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        let timeout_secs = parse_timeout_secs(&get_env(
            "GEMINI_TIMEOUT_SECS",
            Some(&DEFAULT_TIMEOUT_SECS.to_string()),
        )?);

        Ok(ClickbaitConfig {
            common,
            gemini: GeminiSettings {
                api_key: Secret::new(get_env("GEMINI_API_KEY", None)?),
                api_base_url: get_env("GEMINI_API_BASE_URL", Some(DEFAULT_GEMINI_API_BASE))?,
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

/// Zero or unparseable values fall back to the default.
fn parse_timeout_secs(raw: &str) -> u64 {
    raw.trim()
        .parse()
        .ok()
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_TIMEOUT_SECS)
}

fn get_env(key: &str, default: Option<&str>) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) if !val.trim().is_empty() => Ok(val),
        _ => match default {
            Some(def) => Ok(def.to_string()),
            None => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} is required but not set",
                key
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_env_falls_back_to_default() {
        let value = get_env("CLICKBAIT_TEST_UNSET_WITH_DEFAULT", Some("fallback")).unwrap();
        assert_eq!(value, "fallback");
    }

    #[test]
    fn get_env_errors_on_missing_required_key() {
        let err = get_env("CLICKBAIT_TEST_UNSET_REQUIRED", None).unwrap_err();
        assert!(err.to_string().contains("CLICKBAIT_TEST_UNSET_REQUIRED"));
    }

    #[test]
    fn get_env_treats_blank_as_missing() {
        std::env::set_var("CLICKBAIT_TEST_BLANK", "  ");
        assert!(get_env("CLICKBAIT_TEST_BLANK", None).is_err());
    }

    #[test]
    fn timeout_falls_back_to_default_when_zero_or_invalid() {
        assert_eq!(parse_timeout_secs("0"), DEFAULT_TIMEOUT_SECS);
        assert_eq!(parse_timeout_secs("soon"), DEFAULT_TIMEOUT_SECS);
        assert_eq!(parse_timeout_secs("-5"), DEFAULT_TIMEOUT_SECS);
        assert_eq!(parse_timeout_secs(" 30 "), 30);
    }

    #[test]
    fn api_key_is_redacted_in_debug_output() {
        let settings = GeminiSettings::with_api_key("super-secret-key");
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("super-secret-key"));
    }
}
