use anyhow::{bail, Context, Result};

/// Model used when `GEMINI_MODEL_PRIMARY` is unset.
const DEFAULT_PRIMARY_MODEL: &str = "gemini-2.5-flash";
/// Model used when `GEMINI_MODEL_FALLBACK` is unset.
const DEFAULT_FALLBACK_MODEL: &str = "gemini-flash-latest";

/// Application configuration loaded from environment variables.
/// Startup fails before the listener binds if the API key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub primary_model: String,
    pub fallback_model: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            primary_model: std::env::var("GEMINI_MODEL_PRIMARY")
                .unwrap_or_else(|_| DEFAULT_PRIMARY_MODEL.to_string()),
            fallback_model: std::env::var("GEMINI_MODEL_FALLBACK")
                .unwrap_or_else(|_| DEFAULT_FALLBACK_MODEL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads a required variable; set-but-empty counts as missing.
fn require_env(key: &str) -> Result<String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => bail!("Required environment variable '{key}' is not set"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-wide; every GEMINI_*/PORT mutation stays inside
    // this one test so parallel test threads never observe a half-set
    // environment.
    #[test]
    fn test_from_env_key_requirement_and_defaults() {
        let vars = [
            "GEMINI_API_KEY",
            "GEMINI_MODEL_PRIMARY",
            "GEMINI_MODEL_FALLBACK",
            "PORT",
            "RUST_LOG",
        ];
        for var in vars {
            std::env::remove_var(var);
        }

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));

        std::env::set_var("GEMINI_API_KEY", "   ");
        assert!(
            Config::from_env().is_err(),
            "blank key must count as missing"
        );

        std::env::set_var("GEMINI_API_KEY", "test-key");
        let config = Config::from_env().unwrap();
        assert_eq!(config.gemini_api_key, "test-key");
        assert_eq!(config.primary_model, "gemini-2.5-flash");
        assert_eq!(config.fallback_model, "gemini-flash-latest");
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");

        std::env::set_var("GEMINI_MODEL_PRIMARY", "gemini-2.5-pro");
        std::env::set_var("PORT", "9090");
        let config = Config::from_env().unwrap();
        assert_eq!(config.primary_model, "gemini-2.5-pro");
        assert_eq!(config.port, 9090);

        std::env::set_var("PORT", "not-a-port");
        assert!(Config::from_env().is_err());

        for var in vars {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_require_env_rejects_blank_values() {
        std::env::set_var("GLOSSA_TEST_REQUIRED", " \t ");
        assert!(require_env("GLOSSA_TEST_REQUIRED").is_err());

        std::env::set_var("GLOSSA_TEST_REQUIRED", "value");
        assert_eq!(require_env("GLOSSA_TEST_REQUIRED").unwrap(), "value");

        std::env::remove_var("GLOSSA_TEST_REQUIRED");
    }
}
