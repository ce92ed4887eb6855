use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.sandbox.voice123.com/providers/search/";
pub const DEFAULT_SERVICE: &str = "voice_over";
pub const DEFAULT_PROFILE_BASE: &str = "https://voice123.com/";
pub const DEFAULT_FALLBACK_IMAGE: &str = "/user-fallback.webp";
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config::from_env()
});

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub service: String,
    pub request_timeout: Duration,
    pub fallback_image: Option<String>,
    pub audio_sample_override: Option<String>,
    pub profile_base: String,
    pub listen_addr: String,
}

impl Config {
    pub fn from_env() -> Config {
        Config {
            api_base: get_env_or_default("VOICE123_API_BASE", DEFAULT_API_BASE),
            service: get_env_or_default("VOICE123_SERVICE", DEFAULT_SERVICE),
            request_timeout: Duration::from_secs(get_env_u64_or_default(
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )),
            // An empty FALLBACK_IMAGE disables the fallback entirely.
            fallback_image: match env::var("FALLBACK_IMAGE") {
                Ok(v) if v.is_empty() => None,
                Ok(v) => Some(v),
                Err(_) => Some(DEFAULT_FALLBACK_IMAGE.to_string()),
            },
            audio_sample_override: get_optional_env("AUDIO_SAMPLE_URL"),
            profile_base: get_env_or_default("PROFILE_BASE_URL", DEFAULT_PROFILE_BASE),
            listen_addr: get_env_or_default("LISTEN_ADDR", DEFAULT_LISTEN_ADDR),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base: DEFAULT_API_BASE.to_string(),
            service: DEFAULT_SERVICE.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            fallback_image: Some(DEFAULT_FALLBACK_IMAGE.to_string()),
            audio_sample_override: None,
            profile_base: DEFAULT_PROFILE_BASE.to_string(),
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
        }
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn get_env_u64_or_default(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("ignoring non-numeric {key}={raw:?}, using {default}");
            default
        }),
        Err(_) => default,
    }
}
