//! Environment-driven application configuration.
//!
//! All settings come from process environment variables, optionally
//! seeded from a `.env` file. Parsing goes through [`AppConfig::from_lookup`]
//! so tests can supply variables without touching the real environment.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

/// Environment variable holding the remote API credential.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Default model used for grounded answering.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default REST endpoint of the answering service.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default admission rate for `/ask`, in requests per second.
pub const DEFAULT_MAX_PER_SECOND: f64 = 3.0;

/// Default speech engine program.
pub const DEFAULT_SPEECH_PROGRAM: &str = "espeak-ng";

/// Default grace period between SIGTERM and SIGKILL.
pub const DEFAULT_STOP_TIMEOUT: Duration = Duration::from_secs(1);

/// Default listen address.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 5000;

/// Configuration errors. All of these are fatal at startup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The API credential is absent or blank.
    #[error("{API_KEY_VAR} is not set")]
    MissingApiKey,

    /// A rate limit of zero, negative or non-finite requests per second.
    #[error("Rate limit must be a positive number of calls per second, got {0}")]
    InvalidRate(f64),

    /// A variable could not be parsed.
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// How the admission controller serializes concurrent callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdmissionPolicy {
    /// Record the last start after the guarded call completes. Concurrent
    /// callers that pass the elapsed-time check together may burst.
    #[default]
    BestEffort,
    /// Reserve the next start slot under the lock before waiting.
    Strict,
}

impl FromStr for AdmissionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "best-effort" | "best_effort" | "besteffort" => Ok(Self::BestEffort),
            "strict" => Ok(Self::Strict),
            other => Err(format!("expected 'best-effort' or 'strict', got '{other}'")),
        }
    }
}

impl fmt::Display for AdmissionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BestEffort => write!(f, "best-effort"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

/// Remote answering service settings.
#[derive(Clone, PartialEq)]
pub struct AnswerSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
}

// Keep the credential out of logs.
impl fmt::Debug for AnswerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnswerSettings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Admission controller settings for `/ask`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdmissionSettings {
    pub max_per_second: f64,
    pub policy: AdmissionPolicy,
}

/// Speech engine and teardown settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechSettings {
    /// Program spawned once per utterance.
    pub program: String,
    /// Arguments passed to the program; the text arrives on stdin.
    pub args: Vec<String>,
    /// Grace period after SIGTERM before escalating to SIGKILL.
    pub stop_timeout: Duration,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            program: DEFAULT_SPEECH_PROGRAM.to_string(),
            args: vec!["--stdin".to_string()],
            stop_timeout: DEFAULT_STOP_TIMEOUT,
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            static_dir: None,
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub answer: AnswerSettings,
    pub admission: AdmissionSettings,
    pub speech: SpeechSettings,
    pub server: ServerSettings,
}

/// Load a `.env` file from the working directory or its parents, if any.
pub fn load_env_file() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "Loaded environment file"),
        Err(e) => debug!("No environment file loaded: {e}"),
    }
}

/// Check that a rate is usable and convert it into the minimum spacing
/// between guarded calls.
pub fn min_interval(max_per_second: f64) -> Result<Duration, ConfigError> {
    if !max_per_second.is_finite() || max_per_second <= 0.0 {
        return Err(ConfigError::InvalidRate(max_per_second));
    }
    Ok(Duration::from_secs_f64(1.0 / max_per_second))
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get(API_KEY_VAR).ok_or(ConfigError::MissingApiKey)?;

        let answer = AnswerSettings {
            api_key,
            model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: get("GEMINI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            temperature: parse_or(
                "GEMINI_TEMPERATURE",
                get("GEMINI_TEMPERATURE"),
                DEFAULT_TEMPERATURE,
            )?,
        };

        let max_per_second = parse_or(
            "ASK_MAX_PER_SECOND",
            get("ASK_MAX_PER_SECOND"),
            DEFAULT_MAX_PER_SECOND,
        )?;
        min_interval(max_per_second)?;

        let admission = AdmissionSettings {
            max_per_second,
            policy: parse_or("ASK_ADMISSION", get("ASK_ADMISSION"), AdmissionPolicy::default())?,
        };

        let mut speech = SpeechSettings::default();
        if let Some(program) = get("SPEECH_PROGRAM") {
            speech.program = program;
            // A custom program does not inherit espeak-ng's flags.
            speech.args = Vec::new();
        }
        if let Some(args) = get("SPEECH_ARGS") {
            speech.args = args.split_whitespace().map(str::to_string).collect();
        }
        let timeout_ms: u64 = parse_or(
            "SPEECH_STOP_TIMEOUT_MS",
            get("SPEECH_STOP_TIMEOUT_MS"),
            u64::try_from(DEFAULT_STOP_TIMEOUT.as_millis()).unwrap_or(1000),
        )?;
        speech.stop_timeout = Duration::from_millis(timeout_ms);

        let server = ServerSettings {
            host: get("ASKVOICE_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or("ASKVOICE_PORT", get("ASKVOICE_PORT"), DEFAULT_PORT)?,
            static_dir: get("ASKVOICE_STATIC_DIR").map(PathBuf::from),
        };

        Ok(Self {
            answer,
            admission,
            speech,
            server,
        })
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}
