//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use chrono::format::{Item, StrftimeItems};

use crate::models::SerialPolicy;

/// HTTP header name for the dashboard key.
pub const ADMIN_KEY_HEADER: &str = "X-Admin-Key";

/// Development default values - NEVER use in production.
pub mod defaults {
    pub const DEV_ADMIN_KEY: &str = "dev-admin-key-do-not-use-in-production";
    pub const DEV_HOST: &str = "127.0.0.1";
    pub const DEV_PORT: u16 = 8080;
    pub const DEV_PUBLIC_URL: &str = "http://127.0.0.1:8080/";
    pub const SCHOOL_LATENCY_MS: u64 = 1000;
    pub const STUDENT_LATENCY_MS: u64 = 1500;
    pub const SUBMISSION_TIMEOUT_SECS: u64 = 30;
    /// Matches a browser's en-US `toLocaleDateString()` output.
    pub const DATE_FORMAT: &str = "%-m/%-d/%Y";
}

/// Runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parse environment from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Check if this is a development environment.
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Check if this is a production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Timing of the asynchronous submission boundary.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionTiming {
    /// Delay before an added school is committed
    pub school_latency: Duration,
    /// Delay before a submitted student is committed
    pub student_latency: Duration,
    /// Upper bound on a pending operation, latency included
    pub timeout: Duration,
}

impl SubmissionTiming {
    /// No simulated latency; useful for tests.
    pub fn immediate() -> Self {
        Self {
            school_latency: Duration::ZERO,
            student_latency: Duration::ZERO,
            timeout: Duration::from_secs(defaults::SUBMISSION_TIMEOUT_SECS),
        }
    }
}

impl Default for SubmissionTiming {
    fn default() -> Self {
        Self {
            school_latency: Duration::from_millis(defaults::SCHOOL_LATENCY_MS),
            student_latency: Duration::from_millis(defaults::STUDENT_LATENCY_MS),
            timeout: Duration::from_secs(defaults::SUBMISSION_TIMEOUT_SECS),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime environment
    pub environment: Environment,
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Key required on dashboard routes
    pub admin_key: Option<String>,
    /// Origin and path that registration links are built on
    pub public_url: String,
    /// Directory for static frontend assets
    pub static_dir: Option<PathBuf>,
    /// How serial numbers are assigned
    pub serial_policy: SerialPolicy,
    /// Simulated latency and timeout for submissions
    pub timing: SubmissionTiming,
    /// Seed the demo schools and students at startup
    pub seed_demo: bool,
    /// chrono format string for the CSV "Submitted Date" column
    pub date_format: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In development mode (RUST_ENV=development) every variable has a default.
    /// In production mode (RUST_ENV=production) SRS_ADMIN_KEY and SRS_PUBLIC_URL
    /// are required and must not match the development defaults.
    ///
    /// Environment variables:
    /// - `RUST_ENV`: Environment (development/production) - REQUIRED
    /// - `SRS_HOST`: Server host (default: 127.0.0.1)
    /// - `SRS_PORT`: Server port (default: 8080)
    /// - `SRS_ADMIN_KEY`: Dashboard key
    /// - `SRS_PUBLIC_URL`: Base URL for registration links
    /// - `SRS_STATIC_DIR`: Static assets directory
    /// - `SRS_SERIAL_POLICY`: `auto` or `manual` (default: auto)
    /// - `SRS_SCHOOL_LATENCY_MS`: Simulated add-school latency (default: 1000)
    /// - `SRS_STUDENT_LATENCY_MS`: Simulated submission latency (default: 1500)
    /// - `SRS_SUBMISSION_TIMEOUT_SECS`: Pending operation timeout (default: 30)
    /// - `SRS_SEED_DEMO`: Seed demo data (default: true in development)
    /// - `SRS_DATE_FORMAT`: CSV submitted-date format (default: %-m/%-d/%Y)
    pub fn from_env() -> Result<Self, ConfigError> {
        let env_str = env::var("RUST_ENV").map_err(|_| ConfigError::MissingEnvVar("RUST_ENV"))?;

        let environment = Environment::parse(&env_str).ok_or(ConfigError::InvalidValue(
            "RUST_ENV must be 'development' or 'production'",
        ))?;

        let host = env::var("SRS_HOST").unwrap_or_else(|_| defaults::DEV_HOST.to_string());

        let port = env::var("SRS_PORT")
            .unwrap_or_else(|_| defaults::DEV_PORT.to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidValue("SRS_PORT must be a valid port number"))?;

        let admin_key = if environment.is_development() {
            Some(env::var("SRS_ADMIN_KEY").unwrap_or_else(|_| defaults::DEV_ADMIN_KEY.to_string()))
        } else {
            env::var("SRS_ADMIN_KEY").ok()
        };

        let public_url =
            env::var("SRS_PUBLIC_URL").unwrap_or_else(|_| defaults::DEV_PUBLIC_URL.to_string());

        let static_dir = env::var("SRS_STATIC_DIR").ok().map(PathBuf::from);

        let serial_policy = match env::var("SRS_SERIAL_POLICY") {
            Ok(v) => SerialPolicy::parse(&v).ok_or(ConfigError::InvalidValue(
                "SRS_SERIAL_POLICY must be 'auto' or 'manual'",
            ))?,
            Err(_) => SerialPolicy::default(),
        };

        let school_latency_ms = parse_u64(
            "SRS_SCHOOL_LATENCY_MS",
            defaults::SCHOOL_LATENCY_MS,
            "SRS_SCHOOL_LATENCY_MS must be a valid number",
        )?;
        let student_latency_ms = parse_u64(
            "SRS_STUDENT_LATENCY_MS",
            defaults::STUDENT_LATENCY_MS,
            "SRS_STUDENT_LATENCY_MS must be a valid number",
        )?;
        let timeout_secs = parse_u64(
            "SRS_SUBMISSION_TIMEOUT_SECS",
            defaults::SUBMISSION_TIMEOUT_SECS,
            "SRS_SUBMISSION_TIMEOUT_SECS must be a valid number",
        )?;

        let seed_demo = match env::var("SRS_SEED_DEMO") {
            Ok(v) => parse_bool(&v)
                .ok_or(ConfigError::InvalidValue("SRS_SEED_DEMO must be true or false"))?,
            Err(_) => environment.is_development(),
        };

        let date_format =
            env::var("SRS_DATE_FORMAT").unwrap_or_else(|_| defaults::DATE_FORMAT.to_string());

        let config = Config {
            environment,
            host,
            port,
            admin_key,
            public_url,
            static_dir,
            serial_policy,
            timing: SubmissionTiming {
                school_latency: Duration::from_millis(school_latency_ms),
                student_latency: Duration::from_millis(student_latency_ms),
                timeout: Duration::from_secs(timeout_secs),
            },
            seed_demo,
            date_format,
        };

        config.validate()?;

        if environment.is_production() {
            config.validate_production()?;
        }

        Ok(config)
    }

    /// Checks that apply to every environment.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.timing.timeout <= self.timing.school_latency
            || self.timing.timeout <= self.timing.student_latency
        {
            return Err(ConfigError::InvalidValue(
                "SRS_SUBMISSION_TIMEOUT_SECS must exceed the simulated latencies",
            ));
        }
        if self.date_format.trim().is_empty() {
            return Err(ConfigError::InvalidValue("SRS_DATE_FORMAT must not be empty"));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::InvalidValue(
                "SRS_DATE_FORMAT is not a valid chrono format string",
            ));
        }
        Ok(())
    }

    /// Validate that production configuration does not use development defaults.
    fn validate_production(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        match self.admin_key.as_deref() {
            None => errors.push(
                "SRS_ADMIN_KEY is not set. The dashboard cannot be used without it.".to_string(),
            ),
            Some(key) if key == defaults::DEV_ADMIN_KEY => errors.push(
                "SRS_ADMIN_KEY is using development default. Set a secure admin key.".to_string(),
            ),
            Some(_) => {}
        }

        if self.public_url == defaults::DEV_PUBLIC_URL {
            errors.push(format!(
                "SRS_PUBLIC_URL is using development default '{}'. Set the public address of the form.",
                defaults::DEV_PUBLIC_URL
            ));
        }

        if self.seed_demo {
            errors.push("SRS_SEED_DEMO must be false in production.".to_string());
        }

        if !errors.is_empty() {
            return Err(ConfigError::ProductionValidation(errors));
        }

        Ok(())
    }

    /// Get the server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if running in development mode.
    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }
}

fn parse_u64(var: &str, default: u64, message: &'static str) -> Result<u64, ConfigError> {
    match env::var(var) {
        Ok(v) => v.parse::<u64>().map_err(|_| ConfigError::InvalidValue(message)),
        Err(_) => Ok(default),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),

    #[error("Production configuration validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    ProductionValidation(Vec<String>),
}
