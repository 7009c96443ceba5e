use std::env;

/// Origins the eStove web client is served from
const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://localhost:3000",
    "https://estove-web.vercel.app",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deployment {
    Local,
    Dev,
    Stage,
    Prod,
}

impl Deployment {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Self::Dev,
            "stage" | "staging" => Self::Stage,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,
    pub database_max_connections: u32,
    pub database_connect_timeout_seconds: u64,

    // API settings
    pub api_host: String,
    pub api_port: u16,
    pub request_timeout_seconds: u64,
    pub cors_allowed_origins: Vec<String>,

    // Command relay
    pub command_queue_enabled: bool,

    // Application metadata
    pub deployment: Deployment,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            database_max_connections: 10,
            database_connect_timeout_seconds: 8,
            api_host: "0.0.0.0".to_string(),
            api_port: 3000,
            request_timeout_seconds: 30,
            cors_allowed_origins: DEFAULT_CORS_ORIGINS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            command_queue_enabled: true,
            deployment: Deployment::Local,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if required environment variables are not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let mut cors_allowed_origins = match env::var("CORS_ALLOWED_ORIGINS") {
            Ok(list) => parse_origins(&list),
            Err(_) => defaults.cors_allowed_origins,
        };
        if let Ok(frontend_url) = env::var("FRONTEND_URL")
            && !frontend_url.trim().is_empty()
            && !cors_allowed_origins.iter().any(|o| o == frontend_url.trim())
        {
            cors_allowed_origins.push(frontend_url.trim().to_string());
        }

        Ok(Self {
            // Database
            database_url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(defaults.database_max_connections),
            database_connect_timeout_seconds: env::var("DATABASE_CONNECT_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "8".to_string())
                .parse()
                .unwrap_or(defaults.database_connect_timeout_seconds),

            // API settings
            api_host: env::var("API_HOST").unwrap_or(defaults.api_host),
            api_port: env::var("API_PORT")
                .or_else(|_| env::var("PORT"))
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(defaults.api_port),
            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(defaults.request_timeout_seconds),
            cors_allowed_origins,

            // Command relay
            command_queue_enabled: env::var("COMMAND_QUEUE_ENABLED")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),

            // Application metadata
            deployment: Deployment::from_str(
                &env::var("DEPLOYMENT").unwrap_or_else(|_| "local".to_string()),
            ),
        })
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

fn parse_origins(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
