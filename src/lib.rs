//! Trauma triage core library
//!
//! Vital-sign risk scoring, treatment recommendations and case tracking for
//! the emergency triage service.

pub mod api;
pub mod error;
pub mod models;
pub mod scoring;
pub mod tracking;

pub use error::{Result, TriageError};

/// Application configuration
pub mod config {
    use std::time::Duration;

    use serde::Deserialize;

    use crate::error::Result;

    #[derive(Debug, Clone, Deserialize)]
    pub struct Config {
        pub server: ServerConfig,
        pub tracking: TrackingConfig,
        pub agent: AgentConfig,
        pub logging: LoggingConfig,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ServerConfig {
        pub host: String,
        pub port: u16,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct TrackingConfig {
        /// Size of the recent-patients list.
        pub recent_capacity: usize,
        pub case_prefix: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct AgentConfig {
        pub step_delay_ms: u64,
        pub final_delay_ms: u64,
    }

    impl AgentConfig {
        pub fn step_delay(&self) -> Duration {
            Duration::from_millis(self.step_delay_ms)
        }

        pub fn final_delay(&self) -> Duration {
            Duration::from_millis(self.final_delay_ms)
        }
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct LoggingConfig {
        /// Emit JSON log lines instead of human-readable ones.
        pub json: bool,
    }

    /// Load configuration from defaults, `config/` files and the environment
    pub fn load_config() -> Result<Config> {
        let env = std::env::var("TRIAGE_ENV").unwrap_or_else(|_| "development".into());
        load_config_for(&env)
    }

    pub fn load_config_for(env: &str) -> Result<Config> {
        let settings = ::config::Config::builder()
            // Start with default settings
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("tracking.recent_capacity", 20)?
            .set_default("tracking.case_prefix", "TR")?
            .set_default("agent.step_delay_ms", 2000)?
            .set_default("agent.final_delay_ms", 1500)?
            .set_default("logging.json", false)?
            .add_source(::config::File::with_name("config/default").required(false))
            // Override with environment-specific settings
            .add_source(::config::File::with_name(&format!("config/{}", env)).required(false))
            // Override with environment variables
            .add_source(::config::Environment::with_prefix("TRIAGE").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

}
