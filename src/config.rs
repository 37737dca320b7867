//! Server configuration
//!
//! Read once at startup from flags, the environment and `.env`, then handed
//! to the components that need it. Nothing reads the environment after that.

use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::llm::gemini::{GeminiConfig, GeminiModel, DEFAULT_BASE_URL};

#[derive(Debug, Clone, Parser)]
#[command(name = "mindtrack-coach", version, about = "Mood classification and coach chat relay for MindTrack")]
pub struct Config {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    /// Gemini model id
    #[arg(long, env = "GEMINI_MODEL", default_value = "gemini-2.5-flash")]
    pub gemini_model: GeminiModel,

    /// Gemini API root
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub gemini_base_url: String,

    /// Address to listen on
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3030)]
    pub port: u16,

    /// Seconds to wait for the provider before giving up
    #[arg(long, env = "PROVIDER_TIMEOUT_SECS", default_value_t = 30,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub provider_timeout_secs: u64,

    /// Milliseconds between streamed chat tokens
    #[arg(long, env = "TOKEN_INTERVAL_MS", default_value_t = 50,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub token_interval_ms: u64,
}

impl Config {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn token_interval(&self) -> Duration {
        Duration::from_millis(self.token_interval_ms)
    }

    /// Provider settings derived from this configuration
    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.gemini_api_key.clone(),
            base_url: self.gemini_base_url.clone(),
            model: self.gemini_model.clone(),
            timeout: Duration::from_secs(self.provider_timeout_secs),
        }
    }
}
