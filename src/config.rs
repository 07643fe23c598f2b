use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub data_dir: PathBuf,
    pub exchange_rate_url: String,
    pub exchange_rate_timeout_secs: u64,
    pub environment: String,
    pub app_secret_key: String,
    pub log_requests: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8501".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let exchange_rate_url = env::var("EXCHANGE_RATE_URL")
            .unwrap_or_else(|_| "https://api.bluelytics.com.ar/v2/latest".to_string());

        let exchange_rate_timeout_secs = env::var("EXCHANGE_RATE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|_| "Invalid EXCHANGE_RATE_TIMEOUT_SECS")?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let app_secret_key = env::var("APP_SECRET_KEY")
            .map_err(|_| "APP_SECRET_KEY must be set for session signing")?;

        let log_requests = env::var("LOG_REQUESTS")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .map_err(|_| "Invalid LOG_REQUESTS")?;

        Ok(Config {
            server_host,
            server_port,
            data_dir,
            exchange_rate_url,
            exchange_rate_timeout_secs,
            environment,
            app_secret_key,
            log_requests,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Timeout applied to the outbound exchange-rate request
    pub fn exchange_rate_timeout(&self) -> Duration {
        Duration::from_secs(self.exchange_rate_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_address() {
        let config = Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 8501,
            data_dir: PathBuf::from("."),
            exchange_rate_url: "http://localhost/latest".to_string(),
            exchange_rate_timeout_secs: 5,
            environment: "test".to_string(),
            app_secret_key: "secret".to_string(),
            log_requests: false,
        };

        assert_eq!(config.server_address(), "127.0.0.1:8501");
        assert_eq!(config.exchange_rate_timeout(), Duration::from_secs(5));
    }
}
