use std::net::SocketAddr;

const DEFAULT_PASSWORD: &str = "12345";
const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";
const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";

// Everything a handler needs to know about the process, read once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub password: String,
    pub ollama_url: String,
    pub ollama_model: String,
    pub host: String,
    pub port: u16,
    pub static_dir: String,
    pub log_path: String
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got {0:?}")]
    InvalidPort(String),
    #[error("invalid bind address {0}")]
    InvalidAddr(String)
}

impl Config {

    pub fn from_env() -> Result<Self, ConfigError> {

        Self::from_lookup(|key| std::env::var(key).ok())

    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>
    {

        // blank or unset password falls back to the default, never to "no auth"
        let password = lookup("PASSWORD")
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_PASSWORD.to_string());

        let ollama_url = lookup("OLLAMA_URL")
            .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let ollama_model = lookup("OLLAMA_MODEL")
            .unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string());

        let host = lookup("HOST")
            .unwrap_or_else(|| "127.0.0.1".to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 8000
        };

        let static_dir = lookup("STATIC_DIR")
            .unwrap_or_else(|| "static".to_string());

        // Use /app/requests.log in Docker, ./requests.log locally
        let log_path = lookup("LOG_PATH")
            .unwrap_or_else(|| "./requests.log".to_string());

        Ok(Config {
            password,
            ollama_url,
            ollama_model,
            host,
            port,
            static_dir,
            log_path
        })

    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {

        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::InvalidAddr(addr))

    }

    pub fn index_path(&self) -> String {

        format!("{}/index.html", self.static_dir.trim_end_matches('/'))

    }

}
