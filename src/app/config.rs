use std::env;

const DEFAULT_PORT: u16 = 8787;
const DEFAULT_BIND_HOST: &str = "0.0.0.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            bind_host: lookup("BIND_HOST")
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_BIND_HOST.to_string()),
            port: lookup("PORT")
                .and_then(|value| value.trim().parse::<u16>().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }
}
